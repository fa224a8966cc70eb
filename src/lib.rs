pub mod error;
pub mod ga;
pub mod geometry;
pub mod log;
pub mod math;

pub use error::{GeometryError, Result};
pub use ga::NVector;
pub use geometry::{Curve, Ellipse, Line, LineSegment, Polygon, Rectangle};
pub use math::{Degrees, GlobalPoint, LocalPoint, Point, Radians, Vector};
