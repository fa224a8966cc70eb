pub mod curve;
pub mod ellipse;
pub mod line;
pub mod polygon;
pub mod rectangle;
pub mod segment;

pub use curve::{Curve, NewtonParams};
pub use ellipse::Ellipse;
pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use segment::LineSegment;
