pub mod angle;
pub mod point;
pub mod range;
pub mod utils;
pub mod vector;

pub use angle::{Degrees, Radians};
pub use point::{Global, GlobalPoint, Local, LocalPoint, Point, Space};
pub use vector::Vector;

/// Raw 2D point type used for storage inside the branded [`Point`].
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Absolute tolerance for point equality and near-zero tests.
///
/// Coordinates with very large or very small magnitudes must be rescaled
/// before being compared against it.
pub const PRECISION: f64 = 10e-5;
