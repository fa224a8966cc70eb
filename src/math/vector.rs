use super::point::{Point, Space};
use super::Vector2;
use crate::error::{GeometryError, Result};

/// A free 2D vector: direction and magnitude, no position.
pub type Vector = Vector2;

/// Creates a vector from its components.
#[must_use]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Creates the vector pointing from `(origin_x, origin_y)` to `(x, y)`.
#[must_use]
pub fn vector_from_origin(x: f64, y: f64, origin_x: f64, origin_y: f64) -> Vector {
    Vector::new(x - origin_x, y - origin_y)
}

/// Turns a point into the vector that leads to it from `origin`.
#[must_use]
pub fn vector_from_point<S: Space>(p: Point<S>, origin: Point<S>) -> Vector {
    Vector::new(p.x() - origin.x(), p.y() - origin.y())
}

/// Returns `true` when `values` holds exactly two finite numbers.
#[must_use]
pub fn is_vector(values: &[f64]) -> bool {
    values.len() == 2 && values.iter().all(|v| v.is_finite())
}

/// Validates a raw slice and converts it into a [`Vector`].
///
/// # Errors
///
/// Returns [`GeometryError::InvalidLength`] unless the slice has exactly two
/// elements, and [`GeometryError::NonFinite`] if either is NaN or infinite.
pub fn vector_from_slice(values: &[f64]) -> Result<Vector> {
    let [x, y] = values else {
        return Err(GeometryError::InvalidLength {
            expected: 2,
            found: values.len(),
        });
    };
    for &value in [x, y] {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite { value });
        }
    }
    Ok(Vector::new(*x, *y))
}

/// 2D cross product, the signed area of the parallelogram spanned by `a`
/// and `b`. Positive when `b` lies counter-clockwise from `a`.
#[must_use]
pub fn vector_cross(a: &Vector, b: &Vector) -> f64 {
    a.x * b.y - b.x * a.y
}

/// Dot product.
#[must_use]
pub fn vector_dot(a: &Vector, b: &Vector) -> f64 {
    a.dot(b)
}

#[must_use]
pub fn vector_add(a: &Vector, b: &Vector) -> Vector {
    a + b
}

#[must_use]
pub fn vector_subtract(a: &Vector, b: &Vector) -> Vector {
    a - b
}

#[must_use]
pub fn vector_scale(v: &Vector, scalar: f64) -> Vector {
    v * scalar
}

/// Squared length. Use this when only comparing lengths.
#[must_use]
pub fn vector_magnitude_sq(v: &Vector) -> f64 {
    v.x * v.x + v.y * v.y
}

/// Length of the vector, computed with `hypot` to avoid overflow.
#[must_use]
pub fn vector_magnitude(v: &Vector) -> f64 {
    v.x.hypot(v.y)
}

/// Scales the vector to unit length.
///
/// The zero vector normalizes to the zero vector.
#[must_use]
pub fn vector_normalize(v: &Vector) -> Vector {
    let m = vector_magnitude(v);
    if m == 0.0 {
        return Vector::zeros();
    }
    Vector::new(v.x / m, v.y / m)
}

/// Perpendicular of `v` rotated clockwise in a y-up frame: `(v.y, -v.x)`.
#[must_use]
pub fn vector_normal(v: &Vector) -> Vector {
    Vector::new(v.y, -v.x)
}
