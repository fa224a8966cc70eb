use std::fmt::Debug;
use std::marker::PhantomData;

use super::angle::{degrees_to_radians, Degrees, Radians};
use super::vector::{vector_from_point, vector_scale, Vector};
use super::{Point2, PRECISION};
use crate::error::{GeometryError, Result};

/// Marker for the coordinate space a [`Point`] lives in.
pub trait Space: Copy + Debug + PartialEq + Default + 'static {}

/// World coordinates shared by the whole scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Global;

/// Coordinates relative to a single element's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Local;

impl Space for Global {}
impl Space for Local {}

/// A 2D position tagged with its coordinate space.
///
/// The tag is zero-sized, so a `Point<S>` is exactly two `f64`s. Points in
/// different spaces do not mix: converting requires [`Point::cast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S: Space> {
    inner: Point2,
    space: PhantomData<S>,
}

/// A point in world coordinates.
pub type GlobalPoint = Point<Global>;

/// A point in element-relative coordinates.
pub type LocalPoint = Point<Local>;

impl<S: Space> Point<S> {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            inner: Point2::new(x, y),
            space: PhantomData,
        }
    }

    /// The point `(0, 0)`.
    #[must_use]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    /// Returns the coordinates as an untagged nalgebra point.
    #[must_use]
    pub fn as_point2(&self) -> Point2 {
        self.inner
    }

    /// Returns `true` when both coordinates are finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.x.is_finite() && self.inner.y.is_finite()
    }

    /// Reinterprets the same coordinates in another space.
    ///
    /// This does not transform anything; callers are responsible for
    /// applying the element offset/rotation first.
    #[must_use]
    pub fn cast<T: Space>(self) -> Point<T> {
        Point::new(self.inner.x, self.inner.y)
    }
}

impl<S: Space> Default for Point<S> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<S: Space> From<(f64, f64)> for Point<S> {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl<S: Space> From<Point<S>> for Point2 {
    fn from(p: Point<S>) -> Self {
        p.inner
    }
}

impl<S: Space> TryFrom<&[f64]> for Point<S> {
    type Error = GeometryError;

    fn try_from(values: &[f64]) -> Result<Self> {
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
        Ok(Self::new(*x, *y))
    }
}

/// Builds a point from a number array, or `None` unless it has exactly two
/// elements. Values are not checked for finiteness; use
/// `Point::try_from` for that.
#[must_use]
pub fn point_from_array<S: Space>(values: &[f64]) -> Option<Point<S>> {
    match values {
        [x, y] => Some(Point::new(*x, *y)),
        _ => None,
    }
}

#[must_use]
pub fn point_from_pair<S: Space>(pair: [f64; 2]) -> Point<S> {
    Point::new(pair[0], pair[1])
}

/// The point `v` leads to when starting from `offset`.
#[must_use]
pub fn point_from_vector<S: Space>(v: &Vector, offset: Point<S>) -> Point<S> {
    Point::new(offset.x() + v.x, offset.y() + v.y)
}

/// Returns `true` when `values` has the shape of a point: two finite numbers.
#[must_use]
pub fn is_point(values: &[f64]) -> bool {
    values.len() == 2 && values.iter().all(|v| v.is_finite())
}

/// Compares two points coordinate by coordinate with an absolute
/// `tolerance` (usually [`PRECISION`]).
#[must_use]
pub fn points_equal<S: Space>(a: Point<S>, b: Point<S>, tolerance: f64) -> bool {
    (a.x() - b.x()).abs() < tolerance && (a.y() - b.y()).abs() < tolerance
}

/// [`points_equal`] with the default [`PRECISION`].
#[must_use]
pub fn points_close<S: Space>(a: Point<S>, b: Point<S>) -> bool {
    points_equal(a, b, PRECISION)
}

/// Rotates `p` around `center` by `angle`.
#[must_use]
pub fn point_rotate_rads<S: Space>(p: Point<S>, center: Point<S>, angle: Radians) -> Point<S> {
    let (sin, cos) = angle.0.sin_cos();
    let dx = p.x() - center.x();
    let dy = p.y() - center.y();
    Point::new(
        dx * cos - dy * sin + center.x(),
        dx * sin + dy * cos + center.y(),
    )
}

/// Rotates `p` around `center` by `angle` degrees.
#[must_use]
pub fn point_rotate_degs<S: Space>(p: Point<S>, center: Point<S>, angle: Degrees) -> Point<S> {
    point_rotate_rads(p, center, degrees_to_radians(angle))
}

/// Moves `p` by `v`.
#[must_use]
pub fn point_translate<S: Space>(p: Point<S>, v: &Vector) -> Point<S> {
    Point::new(p.x() + v.x, p.y() + v.y)
}

/// The midpoint of `a` and `b`.
#[must_use]
pub fn point_center<S: Space>(a: Point<S>, b: Point<S>) -> Point<S> {
    Point::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0)
}

/// Euclidean distance.
#[must_use]
pub fn point_distance<S: Space>(a: Point<S>, b: Point<S>) -> f64 {
    (b.x() - a.x()).hypot(b.y() - a.y())
}

/// Squared distance. Saves the square root when only comparing.
#[must_use]
pub fn point_distance_sq<S: Space>(a: Point<S>, b: Point<S>) -> f64 {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    dx * dx + dy * dy
}

/// Dilates `p` away from `mid` by `multiplier`.
#[must_use]
pub fn point_scale_from_origin<S: Space>(p: Point<S>, mid: Point<S>, multiplier: f64) -> Point<S> {
    point_translate(mid, &vector_scale(&vector_from_point(p, mid), multiplier))
}

/// Returns `true` when `q` lies in the axis-aligned box spanned by `p` and
/// `r`, boundary included. An approximation of "`q` lies on segment `pr`".
#[must_use]
pub fn is_point_within_bounds<S: Space>(p: Point<S>, q: Point<S>, r: Point<S>) -> bool {
    q.x() <= p.x().max(r.x())
        && q.x() >= p.x().min(r.x())
        && q.y() <= p.y().max(r.y())
        && q.y() >= p.y().min(r.y())
}

/// Distance from `p` to the infinite line through `start` and `end`.
///
/// Not clamped to the segment. A degenerate line (`start == end`) falls back
/// to the distance to `start`.
#[must_use]
pub fn perpendicular_distance<S: Space>(p: Point<S>, start: Point<S>, end: Point<S>) -> f64 {
    let dx = end.x() - start.x();
    let dy = end.y() - start.y();
    if dx == 0.0 && dy == 0.0 {
        return point_distance(p, start);
    }
    (dy * p.x() - dx * p.y() + end.x() * start.y() - end.y() * start.x()).abs() / dx.hypot(dy)
}
