use crate::math::{Point, Space};

/// An infinite line through two distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<S: Space> {
    pub a: Point<S>,
    pub b: Point<S>,
}

impl<S: Space> Line<S> {
    /// Creates the line through `a` and `b`.
    #[must_use]
    pub fn new(a: Point<S>, b: Point<S>) -> Self {
        Self { a, b }
    }
}

/// Intersection point of two infinite lines.
///
/// Solves the 2x2 system of the lines in `A·x + B·y = C` form. Returns `None`
/// when the determinant is exactly zero, which covers both parallel and
/// coincident lines.
#[must_use]
pub fn lines_intersect_at<S: Space>(a: &Line<S>, b: &Line<S>) -> Option<Point<S>> {
    let a1 = a.b.y() - a.a.y();
    let b1 = a.a.x() - a.b.x();
    let a2 = b.b.y() - b.a.y();
    let b2 = b.a.x() - b.b.x();
    let det = a1 * b2 - a2 * b1;
    if det == 0.0 {
        return None;
    }
    let c1 = a1 * a.a.x() + b1 * a.a.y();
    let c2 = a2 * b.a.x() + b2 * b.a.y();
    Some(Point::new((c1 * b2 - c2 * b1) / det, (a1 * c2 - a2 * c1) / det))
}
