use super::line::{lines_intersect_at, Line};
use crate::math::point::{point_center, point_from_vector, point_rotate_rads};
use crate::math::vector::{
    vector_add, vector_cross, vector_from_point, vector_scale, vector_subtract,
};
use crate::math::{Point, Radians, Space, PRECISION};

/// A bounded segment from `start` to `end`.
///
/// The order matters for parametrization: `t = 0` is `start`, `t = 1` is `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment<S: Space> {
    pub start: Point<S>,
    pub end: Point<S>,
}

impl<S: Space> LineSegment<S> {
    /// Creates the segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point<S>, end: Point<S>) -> Self {
        Self { start, end }
    }

    /// Returns `true` when both endpoints are valid points.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// The infinite line this segment lies on.
    #[must_use]
    pub fn to_line(&self) -> Line<S> {
        Line::new(self.start, self.end)
    }
}

/// Rotates both endpoints by `angle` around `origin`, or around the segment's
/// midpoint when no origin is given.
#[must_use]
pub fn line_segment_rotate<S: Space>(
    segment: &LineSegment<S>,
    angle: Radians,
    origin: Option<Point<S>>,
) -> LineSegment<S> {
    let center = origin.unwrap_or_else(|| point_center(segment.start, segment.end));
    LineSegment::new(
        point_rotate_rads(segment.start, center, angle),
        point_rotate_rads(segment.end, center, angle),
    )
}

/// Intersection of two segments via the parametric cross-product solve.
///
/// Both parameters must fall in the half-open range `[0, 1)`, so a crossing
/// exactly at the far endpoint of either segment is not reported. A crossing
/// exactly at the start of `b` (`u == 0`) is rejected as well.
#[must_use]
pub fn segments_intersect_at<S: Space>(a: &LineSegment<S>, b: &LineSegment<S>) -> Option<Point<S>> {
    let origin = Point::<S>::origin();
    let a0 = vector_from_point(a.start, origin);
    let a1 = vector_from_point(a.end, origin);
    let b0 = vector_from_point(b.start, origin);
    let b1 = vector_from_point(b.end, origin);
    let r = vector_subtract(&a1, &a0);
    let s = vector_subtract(&b1, &b0);
    let denominator = vector_cross(&r, &s);

    if denominator == 0.0 {
        return None;
    }

    let i = vector_subtract(&b0, &a0);
    let u = vector_cross(&i, &r) / denominator;
    let t = vector_cross(&i, &s) / denominator;

    if u == 0.0 {
        return None;
    }

    if (0.0..1.0).contains(&t) && (0.0..1.0).contains(&u) {
        let p = vector_add(&a0, &vector_scale(&r, t));
        return Some(point_from_vector(&p, origin));
    }

    None
}

/// Distance from `p` to the closest point of `segment`.
///
/// A zero-length segment measures to its start point.
#[must_use]
pub fn distance_to_line_segment<S: Space>(p: Point<S>, segment: &LineSegment<S>) -> f64 {
    let (x1, y1) = (segment.start.x(), segment.start.y());
    let (x2, y2) = (segment.end.x(), segment.end.y());
    let a = p.x() - x1;
    let b = p.y() - y1;
    let c = x2 - x1;
    let d = y2 - y1;

    let dot = a * c + b * d;
    let len_sq = c * c + d * d;
    let param = if len_sq == 0.0 { -1.0 } else { dot / len_sq };

    let (xx, yy) = if param < 0.0 {
        (x1, y1)
    } else if param > 1.0 {
        (x2, y2)
    } else {
        (x1 + param * c, y1 + param * d)
    };

    let dx = p.x() - xx;
    let dy = p.y() - yy;
    (dx * dx + dy * dy).sqrt()
}

/// Returns `true` when `p` is within `threshold` of the segment.
#[must_use]
pub fn point_on_line_segment<S: Space>(
    p: Point<S>,
    segment: &LineSegment<S>,
    threshold: f64,
) -> bool {
    let distance = distance_to_line_segment(p, segment);
    distance == 0.0 || distance < threshold
}

/// Intersection of two segments, found by intersecting their supporting lines
/// and keeping the point only if it lies on both segments (within
/// `threshold`, default [`PRECISION`]).
#[must_use]
pub fn line_segment_intersection_points<S: Space>(
    a: &LineSegment<S>,
    b: &LineSegment<S>,
    threshold: Option<f64>,
) -> Option<Point<S>> {
    let threshold = threshold.unwrap_or(PRECISION);
    let candidate = lines_intersect_at(&a.to_line(), &b.to_line())?;
    if !point_on_line_segment(candidate, b, threshold)
        || !point_on_line_segment(candidate, a, threshold)
    {
        return None;
    }
    Some(candidate)
}
