use super::line::Line;
use super::segment::LineSegment;
use crate::error::{GeometryError, Result};
use crate::math::point::{point_distance, point_from_vector, points_close};
use crate::math::vector::{vector, vector_dot, vector_from_point};
use crate::math::{Point, Space, PRECISION};

/// Foot-point refinement passes in [`ellipse_distance_from_point`].
const FOOT_POINT_ITERATIONS: usize = 3;

/// Default threshold for [`ellipse_touches_point`].
pub const ELLIPSE_TOUCH_THRESHOLD: f64 = PRECISION;

/// An axis-aligned ellipse.
///
/// There is no rotation: callers rotate the query points into the ellipse's
/// frame instead. A zero half axis degenerates to a segment or a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse<S: Space> {
    pub center: Point<S>,
    pub half_width: f64,
    pub half_height: f64,
}

impl<S: Space> Ellipse<S> {
    /// Creates an ellipse without checking the half axes.
    #[must_use]
    pub fn new(center: Point<S>, half_width: f64, half_height: f64) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// Creates an ellipse, rejecting negative half axes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NegativeAxis`] if either half axis is negative,
    /// and [`GeometryError::NonFinite`] if either is NaN or infinite.
    pub fn try_new(center: Point<S>, half_width: f64, half_height: f64) -> Result<Self> {
        for (axis, value) in [("half width", half_width), ("half height", half_height)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { value });
            }
            if value < 0.0 {
                return Err(GeometryError::NegativeAxis { axis, value });
            }
        }
        Ok(Self::new(center, half_width, half_height))
    }
}

/// Returns `true` when `p` lies inside or on the ellipse.
#[must_use]
pub fn ellipse_includes_point<S: Space>(p: Point<S>, ellipse: &Ellipse<S>) -> bool {
    let nx = (p.x() - ellipse.center.x()) / ellipse.half_width;
    let ny = (p.y() - ellipse.center.y()) / ellipse.half_height;
    nx * nx + ny * ny <= 1.0
}

/// Returns `true` when `p` is within `threshold` of the ellipse outline.
#[must_use]
pub fn ellipse_touches_point<S: Space>(p: Point<S>, ellipse: &Ellipse<S>, threshold: f64) -> bool {
    ellipse_distance_from_point(p, ellipse) <= threshold
}

/// Approximate Euclidean distance from `p` to the ellipse outline.
///
/// Works in the first quadrant of the centered frame and refines the foot
/// point with three fixed passes of the evolute-based update, starting from
/// the 45° direction. The result is approximate by construction.
#[must_use]
pub fn ellipse_distance_from_point<S: Space>(p: Point<S>, ellipse: &Ellipse<S>) -> f64 {
    let a = ellipse.half_width;
    let b = ellipse.half_height;
    let translated = vector_from_point(p, ellipse.center);
    let px = translated.x.abs();
    let py = translated.y.abs();

    let mut tx = 0.707_f64;
    let mut ty = 0.707_f64;

    for _ in 0..FOOT_POINT_ITERATIONS {
        let x = a * tx;
        let y = b * ty;

        let ex = (a * a - b * b) * tx.powi(3) / a;
        let ey = (b * b - a * a) * ty.powi(3) / b;

        let rx = x - ex;
        let ry = y - ey;
        let qx = px - ex;
        let qy = py - ey;

        let r = ry.hypot(rx);
        let q = qy.hypot(qx);

        tx = ((qx * r / q + ex) / a).clamp(0.0, 1.0);
        ty = ((qy * r / q + ey) / b).clamp(0.0, 1.0);
        let t = ty.hypot(tx);
        tx /= t;
        ty /= t;
    }

    let foot = Point::<S>::new(a * tx * sign(translated.x), b * ty * sign(translated.y));
    point_distance(point_from_vector(&translated, Point::origin()), foot)
}

/// Intersections of a segment with the ellipse outline.
///
/// Substitutes the segment's parametric form into the implicit equation and
/// keeps the roots with `t` in `[0, 1]`, ordered by `t`. A tangent segment
/// (zero discriminant) yields one point, a miss yields none.
#[must_use]
pub fn ellipse_segment_intercept_points<S: Space>(
    ellipse: &Ellipse<S>,
    segment: &LineSegment<S>,
) -> Vec<Point<S>> {
    let rx = ellipse.half_width;
    let ry = ellipse.half_height;
    let s0 = segment.start;
    let s1 = segment.end;

    let dir = vector_from_point(s1, s0);
    let diff = vector_from_point(s0, ellipse.center);
    let m_dir = vector(dir.x / (rx * rx), dir.y / (ry * ry));
    let m_diff = vector(diff.x / (rx * rx), diff.y / (ry * ry));

    let a = vector_dot(&dir, &m_dir);
    let b = vector_dot(&dir, &m_diff);
    let c = vector_dot(&diff, &m_diff) - 1.0;
    let d = b * b - a * c;

    let at = |t: f64| Point::new(s0.x() + (s1.x() - s0.x()) * t, s0.y() + (s1.y() - s0.y()) * t);
    let in_range = |t: f64| (0.0..=1.0).contains(&t);

    let mut intersections = Vec::new();
    if d > 0.0 {
        let t_a = (-b - d.sqrt()) / a;
        let t_b = (-b + d.sqrt()) / a;
        if in_range(t_a) {
            intersections.push(at(t_a));
        }
        if in_range(t_b) {
            intersections.push(at(t_b));
        }
    } else if d == 0.0 {
        let t = -b / a;
        if in_range(t) {
            intersections.push(at(t));
        }
    }

    intersections
}

/// Intersections of an infinite line with the ellipse outline.
///
/// Candidates that come out NaN (the line misses) are dropped, and a double
/// root is reported once.
#[must_use]
pub fn ellipse_line_intersection_points<S: Space>(
    ellipse: &Ellipse<S>,
    line: &Line<S>,
) -> Vec<Point<S>> {
    let (cx, cy) = (ellipse.center.x(), ellipse.center.y());
    let hw2 = ellipse.half_width * ellipse.half_width;
    let hh2 = ellipse.half_height * ellipse.half_height;

    let x1 = line.a.x() - cx;
    let y1 = line.a.y() - cy;
    let x2 = line.b.x() - cx;
    let y2 = line.b.y() - cy;
    let dx = x2 - x1;
    let dy = y2 - y1;

    let a = dx * dx / hw2 + dy * dy / hh2;
    let b = 2.0 * (x1 * dx / hw2 + y1 * dy / hh2);
    let c = x1 * x1 / hw2 + y1 * y1 / hh2 - 1.0;
    let root = (b * b - 4.0 * a * c).sqrt();

    let t1 = (-b + root) / (2.0 * a);
    let t2 = (-b - root) / (2.0 * a);

    let candidates: Vec<Point<S>> = [t1, t2]
        .into_iter()
        .map(|t| Point::new(x1 + t * dx + cx, y1 + t * dy + cy))
        .filter(|p| !p.x().is_nan() && !p.y().is_nan())
        .collect();

    if candidates.len() == 2 && points_close(candidates[0], candidates[1]) {
        return vec![candidates[0]];
    }
    candidates
}

/// Like [`f64::signum`], except that zero maps to zero.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Global, GlobalPoint};
    use approx::assert_abs_diff_eq;

    fn gp(x: f64, y: f64) -> GlobalPoint {
        GlobalPoint::new(x, y)
    }

    fn e(cx: f64, cy: f64, hw: f64, hh: f64) -> Ellipse<Global> {
        Ellipse::new(gp(cx, cy), hw, hh)
    }

    #[test]
    fn includes_boundary_points() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        for p in [gp(2.0, 0.0), gp(-2.0, 0.0), gp(0.0, 1.0), gp(0.0, -1.0)] {
            assert!(ellipse_includes_point(p, &el), "p={p:?}");
        }
        assert!(ellipse_includes_point(gp(0.5, 0.5), &el));
    }

    #[test]
    fn excludes_outside_points() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        assert!(!ellipse_includes_point(gp(-1.0, 1.0), &el));
        assert!(!ellipse_includes_point(gp(-1.4, 0.8), &el));
    }

    #[test]
    fn distance_on_axis() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        assert_abs_diff_eq!(ellipse_distance_from_point(gp(5.0, 0.0), &el), 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ellipse_distance_from_point(gp(0.0, -4.0), &el), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_to_circle() {
        let el = e(1.0, 1.0, 2.0, 2.0);
        let d = ellipse_distance_from_point(gp(4.0, 5.0), &el);
        assert_abs_diff_eq!(d, 3.0, epsilon = 1e-3);
    }

    #[test]
    fn distance_to_elongated_ellipse_after_three_passes() {
        // Not yet converged: further passes settle near 0.0409665.
        let el = e(0.0, 0.0, 100.0, 1.0);
        let d = ellipse_distance_from_point(gp(99.0, 0.1), &el);
        assert_abs_diff_eq!(d, 0.041_018_353_955, epsilon = 1e-9);
    }

    #[test]
    fn distance_on_outline_is_small() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        let angle: f64 = 0.6;
        let p = gp(2.0 * angle.cos(), angle.sin());
        assert!(ellipse_distance_from_point(p, &el) < 1e-2);
    }

    #[test]
    fn touches_point_with_threshold() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        assert!(ellipse_touches_point(gp(2.0, 0.0), &el, ELLIPSE_TOUCH_THRESHOLD));
        assert!(!ellipse_touches_point(gp(3.0, 0.0), &el, ELLIPSE_TOUCH_THRESHOLD));
        assert!(ellipse_touches_point(gp(2.5, 0.0), &el, 0.6));
    }

    #[test]
    fn segment_intercepts_circle() {
        let el = e(0.0, 0.0, 2.0, 2.0);
        let s = LineSegment::new(gp(-10.0, 0.0), gp(10.0, 0.0));
        let hits = ellipse_segment_intercept_points(&el, &s);
        assert_eq!(hits, vec![gp(-2.0, 0.0), gp(2.0, 0.0)]);
    }

    #[test]
    fn segment_ending_inside_hits_once() {
        let el = e(0.0, 0.0, 2.0, 2.0);
        let s = LineSegment::new(gp(-10.0, 0.0), gp(0.0, 0.0));
        let hits = ellipse_segment_intercept_points(&el, &s);
        assert_eq!(hits, vec![gp(-2.0, 0.0)]);
    }

    #[test]
    fn segment_outside_misses() {
        let el = e(0.0, 0.0, 2.0, 2.0);
        let far = LineSegment::new(gp(10.0, 10.0), gp(20.0, 20.0));
        assert!(ellipse_segment_intercept_points(&el, &far).is_empty());
        let short = LineSegment::new(gp(5.0, 0.0), gp(10.0, 0.0));
        assert!(ellipse_segment_intercept_points(&el, &short).is_empty());
    }

    #[test]
    fn segment_tangent_touches_once() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        let s = LineSegment::new(gp(-4.0, 1.0), gp(4.0, 1.0));
        let hits = ellipse_segment_intercept_points(&el, &s);
        assert_eq!(hits, vec![gp(0.0, 1.0)]);
    }

    #[test]
    fn line_intersects_beyond_points() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        let l = Line::new(gp(-0.5, 0.0), gp(0.5, 0.0));
        let hits = ellipse_line_intersection_points(&el, &l);
        assert_eq!(hits.len(), 2);
        assert_abs_diff_eq!(hits[0].x(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[1].x(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn line_tangent_deduplicates() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        let l = Line::new(gp(-1.0, 1.0), gp(1.0, 1.0));
        let hits = ellipse_line_intersection_points(&el, &l);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].x(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].y(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn line_miss_is_empty() {
        let el = e(0.0, 0.0, 2.0, 1.0);
        let l = Line::new(gp(-1.0, 3.0), gp(1.0, 3.0));
        assert!(ellipse_line_intersection_points(&el, &l).is_empty());
    }

    #[test]
    fn try_new_validates_axes() {
        assert!(Ellipse::try_new(gp(0.0, 0.0), 1.0, 0.0).is_ok());
        assert!(matches!(
            Ellipse::try_new(gp(0.0, 0.0), -1.0, 1.0),
            Err(GeometryError::NegativeAxis { axis: "half width", .. })
        ));
        assert!(matches!(
            Ellipse::try_new(gp(0.0, 0.0), 1.0, f64::NAN),
            Err(GeometryError::NonFinite { .. })
        ));
    }
}
