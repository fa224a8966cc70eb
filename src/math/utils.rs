use super::point::{perpendicular_distance, Point, Space};
use super::PRECISION;

/// Axis-aligned bounds as `[min_x, min_y, max_x, max_y]`.
pub type Bounds = [f64; 4];

/// How [`round`] and [`round_to_step`] settle on an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    #[default]
    Round,
    Floor,
    Ceil,
}

impl RoundingMode {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Round => value.round(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
        }
    }
}

/// Restricts `value` to `[min, max]`.
///
/// Unlike [`f64::clamp`] this does not panic when `min > max`; `max` wins.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Rounds `value` to `precision` decimal places.
///
/// `f64::EPSILON` is added first so that values like `1.005` round up.
#[must_use]
pub fn round(value: f64, precision: i32, mode: RoundingMode) -> f64 {
    let multiplier = 10f64.powi(precision);
    mode.apply((value + f64::EPSILON) * multiplier) / multiplier
}

/// Rounds `value` to the nearest multiple of `step`.
#[must_use]
pub fn round_to_step(value: f64, step: f64, mode: RoundingMode) -> f64 {
    let factor = 1.0 / step;
    mode.apply(value * factor) / factor
}

#[must_use]
pub fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

#[must_use]
pub fn is_finite_number(value: f64) -> bool {
    value.is_finite()
}

/// Absolute tolerance comparison.
#[must_use]
pub fn is_close_to(a: f64, b: f64, precision: f64) -> bool {
    (a - b).abs() < precision
}

/// [`is_close_to`] with the default [`PRECISION`].
#[must_use]
pub fn is_close(a: f64, b: f64) -> bool {
    is_close_to(a, b, PRECISION)
}

/// Returns `true` when two bounding boxes overlap or touch.
#[must_use]
pub fn do_bounds_intersect(a: &Bounds, b: &Bounds) -> bool {
    let [min_x1, min_y1, max_x1, max_y1] = *a;
    let [min_x2, min_y2, max_x2, max_y2] = *b;
    min_x1 <= max_x2 && max_x1 >= min_x2 && min_y1 <= max_y2 && max_y1 >= min_y2
}

/// Simplifies a polyline with the Ramer–Douglas–Peucker algorithm.
///
/// Points closer than `epsilon` to the chord of their span are dropped. The
/// first and last points are always kept.
#[must_use]
pub fn simplify_polyline<S: Space>(points: &[Point<S>], epsilon: f64) -> Vec<Point<S>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_polyline(&points[..=index], epsilon);
        let right = simplify_polyline(&points[index..], epsilon);
        // Shared split point.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GlobalPoint;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamp_basic() {
        assert_abs_diff_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_abs_diff_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_abs_diff_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn round_modes() {
        assert_abs_diff_eq!(round(1.005, 2, RoundingMode::Round), 1.01);
        assert_abs_diff_eq!(round(1.239, 2, RoundingMode::Floor), 1.23);
        assert_abs_diff_eq!(round(1.231, 2, RoundingMode::Ceil), 1.24);
        assert_abs_diff_eq!(round(1234.5, -2, RoundingMode::Round), 1200.0);
    }

    #[test]
    fn round_to_step_grid() {
        assert_abs_diff_eq!(round_to_step(7.3, 5.0, RoundingMode::Round), 5.0);
        assert_abs_diff_eq!(round_to_step(7.6, 5.0, RoundingMode::Round), 10.0);
        assert_abs_diff_eq!(round_to_step(7.6, 5.0, RoundingMode::Floor), 5.0);
        assert_abs_diff_eq!(round_to_step(0.26, 0.25, RoundingMode::Ceil), 0.5);
    }

    #[test]
    fn scalar_helpers() {
        assert_abs_diff_eq!(average(2.0, 5.0), 3.5);
        assert!(is_finite_number(1.0));
        assert!(!is_finite_number(f64::NAN));
        assert!(!is_finite_number(f64::NEG_INFINITY));
        assert!(is_close(1.0, 1.00001));
        assert!(!is_close(1.0, 1.001));
        assert!(is_close_to(1.0, 1.4, 0.5));
    }

    #[test]
    fn bounds_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        assert!(do_bounds_intersect(&a, &[5.0, 5.0, 15.0, 15.0]));
        assert!(do_bounds_intersect(&a, &[10.0, 0.0, 20.0, 10.0]));
        assert!(!do_bounds_intersect(&a, &[11.0, 0.0, 20.0, 10.0]));
        assert!(!do_bounds_intersect(&a, &[0.0, -5.0, 10.0, -1.0]));
    }

    #[test]
    fn simplify_drops_collinear_points() {
        let pts: Vec<GlobalPoint> = (0..=10)
            .map(|i| GlobalPoint::new(f64::from(i), 0.0))
            .collect();
        let out = simplify_polyline(&pts, 0.1);
        assert_eq!(out, vec![pts[0], pts[10]]);
    }

    #[test]
    fn simplify_keeps_corners() {
        let pts = vec![
            GlobalPoint::new(0.0, 0.0),
            GlobalPoint::new(1.0, 0.01),
            GlobalPoint::new(2.0, 0.0),
            GlobalPoint::new(2.0, 1.0),
            GlobalPoint::new(2.01, 2.0),
            GlobalPoint::new(2.0, 3.0),
        ];
        let out = simplify_polyline(&pts, 0.1);
        assert_eq!(
            out,
            vec![
                GlobalPoint::new(0.0, 0.0),
                GlobalPoint::new(2.0, 0.0),
                GlobalPoint::new(2.0, 3.0),
            ]
        );
    }

    #[test]
    fn simplify_short_input_is_unchanged() {
        let pts = vec![GlobalPoint::new(0.0, 0.0), GlobalPoint::new(1.0, 1.0)];
        assert_eq!(simplify_polyline(&pts, 10.0), pts);
        assert!(simplify_polyline::<crate::math::Global>(&[], 1.0).is_empty());
    }
}
