use std::f64::consts::{PI, TAU};
use std::ops::{Add, Mul, Neg, Sub};

use super::point::{Point, Space};
use super::utils::clamp;
use super::vector::{vector_dot, vector_from_point, vector_magnitude};
use super::PRECISION;

/// An angle in radians. Trigonometry only ever sees this unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Radians(pub f64);

/// An angle in degrees, for API boundaries that want it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Degrees(pub f64);

macro_rules! impl_angle_ops {
    ($t:ident) => {
        impl Add for $t {
            type Output = $t;
            fn add(self, rhs: $t) -> $t {
                $t(self.0 + rhs.0)
            }
        }

        impl Sub for $t {
            type Output = $t;
            fn sub(self, rhs: $t) -> $t {
                $t(self.0 - rhs.0)
            }
        }

        impl Neg for $t {
            type Output = $t;
            fn neg(self) -> $t {
                $t(-self.0)
            }
        }

        impl Mul<f64> for $t {
            type Output = $t;
            fn mul(self, rhs: f64) -> $t {
                $t(self.0 * rhs)
            }
        }
    };
}

impl_angle_ops!(Radians);
impl_angle_ops!(Degrees);

/// Maps any angle into `[0, 2π)`.
#[must_use]
pub fn normalize_radians(angle: Radians) -> Radians {
    Radians(((angle.0 % TAU) + TAU) % TAU)
}

/// Converts cartesian `(x, y)` to polar `(radius, angle)`, angle in `[0, 2π)`.
#[must_use]
pub fn cartesian_to_polar<S: Space>(p: Point<S>) -> (f64, Radians) {
    (
        p.x().hypot(p.y()),
        normalize_radians(Radians(p.y().atan2(p.x()))),
    )
}

#[must_use]
pub fn degrees_to_radians(degrees: Degrees) -> Radians {
    Radians(degrees.0 * PI / 180.0)
}

#[must_use]
pub fn radians_to_degrees(radians: Radians) -> Degrees {
    Degrees(radians.0 * 180.0 / PI)
}

/// Returns `true` when `angle` is a multiple of 90°, using `sin(2θ) = 0`.
#[must_use]
pub fn is_right_angle_rads(angle: Radians) -> bool {
    (2.0 * angle.0).sin().abs() < PRECISION
}

/// Tests whether `angle` lies in the range from `min` to `max`.
///
/// When `min > max` (after normalization) the range wraps through zero.
#[must_use]
pub fn radians_between_angles(angle: Radians, min: Radians, max: Radians) -> bool {
    let a = normalize_radians(angle).0;
    let min = normalize_radians(min).0;
    let max = normalize_radians(max).0;

    if min < max {
        return a >= min && a <= max;
    }
    a >= min || a <= max
}

/// Shortest angular distance between `a` and `b`, in `[0, π]`.
#[must_use]
pub fn radians_difference(a: Radians, b: Radians) -> Radians {
    let mut diff = normalize_radians(a).0 - normalize_radians(b).0;
    if diff < -PI {
        diff += TAU;
    } else if diff > PI {
        diff -= TAU;
    }
    Radians(diff.abs())
}

/// The angle at vertex `p1` between the legs to `p0` and `p2`, in `[0, π]`.
///
/// Zero-length legs yield `0`.
#[must_use]
pub fn angle_between<S: Space>(p0: Point<S>, p1: Point<S>, p2: Point<S>) -> Radians {
    let a = vector_from_point(p0, p1);
    let b = vector_from_point(p2, p1);
    let mag_a = vector_magnitude(&a);
    let mag_b = vector_magnitude(&b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return Radians(0.0);
    }
    let cos = clamp(vector_dot(&a, &b) / (mag_a * mag_b), -1.0, 1.0);
    Radians(cos.acos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GlobalPoint;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn normalize_into_full_turn() {
        let wrapped = normalize_radians(Radians(-FRAC_PI_2)).0;
        assert_abs_diff_eq!(wrapped, 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_radians(Radians(5.0 * PI)).0, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_radians(Radians(TAU)).0, 0.0);
        assert_abs_diff_eq!(normalize_radians(Radians(-TAU)).0, 0.0);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_tau() {
        let r = normalize_radians(Radians(-1e-20)).0;
        assert!((0.0..TAU).contains(&r), "r={r}");
    }

    #[test]
    fn degree_conversions() {
        assert_abs_diff_eq!(degrees_to_radians(Degrees(180.0)).0, PI);
        assert_abs_diff_eq!(radians_to_degrees(Radians(FRAC_PI_2)).0, 90.0);
    }

    #[test]
    fn right_angles() {
        for k in -4..=4 {
            assert!(is_right_angle_rads(Radians(f64::from(k) * FRAC_PI_2)), "k={k}");
        }
        assert!(!is_right_angle_rads(Radians(0.3)));
        assert!(!is_right_angle_rads(Radians(PI / 4.0)));
    }

    #[test]
    fn between_plain_range() {
        assert!(radians_between_angles(Radians(1.0), Radians(0.5), Radians(1.5)));
        assert!(!radians_between_angles(Radians(2.0), Radians(0.5), Radians(1.5)));
    }

    #[test]
    fn between_wrapping_range() {
        let min = Radians(3.0 * FRAC_PI_2);
        let max = Radians(FRAC_PI_2);
        assert!(radians_between_angles(Radians(0.0), min, max));
        assert!(radians_between_angles(Radians(-0.5), min, max));
        assert!(!radians_between_angles(Radians(PI), min, max));
    }

    #[test]
    fn difference_takes_short_way() {
        let forward = radians_difference(Radians(0.1), Radians(TAU - 0.1)).0;
        let backward = radians_difference(Radians(TAU - 0.1), Radians(0.1)).0;
        assert_abs_diff_eq!(forward, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(backward, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(radians_difference(Radians(0.0), Radians(PI)).0, PI, epsilon = 1e-12);
    }

    #[test]
    fn polar_coordinates() {
        let (r, a) = cartesian_to_polar(GlobalPoint::new(0.0, -2.0));
        assert_abs_diff_eq!(r, 2.0);
        assert_abs_diff_eq!(a.0, 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn angle_at_vertex() {
        let a = angle_between(
            GlobalPoint::new(1.0, 0.0),
            GlobalPoint::new(0.0, 0.0),
            GlobalPoint::new(0.0, 5.0),
        );
        assert_abs_diff_eq!(a.0, FRAC_PI_2, epsilon = 1e-12);

        let straight = angle_between(
            GlobalPoint::new(-1.0, 0.0),
            GlobalPoint::new(0.0, 0.0),
            GlobalPoint::new(3.0, 0.0),
        );
        assert_abs_diff_eq!(straight.0, PI, epsilon = 1e-12);
    }

    #[test]
    fn angle_with_zero_leg_is_zero() {
        let p = GlobalPoint::new(2.0, 2.0);
        assert_eq!(angle_between(p, p, GlobalPoint::new(5.0, 1.0)), Radians(0.0));
    }

    #[test]
    fn unit_arithmetic() {
        assert_eq!(Radians(1.0) + Radians(2.0), Radians(3.0));
        assert_eq!(-Degrees(30.0), Degrees(-30.0));
        assert_eq!(Degrees(10.0) * 3.0, Degrees(30.0));
    }
}
