//! Plane-based projective geometric algebra for 2D.
//!
//! Multivectors have eight components over the basis
//! `1, e0, e1, e2, e01, e20, e12, e012`. Points are bivectors (`e12` is the
//! homogeneous weight), lines are vectors. [`NVector::join`] of two points
//! gives the line through them, [`NVector::meet`] of two lines their
//! intersection point.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use crate::error::{GeometryError, Result};

/// Labels of the basis blades, by component index.
const BASIS: [&str; 8] = ["1", "e0", "e1", "e2", "e01", "e20", "e12", "e012"];

/// Components smaller than this are left out of the [`Display`](fmt::Display)
/// form.
const DISPLAY_EPSILON: f64 = 1e-6;

/// A multivector of 2D projective geometric algebra.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NVector(pub [f64; 8]);

pub const E0: NVector = NVector([0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
pub const E1: NVector = NVector([0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
pub const E2: NVector = NVector([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
pub const E01: NVector = NVector([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
pub const E20: NVector = NVector([0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
pub const E12: NVector = NVector([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
pub const E012: NVector = NVector([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
/// The pseudoscalar.
pub const I: NVector = E012;

impl NVector {
    /// The single basis blade `index`, scaled by `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BasisIndexOutOfRange`] if `index > 7`.
    pub fn nvector(value: f64, index: usize) -> Result<Self> {
        let mut components = [0.0; 8];
        *components
            .get_mut(index)
            .ok_or(GeometryError::BasisIndexOutOfRange(index))? = value;
        Ok(Self(components))
    }

    /// The Euclidean point `(x, y)`.
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        Self([0.0, 0.0, 0.0, 0.0, y, x, 1.0, 0.0])
    }

    #[must_use]
    pub fn origin() -> Self {
        Self::point(0.0, 0.0)
    }

    /// Unit ideal point (direction) towards `(x, y)`.
    #[must_use]
    pub fn direction(x: f64, y: f64) -> Self {
        let norm = x.hypot(y);
        Self([0.0, 0.0, 0.0, 0.0, y / norm, x / norm, 0.0, 0.0])
    }

    /// Ideal point `(x, y)` without normalization.
    #[must_use]
    pub fn offset(x: f64, y: f64) -> Self {
        Self([0.0, 0.0, 0.0, 0.0, y, x, 0.0, 0.0])
    }

    /// Euclidean x of a point-like multivector, before normalization.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[5]
    }

    /// Euclidean y of a point-like multivector, before normalization.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[4]
    }

    // ── involutions ──

    #[must_use]
    pub fn reverse(&self) -> Self {
        let a = &self.0;
        Self([a[0], a[1], a[2], a[3], -a[4], -a[5], -a[6], -a[7]])
    }

    /// Poincaré duality: maps each blade to its complement.
    #[must_use]
    pub fn dual(&self) -> Self {
        let a = &self.0;
        Self([a[7], a[6], a[5], a[4], a[3], a[2], a[1], a[0]])
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        let a = &self.0;
        Self([a[0], -a[1], -a[2], -a[3], -a[4], -a[5], -a[6], a[7]])
    }

    #[must_use]
    pub fn involute(&self) -> Self {
        let a = &self.0;
        Self([a[0], -a[1], -a[2], -a[3], a[4], a[5], a[6], -a[7]])
    }

    // ── products ──

    /// Geometric product, also available as `self * other`.
    #[must_use]
    pub fn geometric_product(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        Self([
            self.mul_scalar(other),
            b[1] * a[0] + b[0] * a[1] - b[4] * a[2] + b[5] * a[3] + b[2] * a[4] - b[3] * a[5]
                - b[7] * a[6]
                - b[6] * a[7],
            b[2] * a[0] + b[0] * a[2] - b[6] * a[3] + b[3] * a[6],
            b[3] * a[0] + b[6] * a[2] + b[0] * a[3] - b[2] * a[6],
            b[4] * a[0] + b[2] * a[1] - b[1] * a[2] + b[7] * a[3] + b[0] * a[4] + b[6] * a[5]
                - b[5] * a[6]
                + b[3] * a[7],
            b[5] * a[0] - b[3] * a[1] + b[7] * a[2] + b[1] * a[3] - b[6] * a[4] + b[0] * a[5]
                + b[4] * a[6]
                + b[2] * a[7],
            b[6] * a[0] + b[3] * a[2] - b[2] * a[3] + b[0] * a[6],
            b[7] * a[0] + b[6] * a[1] + b[5] * a[2] + b[4] * a[3] + b[3] * a[4] + b[2] * a[5]
                + b[1] * a[6]
                + b[0] * a[7],
        ])
    }

    /// Scalar part of the geometric product.
    #[must_use]
    pub fn mul_scalar(&self, other: &Self) -> f64 {
        let a = &self.0;
        let b = &other.0;
        b[0] * a[0] + b[2] * a[2] + b[3] * a[3] - b[6] * a[6]
    }

    /// Outer product. For two lines, their intersection point.
    #[must_use]
    pub fn meet(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        Self([
            b[0] * a[0],
            b[1] * a[0] + b[0] * a[1],
            b[2] * a[0] + b[0] * a[2],
            b[3] * a[0] + b[0] * a[3],
            b[4] * a[0] + b[2] * a[1] - b[1] * a[2] + b[0] * a[4],
            b[5] * a[0] - b[3] * a[1] + b[1] * a[3] + b[0] * a[5],
            b[6] * a[0] + b[3] * a[2] - b[2] * a[3] + b[0] * a[6],
            b[7] * a[0] + b[6] * a[1] + b[5] * a[2] + b[4] * a[3] + b[3] * a[4] + b[2] * a[5]
                + b[1] * a[6],
        ])
    }

    /// Regressive product. For two points, the line through them.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        Self([
            self.join_scalar(other),
            a[1] * b[7] + a[4] * b[5] - a[5] * b[4] + a[7] * b[1],
            a[2] * b[7] - a[4] * b[6] + a[6] * b[4] + a[7] * b[2],
            a[3] * b[7] + a[5] * b[6] - a[6] * b[5] + a[7] * b[3],
            a[4] * b[7] + a[7] * b[4],
            a[5] * b[7] + a[7] * b[5],
            a[6] * b[7] + a[7] * b[6],
            a[7] * b[7],
        ])
    }

    /// Scalar part of the regressive product.
    #[must_use]
    pub fn join_scalar(&self, other: &Self) -> f64 {
        let a = &self.0;
        let b = &other.0;
        a[0] * b[7]
            + a[1] * b[6]
            + a[2] * b[5]
            + a[3] * b[4]
            + a[4] * b[3]
            + a[5] * b[2]
            + a[6] * b[1]
            + a[7] * b[0]
    }

    /// Inner product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        Self([
            b[0] * a[0] + b[2] * a[2] + b[3] * a[3] - b[6] * a[6],
            b[1] * a[0] + b[0] * a[1] - b[4] * a[2] + b[5] * a[3] + b[2] * a[4] - b[3] * a[5]
                - b[7] * a[6]
                - b[6] * a[7],
            b[2] * a[0] + b[0] * a[2] - b[6] * a[3] + b[3] * a[6],
            b[3] * a[0] + b[6] * a[2] + b[0] * a[3] - b[2] * a[6],
            b[4] * a[0] + b[7] * a[3] + b[0] * a[4] + b[3] * a[7],
            b[5] * a[0] + b[7] * a[2] + b[0] * a[5] + b[2] * a[7],
            b[6] * a[0] + b[0] * a[6],
            b[7] * a[0] + b[0] * a[7],
        ])
    }

    /// Sandwich product `self * other * reverse(self)`, applying a motor
    /// to an element.
    #[must_use]
    pub fn sandwich(&self, other: &Self) -> Self {
        self.geometric_product(other).geometric_product(&self.reverse())
    }

    // ── norms ──

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        let a = &self.0;
        (a[0] * a[0] - a[2] * a[2] - a[3] * a[3] + a[6] * a[6]).abs().sqrt()
    }

    /// Ideal norm.
    #[must_use]
    pub fn inorm(&self) -> f64 {
        let a = &self.0;
        (a[7] * a[7] - a[5] * a[5] - a[4] * a[4] + a[1] * a[1]).abs().sqrt()
    }

    /// Scales to unit [`norm`](Self::norm) with a non-negative `e12` weight.
    /// Zero-norm and unit-norm elements are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n == 0.0 || n == 1.0 {
            return *self;
        }
        let sign = if self.0[6] < 0.0 { -1.0 } else { 1.0 };
        *self * (sign / n)
    }

    /// Scales to unit [`inorm`](Self::inorm). Zero and unit ideal norms are
    /// returned unchanged.
    #[must_use]
    pub fn inormalized(&self) -> Self {
        let n = self.inorm();
        if n == 0.0 || n == 1.0 {
            return *self;
        }
        *self * (1.0 / n)
    }
}

impl Index<usize> for NVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Add for NVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl Sub for NVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl Neg for NVector {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(|v| -v))
    }
}

impl Mul for NVector {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.geometric_product(&rhs)
    }
}

/// Adds to the scalar part only.
impl Add<f64> for NVector {
    type Output = Self;

    fn add(mut self, rhs: f64) -> Self {
        self.0[0] += rhs;
        self
    }
}

/// Subtracts from the scalar part only.
impl Sub<f64> for NVector {
    type Output = Self;

    fn sub(mut self, rhs: f64) -> Self {
        self.0[0] -= rhs;
        self
    }
}

impl Mul<f64> for NVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0.map(|v| v * rhs))
    }
}

/// Lists the components above `1e-6` as `value` + basis label, joined by
/// ` + `. Values are rounded to seven decimals with trailing zeros removed,
/// and whole numbers drop the decimal point too (`2e01`, not `2.e01`).
impl fmt::Display for NVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .0
            .iter()
            .zip(BASIS)
            .enumerate()
            .filter(|(_, (value, _))| value.abs() > DISPLAY_EPSILON)
            .map(|(i, (value, label))| {
                let fixed = format!("{value:.7}");
                let number = fixed.trim_end_matches('0').trim_end_matches('.');
                if i == 0 {
                    number.to_owned()
                } else {
                    format!("{number}{label}")
                }
            })
            .collect();

        if terms.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&terms.join(" + "))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ── construction ──

    #[test]
    fn point_layout() {
        let p = NVector::point(1.0, 2.0);
        assert_eq!(p.0, [0.0, 0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 0.0]);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 2.0);
        assert_eq!(NVector::origin(), NVector::point(0.0, 0.0));
    }

    #[test]
    fn direction_is_unit() {
        let d = NVector::direction(3.0, 4.0);
        assert_abs_diff_eq!(d.x(), 0.6);
        assert_abs_diff_eq!(d.y(), 0.8);
        assert_abs_diff_eq!(d.inorm(), 1.0, epsilon = 1e-12);
        assert_eq!(NVector::offset(3.0, 4.0).0, [0.0, 0.0, 0.0, 0.0, 4.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn nvector_basis_index() {
        assert_eq!(NVector::nvector(2.0, 3).unwrap(), E2 * 2.0);
        assert_eq!(NVector::nvector(1.0, 7).unwrap(), I);
        assert_eq!(NVector::nvector(1.0, 8), Err(GeometryError::BasisIndexOutOfRange(8)));
    }

    // ── involutions ──

    #[test]
    fn involutions_flip_expected_grades() {
        let a = NVector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(a.reverse().0, [1.0, 2.0, 3.0, 4.0, -5.0, -6.0, -7.0, -8.0]);
        assert_eq!(a.dual().0, [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(a.conjugate().0, [1.0, -2.0, -3.0, -4.0, -5.0, -6.0, -7.0, 8.0]);
        assert_eq!(a.involute().0, [1.0, -2.0, -3.0, -4.0, 5.0, 6.0, 7.0, -8.0]);
        assert_eq!(a.dual().dual(), a);
    }

    // ── products ──

    #[test]
    fn basis_squares() {
        assert_eq!((E1 * E1)[0], 1.0);
        assert_eq!((E2 * E2)[0], 1.0);
        assert_eq!((E12 * E12)[0], -1.0);
        assert_eq!(E0 * E0, NVector::default());
        assert_eq!(E1 * E2, E12);
        assert_eq!(E0.meet(&E1), E01);
    }

    #[test]
    fn join_then_meet_finds_crossing() {
        let horizontal = NVector::point(0.0, 0.0).join(&NVector::point(1.0, 0.0));
        let vertical = NVector::point(2.0, -1.0).join(&NVector::point(2.0, 1.0));
        let crossing = horizontal.meet(&vertical).normalized();
        assert_abs_diff_eq!(crossing.x(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(crossing.y(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(crossing[6], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn meet_of_parallel_lines_is_ideal() {
        let a = NVector::point(0.0, 0.0).join(&NVector::point(1.0, 0.0));
        let b = NVector::point(0.0, 1.0).join(&NVector::point(1.0, 1.0));
        let m = a.meet(&b);
        assert_eq!(m[6], 0.0);
        assert_eq!(m.norm(), 0.0);
        assert!(m.inorm() > 0.0);
    }

    #[test]
    fn dot_of_unit_lines() {
        let x_axis = NVector::point(0.0, 0.0).join(&NVector::point(1.0, 0.0)).normalized();
        assert_abs_diff_eq!(x_axis.dot(&x_axis)[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn scalar_ops_touch_scalar_part() {
        let p = NVector::point(1.0, 2.0);
        assert_eq!((p + 3.0).0, [3.0, 0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 0.0]);
        assert_eq!((p - 3.0).0, [-3.0, 0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 0.0]);
        assert_eq!((p * 2.0).0, [0.0, 0.0, 0.0, 0.0, 4.0, 2.0, 2.0, 0.0]);
        assert_eq!(p + p, p * 2.0);
        assert_eq!(p - p, NVector::default());
        assert_eq!(-p, p * -1.0);
    }

    #[test]
    fn sandwich_with_translator_moves_point() {
        // Translator by (2, 3): 1 - (dx/2) e01 + (dy/2) e20.
        let translator = NVector([1.0, 0.0, 0.0, 0.0, -1.0, 1.5, 0.0, 0.0]);
        let moved = translator.sandwich(&NVector::point(1.0, 1.0)).normalized();
        assert_abs_diff_eq!(moved.x(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(moved.y(), 4.0, epsilon = 1e-12);
    }

    // ── norms ──

    #[test]
    fn normalized_fixes_weight_sign() {
        let p = NVector::point(1.0, 2.0) * -2.0;
        let n = p.normalized();
        assert_eq!(n, NVector::point(1.0, 2.0));
        let zero = NVector::offset(1.0, 1.0);
        assert_eq!(zero.normalized(), zero);
    }

    #[test]
    fn inormalized_scales_ideal_part() {
        let d = NVector::offset(3.0, 4.0).inormalized();
        assert_abs_diff_eq!(d.x(), 0.6);
        assert_abs_diff_eq!(d.y(), 0.8);
        let p = NVector::point(1.0, 1.0);
        assert_eq!(p.inormalized(), p * (1.0 / 2f64.sqrt()));
        assert_eq!(NVector::origin().inormalized(), NVector::origin());
    }

    #[test]
    fn scalar_parts_match_full_products() {
        let a = NVector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = NVector([8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(a.mul_scalar(&b), (a * b)[0]);
        assert_eq!(a.join_scalar(&b), a.join(&b)[0]);
        // The join of a point with a line through it vanishes.
        let line = NVector::point(0.0, 0.0).join(&NVector::point(1.0, 1.0));
        assert_eq!(NVector::point(2.0, 2.0).join_scalar(&line), 0.0);
    }

    // ── display ──

    #[test]
    fn display_lists_nonzero_terms() {
        assert_eq!(NVector::point(1.0, 2.0).to_string(), "2e01 + 1e20 + 1e12");
        assert_eq!(NVector::default().to_string(), "0");
        let mixed = NVector::point(0.5, -0.25) + 1.5;
        assert_eq!(mixed.to_string(), "1.5 + -0.25e01 + 0.5e20 + 1e12");
        assert_eq!((E0 * 1e-9).to_string(), "0");
    }

    #[test]
    fn display_drops_the_point_of_whole_numbers() {
        // Zeros before the decimal point survive the trim.
        assert_eq!((NVector::default() + 10.0).to_string(), "10");
        assert_eq!((NVector::default() + 100.25).to_string(), "100.25");
    }
}
