use std::f64::consts::PI;

use super::line::Line;
use super::rectangle::{rectangle_intersect_line, Rectangle};
use super::segment::LineSegment;
use crate::error::{GeometryError, Result};
use crate::math::point::{point_distance, point_from_vector};
use crate::math::utils::Bounds;
use crate::math::vector::{
    vector, vector_magnitude, vector_normal, vector_normalize, vector_scale, Vector,
};
use crate::math::{Point, Space};

/// Relative tolerance of [`curve_point_at_length`], as a fraction of the
/// total curve length.
pub const ARC_LENGTH_TOLERANCE: f64 = 1e-4;

/// Bisection steps allowed in [`curve_point_at_length`].
pub const ARC_LENGTH_MAX_ITERATIONS: u32 = 20;

/// Default bracket width for [`curve_closest_point`].
pub const CLOSEST_POINT_TOLERANCE: f64 = 1e-3;

/// Uniform samples taken before refining in [`curve_closest_point`].
pub const CLOSEST_POINT_SAMPLES: u32 = 30;

/// `(t, s)` starting guesses for [`curve_intersect_line_segment`], tried in
/// this order.
pub const INTERSECTION_SEEDS: [(f64, f64); 3] = [(0.5, 0.0), (0.2, 0.0), (0.8, 0.0)];

/// Coefficients smaller than this fraction of the largest one are treated as
/// zero when solving in [`curve_intersect_line`].
const ROOT_EPSILON: f64 = 1e-12;

/// Default sample count for the offset helpers.
pub const DEFAULT_OFFSET_STEPS: u32 = 50;

/// Default tension for the Catmull–Rom converters.
pub const DEFAULT_CATMULL_ROM_TENSION: f64 = 0.5;

/// 24-point Legendre–Gauss abscissae on `[-1, 1]`.
#[allow(clippy::excessive_precision, clippy::unreadable_literal)]
const LEGENDRE_GAUSS_N24_T: [f64; 24] = [
    -0.0640568928626056260850430826247450385909,
    0.0640568928626056260850430826247450385909,
    -0.1911188674736163091586398207570696318404,
    0.1911188674736163091586398207570696318404,
    -0.3150426796961633743867932913198102407864,
    0.3150426796961633743867932913198102407864,
    -0.4337935076260451384870842319133497124524,
    0.4337935076260451384870842319133497124524,
    -0.5454214713888395356583756172183723700107,
    0.5454214713888395356583756172183723700107,
    -0.6480936519369755692524957869107476266696,
    0.6480936519369755692524957869107476266696,
    -0.7401241915785543642438281030999784255232,
    0.7401241915785543642438281030999784255232,
    -0.8200019859739029219539498726697452080761,
    0.8200019859739029219539498726697452080761,
    -0.8864155270044010342131543419821967550873,
    0.8864155270044010342131543419821967550873,
    -0.9382745520027327585236490017087214496548,
    0.9382745520027327585236490017087214496548,
    -0.9747285559713094981983919930081690617411,
    0.9747285559713094981983919930081690617411,
    -0.9951872199970213601799974097007368118745,
    0.9951872199970213601799974097007368118745,
];

/// Weights matching [`LEGENDRE_GAUSS_N24_T`].
#[allow(clippy::excessive_precision, clippy::unreadable_literal)]
const LEGENDRE_GAUSS_N24_C: [f64; 24] = [
    0.1279381953467521569740561652246953718517,
    0.1279381953467521569740561652246953718517,
    0.1258374563468282961213753825111836887264,
    0.1258374563468282961213753825111836887264,
    0.121670472927803391204463153476262425607,
    0.121670472927803391204463153476262425607,
    0.1155056680537256013533444839067835598622,
    0.1155056680537256013533444839067835598622,
    0.1074442701159656347825773424466062227946,
    0.1074442701159656347825773424466062227946,
    0.0976186521041138882698806644642471544279,
    0.0976186521041138882698806644642471544279,
    0.086190161531953275917185202983742667185,
    0.086190161531953275917185202983742667185,
    0.0733464814110803057340336152531165181193,
    0.0733464814110803057340336152531165181193,
    0.0592985849154367807463677585001085845412,
    0.0592985849154367807463677585001085845412,
    0.0442774388174198061686027482113382288593,
    0.0442774388174198061686027482113382288593,
    0.0285313886289336631813078159518782864491,
    0.0285313886289336631813078159518782864491,
    0.0123412297999871995468056670700372915759,
    0.0123412297999871995468056670700372915759,
];

/// A cubic Bézier curve.
///
/// `p0` and `p3` are the endpoints, `p1` and `p2` the control points. Any
/// placement is legal, including cusps and self-intersections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve<S: Space> {
    pub p0: Point<S>,
    pub p1: Point<S>,
    pub p2: Point<S>,
    pub p3: Point<S>,
}

impl<S: Space> Curve<S> {
    #[must_use]
    pub fn new(p0: Point<S>, p1: Point<S>, p2: Point<S>, p3: Point<S>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    #[must_use]
    pub fn points(&self) -> [Point<S>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Returns `true` when all four points have finite coordinates.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points().iter().all(Point::is_valid)
    }
}

impl<S: Space> TryFrom<&[Point<S>]> for Curve<S> {
    type Error = GeometryError;

    fn try_from(points: &[Point<S>]) -> Result<Self> {
        let [p0, p1, p2, p3] = points else {
            return Err(GeometryError::InvalidLength {
                expected: 4,
                found: points.len(),
            });
        };
        let curve = Self::new(*p0, *p1, *p2, *p3);
        if let Some(bad) = curve.points().iter().find(|p| !p.is_valid()) {
            let value = if bad.x().is_finite() { bad.y() } else { bad.x() };
            return Err(GeometryError::NonFinite { value });
        }
        Ok(curve)
    }
}

/// Tuning for the Newton–Raphson solve in [`curve_intersect_line_segment_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonParams {
    /// Largest residual component accepted as converged.
    pub tolerance: f64,
    /// Newton steps before giving up.
    pub max_iterations: u32,
    /// Step of the central difference used for the Jacobian.
    pub derivative_step: f64,
}

impl Default for NewtonParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 10,
            derivative_step: 1e-6,
        }
    }
}

/// Evaluates the curve at `t` with the cubic Bernstein basis.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate.
#[must_use]
pub fn bezier_equation<S: Space>(c: &Curve<S>, t: f64) -> Point<S> {
    let mt = 1.0 - t;
    let b0 = mt * mt * mt;
    let b1 = 3.0 * mt * mt * t;
    let b2 = 3.0 * mt * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * c.p0.x() + b1 * c.p1.x() + b2 * c.p2.x() + b3 * c.p3.x(),
        b0 * c.p0.y() + b1 * c.p1.y() + b2 * c.p2.y() + b3 * c.p3.y(),
    )
}

/// First derivative of the curve at `t`. Not normalized.
#[must_use]
pub fn curve_tangent<S: Space>(c: &Curve<S>, t: f64) -> Vector {
    let mt = 1.0 - t;
    let a = 3.0 * mt * mt;
    let b = 6.0 * mt * t;
    let d = 3.0 * t * t;
    vector(
        a * (c.p1.x() - c.p0.x()) + b * (c.p2.x() - c.p1.x()) + d * (c.p3.x() - c.p2.x()),
        a * (c.p1.y() - c.p0.y()) + b * (c.p2.y() - c.p1.y()) + d * (c.p3.y() - c.p2.y()),
    )
}

/// Arc length over `[0, 1]` by 24-point Legendre–Gauss quadrature.
#[must_use]
pub fn curve_length<S: Space>(c: &Curve<S>) -> f64 {
    gauss_length(c, 1.0)
}

/// Arc length over `[0, t]`. `t <= 0` gives `0`, `t >= 1` the full length.
#[must_use]
pub fn curve_length_at_parameter<S: Space>(c: &Curve<S>, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return curve_length(c);
    }
    gauss_length(c, t)
}

/// Integrates the tangent magnitude over `[0, upper]`, mapping the
/// quadrature's `[-1, 1]` domain with `t = upper/2 · x + upper/2`.
fn gauss_length<S: Space>(c: &Curve<S>, upper: f64) -> f64 {
    let half = upper / 2.0;
    let sum: f64 = LEGENDRE_GAUSS_N24_T
        .iter()
        .zip(LEGENDRE_GAUSS_N24_C.iter())
        .map(|(&x, &w)| w * vector_magnitude(&curve_tangent(c, half * x + half)))
        .sum();
    half * sum
}

/// The point at `percent` of the curve's arc length.
///
/// Bisects on the parameter until the partial length is within
/// [`ARC_LENGTH_TOLERANCE`] of the total, or [`ARC_LENGTH_MAX_ITERATIONS`]
/// steps have run, in which case the last estimate is returned.
/// `percent <= 0` and `percent >= 1` return the endpoints exactly.
#[must_use]
pub fn curve_point_at_length<S: Space>(c: &Curve<S>, percent: f64) -> Point<S> {
    if percent <= 0.0 {
        return bezier_equation(c, 0.0);
    }
    if percent >= 1.0 {
        return bezier_equation(c, 1.0);
    }
    bezier_equation(c, parameter_at_length(c, percent))
}

/// Curve parameter whose partial length is `percent` of the total, for
/// `percent` strictly inside `(0, 1)`.
fn parameter_at_length<S: Space>(c: &Curve<S>, percent: f64) -> f64 {
    let total = curve_length(c);
    let target = total * percent;
    let tolerance = total * ARC_LENGTH_TOLERANCE;

    let mut t_min = 0.0;
    let mut t_max = 1.0;
    let mut t = percent;

    let mut converged = false;
    for _ in 0..ARC_LENGTH_MAX_ITERATIONS {
        let current = curve_length_at_parameter(c, t);
        if (current - target).abs() < tolerance {
            converged = true;
            break;
        }
        if current < target {
            t_min = t;
        } else {
            t_max = t;
        }
        t = (t_min + t_max) / 2.0;
    }

    if !converged {
        crate::log::debug!(percent, t, "arc length search hit its iteration cap");
    }

    t
}

/// Finds the point of the curve closest to `p`.
///
/// Samples [`CLOSEST_POINT_SAMPLES`] uniform parameters, then narrows the
/// bracket one sample step either side of the best one until it is narrower
/// than `tolerance`. Returns `None` when the bracket never needs narrowing
/// or `tolerance` is not positive.
#[must_use]
pub fn curve_closest_point<S: Space>(
    c: &Curve<S>,
    p: Point<S>,
    tolerance: f64,
) -> Option<Point<S>> {
    let distance_at = |t: f64| point_distance(p, bezier_equation(c, t));
    let steps = CLOSEST_POINT_SAMPLES;

    let mut min = f64::INFINITY;
    let mut closest_step = 0;
    for step in 0..steps {
        let d = distance_at(f64::from(step) / f64::from(steps));
        if d < min {
            min = d;
            closest_step = step;
        }
    }

    let t0 = ((f64::from(closest_step) - 1.0) / f64::from(steps)).max(0.0);
    let t1 = ((f64::from(closest_step) + 1.0) / f64::from(steps)).min(1.0);

    let t = local_minimum(t0, t1, distance_at, tolerance)?;
    Some(bezier_equation(c, t))
}

/// Bisects `[min, max]` towards the side where `f` decreases until the
/// bracket is narrower than `e`. Returns the last midpoint, or `None` if no
/// step was taken.
fn local_minimum(min: f64, max: f64, f: impl Fn(f64) -> f64, e: f64) -> Option<f64> {
    if e.is_nan() || e <= 0.0 {
        return None;
    }
    let mut m = min;
    let mut n = max;
    let mut k = None;
    while n - m > e {
        let mid = (n + m) / 2.0;
        if f(mid - e) < f(mid + e) {
            n = mid;
        } else {
            m = mid;
        }
        k = Some(mid);
    }
    k
}

/// Distance from `p` to the curve, `0` if no closest point was found.
#[must_use]
pub fn curve_point_distance<S: Space>(c: &Curve<S>, p: Point<S>) -> f64 {
    curve_closest_point(c, p, CLOSEST_POINT_TOLERANCE)
        .map_or(0.0, |closest| point_distance(p, closest))
}

/// Intersection of the curve with a segment, using the default
/// [`NewtonParams`].
///
/// Returns at most one point, see [`curve_intersect_line_segment_with`].
#[must_use]
pub fn curve_intersect_line_segment<S: Space>(
    c: &Curve<S>,
    segment: &LineSegment<S>,
) -> Vec<Point<S>> {
    curve_intersect_line_segment_with(c, segment, &NewtonParams::default())
}

/// Intersection of the curve with a segment.
///
/// Solves `B(t) - L(s) = 0` for the curve parameter `t` and the segment
/// parameter `s` with Newton–Raphson, starting from each of
/// [`INTERSECTION_SEEDS`] in turn. The first solution with both parameters
/// in `[0, 1]` wins, so a segment crossing the curve several times still
/// yields a single point.
#[must_use]
pub fn curve_intersect_line_segment_with<S: Space>(
    c: &Curve<S>,
    segment: &LineSegment<S>,
    params: &NewtonParams,
) -> Vec<Point<S>> {
    let (sx, sy) = (segment.start.x(), segment.start.y());
    let dx = segment.end.x() - sx;
    let dy = segment.end.y() - sy;

    let residual = |t: f64, s: f64| {
        let b = bezier_equation(c, t);
        (b.x() - (sx + s * dx), b.y() - (sy + s * dy))
    };

    INTERSECTION_SEEDS
        .iter()
        .find_map(|&(t0, s0)| {
            let (t, s) = solve(residual, t0, s0, params)?;
            let inside = (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s);
            inside.then(|| bezier_equation(c, t))
        })
        .into_iter()
        .collect()
}

/// Newton–Raphson on a 2-equation system with a central-difference Jacobian.
fn solve(
    f: impl Fn(f64, f64) -> (f64, f64),
    t0: f64,
    s0: f64,
    params: &NewtonParams,
) -> Option<(f64, f64)> {
    let h = params.derivative_step;
    let mut t = t0;
    let mut s = s0;
    let mut error = f64::INFINITY;
    let mut iteration = 0;

    while error >= params.tolerance {
        if iteration >= params.max_iterations {
            crate::log::debug!(t0, s0, error, "newton solve did not converge");
            return None;
        }

        let (y0, y1) = f(t, s);
        let (tp0, tp1) = f(t + h, s);
        let (tm0, tm1) = f(t - h, s);
        let (sp0, sp1) = f(t, s + h);
        let (sm0, sm1) = f(t, s - h);

        let j00 = (tp0 - tm0) / (2.0 * h);
        let j01 = (sp0 - sm0) / (2.0 * h);
        let j10 = (tp1 - tm1) / (2.0 * h);
        let j11 = (sp1 - sm1) / (2.0 * h);

        let det = j00 * j11 - j01 * j10;
        if det == 0.0 {
            crate::log::debug!(t, s, "newton solve hit a singular jacobian");
            return None;
        }

        t += (j11 * -y0 - j01 * -y1) / det;
        s += (j00 * -y1 - j10 * -y0) / det;

        let (e0, e1) = f(t, s);
        error = e0.abs().max(e1.abs());
        iteration += 1;
    }

    Some((t, s))
}

/// Every crossing of the curve with the infinite `line`, ordered by curve
/// parameter.
///
/// Substitutes the curve's power-basis polynomials into the implicit line
/// equation and solves the resulting cubic in closed form, keeping roots
/// with `t` in `[0, 1]`. A line that misses the control-point box returns
/// nothing without solving. A tangency yields a single point. Candidates
/// with a NaN coordinate are dropped, as is a line lying on a straight curve.
#[must_use]
pub fn curve_intersect_line<S: Space>(c: &Curve<S>, line: &Line<S>) -> Vec<Point<S>> {
    if rectangle_intersect_line(&Rectangle::from_bounds(&curve_bounds(c)), line).is_empty() {
        return Vec::new();
    }

    let [p0, p1, p2, p3] = c.points();
    let bx = bezier_coefficients(p0.x(), p1.x(), p2.x(), p3.x());
    let by = bezier_coefficients(p0.y(), p1.y(), p2.y(), p3.y());

    // a·x + b·y + k = 0
    let a = line.b.y() - line.a.y();
    let b = line.a.x() - line.b.x();
    let k = -(a * line.a.x() + b * line.a.y());

    let poly: [f64; 4] = std::array::from_fn(|i| a * bx[i] + b * by[i]);
    cubic_roots_in_unit_interval(poly[0], poly[1], poly[2], poly[3] + k)
        .into_iter()
        .map(|t| bezier_equation(c, t))
        .filter(|p| !p.x().is_nan() && !p.y().is_nan())
        .collect()
}

/// Power-basis coefficients `[t³, t², t, 1]` of one Bézier coordinate.
fn bezier_coefficients(p0: f64, p1: f64, p2: f64, p3: f64) -> [f64; 4] {
    [
        -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        3.0 * p0 - 6.0 * p1 + 3.0 * p2,
        -3.0 * p0 + 3.0 * p1,
        p0,
    ]
}

/// Real roots of `a·t³ + b·t² + c·t + d` inside `[0, 1]`, ascending.
///
/// Falls back to the quadratic or linear solve when the leading
/// coefficients vanish relative to the others.
fn cubic_roots_in_unit_interval(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    if scale == 0.0 {
        return Vec::new();
    }
    let significant = |v: f64| v.abs() > scale * ROOT_EPSILON;

    let mut roots = if significant(a) {
        monic_cubic_roots(b / a, c / a, d / a)
    } else if significant(b) {
        quadratic_roots(b, c, d)
    } else if significant(c) {
        vec![-d / c]
    } else {
        Vec::new()
    };
    roots.retain(|t| (0.0..=1.0).contains(t));
    roots.sort_by(f64::total_cmp);
    roots.dedup();
    roots
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        Vec::new()
    } else if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        let root = discriminant.sqrt();
        vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
    }
}

/// Real roots of `t³ + a·t² + b·t + c` (Cardano, or the trigonometric form
/// when all three roots are real).
fn monic_cubic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let shift = a / 3.0;
    let q = (3.0 * b - a * a) / 9.0;
    let r = (9.0 * a * b - 27.0 * c - 2.0 * a * a * a) / 54.0;
    let q3 = q * q * q;
    let discriminant = q3 + r * r;

    if discriminant.abs() <= f64::EPSILON * (q3.abs() + r * r) {
        // Repeated root.
        let s = r.cbrt();
        vec![2.0 * s - shift, -s - shift]
    } else if discriminant > 0.0 {
        let root = discriminant.sqrt();
        vec![(r + root).cbrt() + (r - root).cbrt() - shift]
    } else {
        let theta = (r / (-q3).sqrt()).clamp(-1.0, 1.0).acos();
        let m = 2.0 * (-q).sqrt();
        [0.0, 2.0, 4.0]
            .iter()
            .map(|k| m * ((theta + k * PI) / 3.0).cos() - shift)
            .collect()
    }
}

/// Converts a polyline into quadratic Bézier pieces with Catmull–Rom
/// tangents, one `(control, end)` pair per consecutive point pair.
///
/// Neighbors past either end are clamped to the first/last point. Returns
/// `None` for fewer than two points.
#[must_use]
pub fn curve_catmull_rom_quadratic_approx_points<S: Space>(
    points: &[Point<S>],
    tension: f64,
) -> Option<Vec<(Point<S>, Point<S>)>> {
    if points.len() < 2 {
        return None;
    }

    let last = points.len() - 1;
    let pairs = (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let control = Point::new(
                p1.x() + (p2.x() - p0.x()) * tension / 2.0,
                p1.y() + (p2.y() - p0.y()) * tension / 2.0,
            );
            (control, p2)
        })
        .collect();

    Some(pairs)
}

/// Converts a polyline into cubic Bézier curves with Catmull–Rom tangents,
/// one curve per consecutive point pair.
///
/// Neighbors past either end are clamped to the first/last point. Returns
/// `None` for fewer than two points.
#[must_use]
pub fn curve_catmull_rom_cubic_approx_points<S: Space>(
    points: &[Point<S>],
    tension: f64,
) -> Option<Vec<Curve<S>>> {
    if points.len() < 2 {
        return None;
    }

    let last = points.len() - 1;
    let curves = (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];

            let tangent1 = vector((p2.x() - p0.x()) * tension, (p2.y() - p0.y()) * tension);
            let tangent2 = vector((p3.x() - p1.x()) * tension, (p3.y() - p1.y()) * tension);

            let cp1 = Point::new(p1.x() + tangent1.x / 3.0, p1.y() + tangent1.y / 3.0);
            let cp2 = Point::new(p2.x() - tangent2.x / 3.0, p2.y() - tangent2.y / 3.0);

            Curve::new(p1, cp1, cp2, p2)
        })
        .collect();

    Some(curves)
}

/// Polyline approximation of the curve shifted by `offset` along its normal.
///
/// Samples `steps + 1` uniform parameters. The normal is the unit tangent
/// rotated by -90°, so a positive offset moves right of the direction of
/// travel in a y-up frame.
#[must_use]
pub fn curve_offset_points<S: Space>(c: &Curve<S>, offset: f64, steps: u32) -> Vec<Point<S>> {
    (0..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            let point = bezier_equation(c, t);
            let normal = vector_normal(&vector_normalize(&curve_tangent(c, t)));
            point_from_vector(&vector_scale(&normal, offset), point)
        })
        .collect()
}

/// [`curve_offset_points`] for a quadratic Bézier `p0, p1, p2`.
#[must_use]
pub fn offset_points_for_quadratic_bezier<S: Space>(
    p0: Point<S>,
    p1: Point<S>,
    p2: Point<S>,
    offset: f64,
    steps: u32,
) -> Vec<Point<S>> {
    (0..=steps)
        .map(|i| {
            let t = f64::from(i) / f64::from(steps);
            let mt = 1.0 - t;
            let point = Point::new(
                mt * mt * p0.x() + 2.0 * mt * t * p1.x() + t * t * p2.x(),
                mt * mt * p0.y() + 2.0 * mt * t * p1.y() + t * t * p2.y(),
            );
            let tangent = vector(
                2.0 * mt * (p1.x() - p0.x()) + 2.0 * t * (p2.x() - p1.x()),
                2.0 * mt * (p1.y() - p0.y()) + 2.0 * t * (p2.y() - p1.y()),
            );
            let normal = vector_normal(&vector_normalize(&tangent));
            point_from_vector(&vector_scale(&normal, offset), point)
        })
        .collect()
}

/// Bounding box of the four control points, which contains the curve.
#[must_use]
pub fn curve_bounds<S: Space>(c: &Curve<S>) -> Bounds {
    c.points().iter().fold(
        [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
        |[min_x, min_y, max_x, max_y], p| {
            [min_x.min(p.x()), min_y.min(p.y()), max_x.max(p.x()), max_y.max(p.y())]
        },
    )
}
