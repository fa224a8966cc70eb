use super::segment::{point_on_line_segment, LineSegment};
use crate::math::point::points_close;
use crate::math::{Point, Space};

/// A closed ring of points.
///
/// The last point always repeats the first (within
/// [`PRECISION`](crate::math::PRECISION)); the constructor appends the
/// closing point when the input is open.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Space> {
    points: Vec<Point<S>>,
}

impl<S: Space> Polygon<S> {
    /// Creates a polygon from the given points, closing it if needed.
    #[must_use]
    pub fn new(points: Vec<Point<S>>) -> Self {
        Self {
            points: polygon_close(points),
        }
    }

    /// The points of the closed ring, including the closing point.
    #[must_use]
    pub fn points(&self) -> &[Point<S>] {
        &self.points
    }

    /// Boundary edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = LineSegment<S>> + '_ {
        self.points.windows(2).map(|w| LineSegment::new(w[0], w[1]))
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point<S>> {
        self.points
    }
}

/// Builds a polygon from a point slice. Already closed rings are kept as-is,
/// so applying this twice yields the same ring.
#[must_use]
pub fn polygon_from_points<S: Space>(points: &[Point<S>]) -> Polygon<S> {
    Polygon::new(points.to_vec())
}

/// Returns `true` when the first and last points coincide. An empty ring
/// counts as closed.
#[must_use]
pub fn polygon_is_closed<S: Space>(points: &[Point<S>]) -> bool {
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) => points_close(first, last),
        _ => true,
    }
}

/// Appends the first point to an open ring.
#[must_use]
pub fn polygon_close<S: Space>(mut points: Vec<Point<S>>) -> Vec<Point<S>> {
    if !polygon_is_closed(&points) {
        points.push(points[0]);
    }
    points
}

/// Even-odd ray-casting test.
///
/// Counts crossings of a horizontal ray from `p` over every edge, including
/// the one from the last point back to the first. Points exactly on the
/// boundary may land on either side; use [`point_on_polygon`] for those.
#[must_use]
pub fn polygon_includes_point<S: Space>(p: Point<S>, polygon: &Polygon<S>) -> bool {
    let (x, y) = (p.x(), p.y());
    let pts = polygon.points();
    let mut inside = false;

    let mut j = pts.len().wrapping_sub(1);
    for (i, pi) in pts.iter().enumerate() {
        let pj = pts[j];
        let (xi, yi) = (pi.x(), pi.y());
        let (xj, yj) = (pj.x(), pj.y());

        let straddles = (yi > y && yj <= y) || (yi <= y && yj > y);
        if straddles && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Returns `true` when `p` lies within `threshold` of any edge.
#[must_use]
pub fn point_on_polygon<S: Space>(p: Point<S>, polygon: &Polygon<S>, threshold: f64) -> bool {
    polygon
        .edges()
        .any(|edge| point_on_line_segment(p, &edge, threshold))
}
