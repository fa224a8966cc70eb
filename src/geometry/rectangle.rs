use super::line::{lines_intersect_at, Line};
use super::segment::{line_segment_intersection_points, point_on_line_segment, LineSegment};
use crate::math::utils::Bounds;
use crate::math::{Point, Space, PRECISION};

/// An axis-aligned rectangle given by two opposite corners.
///
/// By convention the first corner is top-left and the second bottom-right,
/// but this is not enforced. Zero width or height is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle<S: Space> {
    pub top_left: Point<S>,
    pub bottom_right: Point<S>,
}

impl<S: Space> Rectangle<S> {
    #[must_use]
    pub fn new(top_left: Point<S>, bottom_right: Point<S>) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Builds the rectangle covering `[min_x, min_y, max_x, max_y]`.
    #[must_use]
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let [min_x, min_y, max_x, max_y] = *bounds;
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// The four boundary segments in traversal order: top, right, bottom, left.
    #[must_use]
    pub fn edges(&self) -> [LineSegment<S>; 4] {
        let top_right = Point::new(self.bottom_right.x(), self.top_left.y());
        let bottom_left = Point::new(self.top_left.x(), self.bottom_right.y());
        [
            LineSegment::new(self.top_left, top_right),
            LineSegment::new(top_right, self.bottom_right),
            LineSegment::new(self.bottom_right, bottom_left),
            LineSegment::new(bottom_left, self.top_left),
        ]
    }
}

/// Intersection points of `segment` with the rectangle outline.
///
/// Points come in edge order (top, right, bottom, left) and are not
/// deduplicated: a segment through a corner reports it once per edge.
#[must_use]
pub fn rectangle_intersect_line_segment<S: Space>(
    rectangle: &Rectangle<S>,
    segment: &LineSegment<S>,
) -> Vec<Point<S>> {
    rectangle
        .edges()
        .iter()
        .filter_map(|edge| line_segment_intersection_points(segment, edge, None))
        .collect()
}

/// Intersection points of the infinite `line` with the rectangle outline.
///
/// Same edge order and corner duplication as
/// [`rectangle_intersect_line_segment`]. An edge collinear with the line
/// contributes nothing.
#[must_use]
pub fn rectangle_intersect_line<S: Space>(
    rectangle: &Rectangle<S>,
    line: &Line<S>,
) -> Vec<Point<S>> {
    rectangle
        .edges()
        .iter()
        .filter_map(|edge| {
            let candidate = lines_intersect_at(&edge.to_line(), line)?;
            point_on_line_segment(candidate, edge, PRECISION).then_some(candidate)
        })
        .collect()
}

/// Returns `true` when the interiors of the two rectangles overlap.
/// Rectangles that only share an edge do not count.
#[must_use]
pub fn rectangle_intersect_rectangle<S: Space>(a: &Rectangle<S>, b: &Rectangle<S>) -> bool {
    let (min_x1, min_y1) = (a.top_left.x(), a.top_left.y());
    let (max_x1, max_y1) = (a.bottom_right.x(), a.bottom_right.y());
    let (min_x2, min_y2) = (b.top_left.x(), b.top_left.y());
    let (max_x2, max_y2) = (b.bottom_right.x(), b.bottom_right.y());
    min_x1 < max_x2 && max_x1 > min_x2 && min_y1 < max_y2 && max_y1 > min_y2
}
