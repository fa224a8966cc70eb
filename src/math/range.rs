/// A closed interval `[start, end]` on the number line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InclusiveRange {
    pub start: f64,
    pub end: f64,
}

/// Creates the closed interval `[start, end]`. The bounds are not reordered.
#[must_use]
pub fn range_inclusive(start: f64, end: f64) -> InclusiveRange {
    InclusiveRange { start, end }
}

#[must_use]
pub fn range_inclusive_from_pair([start, end]: [f64; 2]) -> InclusiveRange {
    range_inclusive(start, end)
}

/// Returns `true` when the two ranges share at least one value.
#[must_use]
pub fn ranges_overlap(a: InclusiveRange, b: InclusiveRange) -> bool {
    if a.start <= b.start {
        return a.end >= b.start;
    }
    b.end >= a.start
}

/// The common part of two ranges, or `None` when they are disjoint.
#[must_use]
pub fn range_intersection(a: InclusiveRange, b: InclusiveRange) -> Option<InclusiveRange> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (start <= end).then(|| range_inclusive(start, end))
}

#[must_use]
pub fn range_includes_value(value: f64, range: InclusiveRange) -> bool {
    value >= range.start && value <= range.end
}
