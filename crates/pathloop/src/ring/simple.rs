//! Ring predicates on top of `geo`: edge crossings and area.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Coord, Line, LineString, Polygon};

use crate::Xy;

#[inline]
pub(super) fn to_coord(p: &Xy) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Edge `i` of a closed ring: `ring[i] → ring[i + 1]`.
#[inline]
pub(super) fn edge(ring: &[Xy], i: usize) -> Line<f64> {
    Line::new(to_coord(&ring[i]), to_coord(&ring[i + 1]))
}

/// Edges `i < j` of an `n`-edge ring share a vertex.
#[inline]
pub(super) fn adjacent(i: usize, j: usize, n: usize) -> bool {
    j == i + 1 || (i == 0 && j + 1 == n)
}

/// First pair of edges `(i, j)` that violates simplicity, if any.
///
/// Pre: `ring` is closed (first == last).
/// Adjacent edges may touch only in their shared vertex; a collinear overlap
/// (a spike doubling back) counts as a violation.
pub fn first_crossing(ring: &[Xy]) -> Option<(usize, usize)> {
    let n = ring.len().saturating_sub(1);
    for i in 0..n {
        let ei = edge(ring, i);
        for j in (i + 1)..n {
            match line_intersection(ei, edge(ring, j)) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent(i, j, n) => {}
                Some(_) => return Some((i, j)),
            }
        }
    }
    None
}

/// Unsigned shoelace area of a closed ring.
pub fn ring_area(ring: &[Xy]) -> f64 {
    let exterior = LineString::new(ring.iter().map(to_coord).collect());
    Polygon::new(exterior, vec![]).unsigned_area()
}
