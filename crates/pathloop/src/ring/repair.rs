//! One-shot repair of a non-simple ring.
//!
//! Model (zero-distance-buffer equivalent for a single traced ring)
//! - Node: insert every edge/edge intersection, and both ends of every
//!   collinear overlap, into the edges involved. A node is computed once and
//!   shared by value, so equal nodes compare equal bitwise.
//! - Split: walk the noded ring with a stack; when a vertex repeats, the
//!   stretch since its previous occurrence is a closed sub-loop.
//! - Keep the sub-loop with the largest positive area. Zero-area sub-loops are
//!   spikes and overlaps and are dropped.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use nalgebra::vector;

use super::simple::{adjacent, edge, ring_area};
use crate::error::GeometryError;
use crate::Xy;

/// Relative snapping radius (times the ring's bounding-box diagonal).
const SNAP_REL: f64 = 1e-12;

/// Largest simple-candidate sub-loop of `ring`, closed.
///
/// Pre: `ring` is closed and free of consecutive duplicates.
/// Errors: `ZeroArea` when no sub-loop encloses any area.
pub(super) fn repair(ring: &[Xy]) -> Result<Vec<Xy>, GeometryError> {
    let noded = node(ring);
    split_loops(&noded)
        .into_iter()
        .filter(|l| l.len() >= 4)
        .map(|l| (ring_area(&l), l))
        .filter(|(area, _)| *area > 0.0)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, l)| l)
        .ok_or(GeometryError::ZeroArea)
}

fn extent(ring: &[Xy]) -> f64 {
    let Some(&first) = ring.first() else {
        return 0.0;
    };
    let (lo, hi) = ring
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    (hi - lo).norm()
}

/// Reuse an existing vertex or node within `eps` of `p`.
fn snap(p: Xy, near: &[Xy], nodes: &[Xy], eps: f64) -> Xy {
    near.iter()
        .chain(nodes.iter())
        .find(|q| (**q - p).norm() <= eps)
        .copied()
        .unwrap_or(p)
}

fn node(ring: &[Xy]) -> Vec<Xy> {
    let n = ring.len() - 1;
    let eps = SNAP_REL * extent(ring);
    let mut cuts: Vec<Vec<Xy>> = vec![Vec::new(); n];
    let mut nodes: Vec<Xy> = Vec::new();
    for i in 0..n {
        let ei = edge(ring, i);
        for j in (i + 1)..n {
            let hits = match line_intersection(ei, edge(ring, j)) {
                Some(LineIntersection::SinglePoint { intersection, .. }) if !adjacent(i, j, n) => {
                    vec![intersection]
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    vec![intersection.start, intersection.end]
                }
                _ => continue,
            };
            let near = [ring[i], ring[i + 1], ring[j], ring[j + 1]];
            for c in hits {
                let p = snap(vector![c.x, c.y], &near, &nodes, eps);
                if !near.contains(&p) && !nodes.contains(&p) {
                    nodes.push(p);
                }
                cuts[i].push(p);
                cuts[j].push(p);
            }
        }
    }

    let mut out = Vec::with_capacity(ring.len() + 2 * nodes.len());
    for (i, mut inner) in cuts.into_iter().enumerate() {
        let (a, b) = (ring[i], ring[i + 1]);
        let d = b - a;
        inner.retain(|p| *p != a && *p != b);
        inner.sort_by(|p, q| (*p - a).dot(&d).total_cmp(&(*q - a).dot(&d)));
        inner.dedup();
        out.push(a);
        out.extend(inner);
    }
    out.push(ring[n]);
    out.dedup();
    out
}

fn split_loops(noded: &[Xy]) -> Vec<Vec<Xy>> {
    let mut loops = Vec::new();
    let mut stack: Vec<Xy> = Vec::with_capacity(noded.len());
    for &p in noded {
        if let Some(pos) = stack.iter().rposition(|q| *q == p) {
            let mut sub = stack.split_off(pos);
            sub.push(p);
            loops.push(sub);
        }
        stack.push(p);
    }
    loops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_figure_eight_at_shared_vertex() {
        let noded = vec![
            vector![0.0, 0.0],
            vector![1.0, 1.0],
            vector![2.0, 0.0],
            vector![2.0, 2.0],
            vector![1.0, 1.0],
            vector![0.0, 2.0],
            vector![0.0, 0.0],
        ];
        let loops = split_loops(&noded);
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].len(), 4);
        assert_eq!(loops[0].first(), loops[0].last());
        assert_eq!(loops[1], vec![noded[0], noded[1], noded[5], noded[6]]);
    }

    #[test]
    fn node_inserts_proper_crossing_into_both_edges() {
        let ring = vec![
            vector![0.0, 0.0],
            vector![10.0, 10.0],
            vector![10.0, 0.0],
            vector![0.0, 10.0],
            vector![0.0, 0.0],
        ];
        let noded = node(&ring);
        assert_eq!(noded.len(), 7);
        assert_eq!(noded[1], noded[4]);
        assert!((noded[1] - vector![5.0, 5.0]).norm() < 1e-12);
    }

    #[test]
    fn collinear_ring_has_nothing_to_keep() {
        let ring = vec![
            vector![0.0, 0.0],
            vector![5.0, 0.0],
            vector![10.0, 0.0],
            vector![0.0, 0.0],
        ];
        assert_eq!(repair(&ring).unwrap_err(), GeometryError::ZeroArea);
    }

    #[test]
    fn extent_is_bbox_diagonal() {
        let ring = vec![vector![0.0, 0.0], vector![3.0, 0.0], vector![3.0, 4.0]];
        assert!((extent(&ring) - 5.0).abs() < 1e-12);
        assert_eq!(extent(&[]), 0.0);
    }
}
