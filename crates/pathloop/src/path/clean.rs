//! Consecutive duplicate removal.
//!
//! Exact coordinate equality only; non-adjacent repeats (a path crossing an
//! earlier vertex) are left alone.

use super::{LonLat, Path};
use crate::Xy;

/// Copy of `points` with every run of equal neighbours collapsed to its first element.
pub fn dedup_consecutive(points: &[Xy]) -> Vec<Xy> {
    let mut out = points.to_vec();
    out.dedup();
    out
}

impl Path {
    /// Collapse runs of equal working coordinates, keeping the first of each run
    /// together with its geographic origin. Returns the number of points removed.
    pub fn dedup_consecutive(&mut self) -> usize {
        let before = self.points.len();
        let mut pairs: Vec<_> = self
            .origin
            .drain(..)
            .zip(self.points.drain(..))
            .collect();
        pairs.dedup_by(|next, kept| next.1 == kept.1);
        let (origin, points): (Vec<LonLat>, Vec<Xy>) = pairs.into_iter().unzip();
        self.origin = origin;
        self.points = points;
        before - self.points.len()
    }
}
