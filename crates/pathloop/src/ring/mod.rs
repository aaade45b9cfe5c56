//! Polygon construction from a closed (or closable) point sequence.
//!
//! Validity
//! - A ring is accepted when it is simple (no two non-adjacent edges meet,
//!   adjacent edges meet only in their shared vertex) and encloses strictly
//!   positive area.
//! - An invalid ring gets exactly one repair pass (`repair::repair`) and one
//!   re-test. No retries.
//!
//! Area is unsigned, in square working units, and always finite. Orientation
//! is kept as traced.

mod repair;
mod simple;

pub use simple::{first_crossing, ring_area};

use crate::error::GeometryError;
use crate::Xy;

/// A validated loop polygon in working coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopPolygon {
    ring: Vec<Xy>,
    area: f64,
    repaired: bool,
}

impl LoopPolygon {
    /// Build from `points`, closing the ring if the last point differs from the first.
    pub fn build(points: &[Xy]) -> Result<Self, GeometryError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFinite { index });
        }
        let mut ring = points.to_vec();
        if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
            if first != last {
                ring.push(first);
            }
        }
        ring.dedup();
        let count = ring.len().saturating_sub(1);
        if count < 3 {
            return Err(GeometryError::TooFewVertices { count });
        }

        let area = ring_area(&ring);
        if !area.is_finite() {
            return Err(GeometryError::NonFiniteArea);
        }
        let crossing = first_crossing(&ring);
        if area > 0.0 && crossing.is_none() {
            return Ok(Self {
                ring,
                area,
                repaired: false,
            });
        }

        tracing::warn!(vertices = count, area, crossing = ?crossing, "invalid ring; repairing");
        let fixed = repair::repair(&ring)?;
        if first_crossing(&fixed).is_some() {
            return Err(GeometryError::SelfIntersecting);
        }
        let area = ring_area(&fixed);
        if !area.is_finite() {
            return Err(GeometryError::NonFiniteArea);
        }
        if area <= 0.0 {
            return Err(GeometryError::ZeroArea);
        }
        Ok(Self {
            ring: fixed,
            area,
            repaired: true,
        })
    }

    /// Closed ring (first == last).
    #[inline]
    pub fn ring(&self) -> &[Xy] {
        &self.ring
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Whether the traced ring was invalid and this is the repaired one.
    #[inline]
    pub fn is_repaired(&self) -> bool {
        self.repaired
    }

    /// Distinct vertices (closing point not counted).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }
}
