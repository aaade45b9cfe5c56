//! Closure evaluation: does the path end where it started?
//!
//! The gap is the Euclidean distance between the first and last point in the
//! working plane, so the tolerance is in the working unit (meters under Web
//! Mercator, degrees under WGS84). Two policies:
//! - `Strict`: an exactly closed ring is used untouched. Otherwise the last
//!   point is replaced by the first, whatever the gap.
//! - `Tolerant`: never rejects on distance. Above tolerance the first point is
//!   appended; within tolerance the sequence is left as-is and the ring is
//!   closed implicitly when built.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::GeometryError;
use crate::Xy;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClosurePolicy {
    Strict,
    #[default]
    Tolerant,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown closure policy '{0}' (expected 'strict' or 'tolerant')")]
pub struct UnknownPolicy(pub String);

impl FromStr for ClosurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ClosurePolicy::Strict),
            "tolerant" => Ok(ClosurePolicy::Tolerant),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ClosurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosurePolicy::Strict => f.write_str("strict"),
            ClosurePolicy::Tolerant => f.write_str("tolerant"),
        }
    }
}

/// Change applied to the point sequence before the ring is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosureEdit {
    Keep,
    AppendFirst,
    ReplaceLast,
}

impl ClosureEdit {
    /// Apply to any index-aligned sequence (working or geographic points).
    pub fn apply<T: Copy>(self, points: &mut Vec<T>) {
        let Some(&first) = points.first() else {
            return;
        };
        match self {
            ClosureEdit::Keep => {}
            ClosureEdit::AppendFirst => points.push(first),
            ClosureEdit::ReplaceLast => {
                if let Some(last) = points.last_mut() {
                    *last = first;
                }
            }
        }
    }
}

/// Outcome of a successful closure check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Closure {
    pub distance: f64,
    pub tolerance: f64,
    pub edit: ClosureEdit,
}

impl Closure {
    #[inline]
    pub fn within_tolerance(&self) -> bool {
        self.distance <= self.tolerance
    }
}

/// Distance between the first and last point, `None` for an empty slice.
#[inline]
pub fn closure_distance(points: &[Xy]) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    Some((last - first).norm())
}

/// Decide how to close `points` under `policy`.
///
/// Pre: `points` has been cleaned of consecutive duplicates.
/// Errors: `TooFewVertices` below 3 points.
pub fn evaluate(
    points: &[Xy],
    tolerance: f64,
    policy: ClosurePolicy,
) -> Result<Closure, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            count: points.len(),
        });
    }
    let distance = closure_distance(points).unwrap_or(0.0);
    let edit = match policy {
        ClosurePolicy::Strict if distance == 0.0 => ClosureEdit::Keep,
        ClosurePolicy::Strict => ClosureEdit::ReplaceLast,
        ClosurePolicy::Tolerant if distance <= tolerance => ClosureEdit::Keep,
        ClosurePolicy::Tolerant => ClosureEdit::AppendFirst,
    };
    Ok(Closure {
        distance,
        tolerance,
        edit,
    })
}
