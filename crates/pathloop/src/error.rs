//! Error types.
//!
//! Two families with different fates:
//! - `GeometryError`: the path does not make a usable loop. Best effort by
//!   nature, so `detect_closed_loops` turns it into a negative verdict.
//! - `DetectError`: the request itself is malformed. Surfaced to the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("unknown coordinate reference system '{0}'")]
    UnknownCrs(String),
    #[error("point {index} ({lon}, {lat}) has no finite image in the target system")]
    OutOfDomain { index: usize, lon: f64, lat: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("need at least 3 distinct vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("vertex {index} is not finite")]
    NonFinite { index: usize },
    #[error("ring encloses no area")]
    ZeroArea,
    #[error("ring area is not a finite number")]
    NonFiniteArea,
    #[error("ring is still self-intersecting after repair")]
    SelfIntersecting,
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// A point record with neither a longitude nor a latitude.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("point {index} has no {missing}")]
pub struct MalformedPointError {
    pub index: usize,
    pub missing: &'static str,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error(transparent)]
    MalformedPoint(#[from] MalformedPointError),
    #[error("tolerance must be a finite, non-negative number, got {0}")]
    InvalidTolerance(f64),
}
