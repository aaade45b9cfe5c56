//! Point records as they arrive from the caller.

use serde::Deserialize;

use super::LonLat;
use crate::error::MalformedPointError;

/// One traced point. Longitude may come as `lng` or `lon` (`lng` wins);
/// unknown keys such as timestamps are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct PointRecord {
    pub lng: Option<f64>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

/// What to do with a record that has neither longitude nor latitude.
///
/// A record missing only one of them always reads the other as 0.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingCoords {
    /// Fail with `MalformedPointError`.
    #[default]
    Reject,
    /// Read it as (0, 0).
    Zero,
}

impl PointRecord {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lng: Some(lon),
            lon: None,
            lat: Some(lat),
        }
    }

    #[inline]
    pub fn longitude(&self) -> Option<f64> {
        self.lng.or(self.lon)
    }

    pub fn extract(&self, index: usize, missing: MissingCoords) -> Result<LonLat, MalformedPointError> {
        match (self.longitude(), self.lat, missing) {
            (None, None, MissingCoords::Reject) => Err(MalformedPointError {
                index,
                missing: "longitude (lng/lon) or latitude (lat)",
            }),
            (lon, lat, _) => Ok(LonLat {
                lon: lon.unwrap_or(0.0),
                lat: lat.unwrap_or(0.0),
            }),
        }
    }
}

/// Extract every record, failing on the first malformed one.
pub fn extract_all(
    records: &[PointRecord],
    missing: MissingCoords,
) -> Result<Vec<LonLat>, MalformedPointError> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.extract(i, missing))
        .collect()
}
