//! Traced paths: geographic input and its working-plane image.
//!
//! A `Path` keeps both representations side by side. Distances and areas are
//! only ever taken on the working coordinates (`points`), while `origin` holds
//! the geographic positions the caller sent, index-aligned, so the verdict can
//! be reported in coordinates the caller recognizes.

mod clean;
mod extract;

pub use clean::dedup_consecutive;
pub use extract::{extract_all, MissingCoords, PointRecord};

use serde::Serialize;

use crate::closure::ClosureEdit;
use crate::crs::Crs;
use crate::error::ProjectionError;
use crate::Xy;

/// Mean Earth radius used for haversine distances (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic position in degrees (longitude first, matching x/y order).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Great-circle distance in meters on a sphere of radius `EARTH_RADIUS_M`.
    pub fn haversine_m(self, other: LonLat) -> f64 {
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let dphi = (other.lat - self.lat).to_radians();
        let dlambda = (other.lon - self.lon).to_radians();
        let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl From<LonLat> for [f64; 2] {
    #[inline]
    fn from(p: LonLat) -> Self {
        [p.lon, p.lat]
    }
}

/// Ordered points in a known working system, with their geographic origin.
///
/// Invariant: `origin.len() == points.len()` and `points[i]` is the image of
/// `origin[i]` under `crs` (closure edits apply to both in lockstep).
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    crs: Crs,
    origin: Vec<LonLat>,
    points: Vec<Xy>,
}

impl Path {
    /// Project geographic coordinates into `crs`.
    pub fn project(coords: &[LonLat], crs: Crs) -> Result<Self, ProjectionError> {
        let points = crs.project_all(coords)?;
        Ok(Self {
            crs,
            origin: coords.to_vec(),
            points,
        })
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Working-plane coordinates.
    #[inline]
    pub fn points(&self) -> &[Xy] {
        &self.points
    }

    /// Geographic coordinates as received.
    #[inline]
    pub fn origin(&self) -> &[LonLat] {
        &self.origin
    }

    pub(crate) fn apply(&mut self, edit: ClosureEdit) {
        edit.apply(&mut self.origin);
        edit.apply(&mut self.points);
    }

    /// Append the first point unless the path already ends on it.
    pub(crate) fn close(&mut self) {
        if self.points.first() != self.points.last() {
            self.apply(ClosureEdit::AppendFirst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_one_degree_on_equator() {
        let d = LonLat::new(0.0, 0.0).haversine_m(LonLat::new(1.0, 0.0));
        // 2πR / 360
        assert!((d - 111_194.93).abs() < 0.1);
        assert_eq!(LonLat::new(5.0, 5.0).haversine_m(LonLat::new(5.0, 5.0)), 0.0);
    }

    #[test]
    fn project_keeps_origin_aligned() {
        let coords = [LonLat::new(10.0, 20.0), LonLat::new(11.0, 21.0)];
        let p = Path::project(&coords, Crs::WebMercator).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.origin(), &coords);
        assert_eq!(p.crs(), Crs::WebMercator);
        assert!(p.points()[0].x > 1_000_000.0);
    }

    #[test]
    fn apply_edit_touches_both_representations() {
        let coords = [
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(1.0, 1.0),
        ];
        let mut p = Path::project(&coords, Crs::Wgs84).unwrap();
        p.apply(ClosureEdit::AppendFirst);
        assert_eq!(p.len(), 4);
        assert_eq!(p.origin()[3], coords[0]);
        assert_eq!(p.points()[3], p.points()[0]);
        p.close();
        assert_eq!(p.len(), 4);
    }
}
