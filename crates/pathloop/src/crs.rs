//! Coordinate reference systems for the working plane.
//!
//! Purpose
//! - Move geographic degrees into a plane where Euclidean distance and
//!   polygon area mean something (meters under Web Mercator).
//! - `Wgs84` is the identity: coordinates stay in degrees and x = lon, y = lat.
//!
//! Conventions
//! - Axis order is always longitude first, latitude second (x, y).
//! - Web Mercator is the spherical EPSG:3857 form on the WGS84 semi-major
//!   axis; pure f64 arithmetic, so the same input gives bit-identical output.

use std::fmt;
use std::str::FromStr;

use nalgebra::vector;

use crate::error::ProjectionError;
use crate::path::LonLat;
use crate::Xy;

/// WGS84 semi-major axis, the sphere radius of EPSG:3857 (meters).
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Linear unit of a working system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Degrees,
    Meters,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Degrees => write!(f, "deg"),
            Unit::Meters => write!(f, "m"),
        }
    }
}

/// Supported target systems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Crs {
    /// EPSG:4326, no projection.
    Wgs84,
    /// EPSG:3857, spherical Web Mercator.
    #[default]
    WebMercator,
}

impl Crs {
    pub fn code(self) -> &'static str {
        match self {
            Crs::Wgs84 => "EPSG:4326",
            Crs::WebMercator => "EPSG:3857",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Crs::Wgs84 => Unit::Degrees,
            Crs::WebMercator => Unit::Meters,
        }
    }

    /// Closure tolerance used when the caller gives none, in `unit()`.
    pub fn default_tolerance(self) -> f64 {
        match self {
            Crs::Wgs84 => 1e-6,
            Crs::WebMercator => 10.0,
        }
    }

    /// Whether `p` is a usable geographic position with a finite image.
    /// Latitude stays within the poles (Web Mercator excludes them); longitude
    /// is left unbounded since map clients report it unwrapped.
    #[inline]
    pub fn in_domain(self, p: LonLat) -> bool {
        let finite = p.lon.is_finite() && p.lat.is_finite();
        match self {
            Crs::Wgs84 => finite && p.lat.abs() <= 90.0,
            Crs::WebMercator => finite && p.lat.abs() < 90.0,
        }
    }

    /// Geographic → working plane. Unchecked; `project_all` is the checked
    /// entry point.
    #[inline]
    pub fn project(self, p: LonLat) -> Xy {
        match self {
            Crs::Wgs84 => vector![p.lon, p.lat],
            Crs::WebMercator => {
                let x = WEB_MERCATOR_RADIUS * p.lon.to_radians();
                let phi = p.lat.to_radians();
                let y = WEB_MERCATOR_RADIUS * (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln();
                vector![x, y]
            }
        }
    }

    /// Working plane → geographic.
    #[inline]
    pub fn unproject(self, p: Xy) -> LonLat {
        match self {
            Crs::Wgs84 => LonLat::new(p.x, p.y),
            Crs::WebMercator => {
                let lon = (p.x / WEB_MERCATOR_RADIUS).to_degrees();
                let lat = (2.0 * (p.y / WEB_MERCATOR_RADIUS).exp().atan()
                    - std::f64::consts::FRAC_PI_2)
                    .to_degrees();
                LonLat::new(lon, lat)
            }
        }
    }

    /// Project a whole sequence; fails on the first point without a finite image.
    pub fn project_all(self, coords: &[LonLat]) -> Result<Vec<Xy>, ProjectionError> {
        coords
            .iter()
            .enumerate()
            .map(|(index, &p)| {
                if self.in_domain(p) {
                    Ok(self.project(p))
                } else {
                    Err(ProjectionError::OutOfDomain {
                        index,
                        lon: p.lon,
                        lat: p.lat,
                    })
                }
            })
            .collect()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Crs {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EPSG:4326" | "4326" | "WGS84" | "WGS 84" | "CRS84" | "OGC:CRS84" => Ok(Crs::Wgs84),
            "EPSG:3857" | "3857" | "EPSG:900913" | "EPSG:3785" | "WEB_MERCATOR"
            | "WEBMERCATOR" | "PSEUDO-MERCATOR" => Ok(Crs::WebMercator),
            _ => Err(ProjectionError::UnknownCrs(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_and_aliases() {
        assert_eq!("EPSG:4326".parse::<Crs>().unwrap(), Crs::Wgs84);
        assert_eq!("epsg:3857".parse::<Crs>().unwrap(), Crs::WebMercator);
        assert_eq!(" web_mercator ".parse::<Crs>().unwrap(), Crs::WebMercator);
        assert_eq!(Crs::WebMercator.to_string(), "EPSG:3857");
        let err = "EPSG:32633".parse::<Crs>().unwrap_err();
        assert_eq!(err, ProjectionError::UnknownCrs("EPSG:32633".into()));
    }

    #[test]
    fn wgs84_is_identity() {
        let p = LonLat::new(-73.5, 45.25);
        let xy = Crs::Wgs84.project(p);
        assert_eq!((xy.x, xy.y), (-73.5, 45.25));
        assert_eq!(Crs::Wgs84.unproject(xy), p);
    }

    #[test]
    fn web_mercator_reference_values() {
        let xy = Crs::WebMercator.project(LonLat::new(0.0, 0.0));
        assert!(xy.x.abs() < 1e-9 && xy.y.abs() < 1e-9);
        // Antimeridian at x = πR.
        let xy = Crs::WebMercator.project(LonLat::new(180.0, 0.0));
        assert!((xy.x - 20_037_508.342789244).abs() < 1e-6);
        // Square world: the ±85.0511287798° edge maps to y = ±πR.
        let xy = Crs::WebMercator.project(LonLat::new(0.0, 85.051_128_779_806_59));
        assert!((xy.y - 20_037_508.342789244).abs() < 1e-3);
    }

    #[test]
    fn web_mercator_round_trip_and_determinism() {
        let p = LonLat::new(13.404954, 52.520008);
        let a = Crs::WebMercator.project(p);
        let b = Crs::WebMercator.project(p);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        let back = Crs::WebMercator.unproject(a);
        assert!((back.lon - p.lon).abs() < 1e-9);
        assert!((back.lat - p.lat).abs() < 1e-9);
    }

    #[test]
    fn pole_is_out_of_domain() {
        let coords = [LonLat::new(0.0, 10.0), LonLat::new(0.0, 90.0)];
        let err = Crs::WebMercator.project_all(&coords).unwrap_err();
        assert!(matches!(err, ProjectionError::OutOfDomain { index: 1, .. }));
        assert!(Crs::Wgs84.project_all(&coords).is_ok());
        assert!(!Crs::WebMercator.in_domain(LonLat::new(0.0, -90.5)));
        assert!(!Crs::Wgs84.in_domain(LonLat::new(f64::NAN, 0.0)));
    }

    #[test]
    fn latitude_beyond_the_poles_is_out_of_domain() {
        assert!(Crs::Wgs84.in_domain(LonLat::new(190.0, -90.0)));
        for crs in [Crs::Wgs84, Crs::WebMercator] {
            assert!(!crs.in_domain(LonLat::new(0.0, 1e200)));
            let err = crs
                .project_all(&[LonLat::new(0.0, 0.0), LonLat::new(0.0, 91.0)])
                .unwrap_err();
            assert!(matches!(err, ProjectionError::OutOfDomain { index: 1, .. }));
        }
    }
}
