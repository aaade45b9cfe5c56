//! End-to-end loop detection for one traced path.
//!
//! `trace_loop` is the geometric core and reports every failure as a
//! `GeometryError`. `detect_closed_loops` is the caller-facing verdict: input
//! problems are errors, geometry problems are a negative result.
//!
//! Output contract
//! - `coordinates`: geographic `[lon, lat]` of the ring the area was computed
//!   on (after duplicate cleanup and the closure edit). A repaired ring is
//!   mapped back through the inverse projection.
//! - `area`: unsigned, square working units (m² under EPSG:3857).

use serde::Serialize;

use crate::closure::{self, Closure, ClosurePolicy};
use crate::crs::Crs;
use crate::error::{DetectError, GeometryError};
use crate::path::{extract_all, LonLat, MissingCoords, Path, PointRecord};
use crate::ring::LoopPolygon;

/// Detection configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectCfg {
    /// Working system for distances and areas.
    pub crs: Crs,
    pub policy: ClosurePolicy,
    /// Tolerance used when a request carries none; `None` falls back to
    /// `crs.default_tolerance()`.
    pub tolerance: Option<f64>,
    pub missing: MissingCoords,
}

impl Default for DetectCfg {
    fn default() -> Self {
        Self {
            crs: Crs::WebMercator,
            policy: ClosurePolicy::Tolerant,
            tolerance: None,
            missing: MissingCoords::Reject,
        }
    }
}

impl DetectCfg {
    /// Effective tolerance: `requested`, else the configured one, else the CRS default.
    pub fn resolve_tolerance(&self, requested: Option<f64>) -> Result<f64, DetectError> {
        let t = requested
            .or(self.tolerance)
            .unwrap_or_else(|| self.crs.default_tolerance());
        if t.is_finite() && t >= 0.0 {
            Ok(t)
        } else {
            Err(DetectError::InvalidTolerance(t))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolygonReport {
    pub coordinates: Vec<[f64; 2]>,
    pub area: f64,
    pub is_valid: bool,
}

/// Verdict for one path.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Detection {
    pub closed_loops: bool,
    pub polygons: Vec<PolygonReport>,
}

impl Detection {
    pub fn negative() -> Self {
        Self::default()
    }

    pub fn closed(polygon: PolygonReport) -> Self {
        Self {
            closed_loops: true,
            polygons: vec![polygon],
        }
    }
}

/// A loop found by `trace_loop`.
#[derive(Clone, Debug, PartialEq)]
pub struct TracedLoop {
    pub closure: Closure,
    pub polygon: LoopPolygon,
    /// Geographic ring matching `polygon`.
    pub coordinates: Vec<LonLat>,
}

impl TracedLoop {
    pub fn report(&self) -> PolygonReport {
        PolygonReport {
            coordinates: self.coordinates.iter().map(|&p| p.into()).collect(),
            area: self.polygon.area(),
            is_valid: true,
        }
    }
}

/// Project, clean, close and build. Any failure means "no loop".
pub fn trace_loop(
    coords: &[LonLat],
    tolerance: f64,
    cfg: &DetectCfg,
) -> Result<TracedLoop, GeometryError> {
    let mut path = Path::project(coords, cfg.crs)?;
    let removed = path.dedup_consecutive();
    if path.len() < 3 {
        return Err(GeometryError::TooFewVertices { count: path.len() });
    }

    let origin = path.origin();
    let gap_m = origin[0].haversine_m(origin[origin.len() - 1]);
    tracing::info!(
        distance = closure::closure_distance(path.points()).unwrap_or(0.0),
        tolerance,
        unit = %cfg.crs.unit(),
        gap_m,
        removed,
        policy = %cfg.policy,
        "closure gap"
    );

    let closure = closure::evaluate(path.points(), tolerance, cfg.policy)?;
    tracing::debug!(edit = ?closure.edit, "closure edit");
    path.apply(closure.edit);
    // A snapped last point can land on its predecessor.
    path.dedup_consecutive();
    path.close();

    let polygon = LoopPolygon::build(path.points())?;
    let coordinates = if polygon.is_repaired() {
        polygon
            .ring()
            .iter()
            .map(|&p| cfg.crs.unproject(p))
            .collect()
    } else {
        path.origin().to_vec()
    };
    Ok(TracedLoop {
        closure,
        polygon,
        coordinates,
    })
}

/// Verdict for `userpath`.
///
/// `tolerance` is the per-request override (see `DetectCfg::resolve_tolerance`).
/// Errors only for malformed input; every geometric failure is a negative verdict.
pub fn detect_closed_loops(
    userpath: &[PointRecord],
    tolerance: Option<f64>,
    cfg: &DetectCfg,
) -> Result<Detection, DetectError> {
    if userpath.len() < 3 {
        tracing::info!(points = userpath.len(), "path too short");
        return Ok(Detection::negative());
    }
    let tolerance = cfg.resolve_tolerance(tolerance)?;
    let coords = extract_all(userpath, cfg.missing)?;
    match trace_loop(&coords, tolerance, cfg) {
        Ok(traced) => {
            tracing::info!(
                area = traced.polygon.area(),
                vertices = traced.polygon.vertex_count(),
                repaired = traced.polygon.is_repaired(),
                "closed loop"
            );
            Ok(Detection::closed(traced.report()))
        }
        Err(err) => {
            tracing::info!(%err, "no closed loop");
            Ok(Detection::negative())
        }
    }
}
