//! Loop-closure detection for traced geographic paths.
//!
//! A caller hands over the points a user traced on a map; this crate decides
//! whether the trace encloses an area and, if so, returns that polygon with its
//! area measured in the working coordinate system.
//!
//! Pipeline (single pass, no state between calls)
//! - `path::extract`: point records → geographic `LonLat`.
//! - `crs`: geographic → working plane (identity or Web Mercator meters).
//! - `path::clean`: drop consecutive exact duplicates.
//! - `closure`: first/last gap vs. tolerance under a `ClosurePolicy`.
//! - `ring`: build the ring, validate, repair once, measure.
//!
//! `detect::detect_closed_loops` glues the stages and turns every
//! `GeometryError` into a negative verdict.

pub mod closure;
pub mod crs;
pub mod detect;
pub mod error;
pub mod path;
pub mod ring;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Working-plane point (x, y) in the units of the active `Crs`.
pub type Xy = nalgebra::Vector2<f64>;

pub use closure::{Closure, ClosureEdit, ClosurePolicy};
pub use crs::Crs;
pub use detect::{
    detect_closed_loops, trace_loop, DetectCfg, Detection, PolygonReport, TracedLoop,
};
pub use error::{DetectError, GeometryError, MalformedPointError, ProjectionError};
pub use path::{LonLat, MissingCoords, Path, PointRecord};
pub use ring::LoopPolygon;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::closure::{Closure, ClosurePolicy};
    pub use crate::crs::Crs;
    pub use crate::detect::{detect_closed_loops, DetectCfg, Detection};
    pub use crate::path::{LonLat, PointRecord};
    pub use crate::Xy;
}
