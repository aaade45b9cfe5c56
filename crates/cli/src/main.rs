use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pathloop::{ClosurePolicy, Crs, DetectCfg, MissingCoords};
use tracing_subscriber::fmt::SubscriberBuilder;

mod respond;

#[derive(Parser)]
#[command(name = "loop-detect")]
#[command(about = "Decide whether a traced path closes into a polygon (JSON on stdin, JSON on stdout)")]
struct Cmd {
    /// Working coordinate system for distances and areas (EPSG:3857 or EPSG:4326)
    #[arg(long, default_value = "EPSG:3857")]
    crs: String,

    /// Closure policy: strict or tolerant
    #[arg(long, default_value_t = ClosurePolicy::Tolerant)]
    policy: ClosurePolicy,

    /// Tolerance for requests that carry none, in working units [default: 10 m / 1e-6 deg]
    #[arg(long)]
    tolerance: Option<f64>,

    /// Read a point with neither lng/lon nor lat as (0, 0) instead of rejecting it
    #[arg(long)]
    default_missing_coords: bool,

    /// Max level of diagnostics written to stderr
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

impl Cmd {
    fn detect_cfg(&self) -> Result<DetectCfg> {
        let crs: Crs = self
            .crs
            .parse()
            .context("fatal configuration error: --crs")?;
        if let Some(t) = self.tolerance {
            if !(t.is_finite() && t >= 0.0) {
                bail!("fatal configuration error: --tolerance must be finite and non-negative, got {t}");
            }
        }
        Ok(DetectCfg {
            crs,
            policy: self.policy,
            tolerance: self.tolerance,
            missing: if self.default_missing_coords {
                MissingCoords::Zero
            } else {
                MissingCoords::Reject
            },
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(cmd.log_level)
        .with_writer(std::io::stderr)
        .init();
    let cfg = cmd.detect_cfg()?;
    tracing::debug!(crs = %cfg.crs, policy = %cfg.policy, tolerance = ?cfg.tolerance, "config");

    let mut input = String::new();
    let response = match std::io::stdin().read_to_string(&mut input) {
        Ok(_) => respond::respond(&input, &cfg),
        Err(e) => respond::processing_error(&anyhow::Error::new(e).context("reading stdin")),
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
