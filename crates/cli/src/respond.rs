use anyhow::{Context, Result};
use pathloop::{detect_closed_loops, DetectCfg, PointRecord};
use serde::Deserialize;
use serde_json::{json, Value};

/// Request document read from stdin.
#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub userpath: Vec<PointRecord>,
    pub tolerance: Option<f64>,
}

/// Turn raw stdin into the response document. Never fails: every outcome is JSON.
pub fn respond(input: &str, cfg: &DetectCfg) -> Value {
    let doc: Value = match serde_json::from_str(input) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "invalid JSON input");
            return json!({ "error": format!("Invalid JSON input: {e}") });
        }
    };
    match process(doc, cfg) {
        Ok(v) => v,
        Err(e) => processing_error(&e),
    }
}

pub fn processing_error(err: &anyhow::Error) -> Value {
    let msg = format!("{err:#}");
    tracing::error!(error = %msg, "processing error");
    json!({ "error": format!("Processing error: {msg}") })
}

fn process(doc: Value, cfg: &DetectCfg) -> Result<Value> {
    let request: Request = serde_json::from_value(doc).context("malformed request")?;
    tracing::info!(points = request.userpath.len(), tolerance = ?request.tolerance, "request");
    let detection = detect_closed_loops(&request.userpath, request.tolerance, cfg)?;
    Ok(serde_json::to_value(detection)?)
}
