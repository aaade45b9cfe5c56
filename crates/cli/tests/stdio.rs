//! End-to-end runs of the `loop-detect` binary over stdin/stdout.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_loop-detect"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn loop-detect");
    // The binary may exit before reading stdin (fatal configuration).
    let _ = child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("wait")
}

fn response(out: &Output) -> Value {
    assert!(out.status.success(), "exit {:?}", out.status);
    let stdout = String::from_utf8(out.stdout.clone()).expect("utf8");
    let mut lines = stdout.lines();
    let v = serde_json::from_str(lines.next().expect("one line")).expect("json");
    assert!(lines.next().is_none(), "stdout carries only the response: {stdout}");
    v
}

const SQUARE: &str = r#"{"userpath": [
    {"lng": 0, "lat": 0}, {"lng": 0, "lat": 10}, {"lng": 10, "lat": 10},
    {"lng": 10, "lat": 0}, {"lng": 0, "lat": 0}
]}"#;

#[test]
fn truncated_input_yields_error_document() {
    let v = response(&run(&[], r#"{"userpath": ["#));
    assert!(v["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON input: "));
}

#[test]
fn short_path_is_negative() {
    let v = response(&run(&[], r#"{"userpath": [{"lng": 1, "lat": 1}]}"#));
    assert_eq!(v, serde_json::json!({ "closed_loops": false, "polygons": [] }));
}

#[test]
fn planar_square_closes() {
    let out = run(&["--crs", "EPSG:4326", "--log-level", "debug"], SQUARE);
    let v = response(&out);
    assert_eq!(v["closed_loops"], Value::Bool(true));
    let area = v["polygons"][0]["area"].as_f64().unwrap();
    assert!((area - 100.0).abs() < 1e-9);
    // Diagnostics go to stderr, never stdout.
    assert!(!out.stderr.is_empty());
}

#[test]
fn non_object_is_a_processing_error() {
    let v = response(&run(&[], "42"));
    assert!(v["error"]
        .as_str()
        .unwrap()
        .starts_with("Processing error: "));
}

#[test]
fn unknown_crs_is_fatal() {
    let out = run(&["--crs", "EPSG:9999"], SQUARE);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn strict_replaces_last_point_tolerant_appends_first() {
    let open = r#"{"userpath": [
        {"lng": 0, "lat": 0}, {"lng": 0, "lat": 10},
        {"lng": 10, "lat": 10}, {"lng": 10, "lat": 0}, {"lng": 5, "lat": 5}
    ]}"#;
    let strict = response(&run(&["--crs", "EPSG:4326", "--policy", "strict"], open));
    assert_eq!(strict["closed_loops"], Value::Bool(true));
    assert_eq!(strict["polygons"][0]["coordinates"].as_array().unwrap().len(), 5);
    let area = strict["polygons"][0]["area"].as_f64().unwrap();
    assert!((area - 100.0).abs() < 1e-9);

    let tolerant = response(&run(&["--crs", "EPSG:4326"], open));
    assert_eq!(tolerant["closed_loops"], Value::Bool(true));
    assert_eq!(tolerant["polygons"][0]["coordinates"].as_array().unwrap().len(), 6);
    let area = tolerant["polygons"][0]["area"].as_f64().unwrap();
    assert!((area - 75.0).abs() < 1e-9);
}
