//! Walk around a city block and report the enclosed area.
//!
//! The trace stops a few meters short of where it started, as real GPS traces
//! do. Both policies close it; the area is in Web Mercator square meters.

use pathloop::{detect_closed_loops, ClosurePolicy, DetectCfg, PointRecord};

fn main() {
    // A block of roughly 70 m x 70 m in Berlin-Mitte.
    let trace = [
        (13.40000, 52.52000),
        (13.40000, 52.52063),
        (13.40050, 52.52063),
        (13.40100, 52.52063),
        (13.40100, 52.52000),
        (13.40003, 52.52001),
    ];
    let path: Vec<PointRecord> = trace
        .iter()
        .map(|&(lon, lat)| PointRecord::new(lon, lat))
        .collect();

    for policy in [ClosurePolicy::Tolerant, ClosurePolicy::Strict] {
        let cfg = DetectCfg {
            policy,
            ..Default::default()
        };
        let detection = detect_closed_loops(&path, None, &cfg).expect("well-formed input");
        match detection.polygons.first() {
            Some(p) => println!(
                "policy={policy} closed=true vertices={} area_m2={:.1}",
                p.coordinates.len(),
                p.area
            ),
            None => println!("policy={policy} closed=false"),
        }
    }
}
