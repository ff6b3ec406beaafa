pub mod analyze;
pub mod cli;
pub mod export;
pub mod feedback;
pub mod gpx;
pub mod metrics;
pub mod models;
pub mod splits;

#[cfg(feature = "python")]
mod py;

pub use analyze::{analyze_track, TrackAnalysis};
pub use feedback::{assess, Assessment, Finding};
pub use gpx::{parse_gpx, GpxError};
pub use metrics::{derive_series, summarize};
pub use models::{DerivedPoint, TrackPoint, TrackSummary};
pub use splits::{plan_splits, PacingStyle, SplitError, SplitPlan};

use serde::Deserialize;
use serde_json::json;

/// Analyser GPX og returner visningsnyttelasten som JSON-streng.
///
/// Alle pipeline-feil (ugyldig XML, tomt spor, uparsebare felt) blir
/// `{"ok": false, "reason": ...}` – aldri panic, aldri delvise
/// resultater.
pub fn analyze_gpx_json(gpx_xml: &str) -> Result<String, String> {
    let payload = match analyze_track(gpx_xml.as_bytes()) {
        Ok(analysis) => analysis.display_json(),
        Err(e) => json!({ "ok": false, "reason": e.to_string() }),
    };
    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

#[derive(Debug, Deserialize)]
struct SplitRequestIn {
    distance_m: f64,
    target_s: f64,
    interval_m: f64,
    style: PacingStyle,
}

/// Splitt-planlegging med JSON inn/ut. Parsefeil rapporteres med sti
/// (serde_path_to_error); degenererte inndata blir ok:false.
pub fn plan_splits_json(json_in: &str) -> Result<String, String> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    let req: SplitRequestIn = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| format!("parse error (SplitRequest) at {}: {}", e.path(), e))?;

    let payload = match plan_splits(req.distance_m, req.target_s, req.interval_m, req.style) {
        Ok(plan) => json!({ "ok": true, "plan": plan }),
        Err(e) => json!({ "ok": false, "reason": e.to_string() }),
    };
    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

/// GPX → CSV-tekst for nedlasting (samme avrundede visningsverdier
/// som tabellen).
pub fn gpx_to_csv(gpx_xml: &str) -> Result<String, String> {
    let analysis = analyze_track(gpx_xml.as_bytes()).map_err(|e| e.to_string())?;
    export::derived_csv(&analysis.points, &analysis.series).map_err(|e| e.to_string())
}
