use serde::Serialize;
use serde_json::{json, Value};

use crate::feedback::{assess, Finding};
use crate::gpx::{parse_gpx, GpxError};
use crate::metrics::{derive_series, summarize, RoundTo};
use crate::models::{DerivedPoint, TrackPoint, TrackSummary};

/// Resultatet av hele pipelinen for én opplastet fil.
#[derive(Debug, Clone, Serialize)]
pub struct TrackAnalysis {
    pub points: Vec<TrackPoint>,
    pub series: Vec<DerivedPoint>,
    pub summary: TrackSummary,
    pub findings: Vec<Finding>,
    /// Minst ett punkt har pulsdata – styrer om HR-seksjonene vises.
    pub has_heart_rate: bool,
}

/// Parse → deriver → aggreger → vurder, i én pass.
pub fn analyze_track(input: &[u8]) -> Result<TrackAnalysis, GpxError> {
    let points = parse_gpx(input)?;
    let series = derive_series(&points);
    let summary = summarize(&points, &series).ok_or(GpxError::NoPoints)?;
    let findings = assess(&summary);
    let has_heart_rate = points.iter().any(|p| p.heart_rate.is_some());

    Ok(TrackAnalysis {
        points,
        series,
        summary,
        findings,
        has_heart_rate,
    })
}

impl TrackAnalysis {
    /// Visningsnyttelast for presentasjonslaget: tall avrundet til 2
    /// desimaler, udefinerte verdier som null. Avrundingen skjer KUN i
    /// dette laget.
    pub fn display_json(&self) -> Value {
        let table: Vec<Value> = self
            .points
            .iter()
            .zip(self.series.iter())
            .map(|(p, d)| {
                json!({
                    "time": p.time.to_rfc3339(),
                    "latitude": p.lat.round_to(2),
                    "longitude": p.lon.round_to(2),
                    "elevation": p.elevation.map(|e| e.round_to(2)),
                    "heart_rate": p.heart_rate,
                    "distance_delta_m": d.distance_delta_m.round_to(2),
                    "time_delta_s": d.time_delta_s.round_to(2),
                    "elapsed_s": d.elapsed_s.round_to(2),
                    "elapsed_min": d.elapsed_min.round_to(2),
                    "distance_m": d.distance_m.round_to(2),
                    "distance_km": d.distance_km.round_to(2),
                    "pace_min_per_km": d.pace_min_per_km.map(|x| x.round_to(2)),
                })
            })
            .collect();

        let s = &self.summary;
        json!({
            "ok": true,
            "table": table,
            "summary": {
                "total_distance_km": s.total_distance_km.round_to(2),
                "total_time_min": s.total_time_min.round_to(2),
                "avg_pace_min_per_km": s.avg_pace_min_per_km.map(|x| x.round_to(2)),
                "max_heart_rate": s.max_heart_rate,
                "min_pace": s.min_pace.map(|x| x.round_to(2)),
                "max_pace": s.max_pace.map(|x| x.round_to(2)),
                "elevation_gain_m": s.elevation_gain_m.round_to(2),
                "elevation_loss_m": s.elevation_loss_m.round_to(2),
                "pace_std": s.pace_std.map(|x| x.round_to(2)),
            },
            "findings": self.findings,
            "has_heart_rate": self.has_heart_rate,
        })
    }
}
