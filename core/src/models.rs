use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ett råpunkt fra GPX (flatet ut over tracks/segments, i kildeorden).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPoint {
    pub time: DateTime<Utc>,     // UTC
    pub lat: f64,                // desimalgrader
    pub lon: f64,                // desimalgrader
    pub elevation: Option<f64>,  // meter
    pub heart_rate: Option<u32>, // bpm, fra extensions
}

/// Derivert rad, indeks-justert mot TrackPoint-sekvensen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub distance_delta_m: f64, // 0.0 for første punkt
    pub time_delta_s: f64,     // kan være 0 eller negativ (se metrics)
    pub elapsed_s: f64,
    pub elapsed_min: f64,
    pub distance_m: f64, // kumulativ
    pub distance_km: f64,
    /// None når segmentet ikke dekket distanse (inkl. første punkt).
    pub pace_min_per_km: Option<f64>,
}

/// Aggregater for hele økten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    pub total_distance_km: f64,
    pub total_time_min: f64,
    /// Total tid / total distanse – ikke snittet av per-punkt pace.
    /// None når total distanse er null.
    pub avg_pace_min_per_km: Option<f64>,
    pub max_heart_rate: Option<u32>,
    pub min_pace: Option<f64>,
    pub max_pace: Option<f64>,
    pub elevation_gain_m: f64,
    pub elevation_loss_m: f64,
    /// Standardavvik av definert pace. None under 2 samples.
    pub pace_std: Option<f64>,
}
