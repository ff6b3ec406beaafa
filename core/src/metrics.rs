use geo::{point, GeodesicDistance};
use ordered_float::OrderedFloat;

use crate::models::{DerivedPoint, TrackPoint, TrackSummary};

// --- RoundTo trait (offentlig, brukt av export og JSON-visning) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Geodetisk distanse (WGS84) i meter mellom to punkter.
#[inline]
fn geodesic_m(a: &TrackPoint, b: &TrackPoint) -> f64 {
    point!(x: a.lon, y: a.lat).geodesic_distance(&point!(x: b.lon, y: b.lat))
}

/// Pace (min/km) for ett segment. None når segmentet ikke dekket
/// distanse – aldri inf/NaN. Delingsvakten bor her og bare her.
#[inline]
pub fn pace_min_per_km(time_delta_s: f64, distance_delta_m: f64) -> Option<f64> {
    if distance_delta_m == 0.0 {
        return None;
    }
    Some((time_delta_s / 60.0) / (distance_delta_m / 1000.0))
}

/// Sample-standardavvik (n-1). None under 2 verdier.
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

/// Bygger den deriverte serien, indeks-justert mot punktene.
///
/// Negative tidsdeltaer (klokkeskjev, lap-markører) klippes IKKE – de
/// propagerer som de er og kan gi negativ pace. Første forekomst varsles
/// som datakvalitetsfunn.
pub fn derive_series(points: &[TrackPoint]) -> Vec<DerivedPoint> {
    let mut out = Vec::with_capacity(points.len());
    if points.is_empty() {
        return out;
    }

    let t0 = points[0].time;
    let mut cum_m = 0.0f64;
    let mut warned_backwards = false;

    for (i, p) in points.iter().enumerate() {
        let (distance_delta_m, time_delta_s) = if i == 0 {
            (0.0, 0.0)
        } else {
            let prev = &points[i - 1];
            (
                geodesic_m(prev, p),
                (p.time - prev.time).num_milliseconds() as f64 / 1000.0,
            )
        };

        if time_delta_s < 0.0 && !warned_backwards {
            log::warn!(
                "timestamps run backwards at point {} (dt = {:.3} s); derived pace may go negative",
                i,
                time_delta_s
            );
            warned_backwards = true;
        }

        cum_m += distance_delta_m;
        let elapsed_s = (p.time - t0).num_milliseconds() as f64 / 1000.0;

        out.push(DerivedPoint {
            distance_delta_m,
            time_delta_s,
            elapsed_s,
            elapsed_min: elapsed_s / 60.0,
            distance_m: cum_m,
            distance_km: cum_m / 1000.0,
            pace_min_per_km: pace_min_per_km(time_delta_s, distance_delta_m),
        });
    }

    out
}

/// Aggregater for økten. None for tom serie.
pub fn summarize(points: &[TrackPoint], series: &[DerivedPoint]) -> Option<TrackSummary> {
    let last = series.last()?;

    let total_distance_km = last.distance_km;
    let total_time_min = last.elapsed_min;
    let avg_pace_min_per_km = if total_distance_km > 0.0 {
        Some(total_time_min / total_distance_km)
    } else {
        None
    };

    let paces: Vec<f64> = series.iter().filter_map(|d| d.pace_min_per_km).collect();
    let min_pace = paces.iter().copied().min_by_key(|p| OrderedFloat(*p));
    let max_pace = paces.iter().copied().max_by_key(|p| OrderedFloat(*p));

    let max_heart_rate = points.iter().filter_map(|p| p.heart_rate).max();

    let (elevation_gain_m, elevation_loss_m) = elevation_gain_loss(points);

    Some(TrackSummary {
        total_distance_km,
        total_time_min,
        avg_pace_min_per_km,
        max_heart_rate,
        min_pace,
        max_pace,
        elevation_gain_m,
        elevation_loss_m,
        pace_std: std_dev(&paces),
    })
}

/// Sum av positive / negative høydedifferanser over punktene som HAR
/// høyde. Uten høydedata: (0, 0).
pub fn elevation_gain_loss(points: &[TrackPoint]) -> (f64, f64) {
    let elevs: Vec<f64> = points.iter().filter_map(|p| p.elevation).collect();
    let mut gain = 0.0;
    let mut loss = 0.0;
    for w in elevs.windows(2) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            gain += delta;
        } else {
            loss += -delta;
        }
    }
    (gain, loss)
}
