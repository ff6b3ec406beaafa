use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::models::{DerivedPoint, TrackPoint};

/// Kolonnerekkefølgen i den deriverte tabellen (og CSV-headeren).
pub const DERIVED_COLUMNS: [&str; 12] = [
    "time",
    "latitude",
    "longitude",
    "elevation",
    "heart_rate",
    "distance_delta_m",
    "time_delta_s",
    "elapsed_s",
    "elapsed_min",
    "distance_m",
    "distance_km",
    "pace_min_per_km",
];

#[inline]
fn cell(x: f64) -> String {
    format!("{:.2}", x)
}

/// Den deriverte tabellen som CSV-tekst.
///
/// Samme avrundede visningsverdier som tabellen (2 desimaler);
/// fraværende valgfelt blir tomme celler. Avrunding skjer bare her –
/// aggregatene regnes alltid på uavrundede tall.
pub fn derived_csv(points: &[TrackPoint], series: &[DerivedPoint]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&DERIVED_COLUMNS)?;

    for (p, d) in points.iter().zip(series.iter()) {
        let row = [
            p.time.to_rfc3339(),
            cell(p.lat),
            cell(p.lon),
            p.elevation.map(cell).unwrap_or_default(),
            p.heart_rate.map(|h| h.to_string()).unwrap_or_default(),
            cell(d.distance_delta_m),
            cell(d.time_delta_s),
            cell(d.elapsed_s),
            cell(d.elapsed_min),
            cell(d.distance_m),
            cell(d.distance_km),
            d.pace_min_per_km.map(cell).unwrap_or_default(),
        ];
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing csv writer")?;
    String::from_utf8(bytes).context("csv output was not valid utf-8")
}

/// Skriver den deriverte tabellen til disk.
pub fn write_derived_csv(
    path: &Path,
    points: &[TrackPoint],
    series: &[DerivedPoint],
) -> anyhow::Result<()> {
    let csv = derived_csv(points, series)?;
    fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
