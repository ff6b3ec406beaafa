use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::models::TrackPoint;

#[derive(Debug, Error)]
pub enum GpxError {
    #[error("malformed GPX: {0}")]
    Malformed(String),
    #[error("invalid {field} value '{value}' at track point {index}")]
    InvalidValue {
        field: &'static str,
        value: String,
        index: usize,
    },
    #[error("no usable track points in file")]
    NoPoints,
}

/// Child-element under <trkpt> som samles inn som tekst.
enum Capture {
    Ele,
    Time,
    Hr,
}

/// Leser GPX-bytes til en flat, ordnet punktsekvens.
///
/// Alle tracks og segmenter konkateneres i kildeorden – resten av
/// pipelinen forventer én sammenhengende serie. Extensions skannes for
/// felt med "hr" i tag-navnet (case-insensitivt); siste funn vinner.
/// Punkter uten <time> kan ikke delta i tid/pace og droppes med varsel.
pub fn parse_gpx(input: &[u8]) -> Result<Vec<TrackPoint>, GpxError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    let mut points: Vec<TrackPoint> = Vec::new();
    let mut dropped_timeless = 0usize;

    let mut in_trkpt = false;
    let mut in_extensions = false;
    let mut capture: Option<Capture> = None;
    let mut capture_tag = String::new();
    let mut text = String::new();

    let mut lat = 0.0f64;
    let mut lon = 0.0f64;
    let mut time: Option<DateTime<Utc>> = None;
    let mut elevation: Option<f64> = None;
    let mut heart_rate: Option<u32> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| GpxError::Malformed(format!("at byte {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(ref e) => {
                let local = local_name(e);
                if local == "trkpt" {
                    in_trkpt = true;
                    time = None;
                    elevation = None;
                    heart_rate = None;
                    let (a, o) = point_coords(e, points.len())?;
                    lat = a;
                    lon = o;
                } else if in_trkpt {
                    if local == "extensions" {
                        in_extensions = true;
                    } else if in_extensions {
                        // Under <extensions> er bare puls-felt interessante
                        if local.contains("hr") {
                            capture = Some(Capture::Hr);
                            capture_tag = local;
                            text.clear();
                        }
                    } else if local == "ele" {
                        capture = Some(Capture::Ele);
                        capture_tag = local;
                        text.clear();
                    } else if local == "time" {
                        capture = Some(Capture::Time);
                        capture_tag = local;
                        text.clear();
                    }
                }
            }

            Event::Empty(ref e) => {
                // Selv-lukkende <trkpt .../> mangler <time> og droppes.
                if local_name(e) == "trkpt" {
                    point_coords(e, points.len())?;
                    dropped_timeless += 1;
                }
            }

            Event::Text(ref t) => {
                if capture.is_some() {
                    let piece = t
                        .unescape()
                        .map_err(|e| GpxError::Malformed(e.to_string()))?;
                    text.push_str(&piece);
                }
            }

            Event::End(ref e) => {
                let local = lowercase_local(e.name().local_name().as_ref());
                if capture.is_some() && local == capture_tag {
                    let value = text.trim().to_string();
                    match capture.take() {
                        Some(Capture::Ele) => {
                            elevation =
                                Some(value.parse::<f64>().map_err(|_| GpxError::InvalidValue {
                                    field: "elevation",
                                    value: value.clone(),
                                    index: points.len(),
                                })?);
                        }
                        Some(Capture::Time) => {
                            let parsed = DateTime::parse_from_rfc3339(&value).map_err(|_| {
                                GpxError::InvalidValue {
                                    field: "time",
                                    value: value.clone(),
                                    index: points.len(),
                                }
                            })?;
                            time = Some(parsed.with_timezone(&Utc));
                        }
                        Some(Capture::Hr) => {
                            heart_rate =
                                Some(value.parse::<u32>().map_err(|_| GpxError::InvalidValue {
                                    field: "heart_rate",
                                    value: value.clone(),
                                    index: points.len(),
                                })?);
                        }
                        None => {}
                    }
                } else if local == "extensions" {
                    in_extensions = false;
                } else if local == "trkpt" {
                    in_trkpt = false;
                    in_extensions = false;
                    capture = None;
                    match time {
                        Some(t) => points.push(TrackPoint {
                            time: t,
                            lat,
                            lon,
                            elevation,
                            heart_rate,
                        }),
                        None => dropped_timeless += 1,
                    }
                }
            }

            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if dropped_timeless > 0 {
        log::warn!("dropped {} track point(s) without a timestamp", dropped_timeless);
    }
    if points.is_empty() {
        return Err(GpxError::NoPoints);
    }
    Ok(points)
}

/// lat/lon-attributtene på et <trkpt>.
fn point_coords(e: &BytesStart, index: usize) -> Result<(f64, f64), GpxError> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|e| GpxError::Malformed(e.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"lat" || key == b"lon" {
            let raw = attr
                .unescape_value()
                .map_err(|e| GpxError::Malformed(e.to_string()))?;
            let parsed = raw.parse::<f64>().map_err(|_| GpxError::InvalidValue {
                field: if key == b"lat" { "lat" } else { "lon" },
                value: raw.to_string(),
                index,
            })?;
            if key == b"lat" {
                lat = Some(parsed);
            } else {
                lon = Some(parsed);
            }
        }
    }
    match (lat, lon) {
        (Some(a), Some(o)) => Ok((a, o)),
        _ => Err(GpxError::Malformed(format!(
            "trkpt {} missing lat/lon attribute",
            index
        ))),
    }
}

/// Lokalt tag-navn (uten namespace-prefiks), lowercaset.
fn local_name(e: &BytesStart) -> String {
    lowercase_local(e.name().local_name().as_ref())
}

fn lowercase_local(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}
