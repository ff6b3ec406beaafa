use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tillatte splitt-intervaller (meter).
pub const SPLIT_INTERVALS_M: [f64; 5] = [100.0, 200.0, 400.0, 500.0, 1000.0];
/// Korteste distanse planleggeren aksepterer (meter).
pub const MIN_RACE_DISTANCE_M: f64 = 100.0;
/// Tempo-endring per splitt for progressive stiler (2 %).
const PROGRESSION_STEP: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacingStyle {
    Even,
    /// Progressivt raskere utover i løpet.
    Negative,
    /// Progressivt saktere utover i løpet.
    Positive,
}

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("race distance must be at least 100 m, got {0} m")]
    DistanceTooShort(f64),
    #[error("split interval {0} m is not one of the supported intervals")]
    UnsupportedInterval(f64),
    #[error("target duration must be positive, got {0} s")]
    NonPositiveDuration(f64),
    #[error("split interval {interval_m} m leaves no full splits over {distance_m} m")]
    NoSplits { interval_m: f64, distance_m: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub index: u32, // 1-basert
    pub split_time_s: f64,
    pub cumulative_s: f64,
    pub split_display: String,      // M:SS
    pub cumulative_display: String, // M:SS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPlan {
    pub distance_m: f64,
    pub target_s: f64,
    pub interval_m: f64,
    pub style: PacingStyle,
    pub splits: Vec<Split>,
}

/// Minutt:sekund-format med nullpaddede sekunder ("1:40", "0:05").
pub fn format_min_sec(total_s: f64) -> String {
    let secs = total_s.round() as i64;
    let (sign, secs) = if secs < 0 { ("-", -secs) } else { ("", secs) };
    format!("{}{}:{:02}", sign, secs / 60, secs % 60)
}

/// Genererer splitt-målene for et løp.
///
/// Negative/Positive renormaliserer IKKE: summen av genererte splitter
/// avviker generelt fra måltiden. Det er bevart oppførsel, ikke en bug.
pub fn plan_splits(
    distance_m: f64,
    target_s: f64,
    interval_m: f64,
    style: PacingStyle,
) -> Result<SplitPlan, SplitError> {
    if !(distance_m >= MIN_RACE_DISTANCE_M) {
        return Err(SplitError::DistanceTooShort(distance_m));
    }
    if !SPLIT_INTERVALS_M.contains(&interval_m) {
        return Err(SplitError::UnsupportedInterval(interval_m));
    }
    if !(target_s > 0.0) {
        return Err(SplitError::NonPositiveDuration(target_s));
    }

    let num_splits = (distance_m / interval_m).floor() as u32;
    if num_splits == 0 {
        return Err(SplitError::NoSplits {
            interval_m,
            distance_m,
        });
    }

    let base = target_s / num_splits as f64;
    let mut cumulative = 0.0f64;
    let mut splits = Vec::with_capacity(num_splits as usize);

    for i in 1..=num_splits {
        let factor = match style {
            PacingStyle::Even => 1.0,
            PacingStyle::Negative => 1.0 - PROGRESSION_STEP * (i - 1) as f64,
            PacingStyle::Positive => 1.0 + PROGRESSION_STEP * (i - 1) as f64,
        };
        let split_time_s = base * factor;
        cumulative += split_time_s;
        splits.push(Split {
            index: i,
            split_time_s,
            cumulative_s: cumulative,
            split_display: format_min_sec(split_time_s),
            cumulative_display: format_min_sec(cumulative),
        });
    }

    Ok(SplitPlan {
        distance_m,
        target_s,
        interval_m,
        style,
        splits,
    })
}
