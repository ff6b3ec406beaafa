use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::TrackSummary;

/// Kategori for et funn – den testbare kontrakten. Ordlyden i
/// `message()` er presentasjon og kan justeres fritt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assessment {
    PaceVeryFast,
    PaceStrong,
    PaceSteady,
    HrHigh,
    HrWithinRange,
    PacingVeryConsistent,
    PacingModerateVariation,
    PacingQuiteVariable,
}

impl Assessment {
    pub fn message(&self) -> &'static str {
        match self {
            Assessment::PaceVeryFast => "Very fast average pace - race-level effort.",
            Assessment::PaceStrong => "Strong pace - solid training intensity.",
            Assessment::PaceSteady => "Steady pace - keep it up.",
            Assessment::HrHigh => {
                "Max heart rate above 180 bpm - consider easing off on easy days."
            }
            Assessment::HrWithinRange => "Heart rate stayed within a comfortable range.",
            Assessment::PacingVeryConsistent => "Very consistent pacing.",
            Assessment::PacingModerateVariation => "Moderate pace variation across the run.",
            Assessment::PacingQuiteVariable => {
                "Quite variable pacing - aim for more even splits."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub assessment: Assessment,
    pub message: String,
}

impl From<Assessment> for Finding {
    fn from(assessment: Assessment) -> Self {
        Finding {
            assessment,
            message: assessment.message().to_string(),
        }
    }
}

/// Én rad i beslutningstabellen: første predikat som treffer, vinner.
struct Rule {
    applies: fn(f64) -> bool,
    assessment: Assessment,
}

static PACE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule { applies: |p| p < 4.0, assessment: Assessment::PaceVeryFast },
        Rule { applies: |p| p < 5.0, assessment: Assessment::PaceStrong },
        Rule { applies: |_| true, assessment: Assessment::PaceSteady },
    ]
});

static HR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule { applies: |hr| hr > 180.0, assessment: Assessment::HrHigh },
        Rule { applies: |_| true, assessment: Assessment::HrWithinRange },
    ]
});

static PACE_STD_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule { applies: |s| s < 0.2, assessment: Assessment::PacingVeryConsistent },
        Rule { applies: |s| s < 0.5, assessment: Assessment::PacingModerateVariation },
        Rule { applies: |_| true, assessment: Assessment::PacingQuiteVariable },
    ]
});

fn first_match(rules: &[Rule], x: f64) -> Option<Assessment> {
    rules.iter().find(|r| (r.applies)(x)).map(|r| r.assessment)
}

/// Ren funksjon sammendrag → funn. Kategoriene evalueres uavhengig;
/// udefinerte inndata (ingen puls, for få pace-samples) hopper over
/// sin kategori i stedet for å feile.
pub fn assess(summary: &TrackSummary) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(avg) = summary.avg_pace_min_per_km {
        if let Some(a) = first_match(&PACE_RULES, avg) {
            findings.push(a.into());
        }
    }
    if let Some(hr) = summary.max_heart_rate {
        if let Some(a) = first_match(&HR_RULES, hr as f64) {
            findings.push(a.into());
        }
    }
    if let Some(std) = summary.pace_std {
        if let Some(a) = first_match(&PACE_STD_RULES, std) {
            findings.push(a.into());
        }
    }

    findings
}
