use serde::{Deserialize, Serialize};

use crate::error::InsightError;

const LIMITED_BELOW_MINUTES: f64 = 300.0;
const RELIABLE_FROM_MINUTES: f64 = 900.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityTier {
    Limited,
    Medium,
    Reliable,
}

impl ReliabilityTier {
    pub fn label(self) -> &'static str {
        match self {
            ReliabilityTier::Limited => "Limited data — insights may be unstable",
            ReliabilityTier::Medium => "Medium reliability",
            ReliabilityTier::Reliable => "Reliable data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reliability {
    pub tier: ReliabilityTier,
    pub warning: bool,
}

/// Classify how much playing time backs a set of metrics.
///
/// Tiers are half-open: `[0, 300)` limited, `[300, 900)` medium, `[900, ∞)`
/// reliable. Negative and non-finite minutes are rejected rather than folded
/// into the limited tier.
pub fn classify_reliability(minutes_played: f64) -> Result<Reliability, InsightError> {
    if !minutes_played.is_finite() || minutes_played < 0.0 {
        log::warn!("rejecting minutes_played={minutes_played} for reliability");
        return Err(InsightError::InvalidInput {
            field: "minutes_played",
            value: minutes_played,
        });
    }

    let reliability = if minutes_played < LIMITED_BELOW_MINUTES {
        Reliability {
            tier: ReliabilityTier::Limited,
            warning: true,
        }
    } else if minutes_played < RELIABLE_FROM_MINUTES {
        Reliability {
            tier: ReliabilityTier::Medium,
            warning: false,
        }
    } else {
        Reliability {
            tier: ReliabilityTier::Reliable,
            warning: false,
        }
    };
    Ok(reliability)
}
