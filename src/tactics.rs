//! Tactical identity: how a team plays, not how well.

use serde::{Deserialize, Serialize};

pub const MATCH_DURATION_MIN: f64 = 90.0;

pub fn safe_divide(a: f64, b: f64) -> f64 {
    if b == 0.0 { 0.0 } else { a / b }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// First label whose half-open `[min, max)` range holds `value`, else `fallback`.
pub fn label_by_thresholds<L: Copy>(value: f64, thresholds: &[(L, f64, f64)], fallback: L) -> L {
    thresholds
        .iter()
        .find(|(_, min, max)| *min <= value && value < *max)
        .map(|(label, _, _)| *label)
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressingIntensity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PossessionStyle {
    Dominant,
    Balanced,
    Reactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefensiveLine {
    High,
    Medium,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tempo {
    Fast,
    Normal,
    Slow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalMetric<L> {
    pub value: f64,
    pub label: L,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalIdentity {
    pub ppda: TacticalMetric<PressingIntensity>,
    pub possession: TacticalMetric<PossessionStyle>,
    pub defensive_line: TacticalMetric<DefensiveLine>,
    pub tempo: TacticalMetric<Tempo>,
}

/// Passes allowed per defensive action in the opponent's build-up zone.
/// Lower means more aggressive pressing.
pub fn evaluate_ppda(opponent_passes: u32, defensive_actions: u32) -> TacticalMetric<PressingIntensity> {
    let value = safe_divide(opponent_passes as f64, defensive_actions as f64);
    let label = label_by_thresholds(
        value,
        &[
            (PressingIntensity::High, 0.0, 8.0),
            (PressingIntensity::Medium, 8.0, 12.0),
        ],
        PressingIntensity::Low,
    );
    let explanation = match label {
        PressingIntensity::High => "Aggressive pressing in opponent half",
        PressingIntensity::Medium => "Moderate pressing intensity",
        PressingIntensity::Low => "Low pressing, compact defensive shape",
    };
    TacticalMetric {
        value: round_to(value, 2),
        label,
        explanation: explanation.to_string(),
    }
}

pub fn evaluate_possession(team_passes: u32, opponent_passes: u32) -> TacticalMetric<PossessionStyle> {
    let possession = safe_divide(team_passes as f64, (team_passes + opponent_passes) as f64) * 100.0;
    let label = label_by_thresholds(
        possession,
        &[
            (PossessionStyle::Dominant, 55.0, f64::INFINITY),
            (PossessionStyle::Balanced, 45.0, 55.0),
        ],
        PossessionStyle::Reactive,
    );
    let explanation = match label {
        PossessionStyle::Dominant => "Controls the game through possession",
        PossessionStyle::Balanced => "Balanced possession approach",
        PossessionStyle::Reactive => "Plays mostly without the ball",
    };
    TacticalMetric {
        value: round_to(possession, 1),
        label,
        explanation: explanation.to_string(),
    }
}

/// `avg_x` is the mean pitch x (0–100, own goal at 0) of tackles and interceptions.
pub fn evaluate_defensive_line(avg_x: f64) -> TacticalMetric<DefensiveLine> {
    let label = label_by_thresholds(
        avg_x,
        &[
            (DefensiveLine::High, 60.0, f64::INFINITY),
            (DefensiveLine::Medium, 45.0, 60.0),
        ],
        DefensiveLine::Deep,
    );
    let explanation = match label {
        DefensiveLine::High => "High defensive line",
        DefensiveLine::Medium => "Mid-block defensive structure",
        DefensiveLine::Deep => "Deep defensive block",
    };
    TacticalMetric {
        value: round_to(avg_x, 1),
        label,
        explanation: explanation.to_string(),
    }
}

/// Team passes per played minute, assuming full 90-minute matches.
pub fn evaluate_tempo(team_passes: u32, matches_count: u32) -> TacticalMetric<Tempo> {
    let tempo = safe_divide(team_passes as f64, matches_count as f64 * MATCH_DURATION_MIN);
    let label = label_by_thresholds(
        tempo,
        &[(Tempo::Fast, 15.0, f64::INFINITY), (Tempo::Normal, 11.0, 15.0)],
        Tempo::Slow,
    );
    let explanation = match label {
        Tempo::Fast => "Fast ball circulation",
        Tempo::Normal => "Normal game tempo",
        Tempo::Slow => "Slow build-up play",
    };
    TacticalMetric {
        value: round_to(tempo, 2),
        label,
        explanation: explanation.to_string(),
    }
}
