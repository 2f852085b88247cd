use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::snapshot::{MatchResult, Snapshot, snapshot_from_results};
use crate::tactics::{
    TacticalIdentity, evaluate_defensive_line, evaluate_possession, evaluate_ppda, evaluate_tempo,
    round_to,
};

const POSSESSION_THRESHOLD_PCT: f64 = 55.0;
const HIGH_PRESS_THRESHOLD: u32 = 15;
const TURNOVER_THRESHOLD: u32 = 20;
const LOW_TEMPO_EVENTS_PER_MIN: f64 = 0.2;

const HIGH_LOAD_MINUTES: f64 = 900.0;
const MEDIUM_LOAD_MINUTES: f64 = 600.0;

static FINDING_LABELS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("POSSESSION_CONTROL", "ball control"),
        ("HIGH_PRESS_ACTIVITY", "active high press"),
        ("HIGH_TURNOVERS", "frequent ball losses"),
        ("LOW_TEMPO", "low tempo of play"),
    ])
});

/// Event tallies for one team over the analysed matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamEventCounts {
    #[serde(default)]
    pub team_passes: u32,
    #[serde(default)]
    pub opponent_passes: u32,
    /// Tackles and interceptions in the opponent's half (x >= 60).
    #[serde(default)]
    pub high_zone_def_actions: u32,
    /// Passes and duels, used as a turnover proxy.
    #[serde(default)]
    pub turnover_actions: u32,
    #[serde(default)]
    pub team_events: u32,
    /// Opponent passes with x >= 40, the PPDA numerator.
    #[serde(default)]
    pub opponent_passes_build_up: u32,
    /// Tackles, interceptions and fouls with x >= 40, the PPDA denominator.
    #[serde(default)]
    pub pressing_actions: u32,
    /// Mean x of the team's tackles and interceptions.
    #[serde(default)]
    pub avg_def_action_x: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSummaryInput {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub matches_count: u32,
    #[serde(default)]
    pub total_minutes: f64,
    #[serde(default)]
    pub players_used: u32,
    #[serde(default)]
    pub starts: u32,
    #[serde(default)]
    pub events: TeamEventCounts,
    /// Per-match scores in kickoff order.
    #[serde(default)]
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFinding {
    pub code: String,
    pub text: String,
    pub evidence: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBlock {
    pub total_minutes: f64,
    pub load_level: LoadLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBlock {
    pub players_used: u32,
    pub starts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSummary {
    pub matches_count: u32,
    pub snapshot: Option<Snapshot>,
    pub tactics: Option<TacticalIdentity>,
    pub load: Option<LoadBlock>,
    pub usage: Option<UsageBlock>,
    pub strengths: Vec<TeamFinding>,
    pub weaknesses: Vec<TeamFinding>,
    pub text: String,
}

pub fn load_level(total_minutes: f64) -> LoadLevel {
    if total_minutes > HIGH_LOAD_MINUTES {
        LoadLevel::High
    } else if total_minutes > MEDIUM_LOAD_MINUTES {
        LoadLevel::Medium
    } else {
        LoadLevel::Low
    }
}

pub fn tactical_identity(input: &TeamSummaryInput) -> TacticalIdentity {
    let events = &input.events;
    TacticalIdentity {
        ppda: evaluate_ppda(events.opponent_passes_build_up, events.pressing_actions),
        possession: evaluate_possession(events.team_passes, events.opponent_passes),
        defensive_line: evaluate_defensive_line(events.avg_def_action_x.unwrap_or(0.0)),
        tempo: evaluate_tempo(events.team_passes, input.matches_count),
    }
}

pub fn finding_label(code: &str) -> &str {
    FINDING_LABELS.get(code).copied().unwrap_or(code)
}

fn finding(code: &str, text: &str, key: &str, value: f64) -> TeamFinding {
    TeamFinding {
        code: code.to_string(),
        text: text.to_string(),
        evidence: BTreeMap::from([(key.to_string(), value)]),
    }
}

pub fn derive_strengths(events: &TeamEventCounts) -> Vec<TeamFinding> {
    let mut out = Vec::new();

    let total_passes = events.team_passes + events.opponent_passes;
    if total_passes > 0 {
        let possession_pct = events.team_passes as f64 / total_passes as f64 * 100.0;
        if possession_pct >= POSSESSION_THRESHOLD_PCT {
            out.push(finding(
                "POSSESSION_CONTROL",
                "The team keeps the ball for most of the time.",
                "possession_pct",
                round_to(possession_pct, 1),
            ));
        }
    }

    if events.high_zone_def_actions >= HIGH_PRESS_THRESHOLD {
        out.push(finding(
            "HIGH_PRESS_ACTIVITY",
            "Active defensive actions high up the pitch.",
            "def_actions_high_zone",
            events.high_zone_def_actions as f64,
        ));
    }

    out
}

pub fn derive_weaknesses(events: &TeamEventCounts, total_minutes: f64) -> Vec<TeamFinding> {
    let mut out = Vec::new();

    if events.turnover_actions >= TURNOVER_THRESHOLD {
        out.push(finding(
            "HIGH_TURNOVERS",
            "The team often loses the ball in passes and duels.",
            "turnovers",
            events.turnover_actions as f64,
        ));
    }

    if total_minutes > 0.0 {
        let tempo = events.team_events as f64 / total_minutes;
        if tempo < LOW_TEMPO_EVENTS_PER_MIN {
            out.push(finding(
                "LOW_TEMPO",
                "The team plays at a low tempo.",
                "events_per_min",
                round_to(tempo, 2),
            ));
        }
    }

    out
}

fn labels(findings: &[TeamFinding]) -> String {
    findings
        .iter()
        .map(|f| finding_label(&f.code))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Aggregate load, usage, strengths and weaknesses into one explainable
/// summary with a plain-language text.
pub fn build_coach_summary(input: &TeamSummaryInput) -> CoachSummary {
    if input.matches_count == 0 {
        return CoachSummary {
            matches_count: 0,
            snapshot: None,
            tactics: None,
            load: None,
            usage: None,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            text: "Not enough data to build an analytical report.".to_string(),
        };
    }

    let load = LoadBlock {
        total_minutes: input.total_minutes,
        load_level: load_level(input.total_minutes),
    };
    let usage = UsageBlock {
        players_used: input.players_used,
        starts: input.starts,
    };
    let strengths = derive_strengths(&input.events);
    let weaknesses = derive_weaknesses(&input.events, input.total_minutes);

    let mut sentences = vec![
        match load.load_level {
            LoadLevel::High => "The team is under a high match load.".to_string(),
            LoadLevel::Medium => "The team's load is at a medium level.".to_string(),
            LoadLevel::Low => "The team's load is relatively low.".to_string(),
        },
        format!("Players used in the analysed matches: {}.", usage.players_used),
    ];
    if !strengths.is_empty() {
        sentences.push(format!("Team strengths: {}.", labels(&strengths)));
    }
    if !weaknesses.is_empty() {
        sentences.push(format!("Areas to improve: {}.", labels(&weaknesses)));
    }
    log::debug!(
        "coach summary: load={:?} strengths={} weaknesses={}",
        load.load_level,
        strengths.len(),
        weaknesses.len()
    );

    CoachSummary {
        matches_count: input.matches_count,
        snapshot: Some(snapshot_from_results(&input.results)),
        tactics: Some(tactical_identity(input)),
        load: Some(load),
        usage: Some(usage),
        strengths,
        weaknesses,
        text: sentences.join(" "),
    }
}
