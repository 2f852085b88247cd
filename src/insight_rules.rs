use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::insight::{Confidence, Insight, InsightSources, LOW_SAMPLE_SIZE, confidence_from_activity};

pub const ATTACK_FOCUS: &str = "ATTACK_FOCUS";
pub const LOW_DEFENSIVE_INVOLVEMENT: &str = "LOW_DEFENSIVE_INVOLVEMENT";
pub const DISCIPLINE_ISSUE: &str = "DISCIPLINE_ISSUE";
pub const HIGH_INVOLVEMENT: &str = "HIGH_INVOLVEMENT";

/// A player on the pitch for this many minutes or fewer gets a low-sample finding.
pub const LOW_SAMPLE_MAX_MINUTES: f64 = 10.0;
const HIGH_INVOLVEMENT_PASSES: u32 = 30;
const HIGH_INVOLVEMENT_CONFIDENT_PASSES: u32 = 40;

/// Events one player produced in one phase of play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseActivity {
    #[serde(default)]
    pub events: u32,
    /// Distinct match minutes with at least one event in this phase.
    #[serde(default)]
    pub minutes_active: u32,
}

/// Single-match activity for one player, keyed by phase
/// ("attack", "defence", "transition", "discipline", "set_piece").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchActivity {
    #[serde(default)]
    pub minutes_played: f64,
    #[serde(default)]
    pub passes: u32,
    #[serde(default)]
    pub phases: BTreeMap<String, PhaseActivity>,
}

#[derive(Debug, Clone, Copy)]
enum EventBound {
    AtLeast(u32),
    AtMost(u32),
}

impl EventBound {
    fn matches(self, events: u32) -> bool {
        match self {
            EventBound::AtLeast(min) => events >= min,
            EventBound::AtMost(max) => events <= max,
        }
    }
}

struct PhaseRule {
    code: &'static str,
    phase: &'static str,
    bound: EventBound,
    text: &'static str,
}

const PHASE_RULES: &[PhaseRule] = &[
    PhaseRule {
        code: ATTACK_FOCUS,
        phase: "attack",
        bound: EventBound::AtLeast(5),
        text: "The player was most active in attack, taking part in build-up for most of the match.",
    },
    PhaseRule {
        code: LOW_DEFENSIVE_INVOLVEMENT,
        phase: "defence",
        bound: EventBound::AtMost(1),
        text: "The player's defensive involvement was limited.",
    },
    PhaseRule {
        code: DISCIPLINE_ISSUE,
        phase: "discipline",
        bound: EventBound::AtLeast(1),
        text: "The player received disciplinary sanctions in this match.",
    },
];

/// Derive the match findings for one player.
///
/// Order is fixed: low sample first, then phase findings, then passing
/// involvement. A phase with no events is treated as absent, so it never
/// triggers an upper-bound rule.
pub fn generate_insights(activity: &MatchActivity) -> Vec<Insight> {
    let mut out = Vec::new();

    if activity.minutes_played <= LOW_SAMPLE_MAX_MINUTES {
        out.push(
            Insight::new(
                LOW_SAMPLE_SIZE,
                "The player spent too little time on the pitch for reliable analytical conclusions.",
            )
            .with_confidence(Confidence::High)
            .with_sources(InsightSources {
                minutes_played: Some(activity.minutes_played),
                threshold_minutes: Some(LOW_SAMPLE_MAX_MINUTES),
                ..InsightSources::default()
            }),
        );
    }

    for rule in PHASE_RULES {
        let Some(data) = activity.phases.get(rule.phase) else {
            continue;
        };
        if data.events == 0 || !rule.bound.matches(data.events) {
            continue;
        }
        let mut sources = InsightSources::default();
        sources.extra.insert("phase".to_string(), rule.phase.into());
        sources.extra.insert("events".to_string(), data.events.into());
        sources
            .extra
            .insert("minutes_active".to_string(), data.minutes_active.into());
        out.push(
            Insight::new(rule.code, rule.text)
                .with_confidence(confidence_from_activity(data.events, data.minutes_active))
                .with_sources(sources),
        );
    }

    if activity.passes >= HIGH_INVOLVEMENT_PASSES {
        let confidence = if activity.passes >= HIGH_INVOLVEMENT_CONFIDENT_PASSES {
            Confidence::High
        } else {
            Confidence::Medium
        };
        let mut sources = InsightSources::default();
        sources.extra.insert("metric".to_string(), "passes".into());
        sources.extra.insert("value".to_string(), activity.passes.into());
        out.push(
            Insight::new(
                HIGH_INVOLVEMENT,
                "The player was heavily involved in play through a large number of passes.",
            )
            .with_confidence(confidence)
            .with_sources(sources),
        );
    }

    log::debug!("generated {} insights from match activity", out.len());
    out
}
