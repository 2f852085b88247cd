use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::payload::null_as_default;

pub const LOW_SAMPLE_SIZE: &str = "LOW_SAMPLE_SIZE";
pub const DATA_INCOMPLETE: &str = "DATA_INCOMPLETE";
pub const POSITION_MISMATCH: &str = "POSITION_MISMATCH";
pub const ROLE_UNCERTAIN: &str = "ROLE_UNCERTAIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Producer-assigned significance of a finding. Not the same thing as the
/// code-derived rank score in `ranking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_played: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_minutes: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single analytic finding. Built fresh from each payload and never mutated
/// by the core; `text` is rendered by the producer and treated as opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    // A missing code is kept as "" and behaves like any unrecognized code.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<InsightPriority>,
    #[serde(default, alias = "evidence", deserialize_with = "null_as_default")]
    pub sources: InsightSources,
}

impl Insight {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: InsightPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_sources(mut self, sources: InsightSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn is_low_sample(&self) -> bool {
        self.code == LOW_SAMPLE_SIZE
    }

    /// Display note for sample-size findings; needs both the observed minutes
    /// and the threshold they were compared against.
    pub fn sample_size_note(&self) -> Option<String> {
        let minutes = self.sources.minutes_played?;
        let threshold = self.sources.threshold_minutes?;
        Some(format!(
            "{minutes} minutes played · minimum threshold {threshold} minutes"
        ))
    }
}

/// Confidence for a phase-activity finding, from how many events backed it and
/// over how many distinct minutes they were spread.
pub fn confidence_from_activity(events: u32, minutes_active: u32) -> Confidence {
    if events >= 5 && minutes_active >= 10 {
        Confidence::High
    } else if events >= 3 && minutes_active >= 5 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
