use std::borrow::Cow;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::coach_summary::TeamSummaryInput;
use crate::insight::Insight;
use crate::insight_rules::{MatchActivity, generate_insights};
use crate::performance::PerformanceMetric;
use crate::trends::MetricTrend;

/// Pre-computed analytics for one player as delivered by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPayload {
    #[serde(default)]
    pub player_id: Option<u64>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub minutes_played: Option<f64>,
    /// Position code ("FW", "MF", ...) used to group batch percentiles.
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub insights: Vec<Insight>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Vec<PerformanceMetric>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trends: Vec<MetricTrend>,
    /// Raw single-match activity; insights are derived from it when the
    /// backend sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<MatchActivity>,
}

impl PlayerPayload {
    pub fn resolved_insights(&self) -> Cow<'_, [Insight]> {
        match &self.activity {
            Some(activity) if self.insights.is_empty() => Cow::Owned(generate_insights(activity)),
            _ => Cow::Borrowed(&self.insights),
        }
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn parse_player_payload_json(raw: &str) -> Result<PlayerPayload> {
    serde_json::from_str(raw).context("invalid player payload json")
}

/// Accepts either a single payload object or an array of them.
pub fn parse_player_payloads_json(raw: &str) -> Result<Vec<PlayerPayload>> {
    if raw.trim_start().starts_with('[') {
        serde_json::from_str(raw).context("invalid player payload json")
    } else {
        parse_player_payload_json(raw).map(|row| vec![row])
    }
}

pub fn parse_team_summary_json(raw: &str) -> Result<TeamSummaryInput> {
    serde_json::from_str(raw).context("invalid team summary json")
}

pub fn read_player_payloads(path: &Path) -> Result<Vec<PlayerPayload>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read payload {}", path.display()))?;
    parse_player_payloads_json(&raw).with_context(|| format!("parse payload {}", path.display()))
}
