use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::payload::null_as_default;

/// Minimum number of points before a trend counts as sustained.
pub const SUSTAINED_TREND_POINTS: usize = 3;
/// Points backed by fewer minutes than this are shown as low reliability.
pub const LOW_MINUTES_POINT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub match_id: u64,
    #[serde(deserialize_with = "deserialize_match_date")]
    pub match_date: NaiveDate,
    pub value: f64,
    pub minutes_played: f64,
}

impl TrendPoint {
    pub fn is_low_minutes(&self) -> bool {
        self.minutes_played < LOW_MINUTES_POINT
    }
}

/// Accepts a plain date, an RFC 3339 timestamp or a naive datetime; only the
/// calendar date is kept.
fn deserialize_match_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_match_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized match_date {raw:?}")))
}

pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Per-match series for one metric. Points are chronological as supplied by
/// the caller; nothing here re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<TrendPoint>,
}

impl MetricTrend {
    pub fn has_sustained_signal(&self) -> bool {
        self.points.len() >= SUSTAINED_TREND_POINTS
    }

    pub fn low_minutes_points(&self) -> usize {
        self.points.iter().filter(|p| p.is_low_minutes()).count()
    }
}
