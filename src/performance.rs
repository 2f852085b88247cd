use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::insight::Confidence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricExplanation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// 0–100.
    pub percentile: f64,
    /// e.g. "CM", "League midfielders".
    pub population: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub key: String,
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub per90: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<MetricExplanation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<MetricComparison>,
}

impl PerformanceMetric {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
            unit: None,
            per90: false,
            explanation: None,
            comparison: None,
        }
    }

    /// Comparative context is withheld when the explanation is low-confidence,
    /// so weak data never backs a "better than N%" claim.
    pub fn visible_comparison(&self) -> Option<&MetricComparison> {
        let low = self
            .explanation
            .as_ref()
            .and_then(|e| e.confidence)
            .is_some_and(|c| c == Confidence::Low);
        if low { None } else { self.comparison.as_ref() }
    }

    pub fn display_label(&self) -> String {
        if self.per90 {
            format!("{} /90", self.label)
        } else {
            self.label.clone()
        }
    }

    pub fn display_value(&self) -> String {
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{} {unit}", self.value),
            _ => self.value.to_string(),
        }
    }
}

/// Share of the population (in whole percent) at or below `value`.
pub fn percentile_rank(value: f64, population: &[f64]) -> u8 {
    if population.is_empty() {
        return 0;
    }
    let at_or_below = population.iter().filter(|x| **x <= value).count();
    let pct = (at_or_below * 100) / population.len();
    pct.min(100) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetric {
    pub value: f64,
    pub percentile: u8,
    /// Players in the same position that reported this metric.
    pub population: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlayer {
    pub position: String,
    pub metrics: BTreeMap<String, NormalizedMetric>,
}

/// Percentile of every metric against players sharing the same position.
///
/// Players without a position are left out; non-finite values neither join a
/// population nor get a percentile.
pub fn normalize_player_metrics<K: Ord + Clone>(
    player_values: &BTreeMap<K, BTreeMap<String, f64>>,
    positions: &BTreeMap<K, String>,
) -> BTreeMap<K, NormalizedPlayer> {
    let position_of = |id: &K| positions.get(id).filter(|p| !p.is_empty());

    let mut population: BTreeMap<&str, BTreeMap<&str, Vec<f64>>> = BTreeMap::new();
    for (id, metrics) in player_values {
        let Some(position) = position_of(id) else { continue };
        let by_metric = population.entry(position.as_str()).or_default();
        for (key, value) in metrics {
            if value.is_finite() {
                by_metric.entry(key.as_str()).or_default().push(*value);
            }
        }
    }

    let mut out = BTreeMap::new();
    for (id, metrics) in player_values {
        let Some(position) = position_of(id) else { continue };
        let Some(by_metric) = population.get(position.as_str()) else { continue };
        let normalized = metrics
            .iter()
            .filter(|(_, value)| value.is_finite())
            .map(|(key, value)| {
                let values = by_metric.get(key.as_str()).map(Vec::as_slice).unwrap_or(&[]);
                (
                    key.clone(),
                    NormalizedMetric {
                        value: (value * 100.0).round() / 100.0,
                        percentile: percentile_rank(*value, values),
                        population: values.len(),
                    },
                )
            })
            .collect();
        out.insert(
            id.clone(),
            NormalizedPlayer {
                position: position.clone(),
                metrics: normalized,
            },
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compared(confidence: Option<Confidence>) -> PerformanceMetric {
        let mut metric = PerformanceMetric::new("passing_volume", "Passing volume", 42.0);
        metric.explanation = Some(MetricExplanation {
            text: "Shows how actively the midfielder distributed the ball".to_string(),
            confidence,
        });
        metric.comparison = Some(MetricComparison {
            percentile: 78.0,
            population: "CM".to_string(),
        });
        metric
    }

    #[test]
    fn comparison_hidden_on_low_confidence() {
        assert!(compared(Some(Confidence::Low)).visible_comparison().is_none());
        assert!(compared(Some(Confidence::Medium)).visible_comparison().is_some());
        assert!(compared(None).visible_comparison().is_some());
    }

    #[test]
    fn display_includes_unit_and_per90() {
        let mut metric = PerformanceMetric::new("xg", "Expected goals", 0.45);
        assert_eq!(metric.display_label(), "Expected goals");
        assert_eq!(metric.display_value(), "0.45");
        metric.per90 = true;
        metric.unit = Some("xG".to_string());
        assert_eq!(metric.display_label(), "Expected goals /90");
        assert_eq!(metric.display_value(), "0.45 xG");
    }

    #[test]
    fn normalization_groups_by_position() {
        let values: BTreeMap<u32, BTreeMap<String, f64>> = BTreeMap::from([
            (1, BTreeMap::from([("passes".to_string(), 42.256)])),
            (2, BTreeMap::from([("passes".to_string(), 30.0), ("tackles".to_string(), 3.0)])),
            (3, BTreeMap::from([("passes".to_string(), 12.0)])),
            (4, BTreeMap::from([("passes".to_string(), 99.0)])),
        ]);
        let positions = BTreeMap::from([
            (1, "MF".to_string()),
            (2, "MF".to_string()),
            (3, "DF".to_string()),
            (4, String::new()),
        ]);
        let out = normalize_player_metrics(&values, &positions);

        assert_eq!(out.len(), 3);
        assert!(!out.contains_key(&4));
        let mf = &out[&1];
        assert_eq!(mf.position, "MF");
        assert_eq!(mf.metrics["passes"].value, 42.26);
        assert_eq!(mf.metrics["passes"].percentile, 100);
        assert_eq!(mf.metrics["passes"].population, 2);
        assert_eq!(out[&2].metrics["passes"].percentile, 50);
        assert_eq!(out[&2].metrics["tackles"].population, 1);
        // DF population is just player 3
        assert_eq!(out[&3].metrics["passes"].percentile, 100);
    }

    #[test]
    fn percentile_rank_counts_ties_as_below() {
        let population = [10.0, 20.0, 20.0, 30.0];
        assert_eq!(percentile_rank(20.0, &population), 75);
        assert_eq!(percentile_rank(5.0, &population), 0);
        assert_eq!(percentile_rank(30.0, &population), 100);
        assert_eq!(percentile_rank(1.0, &[]), 0);
        // floor, not round
        assert_eq!(percentile_rank(1.0, &[1.0, 2.0, 3.0]), 33);
    }
}
