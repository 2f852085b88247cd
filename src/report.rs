use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::decision::{DecisionSummary, synthesize_decision};
use crate::error::InsightError;
use crate::insight::Insight;
use crate::payload::PlayerPayload;
use crate::performance::{MetricComparison, NormalizedPlayer, PerformanceMetric, normalize_player_metrics};
use crate::ranking::{has_blocking_insight, rank_by_priority};
use crate::reliability::{Reliability, classify_reliability};
use crate::trends::MetricTrend;

/// A batch percentile needs at least this many same-position players.
const MIN_POSITION_POPULATION: usize = 2;

/// Everything the player view needs, already ordered and classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player_id: Option<u64>,
    pub player_name: Option<String>,
    pub reliability: Option<Reliability>,
    pub blocking: bool,
    pub insights: Vec<Insight>,
    pub metrics: Vec<PerformanceMetric>,
    pub trends: Vec<MetricTrend>,
    pub decision: Option<DecisionSummary>,
}

impl PlayerReport {
    pub fn build(payload: &PlayerPayload) -> Result<Self, InsightError> {
        let reliability = payload
            .minutes_played
            .map(classify_reliability)
            .transpose()?;
        let insights = payload.resolved_insights();

        Ok(Self {
            player_id: payload.player_id,
            player_name: payload.player_name.clone(),
            reliability,
            blocking: has_blocking_insight(&insights),
            insights: rank_by_priority(&insights),
            metrics: payload.metrics.clone(),
            trends: payload.trends.clone(),
            decision: synthesize_decision(&insights, &payload.metrics, &payload.trends),
        })
    }

    /// Fill comparisons the backend did not send from same-position batch
    /// percentiles. Existing comparisons are kept.
    fn fill_position_comparisons(&mut self, normalized: &NormalizedPlayer) {
        for metric in self.metrics.iter_mut().filter(|m| m.comparison.is_none()) {
            let Some(norm) = normalized.metrics.get(&metric.key) else { continue };
            if norm.population < MIN_POSITION_POPULATION {
                continue;
            }
            metric.comparison = Some(MetricComparison {
                percentile: f64::from(norm.percentile),
                population: normalized.position.clone(),
            });
        }
    }

    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        let name = self.player_name.as_deref().unwrap_or("Player");
        lines.push(match self.player_id {
            Some(id) => format!("{name} (#{id})"),
            None => name.to_string(),
        });
        if let Some(rel) = self.reliability {
            let marker = if rel.warning { "! " } else { "" };
            lines.push(format!("{marker}{}", rel.tier.label()));
        }

        if !self.insights.is_empty() {
            lines.push(String::new());
            lines.push("Insights".to_string());
            for insight in &self.insights {
                if insight.is_low_sample() {
                    lines.push("  ! Not enough data".to_string());
                }
                lines.push(format!("  - {}", insight.text));
                if let Some(note) = insight.sample_size_note() {
                    lines.push(format!("    {note}"));
                }
            }
        }

        // Metrics and trends are suppressed when a blocking insight is present.
        if !self.blocking {
            if !self.metrics.is_empty() {
                lines.push(String::new());
                lines.push("Performance snapshot".to_string());
                for metric in &self.metrics {
                    lines.push(format!("  {}: {}", metric.display_label(), metric.display_value()));
                    if let Some(explanation) = &metric.explanation {
                        lines.push(format!("    {}", explanation.text));
                    }
                    if let Some(cmp) = metric.visible_comparison() {
                        lines.push(format!(
                            "    Better than {}% of {}",
                            cmp.percentile, cmp.population
                        ));
                    }
                }
            }

            if !self.trends.is_empty() {
                lines.push(String::new());
                lines.push("Trends & dynamics".to_string());
                for trend in &self.trends {
                    let unit = trend.unit.as_deref().unwrap_or("");
                    let values = trend
                        .points
                        .iter()
                        .map(|p| {
                            let flag = if p.is_low_minutes() { "*" } else { "" };
                            format!("{}{unit}{flag}", p.value)
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    lines.push(format!("  {}: {values}", trend.label));
                }
                if self.trends.iter().any(|t| t.low_minutes_points() > 0) {
                    lines.push("  * low reliability (few minutes)".to_string());
                }
            }
        }

        if let Some(decision) = &self.decision {
            lines.push(String::new());
            lines.push("Decision summary".to_string());
            lines.extend(decision.paragraphs().map(|p| format!("  {p}")));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn position_percentiles(payloads: &[PlayerPayload]) -> BTreeMap<usize, NormalizedPlayer> {
    let values = payloads
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let metrics = p.metrics.iter().map(|m| (m.key.clone(), m.value)).collect();
            (idx, metrics)
        })
        .collect();
    let positions = payloads
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| p.position.clone().map(|pos| (idx, pos)))
        .collect();
    normalize_player_metrics(&values, &positions)
}

/// Build reports for many players at once. Each payload is independent apart
/// from the same-position percentiles; results line up with the input order.
pub fn build_reports(payloads: &[PlayerPayload]) -> Vec<Result<PlayerReport, InsightError>> {
    let normalized = position_percentiles(payloads);
    payloads
        .par_iter()
        .enumerate()
        .map(|(idx, payload)| {
            let mut report = PlayerReport::build(payload)?;
            if let Some(norm) = normalized.get(&idx) {
                report.fill_position_comparisons(norm);
            }
            Ok(report)
        })
        .collect()
}
