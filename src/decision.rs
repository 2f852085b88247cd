use serde::{Deserialize, Serialize};

use crate::insight::{Insight, InsightPriority};
use crate::performance::PerformanceMetric;
use crate::ranking::has_blocking_insight;
use crate::trends::MetricTrend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatement {
    InsufficientData,
    PositiveSignals,
    SustainedTrend,
    NoPronouncedTendency,
    ContextualJudgment,
}

impl DecisionStatement {
    pub fn text(self) -> &'static str {
        match self {
            DecisionStatement::InsufficientData => {
                "Not enough data to form a reliable analytical conclusion for this player."
            }
            DecisionStatement::PositiveSignals => {
                "The player shows stable positive signals confirmed by analytical observations."
            }
            DecisionStatement::SustainedTrend => {
                "Metric dynamics point to stability or gradual improvement in recent matches."
            }
            DecisionStatement::NoPronouncedTendency => {
                "Current data shows no pronounced positive or negative tendency, \
                 but the player delivers a predictable level of performance."
            }
            DecisionStatement::ContextualJudgment => {
                "Consider the player's role and match tasks when making coaching decisions."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub statements: Vec<DecisionStatement>,
}

impl DecisionSummary {
    pub fn is_blocked(&self) -> bool {
        self.statements == [DecisionStatement::InsufficientData]
    }

    pub fn contains(&self, statement: DecisionStatement) -> bool {
        self.statements.contains(&statement)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.statements.iter().map(|s| s.text())
    }

    pub fn text(&self) -> String {
        self.paragraphs().collect::<Vec<_>>().join("\n")
    }
}

/// Compose the coaching recommendation for one player.
///
/// Returns `None` when there are no insights at all. A blocking insight
/// short-circuits to the insufficient-data message without looking at trends.
///
/// `_metrics` is accepted alongside insights and trends but no statement is
/// derived from it yet; metric-driven wording needs product input first.
pub fn synthesize_decision(
    insights: &[Insight],
    _metrics: &[PerformanceMetric],
    trends: &[MetricTrend],
) -> Option<DecisionSummary> {
    if insights.is_empty() {
        return None;
    }

    if has_blocking_insight(insights) {
        log::debug!("decision blocked by data-quality insight");
        return Some(DecisionSummary {
            statements: vec![DecisionStatement::InsufficientData],
        });
    }

    let has_positive_signal = insights
        .iter()
        .any(|i| i.priority == Some(InsightPriority::High));
    let has_sustained_trend = trends.iter().any(MetricTrend::has_sustained_signal);
    log::debug!(
        "decision signals: positive={has_positive_signal} sustained_trend={has_sustained_trend}"
    );

    let mut statements = Vec::with_capacity(3);
    if has_positive_signal {
        statements.push(DecisionStatement::PositiveSignals);
    }
    if has_sustained_trend {
        statements.push(DecisionStatement::SustainedTrend);
    }
    if statements.is_empty() {
        statements.push(DecisionStatement::NoPronouncedTendency);
    }
    statements.push(DecisionStatement::ContextualJudgment);

    Some(DecisionSummary { statements })
}
