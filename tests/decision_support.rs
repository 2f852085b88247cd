use chrono::{Duration, NaiveDate};

use pitch_insights::decision::{DecisionStatement, synthesize_decision};
use pitch_insights::insight::{Insight, InsightPriority};
use pitch_insights::performance::{MetricComparison, PerformanceMetric};
use pitch_insights::ranking::{has_blocking_insight, rank_by_priority};
use pitch_insights::reliability::{ReliabilityTier, classify_reliability};
use pitch_insights::trends::{MetricTrend, TrendPoint};

fn trend(key: &str, points: usize) -> MetricTrend {
    MetricTrend {
        key: key.to_string(),
        label: key.to_uppercase(),
        unit: None,
        points: (0..points)
            .map(|idx| TrendPoint {
                match_id: 500 + idx as u64,
                match_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap() + Duration::days(idx as i64 * 7),
                value: 20.0 + idx as f64,
                minutes_played: 90.0,
            })
            .collect(),
    }
}

fn strong_metric() -> PerformanceMetric {
    let mut metric = PerformanceMetric::new("xg", "Expected goals", 0.8);
    metric.per90 = true;
    metric.comparison = Some(MetricComparison {
        percentile: 97.0,
        population: "League forwards".to_string(),
    });
    metric
}

#[test]
fn reliability_boundaries() {
    let limited = classify_reliability(299.0).unwrap();
    assert_eq!(limited.tier, ReliabilityTier::Limited);
    assert!(limited.warning);

    let medium = classify_reliability(300.0).unwrap();
    assert_eq!(medium.tier, ReliabilityTier::Medium);
    assert!(!medium.warning);

    assert_eq!(classify_reliability(899.0).unwrap().tier, ReliabilityTier::Medium);
    assert_eq!(classify_reliability(900.0).unwrap().tier, ReliabilityTier::Reliable);
    assert!(classify_reliability(-1.0).is_err());
}

#[test]
fn ranking_is_stable_for_equal_scores() {
    let a = Insight::new("X", "A");
    let b = Insight::new("X", "B");
    let ranked = rank_by_priority(&[a.clone(), b.clone()]);
    assert_eq!(ranked, vec![a, b]);
}

#[test]
fn ranking_by_code_table() {
    let ranked = rank_by_priority(&[
        Insight::new("LOW_SAMPLE_SIZE", ""),
        Insight::new("ROLE_UNCERTAIN", ""),
        Insight::new("UNKNOWN", ""),
    ]);
    let codes: Vec<&str> = ranked.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["LOW_SAMPLE_SIZE", "ROLE_UNCERTAIN", "UNKNOWN"]);
}

#[test]
fn blocking_codes() {
    assert!(!has_blocking_insight(&[Insight::new("POSITION_MISMATCH", "")]));
    assert!(has_blocking_insight(&[Insight::new("DATA_INCOMPLETE", "")]));
}

#[test]
fn no_insights_no_summary() {
    assert!(synthesize_decision(&[], &[], &[]).is_none());
}

#[test]
fn low_sample_overrides_metrics_and_trends() {
    let summary = synthesize_decision(
        &[Insight::new("LOW_SAMPLE_SIZE", "")],
        &[strong_metric()],
        &[trend("passes", 6), trend("shots", 4)],
    )
    .unwrap();
    assert_eq!(summary.statements, vec![DecisionStatement::InsufficientData]);
}

#[test]
fn positive_signal_with_sustained_trend() {
    let summary = synthesize_decision(
        &[Insight::new("X", "").with_priority(InsightPriority::High)],
        &[],
        &[trend("a", 3)],
    )
    .unwrap();
    assert!(summary.contains(DecisionStatement::PositiveSignals));
    assert!(summary.contains(DecisionStatement::SustainedTrend));
    assert!(!summary.contains(DecisionStatement::NoPronouncedTendency));
    assert_eq!(summary.statements.last(), Some(&DecisionStatement::ContextualJudgment));
}

#[test]
fn low_priority_without_trend_is_neutral() {
    let summary = synthesize_decision(
        &[Insight::new("X", "").with_priority(InsightPriority::Low)],
        &[],
        &[],
    )
    .unwrap();
    assert_eq!(
        summary.statements,
        vec![DecisionStatement::NoPronouncedTendency, DecisionStatement::ContextualJudgment]
    );
}

#[test]
fn metrics_do_not_change_the_narrative() {
    let insights = vec![Insight::new("X", "").with_priority(InsightPriority::Medium)];
    let without = synthesize_decision(&insights, &[], &[trend("a", 2)]);
    let with = synthesize_decision(&insights, &[strong_metric()], &[trend("a", 2)]);
    assert_eq!(without, with);
}

#[test]
fn repeated_calls_are_identical() {
    let insights = vec![
        Insight::new("ROLE_UNCERTAIN", "r").with_priority(InsightPriority::High),
        Insight::new("POSITION_MISMATCH", "p"),
        Insight::new("ATTACK_FOCUS", "a"),
    ];
    let trends = vec![trend("a", 3)];

    assert_eq!(rank_by_priority(&insights), rank_by_priority(&insights));
    assert_eq!(has_blocking_insight(&insights), has_blocking_insight(&insights));
    assert_eq!(classify_reliability(612.0), classify_reliability(612.0));
    assert_eq!(
        synthesize_decision(&insights, &[], &trends),
        synthesize_decision(&insights, &[], &trends)
    );
}
