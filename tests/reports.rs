use std::fs;
use std::path::PathBuf;

use pitch_insights::decision::DecisionStatement;
use pitch_insights::payload::{parse_player_payloads_json, read_player_payloads};
use pitch_insights::reliability::ReliabilityTier;
use pitch_insights::report::{PlayerReport, build_reports};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn load_reports() -> Vec<PlayerReport> {
    let payloads = read_player_payloads(&fixture_path("player_payload.json"))
        .expect("fixture should parse");
    build_reports(&payloads)
        .into_iter()
        .map(|r| r.expect("fixture minutes are valid"))
        .collect()
}

#[test]
fn fixture_reports_keep_input_order() {
    let reports = load_reports();
    let ids: Vec<Option<u64>> = reports.iter().map(|r| r.player_id).collect();
    assert_eq!(ids, vec![Some(101), Some(102), Some(103), Some(104)]);
}

#[test]
fn regular_starter_gets_positive_decision() {
    let reports = load_reports();
    let alpha = &reports[0];
    assert_eq!(alpha.reliability.map(|r| r.tier), Some(ReliabilityTier::Reliable));
    assert!(!alpha.blocking);
    assert_eq!(alpha.insights[0].code, "ROLE_UNCERTAIN");

    let decision = alpha.decision.as_ref().expect("decision present");
    assert_eq!(
        decision.statements,
        vec![
            DecisionStatement::PositiveSignals,
            DecisionStatement::SustainedTrend,
            DecisionStatement::ContextualJudgment,
        ]
    );

    let text = alpha.render_text();
    assert!(text.contains("Passing volume /90: 48.2"));
    assert!(text.contains("Better than 81% of CM"));
    // low-confidence explanation hides its comparison
    assert!(!text.contains("Better than 92%"));
    assert!(text.contains("12*"));
    assert!(text.contains("* low reliability (few minutes)"));
    // timestamped match date keeps only the calendar day
    assert_eq!(
        alpha.trends[0].points[1].match_date.to_string(),
        "2025-02-08"
    );
}

#[test]
fn substitute_is_blocked() {
    let reports = load_reports();
    let beta = &reports[1];
    let rel = beta.reliability.expect("minutes present");
    assert_eq!(rel.tier, ReliabilityTier::Limited);
    assert!(rel.warning);
    assert!(beta.blocking);
    assert_eq!(beta.insights[0].code, "LOW_SAMPLE_SIZE");
    assert!(beta.decision.as_ref().is_some_and(|d| d.is_blocked()));

    let text = beta.render_text();
    assert!(text.contains("8 minutes played · minimum threshold 10 minutes"));
    assert!(!text.contains("Trends & dynamics"));

    // midfield batch percentile fills the missing comparison
    let cmp = beta.metrics[0].comparison.as_ref().expect("filled from batch");
    assert_eq!((cmp.percentile, cmp.population.as_str()), (50.0, "MF"));
}

#[test]
fn activity_only_player_gets_generated_insights() {
    let reports = load_reports();
    let delta = &reports[3];
    let codes: Vec<&str> = delta.insights.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["ATTACK_FOCUS", "LOW_DEFENSIVE_INVOLVEMENT", "HIGH_INVOLVEMENT"]
    );
    assert!(!delta.blocking);
    assert_eq!(
        delta.decision.as_ref().map(|d| d.statements.clone()),
        Some(vec![
            DecisionStatement::NoPronouncedTendency,
            DecisionStatement::ContextualJudgment,
        ])
    );
    assert!(!delta.render_text().contains("low reliability (few minutes)"));
}

#[test]
fn quiet_defender_gets_neutral_decision() {
    let reports = load_reports();
    let gamma = &reports[2];
    assert_eq!(gamma.reliability.map(|r| r.tier), Some(ReliabilityTier::Medium));
    assert_eq!(
        gamma.decision.as_ref().map(|d| d.statements.clone()),
        Some(vec![
            DecisionStatement::NoPronouncedTendency,
            DecisionStatement::ContextualJudgment,
        ])
    );
}

#[test]
fn batch_reports_surface_invalid_minutes() {
    let raw = r#"[{"player_id":1,"minutes_played":90},{"player_id":2,"minutes_played":-30}]"#;
    let payloads = parse_player_payloads_json(raw).unwrap();
    let results = build_reports(&payloads);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn reports_serialize_to_json() {
    let reports = load_reports();
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[1]["reliability"]["tier"], "limited");
    assert_eq!(json[1]["decision"]["statements"][0], "insufficient_data");
    assert_eq!(json[0]["insights"][0]["priority"], "medium");
    assert_eq!(json[3]["insights"][0]["confidence"], "high");

    let raw = fs::read_to_string(fixture_path("player_payload.json")).unwrap();
    assert!(raw.contains("LOW_SAMPLE_SIZE"));
}
