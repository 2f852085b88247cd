use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use pitch_insights::coach_summary::build_coach_summary;
use pitch_insights::payload::parse_team_summary_json;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let json_out = args.iter().any(|a| a == "--json");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("team_summary.json"));

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read team summary {}", path.display()))?;
    let input = parse_team_summary_json(&raw)?;
    let summary = build_coach_summary(&input);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Matches: {}", summary.matches_count);
    if let Some(snap) = &summary.snapshot {
        println!(
            "Record: {}-{}-{}  goals {}:{}  points {} ({} per match)  form {}",
            snap.wins,
            snap.draws,
            snap.losses,
            snap.goals_for,
            snap.goals_against,
            snap.points,
            snap.points_per_match,
            snap.form_string()
        );
    }
    if let Some(t) = &summary.tactics {
        println!("PPDA: {} ({:?}) {}", t.ppda.value, t.ppda.label, t.ppda.explanation);
        println!(
            "Possession: {}% ({:?}) {}",
            t.possession.value, t.possession.label, t.possession.explanation
        );
        println!(
            "Defensive line: {} ({:?}) {}",
            t.defensive_line.value, t.defensive_line.label, t.defensive_line.explanation
        );
        println!("Tempo: {} ({:?}) {}", t.tempo.value, t.tempo.label, t.tempo.explanation);
    }
    if let Some(load) = &summary.load {
        println!("Load: {:?} ({} min)", load.load_level, load.total_minutes);
    }
    if let Some(usage) = &summary.usage {
        println!("Players used: {} / starts: {}", usage.players_used, usage.starts);
    }
    for s in &summary.strengths {
        println!(" + {} {:?}", s.text, s.evidence);
    }
    for w in &summary.weaknesses {
        println!(" - {} {:?}", w.text, w.evidence);
    }
    println!("{}", summary.text);

    Ok(())
}
