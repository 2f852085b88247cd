use serde::{Deserialize, Serialize};

use crate::tactics::round_to;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub match_id: Option<String>,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn letter(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

/// Results over a period: record, goals, points and recent form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    pub points_per_match: f64,
    pub form: Vec<FormResult>,
}

impl Snapshot {
    pub fn form_string(&self) -> String {
        self.form.iter().map(|r| r.letter()).collect()
    }
}

/// Results must already be in kickoff order; form follows that order.
pub fn snapshot_from_results(results: &[MatchResult]) -> Snapshot {
    let mut snap = Snapshot {
        matches_played: 0,
        wins: 0,
        draws: 0,
        losses: 0,
        goals_for: 0,
        goals_against: 0,
        points: 0,
        points_per_match: 0.0,
        form: Vec::with_capacity(results.len()),
    };

    for r in results {
        snap.goals_for += r.goals_for;
        snap.goals_against += r.goals_against;
        let result = match r.goals_for.cmp(&r.goals_against) {
            std::cmp::Ordering::Greater => {
                snap.wins += 1;
                FormResult::Win
            }
            std::cmp::Ordering::Equal => {
                snap.draws += 1;
                FormResult::Draw
            }
            std::cmp::Ordering::Less => {
                snap.losses += 1;
                FormResult::Loss
            }
        };
        snap.form.push(result);
    }

    snap.matches_played = snap.form.len() as u32;
    snap.points = snap.wins * 3 + snap.draws;
    if snap.matches_played > 0 {
        snap.points_per_match = round_to(snap.points as f64 / snap.matches_played as f64, 2);
    }
    snap
}
