use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::insight::{DATA_INCOMPLETE, Insight, LOW_SAMPLE_SIZE, POSITION_MISMATCH, ROLE_UNCERTAIN};

static RANK_SCORES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        (LOW_SAMPLE_SIZE, 100),
        (DATA_INCOMPLETE, 90),
        (POSITION_MISMATCH, 80),
        (ROLE_UNCERTAIN, 70),
    ])
});

static BLOCKING_CODES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from([LOW_SAMPLE_SIZE, DATA_INCOMPLETE]));

/// Display rank derived from the insight code alone. Unknown codes score 0.
pub fn rank_score(code: &str) -> u32 {
    RANK_SCORES.get(code).copied().unwrap_or(0)
}

pub fn is_blocking_code(code: &str) -> bool {
    BLOCKING_CODES.contains(code)
}

/// Order insights by code score, highest first. Ties keep their input order;
/// the insight's own `priority` field plays no part here.
pub fn rank_by_priority(insights: &[Insight]) -> Vec<Insight> {
    let mut ranked = insights.to_vec();
    // sort_by_key is stable.
    ranked.sort_by_key(|insight| std::cmp::Reverse(rank_score(&insight.code)));
    ranked
}

/// True when any insight invalidates downstream conclusions. Looks at code
/// membership only, never at confidence.
pub fn has_blocking_insight(insights: &[Insight]) -> bool {
    insights.iter().any(|insight| is_blocking_code(&insight.code))
}
