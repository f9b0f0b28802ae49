use std::collections::{BTreeMap, HashSet};

use crate::types::{HintResult, ScoredHint, MAX_HINTS_PER_SIZE};

/// Order each size bucket by descending score, keep the first occurrence of
/// every hint and cap the bucket at [`MAX_HINTS_PER_SIZE`].
///
/// The sort is stable, so equal scores keep discovery order.
#[must_use]
pub fn rank(accepted: BTreeMap<usize, Vec<ScoredHint>>) -> HintResult {
    let ranked = accepted
        .into_iter()
        .map(|(size, hints)| (size, rank_bucket(hints)))
        .collect();
    HintResult::from_map(ranked)
}

fn rank_bucket(mut hints: Vec<ScoredHint>) -> Vec<ScoredHint> {
    hints.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    hints
        .into_iter()
        .filter(|hint| seen.insert(hint.hint.clone()))
        .take(MAX_HINTS_PER_SIZE)
        .collect()
}
