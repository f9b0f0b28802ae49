use std::collections::BTreeMap;

use codecracker_vector_store::{EmbeddingSpace, SimilarityCache, SimilarityOracle};
use itertools::Itertools;

use crate::board::Board;
use crate::coherence::coherence;
use crate::error::Result;
use crate::policy::ScoringPolicy;
use crate::types::{ScoredHint, MAX_SUBSET_SIZE, MIN_SUBSET_SIZE};

/// Every accepted `(hint, score, combo)` triple, grouped by subset size, in
/// discovery order (combination-major, then candidate order).
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub accepted: BTreeMap<usize, Vec<ScoredHint>>,
    pub combinations: usize,
    pub evaluations: usize,
}

impl SearchOutcome {
    #[must_use]
    pub fn accepted_total(&self) -> usize {
        self.accepted.values().map(Vec::len).sum()
    }
}

/// How close a hint sits to the words it must avoid.
#[derive(Debug, Clone, Copy)]
struct Danger {
    opponent: f32,
    assassin: f32,
}

impl Danger {
    fn measure<S, C>(oracle: &mut SimilarityOracle<S, C>, hint: &str, board: &Board) -> Result<Self>
    where
        S: EmbeddingSpace,
        C: SimilarityCache,
    {
        let mut opponent: Option<f32> = None;
        for word in board.opponent() {
            let score = oracle.similarity(hint, word)?;
            opponent = Some(opponent.map_or(score, |best| best.max(score)));
        }
        let assassin = match board.assassin() {
            Some(word) => oracle.similarity(hint, word)?,
            None => 0.0,
        };
        Ok(Self {
            opponent: opponent.unwrap_or(0.0),
            assassin,
        })
    }

    /// Strict on both sides: a tie with an opponent or the assassin is not safe.
    fn is_outscored_by(&self, score: f32) -> bool {
        score > self.opponent && score > self.assassin
    }
}

/// Enumerate every `k`-combination of team words (largest `k` first) and keep
/// the candidates that clear the adaptive threshold and outscore every
/// opponent word and the assassin.
///
/// Cost is `O(C(n, k) * |candidates|)` similarity lookups per size; the
/// oracle's cache scores each distinct pair once.
pub fn search<S, C>(
    oracle: &mut SimilarityOracle<S, C>,
    board: &Board,
    candidates: &[String],
    policy: &ScoringPolicy,
) -> Result<SearchOutcome>
where
    S: EmbeddingSpace,
    C: SimilarityCache,
{
    let mut outcome = SearchOutcome::default();

    let mut dangers = Vec::with_capacity(candidates.len());
    for hint in candidates {
        dangers.push(Danger::measure(oracle, hint, board)?);
    }

    for k in (MIN_SUBSET_SIZE..=MAX_SUBSET_SIZE).rev() {
        let threshold = policy.threshold(k);
        let accepted = outcome.accepted.entry(k).or_default();

        for combo in board.team().iter().map(String::as_str).combinations(k) {
            outcome.combinations += 1;
            for (hint, danger) in candidates.iter().zip(&dangers) {
                outcome.evaluations += 1;
                let score = coherence(oracle, hint, &combo, policy.exponent())?;
                if score > threshold && danger.is_outscored_by(score) {
                    accepted.push(ScoredHint {
                        hint: hint.clone(),
                        score,
                        words: combo.iter().map(|w| (*w).to_string()).collect(),
                    });
                }
            }
        }

        log::debug!(
            "size {k}: threshold {threshold:.3}, {} accepted",
            accepted.len()
        );
    }

    Ok(outcome)
}
