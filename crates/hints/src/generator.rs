use std::sync::Arc;
use std::time::Instant;

use codecracker_vector_store::{
    EmbeddingSpace, OracleStats, RequestCache, SimilarityCache, SimilarityOracle,
};
use serde::Serialize;

use crate::board::{Board, HintRequest};
use crate::candidates::CandidateGenerator;
use crate::error::{HintError, Result};
use crate::lexical_filter::LexicalFilter;
use crate::lexicon::LexicalResource;
use crate::policy::ScoringPolicy;
use crate::rank::rank;
use crate::strategic::search;
use crate::tagger::PartOfSpeechTagger;
use crate::types::HintResult;

/// Work done for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationStats {
    pub policy: String,
    pub candidates: usize,
    pub skipped_team_words: Vec<String>,
    pub combinations: usize,
    pub evaluations: usize,
    pub accepted: usize,
    pub oracle: OracleStats,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintReport {
    pub hints: HintResult,
    pub stats: GenerationStats,
}

/// Entry point: validates a [`HintRequest`], expands candidates, searches
/// every team subset of size 2 to 4 and ranks the safe hints.
///
/// Holds only read-only resources, so one generator can serve concurrent
/// requests; per-request state lives in the oracle built for each call.
pub struct HintGenerator<S, L> {
    space: S,
    lexicon: L,
    tagger: Option<Arc<dyn PartOfSpeechTagger + Send + Sync>>,
    policy: ScoringPolicy,
    max_team_words: Option<usize>,
}

impl<S: EmbeddingSpace, L: LexicalResource> HintGenerator<S, L> {
    pub fn new(space: S, lexicon: L) -> Self {
        Self {
            space,
            lexicon,
            tagger: None,
            policy: ScoringPolicy::default(),
            max_team_words: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_tagger(mut self, tagger: Arc<dyn PartOfSpeechTagger + Send + Sync>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Reject boards with more team words than `limit` (after normalization).
    #[must_use]
    pub fn with_max_team_words(mut self, limit: usize) -> Self {
        self.max_team_words = Some(limit);
        self
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    /// Generate hints with a request-scoped similarity cache.
    pub fn generate(&self, request: &HintRequest) -> Result<HintResult> {
        self.generate_with_cache(request, RequestCache::new())
            .map(|report| report.hints)
    }

    /// Generate hints, memoizing similarities in `cache`.
    ///
    /// The cache never changes the result, only how often the embedding
    /// space is consulted.
    pub fn generate_with_cache<C: SimilarityCache>(
        &self,
        request: &HintRequest,
        cache: C,
    ) -> Result<HintReport> {
        let started = Instant::now();
        let board = self.validate(request)?;
        let mut oracle = SimilarityOracle::with_cache(&self.space, cache);

        let mut filter = LexicalFilter::new(self.lexicon.stop_words());
        if let Some(tagger) = self.tagger.as_deref() {
            filter = filter.with_tagger(tagger);
        }
        let mut expander = CandidateGenerator::new(filter, &self.lexicon, self.policy.top_n());
        if self.policy.synonyms_enabled() {
            expander = expander.with_synonyms(self.policy.synonym_min_similarity());
        }

        let pool = expander.generate(&mut oracle, &board)?;
        for word in &pool.skipped {
            log::warn!("Team word '{word}' is not in the vocabulary; it yields no candidates");
        }
        log::debug!(
            "{} candidates from {} team words",
            pool.len(),
            board.team().len() - pool.skipped.len()
        );

        let outcome = search(&mut oracle, &board, &pool.candidates, &self.policy)?;
        let accepted = outcome.accepted_total();
        let hints = rank(outcome.accepted);

        let stats = GenerationStats {
            policy: self.policy.name().to_string(),
            candidates: pool.len(),
            skipped_team_words: pool.skipped,
            combinations: outcome.combinations,
            evaluations: outcome.evaluations,
            accepted,
            oracle: oracle.stats(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::info!(
            "Generated {} hints ({} accepted, {} evaluations, {} cache hits) in {} ms",
            hints.total(),
            stats.accepted,
            stats.evaluations,
            stats.oracle.hits,
            stats.elapsed_ms
        );

        Ok(HintReport { hints, stats })
    }

    fn validate(&self, request: &HintRequest) -> Result<Board> {
        let board = Board::try_from(request)?;
        if let Some(limit) = self.max_team_words {
            if board.team().len() > limit {
                return Err(HintError::InvalidInput(format!(
                    "Too many team words: {} (at most {limit} allowed)",
                    board.team().len()
                )));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SynonymTable;
    use crate::tagger::PartOfSpeech;
    use crate::test_support::{shade_space, PairwiseSpace};
    use codecracker_vector_store::{NoCache, SharedSimilarityCache};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn shade_request() -> HintRequest {
        HintRequest::new(["lamp", "sun", "umbrella", "chair"])
            .opponents(["car"])
            .assassin("rain")
    }

    #[test]
    fn shade_example_tops_the_four_word_list() {
        let generator = HintGenerator::new(shade_space(), SynonymTable::empty());
        let result = generator.generate(&shade_request()).unwrap();

        let quads = result.hints(4);
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].hint, "shade");
        assert!((quads[0].score - 1.4).abs() < 1e-5);
        assert_eq!(quads[0].words, vec!["lamp", "sun", "umbrella", "chair"]);
        // One candidate, so the smaller sizes collapse to a single entry each.
        assert_eq!(result.hints(3).len(), 1);
        assert_eq!(result.hints(2).len(), 1);
        // lamp/umbrella and sun/umbrella tie; the first combination wins.
        assert_eq!(result.hints(2)[0].words, vec!["lamp", "umbrella"]);
    }

    #[test]
    fn unknown_team_word_does_not_block_the_rest() {
        let generator = HintGenerator::new(shade_space(), SynonymTable::empty());
        let request = HintRequest::new(["lamp", "xylophone"]);
        let report = generator
            .generate_with_cache(&request, RequestCache::new())
            .unwrap();

        assert_eq!(report.stats.skipped_team_words, vec!["xylophone"]);
        let pairs = report.hints.hints(2);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].hint, "shade");
        // (0.7 + 0.0) / 2 * sqrt(2)
        assert!((pairs[0].score - 0.35 * 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn invalid_requests_fail_before_search() {
        let generator =
            HintGenerator::new(shade_space(), SynonymTable::empty()).with_max_team_words(3);

        let empty = generator.generate(&HintRequest::new([" ", ""])).unwrap_err();
        assert!(empty.is_invalid_input());

        let overlap = generator
            .generate(&HintRequest::new(["lamp"]).opponents(["Lamp"]))
            .unwrap_err();
        assert!(overlap.is_invalid_input());

        let too_many = generator.generate(&shade_request()).unwrap_err();
        assert!(too_many.is_invalid_input());
        assert!(too_many.to_string().contains("Too many team words"));
    }

    #[test]
    fn single_team_word_yields_empty_lists() {
        let generator = HintGenerator::new(shade_space(), SynonymTable::empty());
        let result = generator.generate(&HintRequest::new(["lamp"])).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.iter().count(), 3);
    }

    struct EverythingIsProper;

    impl PartOfSpeechTagger for EverythingIsProper {
        fn tag(&self, _token: &str) -> PartOfSpeech {
            PartOfSpeech::ProperNoun
        }
    }

    #[test]
    fn tagger_can_veto_every_candidate() {
        let generator = HintGenerator::new(shade_space(), SynonymTable::empty())
            .with_tagger(Arc::new(EverythingIsProper));
        let report = generator
            .generate_with_cache(&shade_request(), RequestCache::new())
            .unwrap();
        assert_eq!(report.stats.candidates, 0);
        assert!(report.hints.is_empty());
    }

    #[test]
    fn legacy_policy_applies_step_thresholds() {
        let space = PairwiseSpace::new(["lamp", "sun"])
            .set("glow", "lamp", 0.3)
            .set("glow", "sun", 0.3);
        // 0.3 * sqrt(2) ~ 0.424: passes balanced (0.30) but not legacy (0.45).
        let request = HintRequest::new(["lamp", "sun"]);
        let balanced = HintGenerator::new(&space, SynonymTable::empty());
        assert_eq!(balanced.generate(&request).unwrap().hints(2).len(), 1);

        let legacy = HintGenerator::new(&space, SynonymTable::empty())
            .with_policy(ScoringPolicy::builtin("legacy").unwrap());
        assert!(legacy.generate(&request).unwrap().is_empty());
    }

    #[test]
    fn stats_report_the_policy_and_cache_usage() {
        let generator = HintGenerator::new(shade_space(), SynonymTable::empty());
        let report = generator
            .generate_with_cache(&shade_request(), RequestCache::new())
            .unwrap();
        assert_eq!(report.stats.policy, "balanced");
        assert_eq!(report.stats.combinations, 11);
        assert!(report.stats.oracle.hits > 0);
        assert_eq!(report.stats.oracle.unknown, 0);
    }

    const BOARD_POOL: [&str; 7] = ["lamp", "sun", "umbrella", "chair", "moon", "rain", "piano"];
    const HINT_POOL: [&str; 5] = ["shade", "glow", "bright", "cover", "seat"];
    const PAIRS: usize = (BOARD_POOL.len() + HINT_POOL.len())
        * (BOARD_POOL.len() + HINT_POOL.len() - 1)
        / 2;

    fn random_space(values: &[f32]) -> PairwiseSpace {
        let tokens: Vec<&str> = BOARD_POOL.iter().chain(HINT_POOL.iter()).copied().collect();
        let mut space = PairwiseSpace::new(tokens.iter().copied());
        let mut values = values.iter();
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                if let Some(value) = values.next() {
                    space = space.set(a, b, *value);
                }
            }
        }
        space
    }

    fn random_request(team_size: usize, assassin: bool) -> HintRequest {
        let request = HintRequest::new(BOARD_POOL[..team_size].iter().copied())
            .opponents(BOARD_POOL[team_size..team_size + 2].iter().copied());
        if assassin {
            request.assassin(BOARD_POOL[6])
        } else {
            request
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn proptest_results_are_safe_partitioned_and_capped(
            values in prop::collection::vec(-1.0f32..1.0f32, PAIRS),
            team_size in 1usize..=4,
            assassin in any::<bool>(),
        ) {
            let space = random_space(&values);
            let request = random_request(team_size, assassin);
            let board = Board::try_from(&request).unwrap();
            let generator = HintGenerator::new(&space, SynonymTable::empty());
            let result = generator.generate(&request).unwrap();

            for (size, hints) in result.iter() {
                prop_assert!(hints.len() <= crate::types::MAX_HINTS_PER_SIZE);
                let mut seen = std::collections::HashSet::new();
                for hint in hints {
                    prop_assert!(seen.insert(hint.hint.clone()));
                    prop_assert_eq!(hint.words.len(), size);
                    prop_assert!(hint.words.iter().all(|w| board.team().contains(w)));
                    prop_assert!(hint.score > generator.policy().threshold(size));
                    for danger in board.opponent().iter().map(String::as_str).chain(board.assassin()) {
                        let similarity = space.similarity(&hint.hint, danger).unwrap();
                        prop_assert!(hint.score > similarity);
                    }
                }
                for pair in hints.windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }

        #[test]
        fn proptest_generation_is_deterministic_and_cache_transparent(
            values in prop::collection::vec(-1.0f32..1.0f32, PAIRS),
            team_size in 2usize..=4,
            assassin in any::<bool>(),
        ) {
            let space = random_space(&values);
            let request = random_request(team_size, assassin);
            let generator = HintGenerator::new(&space, SynonymTable::empty());

            let first = generator.generate(&request).unwrap();
            let second = generator.generate(&request).unwrap();
            prop_assert_eq!(&first, &second);

            let uncached = generator.generate_with_cache(&request, NoCache).unwrap();
            prop_assert_eq!(&first, &uncached.hints);

            let shared = SharedSimilarityCache::with_capacity(16).unwrap();
            let warm = generator.generate_with_cache(&request, shared.clone()).unwrap();
            let reused = generator.generate_with_cache(&request, shared).unwrap();
            prop_assert_eq!(&first, &warm.hints);
            prop_assert_eq!(&first, &reused.hints);
        }
    }
}
