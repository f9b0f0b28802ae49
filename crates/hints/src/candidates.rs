use std::collections::HashSet;

use codecracker_vector_store::{EmbeddingSpace, SimilarityCache, SimilarityOracle};

use crate::board::Board;
use crate::error::Result;
use crate::lexical_filter::{is_single_alphabetic_token, LexicalFilter};
use crate::lexicon::LexicalResource;

/// Deduplicated hint candidates in first-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    pub candidates: Vec<String>,
    /// Team words absent from the embedding vocabulary.
    pub skipped: Vec<String>,
}

impl CandidatePool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Nearest-neighbor expansion of the team words, optionally widened with synonyms.
pub struct CandidateGenerator<'a> {
    filter: LexicalFilter<'a>,
    lexicon: &'a dyn LexicalResource,
    top_n: usize,
    synonym_min_similarity: Option<f32>,
}

impl<'a> CandidateGenerator<'a> {
    #[must_use]
    pub fn new(filter: LexicalFilter<'a>, lexicon: &'a dyn LexicalResource, top_n: usize) -> Self {
        Self {
            filter,
            lexicon,
            top_n,
            synonym_min_similarity: None,
        }
    }

    /// Also admit synonyms of each neighbor. A synonym must pass the lexical
    /// filter, be in the embedding vocabulary and score at least `min_similarity`
    /// against the neighbor it came from (a sense check).
    #[must_use]
    pub fn with_synonyms(mut self, min_similarity: f32) -> Self {
        self.synonym_min_similarity = Some(min_similarity);
        self
    }

    pub fn generate<S, C>(
        &self,
        oracle: &mut SimilarityOracle<S, C>,
        board: &Board,
    ) -> Result<CandidatePool>
    where
        S: EmbeddingSpace,
        C: SimilarityCache,
    {
        let board_words = board.all_words();
        let mut pool = PoolBuilder::default();
        let mut skipped = Vec::new();

        for word in board.team() {
            if !oracle.space().contains(word) {
                skipped.push(word.clone());
                continue;
            }

            let neighbors = oracle.space().nearest_neighbors(word, self.top_n)?;
            for neighbor in neighbors {
                if !is_single_alphabetic_token(&neighbor.token) {
                    continue;
                }
                if self.filter.is_valid_hint(&neighbor.token, &board_words) {
                    pool.admit(&neighbor.token);
                }
                if let Some(min_similarity) = self.synonym_min_similarity {
                    self.admit_synonyms(
                        oracle,
                        &neighbor.token,
                        &board_words,
                        min_similarity,
                        &mut pool,
                    )?;
                }
            }
        }

        Ok(CandidatePool {
            candidates: pool.candidates,
            skipped,
        })
    }

    fn admit_synonyms<S, C>(
        &self,
        oracle: &mut SimilarityOracle<S, C>,
        neighbor: &str,
        board_words: &[String],
        min_similarity: f32,
        pool: &mut PoolBuilder,
    ) -> Result<()>
    where
        S: EmbeddingSpace,
        C: SimilarityCache,
    {
        for synonym in self.lexicon.synonyms(neighbor)? {
            if pool.contains(&synonym)
                || !is_single_alphabetic_token(&synonym)
                || !self.filter.is_valid_hint(&synonym, board_words)
                || !oracle.space().contains(&synonym)
            {
                continue;
            }
            if oracle.similarity(neighbor, &synonym)? >= min_similarity {
                pool.admit(&synonym);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct PoolBuilder {
    candidates: Vec<String>,
    seen: HashSet<String>,
}

impl PoolBuilder {
    fn contains(&self, token: &str) -> bool {
        self.seen.contains(token)
    }

    fn admit(&mut self, token: &str) {
        if self.seen.insert(token.to_string()) {
            self.candidates.push(token.to_string());
        }
    }
}
