use crate::error::{Result, VectorStoreError};
use crate::similarity_cache::{RequestCache, SimilarityCache};
use crate::space::EmbeddingSpace;
use crate::types::PairKey;
use serde::Serialize;

/// Counters collected by a [`SimilarityOracle`] over its lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OracleStats {
    pub hits: u64,
    pub misses: u64,
    pub unknown: u64,
}

/// Memoized similarity lookups over an [`EmbeddingSpace`].
///
/// Pairs are cached under their canonical [`PairKey`], so `similarity(a, b)` and
/// `similarity(b, a)` share one entry. Out-of-vocabulary tokens score `0.0`
/// (neither attractive nor repulsive) instead of failing; any other backend
/// failure is propagated.
pub struct SimilarityOracle<S, C = RequestCache> {
    space: S,
    cache: C,
    stats: OracleStats,
}

impl<S: EmbeddingSpace> SimilarityOracle<S, RequestCache> {
    /// Oracle with a fresh request-scoped cache.
    pub fn new(space: S) -> Self {
        Self::with_cache(space, RequestCache::new())
    }
}

impl<S: EmbeddingSpace, C: SimilarityCache> SimilarityOracle<S, C> {
    pub fn with_cache(space: S, cache: C) -> Self {
        Self {
            space,
            cache,
            stats: OracleStats::default(),
        }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn stats(&self) -> OracleStats {
        self.stats
    }

    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    pub fn similarity(&mut self, a: &str, b: &str) -> Result<f32> {
        let key = PairKey::new(a, b);
        if let Some(value) = self.cache.get(&key) {
            self.stats.hits += 1;
            return Ok(value);
        }
        self.stats.misses += 1;

        let value = match self.space.similarity(key.first(), key.second()) {
            Ok(value) => value,
            Err(err) if err.is_unknown_token() => {
                log::trace!("{err}; scoring ({a}, {b}) as 0.0");
                self.stats.unknown += 1;
                0.0
            }
            Err(err) => return Err(err),
        };

        if !value.is_finite() {
            return Err(VectorStoreError::InvalidSimilarity {
                a: a.to_string(),
                b: b.to_string(),
            });
        }

        self.cache.insert(key, value);
        Ok(value)
    }
}
