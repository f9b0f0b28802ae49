use codecracker_vector_store::{EmbeddingSpace, Neighbor, Result, VectorStoreError};
use std::collections::{BTreeSet, HashMap};

/// Embedding space defined by an explicit similarity table.
///
/// Known tokens without a table entry score `0.0` against each other;
/// neighbors are every other known token ordered by score, then by token.
#[derive(Debug, Clone, Default)]
pub(crate) struct PairwiseSpace {
    vocabulary: BTreeSet<String>,
    pairs: HashMap<(String, String), f32>,
}

impl PairwiseSpace {
    pub(crate) fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            vocabulary: words.into_iter().map(str::to_string).collect(),
            pairs: HashMap::new(),
        }
    }

    pub(crate) fn set(mut self, a: &str, b: &str, value: f32) -> Self {
        self.vocabulary.insert(a.to_string());
        self.vocabulary.insert(b.to_string());
        self.pairs.insert(key(a, b), value);
        self
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl EmbeddingSpace for PairwiseSpace {
    fn contains(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        for token in [a, b] {
            if !self.contains(token) {
                return Err(VectorStoreError::UnknownToken(token.to_string()));
            }
        }
        if a == b {
            return Ok(1.0);
        }
        Ok(self.pairs.get(&key(a, b)).copied().unwrap_or(0.0))
    }

    fn nearest_neighbors(&self, token: &str, top_n: usize) -> Result<Vec<Neighbor>> {
        if !self.contains(token) {
            return Err(VectorStoreError::UnknownToken(token.to_string()));
        }
        let mut neighbors: Vec<Neighbor> = self
            .vocabulary
            .iter()
            .filter(|other| other.as_str() != token)
            .map(|other| Neighbor {
                token: other.clone(),
                score: self.pairs.get(&key(token, other)).copied().unwrap_or(0.0),
            })
            .collect();
        neighbors.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.token.cmp(&b.token)));
        neighbors.truncate(top_n);
        Ok(neighbors)
    }
}

/// Board from the classic "shade" example.
pub(crate) fn shade_space() -> PairwiseSpace {
    PairwiseSpace::new(["lamp", "sun", "umbrella", "chair", "car", "rain"])
        .set("shade", "lamp", 0.7)
        .set("shade", "sun", 0.7)
        .set("shade", "umbrella", 0.9)
        .set("shade", "chair", 0.5)
        .set("shade", "car", 0.1)
        .set("shade", "rain", 0.3)
}
