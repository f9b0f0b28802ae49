use crate::error::Result;
use crate::types::Neighbor;

/// A vocabulary of known tokens with a symmetric similarity function.
///
/// `similarity` is only defined when both tokens are contained; implementations
/// return [`crate::VectorStoreError::UnknownToken`] otherwise and leave the
/// recovery policy to the caller (see [`crate::SimilarityOracle`]).
pub trait EmbeddingSpace {
    fn contains(&self, token: &str) -> bool;

    fn similarity(&self, a: &str, b: &str) -> Result<f32>;

    /// Up to `top_n` closest tokens, best first. The query token itself is never returned.
    fn nearest_neighbors(&self, token: &str, top_n: usize) -> Result<Vec<Neighbor>>;
}

impl<T: EmbeddingSpace + ?Sized> EmbeddingSpace for &T {
    fn contains(&self, token: &str) -> bool {
        (**self).contains(token)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        (**self).similarity(a, b)
    }

    fn nearest_neighbors(&self, token: &str, top_n: usize) -> Result<Vec<Neighbor>> {
        (**self).nearest_neighbors(token, top_n)
    }
}

impl<T: EmbeddingSpace + ?Sized> EmbeddingSpace for std::sync::Arc<T> {
    fn contains(&self, token: &str) -> bool {
        (**self).contains(token)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        (**self).similarity(a, b)
    }

    fn nearest_neighbors(&self, token: &str, top_n: usize) -> Result<Vec<Neighbor>> {
        (**self).nearest_neighbors(token, top_n)
    }
}
