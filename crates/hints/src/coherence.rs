use codecracker_vector_store::{EmbeddingSpace, SimilarityCache, SimilarityOracle};

use crate::error::Result;

/// Mean similarity of `hint` to `subset`, amplified by `|subset|^exponent`.
///
/// Out-of-vocabulary subset words count as `0.0`. An empty subset scores `0.0`.
pub fn coherence<S, C, W>(
    oracle: &mut SimilarityOracle<S, C>,
    hint: &str,
    subset: &[W],
    exponent: f32,
) -> Result<f32>
where
    S: EmbeddingSpace,
    C: SimilarityCache,
    W: AsRef<str>,
{
    if subset.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0f32;
    for word in subset {
        total += oracle.similarity(hint, word.as_ref())?;
    }
    let size = subset.len() as f32;
    Ok(total / size * size.powf(exponent))
}
