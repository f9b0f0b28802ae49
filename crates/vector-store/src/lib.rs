//! # Codecracker Vector Store
//!
//! Word embeddings and memoized similarity lookups for hint generation.
//!
//! ## Features
//!
//! - **Pluggable backends** via the [`EmbeddingSpace`] trait
//! - **GloVe / word2vec text loading** into an in-memory [`WordVectors`] space
//! - **Memoized similarity** through [`SimilarityOracle`], with request-scoped or
//!   shared LRU caches
//!
//! ## Architecture
//!
//! ```text
//! vectors.txt
//!     │
//!     ├──> WordVectors (normalized, brute-force kNN)
//!     │      └─> EmbeddingSpace
//!     │
//!     └──> SimilarityOracle
//!            ├─> RequestCache (per request)
//!            └─> SharedSimilarityCache (LRU, shared across requests)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codecracker_vector_store::{SimilarityOracle, WordVectors};
//!
//! fn main() -> codecracker_vector_store::Result<()> {
//!     let vectors = WordVectors::load("glove.6B.100d.txt", Some(100_000))?;
//!     let mut oracle = SimilarityOracle::new(&vectors);
//!
//!     let score = oracle.similarity("shade", "umbrella")?;
//!     println!("shade ~ umbrella: {score:.3}");
//!
//!     Ok(())
//! }
//! ```

mod error;
mod oracle;
mod similarity_cache;
mod space;
mod types;
mod word_vectors;

pub use error::{Result, VectorStoreError};
pub use oracle::{OracleStats, SimilarityOracle};
pub use similarity_cache::{NoCache, RequestCache, SharedSimilarityCache, SimilarityCache};
pub use space::EmbeddingSpace;
pub use types::{Neighbor, PairKey};
pub use word_vectors::WordVectors;
