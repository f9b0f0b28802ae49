//! # Codecracker Hints
//!
//! Single-word clue generation for a Codenames-style board.
//!
//! ## Features
//!
//! - **Candidate expansion** from nearest neighbors of each team word, with
//!   optional synonym widening
//! - **Lexical filtering**: stop words, board-word overlap, proper nouns
//! - **Subset search** over every 2-, 3- and 4-word team combination with an
//!   adaptive threshold and strict opponent/assassin safety checks
//! - **Scoring policies** loaded from bundled or user JSON/TOML profiles
//!
//! ## Architecture
//!
//! ```text
//! HintRequest ──> Board (validated)
//!                   │
//!                   ├──> CandidateGenerator (kNN + LexicalFilter + synonyms)
//!                   │
//!                   ├──> search (combinations × candidates, coherence, safety)
//!                   │
//!                   └──> rank (sort, dedup, top 5) ──> HintResult
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codecracker_hints::{HintGenerator, HintRequest, SynonymTable};
//! use codecracker_vector_store::WordVectors;
//!
//! fn main() -> anyhow::Result<()> {
//!     let vectors = WordVectors::load("glove.6B.100d.txt", Some(100_000))?;
//!     let generator = HintGenerator::new(vectors, SynonymTable::empty());
//!
//!     let request = HintRequest::new(["lamp", "sun", "umbrella", "chair"])
//!         .opponents(["car"])
//!         .assassin("rain");
//!     for (size, hints) in generator.generate(&request)?.iter() {
//!         for hint in hints {
//!             println!("{size}: {} {:.3} {:?}", hint.hint, hint.score, hint.words);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod board;
mod candidates;
mod coherence;
mod error;
mod generator;
mod lexical_filter;
mod lexicon;
mod policy;
mod rank;
mod stop_words;
mod strategic;
mod tagger;
mod types;

#[cfg(test)]
mod test_support;

pub use board::{Board, HintRequest};
pub use candidates::{CandidateGenerator, CandidatePool};
pub use coherence::coherence;
pub use error::{HintError, Result};
pub use generator::{GenerationStats, HintGenerator, HintReport};
pub use lexical_filter::{is_single_alphabetic_token, LexicalFilter};
pub use lexicon::{LexicalResource, LexiconError, SynonymTable};
pub use policy::{ScoringPolicy, ThresholdRule, BUILTIN_POLICIES, DEFAULT_POLICY};
pub use rank::rank;
pub use stop_words::english as english_stop_words;
pub use strategic::{search, SearchOutcome};
pub use tagger::{CapitalizationTagger, PartOfSpeech, PartOfSpeechTagger};
pub use types::{HintResult, ScoredHint, MAX_HINTS_PER_SIZE, MAX_SUBSET_SIZE, MIN_SUBSET_SIZE};
