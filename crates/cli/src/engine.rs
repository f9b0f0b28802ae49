use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use codecracker_hints::{
    CapitalizationTagger, HintGenerator, ScoringPolicy, SynonymTable, DEFAULT_POLICY,
};
use codecracker_vector_store::WordVectors;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) type Generator = HintGenerator<WordVectors, SynonymTable>;

/// Flags shared by every command that loads the embedding space.
#[derive(Args, Debug, Clone)]
pub(crate) struct EngineArgs {
    /// Word vectors in GloVe text format (overrides CODECRACKER_VECTORS)
    #[arg(long)]
    pub vectors: Option<PathBuf>,

    /// Load at most this many vectors (the file is read in order)
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Scoring policy: builtin name or JSON/TOML file (overrides CODECRACKER_PROFILE)
    #[arg(long)]
    pub profile: Option<String>,

    /// Nearest neighbors fetched per team word
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Synonym table (JSON/TOML); enables synonym expansion (overrides CODECRACKER_SYNONYMS)
    #[arg(long)]
    pub synonyms: Option<PathBuf>,

    /// Reject capitalized candidates as proper nouns (cased vocabularies only)
    #[arg(long)]
    pub reject_proper_nouns: bool,
}

impl EngineArgs {
    fn vectors_path(&self) -> Result<PathBuf> {
        self.vectors
            .clone()
            .or_else(|| env::var_os("CODECRACKER_VECTORS").map(PathBuf::from))
            .context("No word vectors given: pass --vectors or set CODECRACKER_VECTORS")
    }

    fn policy(&self, synonyms_file: bool) -> Result<ScoringPolicy> {
        let name = self
            .profile
            .clone()
            .or_else(|| env::var("CODECRACKER_PROFILE").ok())
            .unwrap_or_else(|| DEFAULT_POLICY.to_string());
        let mut policy = ScoringPolicy::resolve(&name)?;
        if let Some(top_n) = self.top_n {
            policy = policy.with_top_n(top_n)?;
        }
        if synonyms_file {
            policy = policy.with_synonyms(true);
        }
        Ok(policy)
    }

    fn lexicon(&self) -> Result<(SynonymTable, bool)> {
        let path = self
            .synonyms
            .clone()
            .or_else(|| env::var_os("CODECRACKER_SYNONYMS").map(PathBuf::from));
        match path {
            Some(path) => {
                let table = SynonymTable::from_file(&path)
                    .with_context(|| format!("Invalid synonym table {}", path.display()))?;
                log::info!("Loaded {} synonym entries from {}", table.len(), path.display());
                Ok((table, true))
            }
            None => Ok((SynonymTable::builtin(), false)),
        }
    }

    pub(crate) fn build(&self) -> Result<Generator> {
        let (lexicon, synonyms_file) = self.lexicon()?;
        let policy = self.policy(synonyms_file)?;
        let path = self.vectors_path()?;
        let vectors = WordVectors::load(&path, self.max_words)
            .with_context(|| format!("Failed to load word vectors from {}", path.display()))?;
        log::debug!(
            "Policy '{}': exponent {}, top_n {}, synonyms {}",
            policy.name(),
            policy.exponent(),
            policy.top_n(),
            policy.synonyms_enabled()
        );

        let mut generator = HintGenerator::new(vectors, lexicon).with_policy(policy);
        if self.reject_proper_nouns {
            generator = generator.with_tagger(Arc::new(CapitalizationTagger));
        }
        Ok(generator)
    }
}
