use thiserror::Error;

pub type Result<T> = std::result::Result<T, HintError>;

#[derive(Error, Debug)]
pub enum HintError {
    /// User-correctable request problem, raised before any search work.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure while scoring. The display text stays generic; the
    /// backend error is kept as the source for logs.
    #[error("Internal error while generating hints")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HintError {
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<codecracker_vector_store::VectorStoreError> for HintError {
    fn from(err: codecracker_vector_store::VectorStoreError) -> Self {
        Self::Internal(Box::new(err))
    }
}

impl From<crate::lexicon::LexiconError> for HintError {
    fn from(err: crate::lexicon::LexiconError) -> Self {
        Self::Internal(Box::new(err))
    }
}
