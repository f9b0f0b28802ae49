use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Invalid vector dimension at line {line}: expected {expected}, got {actual}")]
    InvalidDimension {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed vectors file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Non-finite similarity for pair ({a}, {b})")]
    InvalidSimilarity { a: String, b: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl VectorStoreError {
    /// Out-of-vocabulary lookups are recoverable; everything else is a backend failure.
    #[must_use]
    pub const fn is_unknown_token(&self) -> bool {
        matches!(self, Self::UnknownToken(_))
    }
}
