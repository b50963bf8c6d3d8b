//! Error types for the `docqa` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while answering a query.
///
/// A query with no sufficiently relevant document is not an error; see
/// [`Ranking::NoRelevantMatch`](crate::ranker::Ranking::NoRelevantMatch).
#[derive(Debug, Error)]
pub enum QaError {
    /// Two vectors of different length were compared.
    ///
    /// This indicates embeddings from inconsistent providers or models and is
    /// a programming error rather than a recoverable runtime condition.
    #[error("Dimension mismatch: {left} vs {right} components")]
    DimensionMismatch {
        /// Length of the left-hand vector.
        left: usize,
        /// Length of the right-hand vector.
        right: usize,
    },

    /// The embedding collaborator failed.
    #[error("Embedding unavailable ({provider}): {message}")]
    EmbeddingUnavailable {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The answer generation collaborator failed.
    #[error("Generation unavailable ({provider}): {message}")]
    GenerationUnavailable {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The corpus snapshot could not be built.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A corpus source could not be read.
    #[error("Failed to read corpus source {}: {source}", path.display())]
    CorpusIo {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QaError {
    /// Returns `true` when the error came from an external collaborator
    /// (embedding or generation) rather than from the core itself.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::EmbeddingUnavailable { .. } | Self::GenerationUnavailable { .. })
    }
}

/// A convenience result type for question answering operations.
pub type Result<T> = std::result::Result<T, QaError>;
