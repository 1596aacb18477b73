//! Error types for navi-retrieval

use thiserror::Error;

/// Errors that can occur around the retrieval core
///
/// The scoring path itself never fails; these surface from the codec's
/// checked decode and from chunk sources.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Stored embedding does not have the system-wide dimension
    #[error("Embedding length mismatch: expected {expected} bytes, got {actual}")]
    EmbeddingLength { expected: usize, actual: usize },

    /// Chunk source failed to enumerate its records
    #[error("Chunk source error: {0}")]
    Source(String),

    /// Builder error
    #[error("Builder error: {0}")]
    Builder(#[from] crate::chunk::ChunkBuilderError),
}

impl RetrievalError {
    /// Create an embedding length error
    pub fn embedding_length(expected: usize, actual: usize) -> Self {
        Self::EmbeddingLength { expected, actual }
    }

    /// Create a chunk source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Result type for retrieval operations
pub type Result<T> = std::result::Result<T, RetrievalError>;
