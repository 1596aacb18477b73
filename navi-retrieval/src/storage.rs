//! Chunk source seam
//!
//! The knowledge base itself lives outside this crate. Hosts hand the core
//! an explicitly owned [`ChunkSource`] at call time; the in-memory source
//! covers tests and hosts that already hold their chunks.

use std::sync::Arc;

use crate::chunk::Chunk;
use crate::error::Result;

/// Read-only enumeration of stored chunks
///
/// Implementations must be safe for concurrent reads. The order returned
/// is the order used for tie-breaking.
pub trait ChunkSource: Send + Sync {
    /// Every readable chunk at call time
    fn all_chunks(&self) -> Result<Vec<Chunk>>;

    /// Number of stored chunks
    fn len(&self) -> Result<usize> {
        Ok(self.all_chunks()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Chunk source backed by a shared in-memory list
#[derive(Debug, Clone, Default)]
pub struct InMemoryChunkSource {
    chunks: Arc<Vec<Chunk>>,
}

impl InMemoryChunkSource {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks: Arc::new(chunks),
        }
    }

    /// Borrow the chunks without cloning
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

impl From<Vec<Chunk>> for InMemoryChunkSource {
    fn from(chunks: Vec<Chunk>) -> Self {
        Self::new(chunks)
    }
}

impl ChunkSource for InMemoryChunkSource {
    fn all_chunks(&self) -> Result<Vec<Chunk>> {
        Ok(self.chunks.as_ref().clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.chunks.len())
    }
}
