//! Navi Retrieval Core
//!
//! Answers a question from a local knowledge base by ranking pre-indexed
//! chunks against a hashed query vector and composing an extractive answer.
//!
//! ## Pipeline
//!
//! - **Embedding codec** - stored embeddings are one byte per dimension, decoded as `b / 127.5 - 1`
//! - **Query embedder** - ASCII alphanumeric tokens, FNV-1a feature hashing, L2 normalization
//! - **Similarity ranker** - full-scan cosine similarity, stable top-k (default k = 3)
//! - **Answer composer** - intro line plus one bullet per selected chunk
//!
//! Storage is not part of this crate: callers pass the enumerated chunks
//! directly, or a [`ChunkSource`] they own.
//!
//! ## Example
//!
//! ```
//! use navi_retrieval::{quantize, Chunk, Retriever, SearchConfig};
//!
//! let retriever = Retriever::new(SearchConfig::default());
//! let embedding = quantize(&retriever.embedder().embed("Flutter FFI"));
//! let chunk = Chunk::builder()
//!     .id("c2")
//!     .text("Flutter desktop uses Dart FFI.")
//!     .embedding(embedding)
//!     .build()?;
//!
//! let answer = retriever.retrieve("How does Flutter FFI work?", &[chunk]);
//! assert_eq!(answer.snippets[0].id, "c2");
//! # Ok::<(), navi_retrieval::RetrievalError>(())
//! ```

pub mod answer;
pub mod chunk;
pub mod embedding;
pub mod error;
pub mod retriever;
pub mod search;
pub mod storage;

// Re-exports for convenience
pub use answer::{compose, Answer, INTRO_LINE};
pub use chunk::{Chunk, ChunkBuilder, ChunkBuilderError};
pub use embedding::{decode, decode_checked, quantize, Fnv1aHasher, QueryEmbedder, TokenHasher};
pub use error::{Result, RetrievalError};
pub use retriever::{retrieve, Retriever};
pub use search::{cosine_similarity, ScoredChunk, SearchConfig, SimilarityRanker};
pub use storage::{ChunkSource, InMemoryChunkSource};
