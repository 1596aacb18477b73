//! End-to-end retrieval: embed -> rank -> compose

use crate::answer::{compose, Answer};
use crate::chunk::Chunk;
use crate::embedding::QueryEmbedder;
use crate::error::Result;
use crate::search::{SearchConfig, SimilarityRanker};
use crate::storage::ChunkSource;

/// Retrieval engine
///
/// Holds no per-query state and no interior mutability. Share one instance
/// across threads.
#[derive(Debug)]
pub struct Retriever {
    embedder: QueryEmbedder,
    ranker: SimilarityRanker,
    config: SearchConfig,
}

impl Retriever {
    /// Create a retriever for the given configuration
    pub fn new(config: SearchConfig) -> Self {
        Self::with_embedder(config.clone(), QueryEmbedder::new(config.dimension))
    }

    /// Create a retriever with a preconfigured embedder
    ///
    /// The embedder's dimension wins over `config.dimension`.
    pub fn with_embedder(mut config: SearchConfig, embedder: QueryEmbedder) -> Self {
        config.dimension = embedder.dimension();
        Self {
            ranker: SimilarityRanker::new(config.top_k),
            embedder,
            config,
        }
    }

    /// Answer a question from an already enumerated chunk set
    ///
    /// Never fails: degenerate questions, malformed embeddings and empty
    /// collections all produce a well-formed answer.
    pub fn retrieve(&self, question: &str, chunks: &[Chunk]) -> Answer {
        let query = self.embedder.embed(question);
        let snippets = self.ranker.rank(&query, chunks);

        log::debug!(
            "Retrieved {} of {} chunks for {:?} (top score {:?})",
            snippets.len(),
            chunks.len(),
            question,
            snippets.first().map(|s| s.score)
        );

        compose(question, snippets)
    }

    /// Enumerate a chunk source and answer the question
    ///
    /// Source failures are returned before any scoring happens.
    pub fn ask(&self, question: &str, source: &dyn ChunkSource) -> Result<Answer> {
        let chunks = source.all_chunks()?;
        Ok(self.retrieve(question, &chunks))
    }

    /// Get the active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the query embedder
    pub fn embedder(&self) -> &QueryEmbedder {
        &self.embedder
    }
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Answer a question with the default configuration (k = 3, D = 64)
pub fn retrieve(question: &str, chunks: &[Chunk]) -> Answer {
    Retriever::default().retrieve(question, chunks)
}
