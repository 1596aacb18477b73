//! Knowledge base handle for the host
//!
//! Owns the single process-wide chunk store and the retriever built from
//! the host configuration. Every question reuses the same handle.

use navi_retrieval::{Answer, ChunkSource, Retriever, SearchConfig};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::store::SnapshotStore;

/// Summary returned once the knowledge base is open
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitSummary {
    pub chunks: usize,
    pub dimension: usize,
    pub top_k: usize,
}

struct Loaded {
    source: Arc<dyn ChunkSource>,
    retriever: Retriever,
}

/// Knowledge base manager
///
/// Starts empty; `initialize` (or `attach`) installs the store handle and
/// `shutdown` releases it. Questions asked in between share the handle
/// read-only.
pub struct KnowledgeBase {
    loaded: RwLock<Option<Arc<Loaded>>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            loaded: RwLock::new(None),
        }
    }

    /// Open the snapshot store named by the configuration
    ///
    /// Replaces any previously attached store.
    ///
    /// # Errors
    /// Returns `HostError::Config` for an invalid configuration and
    /// `HostError::Store` when the snapshot cannot be read.
    pub async fn initialize(&self, config: &HostConfig) -> HostResult<InitSummary> {
        config.validate()?;
        tracing::info!("Opening knowledge base at {:?}", config.db_path);

        let store = SnapshotStore::open(&config.db_path)?;
        let malformed = store.count_malformed(config.search.dimension);
        if malformed > 0 {
            tracing::warn!(
                "{} chunks do not have {}-byte embeddings and will score 0",
                malformed,
                config.search.dimension
            );
        }

        self.attach(Arc::new(store), config.search.clone()).await
    }

    /// Install an already opened chunk source
    pub async fn attach(
        &self,
        source: Arc<dyn ChunkSource>,
        search: SearchConfig,
    ) -> HostResult<InitSummary> {
        let summary = InitSummary {
            chunks: source.len()?,
            dimension: search.dimension,
            top_k: search.top_k,
        };
        let loaded = Loaded {
            source,
            retriever: Retriever::new(search),
        };

        *self.loaded.write().await = Some(Arc::new(loaded));
        tracing::info!(
            "Knowledge base ready ({} chunks, {}d, k={})",
            summary.chunks,
            summary.dimension,
            summary.top_k
        );
        Ok(summary)
    }

    /// Check if a store handle is installed
    pub async fn is_initialized(&self) -> bool {
        self.loaded.read().await.is_some()
    }

    /// Answer a question from the installed store
    ///
    /// # Errors
    /// `HostError::NotInitialized` before `initialize`; store enumeration
    /// failures as `HostError::Retrieval`.
    pub async fn ask(&self, question: &str) -> HostResult<Answer> {
        let loaded = self.get_loaded().await?;
        let answer = loaded.retriever.ask(question, loaded.source.as_ref())?;
        tracing::debug!(
            "Answered {:?} with {} snippets",
            question,
            answer.snippets.len()
        );
        Ok(answer)
    }

    /// Release the store handle; returns whether one was held
    pub async fn shutdown(&self) -> bool {
        let released = self.loaded.write().await.take().is_some();
        if released {
            tracing::info!("Knowledge base released");
        }
        released
    }

    async fn get_loaded(&self) -> HostResult<Arc<Loaded>> {
        self.loaded
            .read()
            .await
            .clone()
            .ok_or(HostError::NotInitialized)
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}
