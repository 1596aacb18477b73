//! Chunk records consumed by the retrieval core
//!
//! Chunks are owned by the external knowledge base. The core only reads
//! them; nothing in this crate mutates a chunk after it is built.

use serde::{Deserialize, Serialize};

/// Kind assigned to chunks built without an explicit kind
pub const DEFAULT_KIND: &str = "note";

/// A unit of retrievable text with its stored embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Opaque record identifier
    pub id: String,
    /// Text body returned in snippets
    pub text: String,
    /// Identifier of the owning document
    #[serde(default)]
    pub doc_id: String,
    /// Kind/category tag
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Free-form metadata blob
    #[serde(default)]
    pub meta: serde_json::Value,
    /// Quantized embedding, one byte per dimension
    #[serde(default)]
    pub embedding: Vec<u8>,
}

fn default_kind() -> String {
    DEFAULT_KIND.to_string()
}

impl Chunk {
    /// Create a new builder for Chunk
    pub fn builder() -> ChunkBuilder {
        ChunkBuilder::new()
    }

    /// Whether the stored embedding has the expected dimension
    pub fn has_dimension(&self, dimension: usize) -> bool {
        self.embedding.len() == dimension
    }
}

/// Builder for Chunk with fluent API
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    id: Option<String>,
    text: Option<String>,
    doc_id: Option<String>,
    kind: Option<String>,
    meta: Option<serde_json::Value>,
    embedding: Vec<u8>,
}

impl ChunkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the text body
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the owning document identifier
    pub fn doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    /// Set the kind/category tag (defaults to "note")
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the metadata blob
    pub fn meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set the quantized embedding bytes
    pub fn embedding(mut self, embedding: Vec<u8>) -> Self {
        self.embedding = embedding;
        self
    }

    /// Build the Chunk
    pub fn build(self) -> Result<Chunk, ChunkBuilderError> {
        let id = self.id.ok_or(ChunkBuilderError::MissingId)?;
        let text = self.text.ok_or(ChunkBuilderError::MissingText)?;

        Ok(Chunk {
            id,
            text,
            doc_id: self.doc_id.unwrap_or_default(),
            kind: self.kind.unwrap_or_else(default_kind),
            meta: self.meta.unwrap_or(serde_json::Value::Null),
            embedding: self.embedding,
        })
    }
}

/// Errors that can occur when building a Chunk
#[derive(Debug, thiserror::Error)]
pub enum ChunkBuilderError {
    #[error("Missing required field: id")]
    MissingId,
    #[error("Missing required field: text")]
    MissingText,
}
