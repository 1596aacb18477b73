//! Read-only snapshot chunk store
//!
//! The knowledge base is a JSON snapshot of the chunk table (`id`, `doc_id`,
//! `kind`, `text`, `meta`, `embedding`). It is read once when the host is
//! initialized and served from memory for the rest of the process.

use navi_retrieval::{Chunk, ChunkSource, InMemoryChunkSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HostError, HostResult};

/// On-disk snapshot layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

impl Snapshot {
    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn write(&self, path: &Path) -> HostResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Chunk store opened from a snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    chunks: InMemoryChunkSource,
}

impl SnapshotStore {
    /// Open and parse a snapshot file
    pub fn open(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| HostError::store(format!("cannot open {}: {}", path.display(), e)))?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
            HostError::store(format!("malformed snapshot {}: {}", path.display(), e))
        })?;

        tracing::info!(
            "Opened snapshot store at {} ({} chunks)",
            path.display(),
            snapshot.chunks.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            chunks: InMemoryChunkSource::new(snapshot.chunks),
        })
    }

    /// Number of chunks whose embedding is not `dimension` bytes long
    pub fn count_malformed(&self, dimension: usize) -> usize {
        self.chunks
            .chunks()
            .iter()
            .filter(|c| !c.has_dimension(dimension))
            .count()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChunkSource for SnapshotStore {
    fn all_chunks(&self) -> navi_retrieval::Result<Vec<Chunk>> {
        self.chunks.all_chunks()
    }

    fn len(&self) -> navi_retrieval::Result<usize> {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chunk(id: &str, embedding: Vec<u8>) -> Chunk {
        Chunk::builder()
            .id(id)
            .text(format!("body {}", id))
            .embedding(embedding)
            .build()
            .unwrap()
    }

    #[test]
    fn test_write_then_open_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("kb.json");
        let snapshot = Snapshot {
            chunks: vec![chunk("c2", vec![1; 64]), chunk("c1", vec![2; 64])],
        };
        snapshot.write(&path).unwrap();

        let store = SnapshotStore::open(&path).unwrap();
        let ids: Vec<String> = store
            .all_chunks()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c2", "c1"]);
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SnapshotStore::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, HostError::Store(_)));
        assert!(err.to_string().contains("cannot open"));
    }

    #[test]
    fn test_open_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.json");
        std::fs::write(&path, "{\"chunks\": [").unwrap();
        let err = SnapshotStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("malformed snapshot"));
    }

    #[test]
    fn test_record_without_embedding_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kb.json");
        std::fs::write(
            &path,
            r#"{"chunks": [{"id": "c1", "doc_id": "d", "kind": "note", "text": "t", "meta": {}}]}"#,
        )
        .unwrap();

        let store = SnapshotStore::open(&path).unwrap();
        assert!(store.all_chunks().unwrap()[0].embedding.is_empty());
        assert_eq!(store.count_malformed(64), 1);
    }
}
