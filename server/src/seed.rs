//! Demo knowledge base seeding
//!
//! Produces the three starter notes with embeddings built the way the
//! indexing side builds them: lower-cased, whitespace-split tokens, one
//! hash bucket per token, L2 normalized, then quantized to bytes. This
//! tokenization intentionally differs from the query embedder (punctuation
//! stays attached, case is folded), so retrieval over seeded notes is
//! best-effort.

use navi_retrieval::embedding::fnv1a;
use navi_retrieval::{quantize, Chunk};
use std::path::Path;

use crate::error::HostResult;
use crate::store::Snapshot;

/// A starter note: (chunk id, document id, text)
pub const DEMO_NOTES: [(&str, &str, &str); 3] = [
    (
        "c1",
        "doc-hello",
        "XDesktopAgent is a local-first AI desktop agent with dataflow and FP principles.",
    ),
    (
        "c2",
        "doc-flutter",
        "Flutter desktop uses Dart FFI to call Go shared libraries for fast local processing.",
    ),
    (
        "c3",
        "doc-email",
        "The RAG pipeline retrieves local notes and emails and assembles a prompt for LLM.",
    ),
];

/// Indexing-side embedding of a note
pub fn index_embedding(text: &str, dimension: usize) -> Vec<f64> {
    let mut vec = vec![0.0_f64; dimension];
    if dimension == 0 {
        return vec;
    }

    for token in text.to_lowercase().split_whitespace() {
        vec[(fnv1a(token.as_bytes()) % dimension as u64) as usize] += 1.0;
    }

    let norm = vec.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm = if norm == 0.0 { 1.0 } else { norm };
    vec.iter().map(|v| v / norm).collect()
}

/// Build the demo snapshot
pub fn demo_snapshot(dimension: usize) -> Snapshot {
    let chunks = DEMO_NOTES
        .iter()
        .map(|(id, doc_id, text)| Chunk {
            id: id.to_string(),
            text: text.to_string(),
            doc_id: doc_id.to_string(),
            kind: "note".to_string(),
            meta: serde_json::json!({ "lang": "en" }),
            embedding: quantize(&index_embedding(text, dimension)),
        })
        .collect();

    Snapshot { chunks }
}

/// Write the demo snapshot to `path`; returns the number of chunks written
pub fn write_demo(path: &Path, dimension: usize) -> HostResult<usize> {
    let snapshot = demo_snapshot(dimension);
    snapshot.write(path)?;
    tracing::info!(
        "Seeded {} chunks into {}",
        snapshot.chunks.len(),
        path.display()
    );
    Ok(snapshot.chunks.len())
}
