//! Similarity ranking
//!
//! Full-scan cosine scoring of every stored chunk against the query vector,
//! followed by a stable top-k selection.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::chunk::Chunk;
use crate::embedding::{decode_checked, DEFAULT_DIMENSION};

/// Default number of snippets returned per question
pub const DEFAULT_TOP_K: usize = 3;

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum snippets to return (default: 3)
    pub top_k: usize,
    /// Embedding dimension shared by queries and stored chunks (default: 64)
    pub dimension: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            dimension: DEFAULT_DIMENSION,
        }
    }
}

/// A chunk paired with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Identifier of the matched chunk
    pub id: String,
    /// Cosine similarity in [-1, 1]
    pub score: f64,
    /// Text of the matched chunk
    pub text: String,
}

/// Ranks stored chunks against a query vector
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker {
    top_k: usize,
}

impl SimilarityRanker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Score every chunk, keeping the original chunk index alongside
    ///
    /// Malformed embeddings score exactly 0 and stay in the candidate set.
    /// Ordering is by score alone, so they land after every positive score
    /// but ahead of chunks whose cosine is negative.
    pub fn score_all(&self, query: &[f64], chunks: &[Chunk]) -> Vec<(usize, f64)> {
        chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| {
                let score = match decode_checked(&chunk.embedding, query.len()) {
                    Ok(vector) => cosine_similarity(query, &vector),
                    Err(e) => {
                        log::warn!("Chunk {} scored 0: {}", chunk.id, e);
                        0.0
                    }
                };
                (idx, score)
            })
            .collect()
    }

    /// Return the top-k chunks, highest score first
    ///
    /// Equal scores keep the order in which the chunks were supplied.
    pub fn rank(&self, query: &[f64], chunks: &[Chunk]) -> Vec<ScoredChunk> {
        let mut scored = self.score_all(query, chunks);

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(self.top_k);

        scored
            .into_iter()
            .map(|(idx, score)| {
                let chunk = &chunks[idx];
                ScoredChunk {
                    id: chunk.id.clone(),
                    score,
                    text: chunk.text.clone(),
                }
            })
            .collect()
    }

    /// Get the configured k
    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

/// Calculate cosine similarity between two vectors
///
/// Returns 0 when the lengths differ or either norm is zero, and clamps
/// rounding overshoot into [-1, 1].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, embedding: Vec<u8>) -> Chunk {
        Chunk::builder()
            .id(id)
            .text(format!("text of {}", id))
            .embedding(embedding)
            .build()
            .unwrap()
    }

    /// One-hot stored embedding: 255 at `hot`, 127 elsewhere
    fn one_hot(dim: usize, hot: usize) -> Vec<u8> {
        let mut v = vec![127u8; dim];
        v[hot] = 255;
        v
    }

    fn unit(dim: usize, hot: usize) -> Vec<f64> {
        let mut v = vec![0.0; dim];
        v[hot] = 1.0;
        v
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_degenerate_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.dimension, 64);
    }

    #[test]
    fn test_search_config_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.dimension, 64);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let chunks = vec![
            chunk("far", one_hot(8, 7)),
            chunk("near", one_hot(8, 2)),
            chunk("opposite", vec![0, 0, 0, 0, 0, 0, 0, 0]),
        ];
        let ranked = SimilarityRanker::new(3).rank(&unit(8, 2), &chunks);

        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids[0], "near");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_truncates_to_k() {
        let chunks: Vec<Chunk> = (0..6).map(|i| chunk(&format!("c{}", i), one_hot(8, i))).collect();
        let ranked = SimilarityRanker::new(3).rank(&unit(8, 0), &chunks);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "c0");
    }

    #[test]
    fn test_rank_fewer_than_k() {
        let chunks = vec![chunk("only", one_hot(8, 1))];
        let ranked = SimilarityRanker::new(3).rank(&unit(8, 1), &chunks);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_rank_empty_collection() {
        let ranked = SimilarityRanker::default().rank(&unit(8, 1), &[]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_zero_k() {
        let chunks = vec![chunk("a", one_hot(8, 1))];
        assert!(SimilarityRanker::new(0).rank(&unit(8, 1), &chunks).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Identical embeddings give identical scores
        let chunks: Vec<Chunk> = ["b", "a", "d", "c"]
            .iter()
            .map(|id| chunk(id, one_hot(8, 4)))
            .collect();
        let ranked = SimilarityRanker::new(4).rank(&unit(8, 4), &chunks);
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_malformed_embedding_scores_zero_and_stays_candidate() {
        let chunks = vec![
            chunk("short", vec![255, 255]),
            chunk("empty", vec![]),
            chunk("good", one_hot(8, 3)),
        ];
        let ranked = SimilarityRanker::new(3).rank(&unit(8, 3), &chunks);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].id, "good");
        assert_eq!(ranked[1].id, "short");
        assert_eq!(ranked[1].score, 0.0);
        assert_eq!(ranked[2].id, "empty");
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_zero_query_scores_everything_zero() {
        let chunks: Vec<Chunk> = (0..4).map(|i| chunk(&format!("c{}", i), one_hot(8, i))).collect();
        let scores = SimilarityRanker::default().score_all(&[0.0; 8], &chunks);
        assert!(scores.iter().all(|&(_, s)| s == 0.0));
    }
}
