//! Query embedding engine
//!
//! Feature-hashing bag-of-tokens embedder.

use super::hasher::{bucket, tokenize, Fnv1aHasher, TokenHasher};
use std::sync::Arc;

/// Dimension of the reference embedding scheme
pub const DEFAULT_DIMENSION: usize = 64;

/// Query embedder
///
/// Maps a question to a unit vector (or the zero vector when no token
/// contributes). Holds only its hasher and dimension, so `embed` is a pure
/// function of the question.
pub struct QueryEmbedder {
    hasher: Arc<dyn TokenHasher>,
    dimension: usize,
}

impl QueryEmbedder {
    /// Create an embedder with the FNV-1a hasher
    pub fn new(dimension: usize) -> Self {
        Self::with_hasher(dimension, Arc::new(Fnv1aHasher))
    }

    /// Create an embedder with a custom token hasher
    pub fn with_hasher(dimension: usize, hasher: Arc<dyn TokenHasher>) -> Self {
        Self { hasher, dimension }
    }

    /// Generate the query vector
    pub fn embed(&self, question: &str) -> Vec<f64> {
        let mut out = vec![0.0_f64; self.dimension];

        for token in tokenize(question) {
            if let Some(idx) = bucket(self.hasher.as_ref(), token, self.dimension) {
                out[idx] += 1.0;
            }
        }

        let mut norm = out.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            norm = 1.0;
        }
        for x in out.iter_mut() {
            *x /= norm;
        }
        out
    }

    /// Get embedding dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for QueryEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl std::fmt::Debug for QueryEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEmbedder")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}
