//! Byte codec for stored embeddings
//!
//! Stored embeddings are one unsigned byte per dimension, produced by
//! linearly mapping a value in [-1.0, 1.0] onto [0, 255]. Changing this
//! mapping is a format break that requires reindexing.

use crate::error::{RetrievalError, Result};

/// Half the byte range; byte `b` decodes to `b / QUANT_SCALE - 1.0`
pub const QUANT_SCALE: f64 = 127.5;

/// Decode stored bytes into a real vector of the same length
///
/// Exact inverse of [`quantize`] up to one quantization step. No scaling
/// or clipping beyond the linear map.
pub fn decode(bytes: &[u8]) -> Vec<f64> {
    bytes
        .iter()
        .map(|&b| f64::from(b) / QUANT_SCALE - 1.0)
        .collect()
}

/// Decode stored bytes, rejecting records whose length is not `dimension`
pub fn decode_checked(bytes: &[u8], dimension: usize) -> Result<Vec<f64>> {
    if bytes.len() != dimension {
        return Err(RetrievalError::embedding_length(dimension, bytes.len()));
    }
    Ok(decode(bytes))
}

/// Quantize a real vector with the upstream indexing scheme
///
/// Each value is shifted into [0, 2], scaled by 127.5 and truncated.
/// Out-of-range input saturates at 0 or 255.
pub fn quantize(values: &[f64]) -> Vec<u8> {
    values
        .iter()
        .map(|&v| ((v + 1.0) * QUANT_SCALE).trunc().clamp(0.0, 255.0) as u8)
        .collect()
}
