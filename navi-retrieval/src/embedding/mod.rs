//! Embedding module
//!
//! Byte codec for stored chunk embeddings and the hashing query embedder.

mod codec;
mod engine;
mod hasher;

pub use codec::{decode, decode_checked, quantize, QUANT_SCALE};
pub use engine::{QueryEmbedder, DEFAULT_DIMENSION};
pub use hasher::{bucket, fnv1a, tokenize, Fnv1aHasher, TokenHasher, FNV_OFFSET, FNV_PRIME};
