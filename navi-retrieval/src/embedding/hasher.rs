//! Tokenizer and token hashing for the query embedder

/// Offset basis of the reference scheme (the FNV-1a basis with its last digit dropped)
pub const FNV_OFFSET: u64 = 1_469_598_103_934_665_603;
/// 64-bit FNV prime
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// Hash applied to every token before bucket reduction
///
/// Swapping the hasher changes which bucket a token lands in, never the
/// dimension or normalization of the resulting vector.
pub trait TokenHasher: Send + Sync {
    fn hash(&self, token: &[u8]) -> u64;
}

/// FNV-1a over the raw token bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1aHasher;

impl TokenHasher for Fnv1aHasher {
    fn hash(&self, token: &[u8]) -> u64 {
        fnv1a(token)
    }
}

/// 64-bit FNV-1a with wrapping multiplication
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Split text into maximal runs of ASCII letters and digits
///
/// Everything else separates tokens and is dropped. Case is preserved.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Bucket index of a token for the given dimension
///
/// Returns `None` when `dimension` is 0, since there is no bucket to hit.
pub fn bucket(hasher: &dyn TokenHasher, token: &str, dimension: usize) -> Option<usize> {
    let dimension = u64::try_from(dimension).ok()?;
    hasher
        .hash(token.as_bytes())
        .checked_rem(dimension)
        .map(|idx| idx as usize)
}
