//! Stable content digests for result buffers.

use blake3::Hasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Digest of an `i32` slice in little-endian byte order, independent of host
/// endianness.
pub fn hash_i32s(values: &[i32]) -> Hash256 {
    let mut h = Hasher::new();
    h.update(&(values.len() as u64).to_le_bytes());
    for v in values {
        h.update(&v.to_le_bytes());
    }
    Hash256(h.finalize().into())
}
