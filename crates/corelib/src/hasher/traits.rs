//! Core hasher trait definitions.

/// A 64-bit hash capability consumed by the ring.
///
/// Hashers are stateless and thread-safe. Both methods must be deterministic
/// across processes: tokens are recomputed from node names on removal, and
/// every replica of a ring must agree on partition placement.
pub trait Hasher: Send + Sync + 'static {
    /// Hashes an arbitrary byte string.
    fn hash_str(&self, value: &[u8]) -> u64;

    /// Hashes an integer through its 8-byte little-endian encoding.
    fn hash_uint64(&self, value: u64) -> u64 {
        self.hash_str(&value.to_le_bytes())
    }

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;
}
