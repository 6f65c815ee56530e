//! xxHash64 hasher (the default).

use crate::hasher::traits::Hasher;
use xxhash_rust::xxh64::xxh64;

/// Seeded xxHash64. Seed 0 matches the stock `xxh64` digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct XxHasher {
    seed: u64,
}

impl XxHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Hasher for XxHasher {
    fn hash_str(&self, value: &[u8]) -> u64 {
        xxh64(value, self.seed)
    }

    fn name(&self) -> &'static str {
        "XxHasher"
    }
}
