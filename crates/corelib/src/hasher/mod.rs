//! Hash functions used to place tokens, partitions and keys.
//!
//! The ring never hashes directly; it goes through a [`Hasher`] so any
//! deterministic, uniformly distributed 64-bit hash can be substituted.

pub mod siphash;
pub mod traits;
pub mod xxhash;

pub use siphash::SipHasher;
pub use traits::Hasher;
pub use xxhash::XxHasher;
