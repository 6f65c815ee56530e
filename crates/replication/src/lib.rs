//! Replication strategies on top of the bounded-load ring.
//!
//! A strategy decides how many copies of a key to keep and which members
//! hold them. Both strategies here rank candidates with the ring's closest-N
//! selection, so the first replica is always the partition owner.

pub mod error;
pub mod strategy;

pub use error::ReplicationError;
pub use strategy::{BestEffortStrategy, ReplicationStrategy, SimpleStrategy};
