//! Replication strategy abstractions.
//!
//! - **SimpleStrategy**: exactly N replicas, fails on a smaller cluster
//! - **BestEffortStrategy**: up to N replicas, for fallback reads while the
//!   cluster is shrunken

pub mod best_effort;
pub mod simple;

pub use best_effort::BestEffortStrategy;
pub use simple::SimpleStrategy;

use crate::error::ReplicationError;
use corelib::{HashRing, Hasher, RingNode};

/// Trait for replication strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of replicas this strategy aims for, primary included.
    fn replica_count(&self) -> usize;

    /// Members that should hold `key`, primary first.
    fn replicas_for_key<'r, N: RingNode, H: Hasher>(
        &self,
        ring: &'r HashRing<N, H>,
        key: &[u8],
    ) -> Result<Vec<&'r N>, ReplicationError>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
