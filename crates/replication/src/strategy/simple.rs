//! Simple replication strategy.
//!
//! Takes the key's partition owner plus the next N-1 members in name-hash
//! order. Asking for more replicas than there are members is an error, so a
//! write never silently lands on fewer nodes than configured.

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;
use corelib::{HashRing, Hasher, RingNode};

/// Strict N-way replication.
///
/// # Example
///
/// ```rust
/// use corelib::{Config, HashRing, Node};
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let ring: HashRing = HashRing::new(
///     vec![Node::new("a"), Node::new("b"), Node::new("c")],
///     Config::default(),
/// )
/// .unwrap();
///
/// let replicas = SimpleStrategy::new(3).replicas_for_key(&ring, b"my-key").unwrap();
/// assert_eq!(replicas.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replica_count: usize,
}

impl SimpleStrategy {
    pub fn new(replica_count: usize) -> Self {
        Self { replica_count }
    }
}

impl Default for SimpleStrategy {
    /// Primary plus two replicas.
    fn default() -> Self {
        Self::new(3)
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replica_count(&self) -> usize {
        self.replica_count
    }

    fn replicas_for_key<'r, N: RingNode, H: Hasher>(
        &self,
        ring: &'r HashRing<N, H>,
        key: &[u8],
    ) -> Result<Vec<&'r N>, ReplicationError> {
        if self.replica_count == 0 {
            return Err(ReplicationError::ZeroReplicas);
        }
        Ok(ring.closest_n_for_key(key, self.replica_count)?)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
