//! Best-effort replication strategy.

use tracing::debug;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;
use corelib::{HashRing, Hasher, RingNode};

/// Up to N replicas: clamps to the member count instead of failing.
#[derive(Debug, Clone)]
pub struct BestEffortStrategy {
    replica_count: usize,
}

impl BestEffortStrategy {
    pub fn new(replica_count: usize) -> Self {
        Self { replica_count }
    }
}

impl ReplicationStrategy for BestEffortStrategy {
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
        let count = self.replica_count.min(ring.member_count());
        if count < self.replica_count {
            debug!(
                wanted = self.replica_count,
                available = count,
                "under-replicated lookup"
            );
        }
        Ok(ring.closest_n_for_key(key, count)?)
    }

    fn name(&self) -> &'static str {
        "BestEffortStrategy"
    }
}
