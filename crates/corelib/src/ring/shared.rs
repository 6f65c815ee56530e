//! Thread-safe wrapper around [`HashRing`].

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::Result;
use crate::hasher::{Hasher, XxHasher};
use crate::node::{Node, RingNode};
use crate::ring::HashRing;

/// A [`HashRing`] shared between threads.
///
/// Readers take the lock only long enough to clone an `Arc` to the current
/// ring. Writers are serialized, apply the change to a private copy and
/// publish it with a single pointer swap, so no reader ever sees a ring whose
/// partition table is half rebuilt. A failed mutation publishes nothing.
pub struct SharedRing<N: RingNode = Node, H: Hasher + Clone = XxHasher> {
    current: RwLock<Arc<HashRing<N, H>>>,
}

impl<N: RingNode, H: Hasher + Clone + Default> SharedRing<N, H> {
    pub fn new(nodes: impl IntoIterator<Item = N>, config: Config) -> Result<Self> {
        Ok(Self::from_ring(HashRing::new(nodes, config)?))
    }
}

impl<N: RingNode, H: Hasher + Clone> SharedRing<N, H> {
    pub fn from_ring(ring: HashRing<N, H>) -> Self {
        Self {
            current: RwLock::new(Arc::new(ring)),
        }
    }

    /// Consistent point-in-time view of the ring.
    pub fn snapshot(&self) -> Arc<HashRing<N, H>> {
        Arc::clone(&self.current.read())
    }

    pub fn add_node(&self, node: N) -> Result<bool> {
        self.mutate(|ring| ring.add_node(node))
    }

    pub fn remove_node(&self, name: &str) -> Result<bool> {
        self.mutate(|ring| ring.remove_node(name))
    }

    pub fn locate_key(&self, key: impl AsRef<[u8]>) -> Result<N> {
        self.current.read().locate_key(key).cloned()
    }

    pub fn closest_n_for_key(&self, key: impl AsRef<[u8]>, count: usize) -> Result<Vec<N>> {
        let ring = self.current.read();
        let nodes = ring.closest_n_for_key(key, count)?;
        Ok(nodes.into_iter().cloned().collect())
    }

    pub fn load_distribution(&self) -> BTreeMap<String, usize> {
        self.current.read().load_distribution()
    }

    pub fn average_load(&self) -> Result<f64> {
        self.current.read().average_load()
    }

    /// Runs `f` on a copy of the ring and publishes the copy if `f` reports
    /// a change.
    fn mutate(&self, f: impl FnOnce(&mut HashRing<N, H>) -> Result<bool>) -> Result<bool> {
        let mut current = self.current.write();
        let mut next: HashRing<N, H> = (**current).clone();
        let changed = f(&mut next)?;
        if changed {
            *current = Arc::new(next);
        }
        Ok(changed)
    }
}
