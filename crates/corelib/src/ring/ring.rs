//! Hash ring with bounded-load partition ownership.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::hasher::{Hasher, XxHasher};
use crate::node::{Node, RingNode};
use crate::ring::closest;
use crate::ring::distribute::{Assignment, PartitionDistributor};
use crate::ring::sorted_set::OrderedUintSet;

/// Consistent hash ring mapping keys to partitions and partitions to nodes.
///
/// Each member contributes `replication_factor` tokens, `hash("{name}{i}")`.
/// Keys hash into one of `partition_count` partitions; partitions are placed
/// on the ring and assigned to token owners with no node holding more than
/// [`average_load`](Self::average_load) partitions.
///
/// The partition table and loads are derived state: they are rebuilt in full
/// after every membership change and never touched by lookups.
///
/// # Example
///
/// ```rust
/// use corelib::{Config, HashRing, Node};
///
/// let nodes = vec![Node::new("a"), Node::new("b"), Node::new("c")];
/// let ring: HashRing = HashRing::new(nodes, Config::new(7, 2, 1.25)).unwrap();
///
/// let owner = ring.locate_key("user-42").unwrap();
/// assert_eq!(ring.closest_n_for_key("user-42", 2).unwrap()[0], owner);
/// ```
#[derive(Clone, Debug)]
pub struct HashRing<N: RingNode = Node, H: Hasher = XxHasher> {
    config: Config,
    hasher: H,
    /// Authoritative roster, keyed by name.
    members: BTreeMap<String, N>,
    /// Token -> owning member name.
    ring: HashMap<u64, String>,
    /// Sorted view of `ring`'s keys.
    tokens: OrderedUintSet,
    /// Owning member name, indexed by partition id. Empty iff no members.
    partitions: Vec<String>,
    loads: BTreeMap<String, usize>,
}

impl<N: RingNode, H: Hasher + Default> HashRing<N, H> {
    /// Builds a ring over `nodes` with the default hasher.
    pub fn new(nodes: impl IntoIterator<Item = N>, config: Config) -> Result<Self> {
        Self::with_hasher(nodes, config, H::default())
    }
}

impl<N: RingNode, H: Hasher> HashRing<N, H> {
    /// Builds a ring over `nodes` hashing with `hasher`.
    ///
    /// An empty node list yields a legal, empty ring. Duplicate names are
    /// ignored after the first.
    pub fn with_hasher(
        nodes: impl IntoIterator<Item = N>,
        config: Config,
        hasher: H,
    ) -> Result<Self> {
        config.validate()?;
        let mut ring = Self {
            config,
            hasher,
            members: BTreeMap::new(),
            ring: HashMap::new(),
            tokens: OrderedUintSet::new(),
            partitions: Vec::new(),
            loads: BTreeMap::new(),
        };
        for node in nodes {
            if ring.members.contains_key(node.name()) {
                continue;
            }
            let name = node.name().to_owned();
            ring.insert_tokens(&name);
            ring.members.insert(name, node);
        }
        ring.redistribute()?;
        Ok(ring)
    }

    /// Adds `node` and rebalances. Returns `false` if a member with the same
    /// name already exists.
    ///
    /// On error the ring is left exactly as it was.
    pub fn add_node(&mut self, node: N) -> Result<bool> {
        if self.members.contains_key(node.name()) {
            return Ok(false);
        }
        let name = node.name().to_owned();
        let journal = self.insert_tokens(&name);
        self.members.insert(name.clone(), node);

        if let Err(err) = self.redistribute() {
            self.members.remove(&name);
            self.undo_insert(journal);
            return Err(err);
        }
        debug!(node = %name, members = self.members.len(), tokens = self.tokens.size(), "added node to ring");
        Ok(true)
    }

    /// Removes the member called `name` and rebalances. Returns `false` if
    /// no such member exists.
    ///
    /// Fails with [`Error::NotEnoughCapacity`] when the remaining members
    /// cannot hold every partition; the ring is then left unchanged.
    pub fn remove_node(&mut self, name: &str) -> Result<bool> {
        let Some((name, node)) = self.members.remove_entry(name) else {
            return Ok(false);
        };
        let journal = self.remove_tokens(&name);

        if let Err(err) = self.redistribute() {
            self.undo_remove(journal);
            self.members.insert(name, node);
            return Err(err);
        }
        debug!(node = %name, members = self.members.len(), tokens = self.tokens.size(), "removed node from ring");
        Ok(true)
    }

    /// Per-node partition cap: `ceil(partition_count / members * load_factor)`.
    pub fn average_load(&self) -> Result<f64> {
        if self.members.is_empty() {
            return Err(Error::EmptyRing);
        }
        Ok(self.cap())
    }

    /// Copy of the current partition count per member.
    pub fn load_distribution(&self) -> BTreeMap<String, usize> {
        self.loads.clone()
    }

    /// Partition a key hashes into.
    pub fn find_partition_id(&self, key: impl AsRef<[u8]>) -> u64 {
        self.hasher.hash_str(key.as_ref()) % self.config.partition_count
    }

    /// Current owner of `partition_id`, if any.
    pub fn partition_owner(&self, partition_id: u64) -> Option<&N> {
        self.partition_owner_name(partition_id)
            .and_then(|name| self.members.get(name))
    }

    /// Node owning the partition `key` hashes into.
    pub fn locate_key(&self, key: impl AsRef<[u8]>) -> Result<&N> {
        if self.members.is_empty() {
            return Err(Error::EmptyRing);
        }
        let partition_id = self.find_partition_id(key);
        self.partition_owner(partition_id)
            .ok_or(Error::KeyNotMapped(partition_id))
    }

    /// Owner of `key`'s partition followed by the next `count - 1` members in
    /// name-hash order.
    pub fn closest_n_for_key(&self, key: impl AsRef<[u8]>, count: usize) -> Result<Vec<&N>> {
        self.closest_n(self.find_partition_id(key), count)
    }

    /// Closest-N selection starting from the owner of `partition_id`.
    pub fn closest_n(&self, partition_id: u64, count: usize) -> Result<Vec<&N>> {
        if self.members.is_empty() {
            return Err(Error::EmptyRing);
        }
        if count > self.members.len() {
            return Err(Error::InsufficientMembers {
                requested: count,
                members: self.members.len(),
            });
        }
        let owner = self
            .partition_owner_name(partition_id)
            .ok_or(Error::KeyNotMapped(partition_id))?;
        Ok(closest::closest_n(&self.hasher, &self.members, owner, count))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn get_node(&self, name: &str) -> Option<&N> {
        self.members.get(name)
    }

    /// Members in name order.
    pub fn members(&self) -> impl Iterator<Item = &N> {
        self.members.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.size()
    }

    /// All `(token, owner)` pairs in ring order (for debugging).
    pub fn tokens(&self) -> Vec<(u64, &str)> {
        self.tokens
            .iter()
            .filter_map(|t| self.ring.get(&t).map(|name| (t, name.as_str())))
            .collect()
    }

    /// Owner name per partition id. Empty when the ring has no members.
    pub fn partition_table(&self) -> &[String] {
        &self.partitions
    }

    fn partition_owner_name(&self, partition_id: u64) -> Option<&str> {
        usize::try_from(partition_id)
            .ok()
            .and_then(|idx| self.partitions.get(idx))
            .map(String::as_str)
    }

    fn cap(&self) -> f64 {
        (self.config.partition_count as f64 / self.members.len() as f64 * self.config.load_factor)
            .ceil()
    }

    fn token_for(&self, name: &str, replica: usize) -> u64 {
        self.hasher.hash_str(format!("{name}{replica}").as_bytes())
    }

    /// Places `name`'s tokens, returning each token with the owner it displaced.
    fn insert_tokens(&mut self, name: &str) -> Vec<(u64, Option<String>)> {
        (0..self.config.replication_factor)
            .map(|replica| {
                let token = self.token_for(name, replica);
                let previous = self.ring.insert(token, name.to_owned());
                self.tokens.add(token);
                (token, previous)
            })
            .collect()
    }

    /// Deletes `name`'s tokens, returning each token with the owner it had.
    fn remove_tokens(&mut self, name: &str) -> Vec<(u64, Option<String>)> {
        (0..self.config.replication_factor)
            .map(|replica| {
                let token = self.token_for(name, replica);
                let previous = self.ring.remove(&token);
                self.tokens.remove(token);
                (token, previous)
            })
            .collect()
    }

    fn undo_insert(&mut self, journal: Vec<(u64, Option<String>)>) {
        for (token, previous) in journal.into_iter().rev() {
            match previous {
                Some(owner) => {
                    self.ring.insert(token, owner);
                }
                None => {
                    self.ring.remove(&token);
                    self.tokens.remove(token);
                }
            }
        }
    }

    fn undo_remove(&mut self, journal: Vec<(u64, Option<String>)>) {
        for (token, previous) in journal.into_iter().rev() {
            if let Some(owner) = previous {
                self.ring.insert(token, owner);
                self.tokens.add(token);
            }
        }
    }

    /// Rebuilds partitions and loads from the current ring. Leaves both
    /// untouched on failure.
    fn redistribute(&mut self) -> Result<()> {
        if self.members.is_empty() {
            self.partitions.clear();
            self.loads.clear();
            return Ok(());
        }

        let names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        let average_load = self.cap();
        let Assignment { partitions, loads } = PartitionDistributor {
            hasher: &self.hasher,
            ring: &self.ring,
            tokens: &self.tokens,
            members: &names,
            partition_count: self.config.partition_count,
            average_load,
        }
        .run()?;

        debug!(
            partitions = partitions.len(),
            members = names.len(),
            average_load,
            "redistributed partitions"
        );
        self.partitions = partitions;
        self.loads = loads;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sends every input to the same slot, so all tokens collide.
    #[derive(Clone, Debug, Default)]
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn hash_str(&self, _value: &[u8]) -> u64 {
            7
        }

        fn name(&self) -> &'static str {
            "ConstantHasher"
        }
    }

    fn owned_tokens<H: Hasher>(ring: &HashRing<Node, H>) -> Vec<(u64, String)> {
        ring.tokens()
            .into_iter()
            .map(|(t, n)| (t, n.to_owned()))
            .collect()
    }

    fn abc() -> HashRing {
        HashRing::new(
            vec![Node::new("A"), Node::new("B"), Node::new("C")],
            Config::new(7, 2, 1.25),
        )
        .unwrap()
    }

    #[test]
    fn test_tokens_follow_name_and_index() {
        let ring = abc();
        let hasher = XxHasher::new();
        for name in ["A", "B", "C"] {
            for i in 0..2 {
                let token = hasher.hash_str(format!("{name}{i}").as_bytes());
                assert!(ring.tokens.contains(token));
                assert_eq!(ring.ring.get(&token).map(String::as_str), Some(name));
            }
        }
        assert_eq!(ring.token_count(), 6);
    }

    #[test]
    fn test_token_set_matches_ring() {
        let mut ring = abc();
        ring.remove_node("B").unwrap();
        assert_eq!(ring.tokens.size(), ring.ring.len());
        assert!(ring.tokens.iter().all(|t| ring.ring.contains_key(&t)));
    }

    #[test]
    fn test_average_load() {
        assert_eq!(abc().average_load().unwrap(), 3.0);
    }

    #[test]
    fn test_loads_seeded_for_every_member() {
        let ring: HashRing = HashRing::new(
            vec![Node::new("x"), Node::new("y")],
            Config::new(1, 1, 1.0),
        )
        .unwrap();
        let loads = ring.load_distribution();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads.values().sum::<usize>(), 1);
    }

    #[test]
    fn test_collisions_make_add_fail_and_roll_back() {
        // Both nodes hash to one slot: the later insert owns the whole ring
        // and cannot take all four partitions under a cap of two.
        let mut ring: HashRing<Node, ConstantHasher> =
            HashRing::new(vec![Node::new("a")], Config::new(4, 1, 1.0)).unwrap();
        let before_tokens = owned_tokens(&ring);
        let before_table = ring.partition_table().to_vec();

        let err = ring.add_node(Node::new("b")).unwrap_err();
        assert!(matches!(err, Error::NotEnoughCapacity { .. }));
        assert!(!ring.contains("b"));
        assert_eq!(owned_tokens(&ring), before_tokens);
        assert_eq!(ring.partition_table(), &before_table[..]);
        assert_eq!(ring.load_distribution().get("a"), Some(&4));
    }

    #[test]
    fn test_failed_remove_rolls_back() {
        // "c" was inserted last and owns the single shared slot. Removing "a"
        // deletes that slot, leaving no token to place partitions on.
        let mut ring: HashRing<Node, ConstantHasher> = HashRing::new(
            vec![Node::new("a"), Node::new("b"), Node::new("c")],
            Config::new(3, 1, 3.0),
        )
        .unwrap();
        let before_tokens = owned_tokens(&ring);
        let before_table = ring.partition_table().to_vec();
        assert_eq!(before_tokens, vec![(7, "c".to_string())]);

        let err = ring.remove_node("a").unwrap_err();
        assert!(matches!(err, Error::NotEnoughCapacity { .. }));
        assert!(ring.contains("a"));
        assert_eq!(ring.member_count(), 3);
        assert_eq!(owned_tokens(&ring), before_tokens);
        assert_eq!(ring.token_count(), 1);
        assert_eq!(ring.partition_table(), &before_table[..]);
        assert_eq!(ring.load_distribution().get("c"), Some(&3));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = HashRing::<Node, XxHasher>::new(Vec::new(), Config::new(7, 2, 0.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_duplicate_initial_nodes_ignored() {
        let ring: HashRing = HashRing::new(
            vec![Node::new("a"), Node::new("a")],
            Config::new(3, 4, 1.0),
        )
        .unwrap();
        assert_eq!(ring.member_count(), 1);
        assert_eq!(ring.token_count(), 4);
    }
}
