//! Bounded-load partition assignment.
//!
//! Every partition id is hashed onto the ring and handed to the first token
//! owner (walking clockwise) whose load is still below the cap
//! `ceil(partition_count / members * load_factor)`. The pass is a pure
//! function of the ring, so it is rerun from scratch after each membership
//! change instead of being patched.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::hasher::Hasher;
use crate::ring::sorted_set::OrderedUintSet;

/// Output of one distribution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Assignment {
    /// Owner name, indexed by partition id.
    pub partitions: Vec<String>,
    /// Partitions per member, including members that received none.
    pub loads: BTreeMap<String, usize>,
}

/// Borrowed view of the ring state a distribution pass reads.
pub(crate) struct PartitionDistributor<'a, H: Hasher> {
    pub hasher: &'a H,
    pub ring: &'a HashMap<u64, String>,
    pub tokens: &'a OrderedUintSet,
    pub members: &'a [&'a str],
    pub partition_count: u64,
    pub average_load: f64,
}

impl<'a, H: Hasher> PartitionDistributor<'a, H> {
    /// Assigns partitions in ascending id order. Ties between equally loaded
    /// nodes resolve by ring position, so equal rings give equal tables.
    pub fn run(&self) -> Result<Assignment> {
        let mut loads: HashMap<&'a str, usize> =
            self.members.iter().map(|name| (*name, 0)).collect();
        let mut partitions = Vec::with_capacity(self.partition_count as usize);

        for partition_id in 0..self.partition_count {
            let key = self.hasher.hash_uint64(partition_id);
            let start = self.tokens.find_ceiling(key).unwrap_or(0);
            let owner = self.place(partition_id, start, &mut loads)?;
            partitions.push(owner.to_owned());
        }

        Ok(Assignment {
            partitions,
            loads: loads
                .into_iter()
                .map(|(name, load)| (name.to_owned(), load))
                .collect(),
        })
    }

    fn place(
        &self,
        partition_id: u64,
        start: usize,
        loads: &mut HashMap<&'a str, usize>,
    ) -> Result<&'a str> {
        let len = self.tokens.size();
        let mut idx = start;
        for _ in 0..len {
            if let Some(owner) = self.tokens.at(idx).and_then(|t| self.ring.get(&t)) {
                let load = loads.entry(owner.as_str()).or_insert(0);
                if ((*load + 1) as f64) <= self.average_load {
                    *load += 1;
                    return Ok(owner.as_str());
                }
            }
            idx = advance(idx, len);
        }
        Err(Error::NotEnoughCapacity {
            partition_id,
            average_load: self.average_load,
        })
    }
}

/// Next ring index, wrapping past the end back to 0.
#[inline]
pub(crate) fn advance(idx: usize, len: usize) -> usize {
    if idx + 1 >= len {
        0
    } else {
        idx + 1
    }
}
