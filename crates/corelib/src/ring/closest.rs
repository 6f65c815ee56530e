//! Closest-N replica selection.
//!
//! Replica candidates are ordered by the hash of each member's name, not by
//! ring tokens: the owner is located in that order and the following members
//! are taken, wrapping past the end.

use std::collections::BTreeMap;

use crate::hasher::Hasher;
use crate::node::RingNode;

/// Returns `owner` followed by the next `count - 1` members in name-hash
/// order. `owner` must be a key of `members` and `count <= members.len()`.
pub(crate) fn closest_n<'a, N: RingNode, H: Hasher>(
    hasher: &H,
    members: &'a BTreeMap<String, N>,
    owner: &str,
    count: usize,
) -> Vec<&'a N> {
    // Name breaks ties so colliding name hashes still yield distinct nodes.
    let mut order: Vec<(u64, &'a str, &'a N)> = members
        .iter()
        .map(|(name, node)| (hasher.hash_str(name.as_bytes()), name.as_str(), node))
        .collect();
    order.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    let start = order
        .iter()
        .position(|(_, name, _)| *name == owner)
        .unwrap_or(0);

    order
        .iter()
        .cycle()
        .skip(start)
        .take(count)
        .map(|(_, _, node)| *node)
        .collect()
}
