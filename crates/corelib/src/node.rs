//! Node abstractions for the consistent hash ring.
//!
//! The ring only needs a stable, unique name from each member. Anything else
//! a caller attaches to its nodes (addresses, topology labels) stays opaque.

use std::fmt;

/// A physical participant that can own partitions.
///
/// `name` must be unique across the member set and must not change while the
/// node is on a ring: tokens are derived from it.
pub trait RingNode: Clone + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &str;
}

impl RingNode for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Logical node participating in the ring.
///
/// Keep this struct small and cheap to clone; heavy mutable state (connections,
/// metrics, etc.) should live elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    /// Human‑readable name or hostname. Doubles as the ring identity.
    pub name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RingNode for Node {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_identity() {
        let node = Node::new("cache-1");
        assert_eq!(RingNode::name(&node), "cache-1");
        assert_eq!(node, Node::new(String::from("cache-1")));
    }

    #[test]
    fn test_string_is_a_node() {
        let node = String::from("plain");
        assert_eq!(node.name(), "plain");
    }
}
