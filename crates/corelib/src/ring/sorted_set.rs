//! Ordered set of ring tokens.

/// A set of `u64` kept in ascending order.
///
/// Backed by a deduplicated sorted vector: membership and ceiling search are
/// binary searches, indexed access is O(1), mutations shift the tail. Ring
/// sizes are `members * replication_factor`, which keeps the shifts cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedUintSet {
    values: Vec<u64>,
}

impl OrderedUintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value`. Returns `false` if it was already present.
    pub fn add(&mut self, value: u64) -> bool {
        match self.values.binary_search(&value) {
            Ok(_) => false,
            Err(pos) => {
                self.values.insert(pos, value);
                true
            }
        }
    }

    /// Removes `value`. Returns `false` if it was not present.
    pub fn remove(&mut self, value: u64) -> bool {
        match self.values.binary_search(&value) {
            Ok(pos) => {
                self.values.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Element at sorted position `idx`.
    pub fn at(&self, idx: usize) -> Option<u64> {
        self.values.get(idx).copied()
    }

    /// Smallest index whose element is `>= target`, or `None` when every
    /// element is smaller. Callers walking the ring wrap `None` to 0.
    pub fn find_ceiling(&self, target: u64) -> Option<usize> {
        let idx = self.values.partition_point(|&v| v < target);
        (idx < self.values.len()).then_some(idx)
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Ascending iteration.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, u64>> {
        self.values.iter().copied()
    }
}

impl<'a> IntoIterator for &'a OrderedUintSet {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<u64> for OrderedUintSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut values: Vec<u64> = iter.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_keeps_order_and_dedups() {
        let mut set = OrderedUintSet::new();
        assert!(set.add(30));
        assert!(set.add(10));
        assert!(set.add(20));
        assert!(!set.add(10));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(set.size(), 3);
    }

    #[test]
    fn test_remove_deletes() {
        let mut set: OrderedUintSet = [5, 1, 9].into_iter().collect();
        assert!(set.remove(5));
        assert!(!set.contains(5));
        assert_eq!(set.size(), 2);
        assert_eq!(set.at(0), Some(1));
        assert_eq!(set.at(1), Some(9));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut set: OrderedUintSet = [5].into_iter().collect();
        assert!(!set.remove(6));
        assert_eq!(set.size(), 1);
        assert!(!OrderedUintSet::new().remove(0));
    }

    #[test]
    fn test_at_out_of_range() {
        let set: OrderedUintSet = [1, 2].into_iter().collect();
        assert_eq!(set.at(2), None);
    }

    #[test]
    fn test_find_ceiling() {
        let set: OrderedUintSet = [10, 20, 30].into_iter().collect();
        assert_eq!(set.find_ceiling(0), Some(0));
        assert_eq!(set.find_ceiling(10), Some(0));
        assert_eq!(set.find_ceiling(11), Some(1));
        assert_eq!(set.find_ceiling(30), Some(2));
        assert_eq!(set.find_ceiling(31), None);
        assert_eq!(OrderedUintSet::new().find_ceiling(0), None);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let set: OrderedUintSet = [3, 1, 2].into_iter().collect();
        let first: Vec<u64> = (&set).into_iter().collect();
        let second: Vec<u64> = set.iter().collect();
        assert_eq!(first, second);
    }

    proptest! {
        /// Property: find_ceiling agrees with a linear scan
        #[test]
        fn prop_find_ceiling_matches_scan(
            values in prop::collection::vec(any::<u64>(), 0..64),
            target in any::<u64>()
        ) {
            let set: OrderedUintSet = values.into_iter().collect();
            let expected = set.iter().position(|v| v >= target);
            prop_assert_eq!(set.find_ceiling(target), expected);
        }

        /// Property: size tracks distinct inserts minus removes
        #[test]
        fn prop_size_matches_btreeset(
            ops in prop::collection::vec((any::<bool>(), 0u64..32), 0..100)
        ) {
            let mut set = OrderedUintSet::new();
            let mut model = std::collections::BTreeSet::new();
            for (insert, v) in ops {
                if insert {
                    prop_assert_eq!(set.add(v), model.insert(v));
                } else {
                    prop_assert_eq!(set.remove(v), model.remove(&v));
                }
            }
            prop_assert_eq!(set.size(), model.len());
            prop_assert_eq!(set.iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
        }
    }
}
