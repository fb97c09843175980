//! Key to partition routing

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maps a key to the index of the partition that owns it
///
/// `DefaultHasher::new()` uses fixed keys, so a key resolves to the same
/// partition for the whole process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct PartitionRouter {
    num_partitions: usize,
}

impl PartitionRouter {
    /// `num_partitions` must be at least one
    pub fn new(num_partitions: usize) -> Self {
        debug_assert!(num_partitions > 0, "router needs at least one partition");
        Self {
            num_partitions: num_partitions.max(1),
        }
    }

    pub fn route(&self, key: &str) -> usize {
        if self.num_partitions == 1 {
            return 0;
        }
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.num_partitions as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_partition() {
        let router = PartitionRouter::new(1);
        assert_eq!(router.route("1"), 0);
        assert_eq!(router.route("anything"), 0);
    }

    #[test]
    fn test_route_deterministic() {
        let router = PartitionRouter::new(16);
        let p1 = router.route("quote_100");
        let p2 = router.route("quote_100");
        assert_eq!(p1, p2);
        assert!(p1 < 16);

        // A fresh router agrees with the first one
        assert_eq!(PartitionRouter::new(16).route("quote_100"), p1);
    }

    #[test]
    fn test_route_spreads_keys() {
        let router = PartitionRouter::new(8);
        let mut used = [false; 8];
        for i in 1..=200 {
            used[router.route(&i.to_string())] = true;
        }
        assert!(used.iter().filter(|u| **u).count() > 1);
    }
}
