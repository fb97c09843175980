//! Partitioned in-memory storage engine
//!
//! Presents one keyspace over a fixed set of [`Partition`]s. Point operations
//! go to the partition chosen by the [`PartitionRouter`]; scans visit every
//! partition in turn, taking each partition's read lock separately, so a scan
//! spanning partitions has no single consistency point.

use super::engine::StorageEngine;
use super::partition::Partition;
use super::quote::Quote;
use super::router::PartitionRouter;
use rand::Rng;
use tracing::{debug, info};

/// Default number of partitions
pub const DEFAULT_PARTITIONS: usize = 1;

pub struct PartitionedEngine {
    partitions: Vec<Partition>,
    router: PartitionRouter,
}

impl std::fmt::Debug for PartitionedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedEngine")
            .field("partitions", &self.partitions.len())
            .finish()
    }
}

impl Default for PartitionedEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PARTITIONS)
    }
}

impl PartitionedEngine {
    /// Create an engine with `num_partitions` partitions (at least one)
    pub fn new(num_partitions: usize) -> Self {
        let num_partitions = num_partitions.max(1);
        info!(partitions = num_partitions, "Creating partitioned storage engine");

        Self {
            partitions: (0..num_partitions).map(|_| Partition::new()).collect(),
            router: PartitionRouter::new(num_partitions),
        }
    }

    fn partition_for(&self, key: &str) -> &Partition {
        &self.partitions[self.router.route(key)]
    }
}

impl StorageEngine for PartitionedEngine {
    fn set(&self, key: &str, quote: Quote) {
        self.partition_for(key).set(key.to_string(), quote);
        debug!(key, "Set quote");
    }

    fn get(&self, key: &str) -> Option<Quote> {
        let quote = self.partition_for(key).get(key);
        debug!(key, found = quote.is_some(), "Get quote");
        quote
    }

    fn del(&self, key: &str) {
        self.partition_for(key).delete(key);
        debug!(key, "Deleted quote");
    }

    fn get_all_by_author(&self, author: &str) -> Option<Vec<Quote>> {
        let quotes: Vec<Quote> = self
            .partitions
            .iter()
            .flat_map(|p| p.scan_filter(|q| q.author == author))
            .collect();

        debug!(author, matches = quotes.len(), "Scanned by author");
        if quotes.is_empty() {
            None
        } else {
            Some(quotes)
        }
    }

    fn get_random(&self) -> Option<Quote> {
        let sizes: Vec<usize> = self.partitions.iter().map(Partition::len).collect();
        let total: usize = sizes.iter().sum();
        if total == 0 {
            return None;
        }

        let mut pick = rand::thread_rng().gen_range(0..total);
        for (partition, size) in self.partitions.iter().zip(sizes) {
            if pick < size {
                // The partition may have shrunk since it was measured
                if let Some(quote) = partition.nth(pick) {
                    return Some(quote);
                }
                break;
            }
            pick -= size;
        }

        // Concurrent deletes moved the target; take whatever is left
        self.partitions.iter().find_map(|p| p.nth(0))
    }

    fn get_all(&self) -> Vec<Quote> {
        self.partitions.iter().flat_map(Partition::scan).collect()
    }

    fn len(&self) -> usize {
        self.partitions.iter().map(Partition::len).sum()
    }

    fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}
