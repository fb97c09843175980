//! Single lockable partition of the keyspace

use super::quote::Quote;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Reader/writer guarded map from key to quote
///
/// Writers (`set`, `delete`) hold the lock exclusively; readers (`get`,
/// `scan`, ...) share it. Everything handed out is an owned clone, so callers
/// never see or mutate the stored map.
#[derive(Debug, Default)]
pub struct Partition {
    data: RwLock<HashMap<String, Quote>>,
}

impl Partition {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite
    pub fn set(&self, key: String, quote: Quote) {
        self.data.write().insert(key, quote);
    }

    pub fn get(&self, key: &str) -> Option<Quote> {
        self.data.read().get(key).cloned()
    }

    /// Remove a key; absent keys are ignored
    pub fn delete(&self, key: &str) {
        self.data.write().remove(key);
    }

    /// Snapshot of every stored quote
    pub fn scan(&self) -> Vec<Quote> {
        self.data.read().values().cloned().collect()
    }

    /// Snapshot of the quotes matching `pred`
    pub fn scan_filter<F>(&self, mut pred: F) -> Vec<Quote>
    where
        F: FnMut(&Quote) -> bool,
    {
        self.data
            .read()
            .values()
            .filter(|quote| pred(quote))
            .cloned()
            .collect()
    }

    /// The `n`th quote in map traversal order
    pub fn nth(&self, n: usize) -> Option<Quote> {
        self.data.read().values().nth(n).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, author: &str) -> Quote {
        Quote::new(id, author, format!("phrase {}", id))
    }

    #[test]
    fn test_set_get_delete() {
        let partition = Partition::new();
        assert!(partition.get("1").is_none());

        partition.set("1".to_string(), quote("1", "A"));
        assert_eq!(partition.get("1"), Some(quote("1", "A")));

        partition.delete("1");
        assert!(partition.get("1").is_none());

        // Deleting again is a no-op
        partition.delete("1");
        assert!(partition.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let partition = Partition::new();
        partition.set("1".to_string(), quote("1", "A"));
        partition.set("1".to_string(), quote("1", "B"));

        assert_eq!(partition.len(), 1);
        assert_eq!(partition.get("1").unwrap().author, "B");
    }

    #[test]
    fn test_scan_returns_copies() {
        let partition = Partition::new();
        partition.set("1".to_string(), quote("1", "A"));

        let mut snapshot = partition.scan();
        snapshot[0].author = "Mutated".to_string();

        assert_eq!(partition.get("1").unwrap().author, "A");
    }

    #[test]
    fn test_scan_filter() {
        let partition = Partition::new();
        partition.set("1".to_string(), quote("1", "A"));
        partition.set("2".to_string(), quote("2", "B"));
        partition.set("3".to_string(), quote("3", "A"));

        let mut ids: Vec<String> = partition
            .scan_filter(|q| q.author == "A")
            .into_iter()
            .map(|q| q.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["1", "3"]);
        assert!(partition.scan_filter(|q| q.author == "C").is_empty());
    }

    #[test]
    fn test_nth_bounds() {
        let partition = Partition::new();
        assert!(partition.nth(0).is_none());

        partition.set("1".to_string(), quote("1", "A"));
        assert!(partition.nth(0).is_some());
        assert!(partition.nth(1).is_none());
    }
}
