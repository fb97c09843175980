//! Storage engine trait

use super::quote::Quote;

/// Storage engine trait
///
/// Absence is reported with `None`; none of these operations fail.
pub trait StorageEngine: Send + Sync {
    /// Insert or replace the quote stored under `key`
    fn set(&self, key: &str, quote: Quote);
    fn get(&self, key: &str) -> Option<Quote>;
    /// Remove `key`; a missing key is a no-op
    fn del(&self, key: &str);

    /// All quotes whose author equals `author` exactly, `None` if there are none
    fn get_all_by_author(&self, author: &str) -> Option<Vec<Quote>>;

    /// Any stored quote, `None` on an empty store
    fn get_random(&self) -> Option<Quote>;

    /// Every stored quote
    fn get_all(&self) -> Vec<Quote>;

    /// Number of stored quotes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of independently locked partitions
    fn partition_count(&self) -> usize {
        1
    }
}

/// Main storage interface
pub struct Storage {
    engine: Box<dyn StorageEngine>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("partitions", &self.engine.partition_count())
            .finish()
    }
}

impl Storage {
    pub fn new(engine: Box<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    pub fn set(&self, key: &str, quote: Quote) {
        self.engine.set(key, quote)
    }

    pub fn get(&self, key: &str) -> Option<Quote> {
        self.engine.get(key)
    }

    pub fn del(&self, key: &str) {
        self.engine.del(key)
    }

    pub fn get_all_by_author(&self, author: &str) -> Option<Vec<Quote>> {
        self.engine.get_all_by_author(author)
    }

    pub fn get_random(&self) -> Option<Quote> {
        self.engine.get_random()
    }

    pub fn get_all(&self) -> Vec<Quote> {
        self.engine.get_all()
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn partition_count(&self) -> usize {
        self.engine.partition_count()
    }
}
