//! Mock storage for testing
//!
//! This module provides a simple single-map storage implementation
//! for testing the layers above the engine.

use crate::storage::engine::StorageEngine;
use crate::storage::quote::Quote;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordered in-memory mock storage for testing
///
/// Keys are kept in a `BTreeMap`, so `get_random` deterministically returns
/// the quote with the smallest key.
#[derive(Clone, Default)]
pub struct MockStorage {
    data: Arc<Mutex<BTreeMap<String, Quote>>>,
}

impl MockStorage {
    /// Create a new mock storage instance
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Create a mock pre-filled with quotes, keyed by their ids
    pub fn with_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let storage = Self::new();
        {
            let mut data = storage.data.lock();
            for quote in quotes {
                data.insert(quote.id.clone(), quote);
            }
        }
        storage
    }

    /// Clear all data
    pub fn clear(&self) {
        self.data.lock().clear();
    }
}

impl StorageEngine for MockStorage {
    fn set(&self, key: &str, quote: Quote) {
        self.data.lock().insert(key.to_string(), quote);
    }

    fn get(&self, key: &str) -> Option<Quote> {
        self.data.lock().get(key).cloned()
    }

    fn del(&self, key: &str) {
        self.data.lock().remove(key);
    }

    fn get_all_by_author(&self, author: &str) -> Option<Vec<Quote>> {
        let quotes: Vec<Quote> = self
            .data
            .lock()
            .values()
            .filter(|q| q.author == author)
            .cloned()
            .collect();
        (!quotes.is_empty()).then_some(quotes)
    }

    fn get_random(&self) -> Option<Quote> {
        self.data.lock().values().next().cloned()
    }

    fn get_all(&self) -> Vec<Quote> {
        self.data.lock().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.data.lock().len()
    }
}
