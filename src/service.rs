//! Quote service
//!
//! Domain policy on top of the storage engine: id assignment on insert and
//! "delete must hit an existing quote". Nothing here knows about HTTP.

use crate::error::{Error, Result};
use crate::metrics::{self, OpStatus};
use crate::storage::{KeyAllocator, NewQuote, Quote, Storage};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Store statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub quotes: usize,
    pub partitions: usize,
    pub last_id: u64,
}

#[derive(Debug, Clone)]
pub struct QuoteService {
    storage: Arc<Storage>,
    keys: Arc<KeyAllocator>,
}

impl QuoteService {
    pub fn new(storage: Arc<Storage>, keys: Arc<KeyAllocator>) -> Self {
        Self { storage, keys }
    }

    /// Store a new quote under a freshly allocated id
    #[instrument(skip(self, new_quote), fields(author = %new_quote.author))]
    pub fn add(&self, new_quote: NewQuote) -> Quote {
        let start = Instant::now();
        let id = self.keys.next();
        let quote = new_quote.with_id(id.clone());
        self.storage.set(&id, quote.clone());

        metrics::record_operation("add", OpStatus::Ok, start.elapsed());
        info!(id = %id, "Quote stored");
        quote
    }

    pub fn get(&self, id: &str) -> Option<Quote> {
        let start = Instant::now();
        let quote = self.storage.get(id);
        metrics::record_operation("get", OpStatus::found(quote.is_some()), start.elapsed());
        quote
    }

    /// Remove a quote; fails with `NotFound` if `id` is not stored
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<()> {
        let start = Instant::now();
        if self.storage.get(id).is_none() {
            metrics::record_operation("delete", OpStatus::NotFound, start.elapsed());
            return Err(Error::NotFound(format!("quote {}", id)));
        }
        self.storage.del(id);

        metrics::record_operation("delete", OpStatus::Ok, start.elapsed());
        info!(id, "Quote deleted");
        Ok(())
    }

    pub fn random(&self) -> Option<Quote> {
        let start = Instant::now();
        let quote = self.storage.get_random();
        if quote.is_none() {
            warn!("Random quote requested from an empty store");
        }
        metrics::record_operation("random", OpStatus::found(quote.is_some()), start.elapsed());
        quote
    }

    pub fn by_author(&self, author: &str) -> Option<Vec<Quote>> {
        let start = Instant::now();
        let quotes = self.storage.get_all_by_author(author);
        metrics::record_operation("by_author", OpStatus::found(quotes.is_some()), start.elapsed());
        quotes
    }

    pub fn all(&self) -> Vec<Quote> {
        let start = Instant::now();
        let quotes = self.storage.get_all();
        metrics::record_operation("all", OpStatus::Ok, start.elapsed());
        quotes
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            quotes: self.storage.len(),
            partitions: self.storage.partition_count(),
            last_id: self.keys.current(),
        }
    }
}
