//! Storage layer
//!
//! # Architecture
//!
//! ```text
//! Storage (facade over Box<dyn StorageEngine>)
//!   └─→ PartitionedEngine
//!        ├─→ PartitionRouter (key → partition index)
//!        └─→ Partition[0..N] (RwLock<HashMap<id, Quote>>)
//! ```
//!
//! ## Storage Engine
//!
//! The `StorageEngine` trait provides the keyspace operations:
//! - Point operations: `set`, `get`, `del`
//! - Scans: by author, random, all
//!
//! Absence is signalled with `Option`, never with an error.
//!
//! ## Ids
//!
//! The engine stores whatever key it is given. Ids come from a
//! `KeyAllocator` owned by the service layer.

pub mod engine;
pub mod keys;
pub mod mock;
pub mod partition;
pub mod partitioned;
pub mod quote;
pub mod router;

// Default storage engine
pub use partitioned::PartitionedEngine as DefaultStorageEngine;

pub use engine::{Storage, StorageEngine};
pub use keys::KeyAllocator;
pub use mock::MockStorage;
pub use partition::Partition;
pub use partitioned::{PartitionedEngine, DEFAULT_PARTITIONS};
pub use quote::{NewQuote, Quote};
pub use router::PartitionRouter;
