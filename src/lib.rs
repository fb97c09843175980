// Quotebook - in-memory quote storage service

#![warn(rust_2018_idioms)]

pub mod config;
pub mod metrics;
pub mod server;
pub mod service;
pub mod storage;

// Re-exports for convenience
pub use service::QuoteService;
pub use storage::{KeyAllocator, PartitionedEngine, Quote, Storage, StorageEngine};

/// Quotebook error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Not found: {0}")]
        NotFound(String),

        #[error("Invalid argument: {0}")]
        InvalidArgument(String),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Internal error: {0}")]
        Internal(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        assert_eq!(VERSION.split('.').count(), 3);
    }

    #[test]
    fn test_error_display() {
        let err = error::Error::NotFound("quote 7".to_string());
        assert_eq!(err.to_string(), "Not found: quote 7");
    }
}
