//! Quote id allocation

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out unique, increasing decimal ids
///
/// The counter starts at zero and lives only as long as the process, so ids
/// repeat after a restart.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    counter: AtomicU64,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Next id; the first call returns `"1"`
    pub fn next(&self) -> String {
        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        id.to_string()
    }

    /// Last id handed out, zero if none
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
