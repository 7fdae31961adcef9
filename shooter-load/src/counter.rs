//! Shared counter of completed calls

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Concurrency-safe counter of successfully completed calls
///
/// Cheap to clone; all clones share the same underlying value. Owned by the
/// [`Runner`](crate::Runner) and handed to every dispatched task.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicU64>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one completed call
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current total
    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
