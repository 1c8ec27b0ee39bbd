use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide request total.
///
/// Bumped once per vote read, increment, or delete and sampled by the health
/// reporter. Clones share the same counter; it is never decremented or reset.
#[derive(Clone, Debug, Default)]
pub struct RequestCounter {
    total: Arc<AtomicU64>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request. Returns the new total.
    pub fn record(&self) -> u64 {
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
