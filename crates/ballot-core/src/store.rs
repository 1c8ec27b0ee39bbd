//! Concurrent vote store: key -> count.
//!
//! Backed by a sharded map. Every operation runs under the lock of the shard
//! that owns the key, so a hot key only blocks keys that hash to the same
//! shard, and readers copy one shard at a time.

use dashmap::DashMap;

#[derive(Default, Debug)]
pub struct CounterStore {
    counts: DashMap<String, u64>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Copy of all entries, ordered by key.
    ///
    /// Each entry is read under its shard lock, so values are never torn.
    /// Writes that commit while the copy is being built may or may not show up.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut out: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Add one vote to `key`, creating it at zero first if absent.
    pub fn increment(&self, key: &str) {
        // Fast path avoids allocating the key for entries that already exist.
        if let Some(mut count) = self.counts.get_mut(key) {
            *count += 1;
            return;
        }

        // Absent (or removed since the lookup): entry() is insert-or-update under
        // a single shard write lock.
        let mut count = self.counts.entry(key.to_string()).or_insert_with(|| {
            tracing::trace!(key, "vote key created");
            0
        });
        *count += 1;
    }

    /// Remove `key` and return the count it held. `None` if it was absent.
    pub fn delete(&self, key: &str) -> Option<u64> {
        self.counts.remove(key).map(|(_, count)| count)
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
