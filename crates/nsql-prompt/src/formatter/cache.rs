//! Memoized table ordering and schema summaries.
//!
//! Text dialects shuffle table order so models see schemas in varied order,
//! but the same request must always see the same order within one run. The
//! first shuffle for a key is stored; later lookups with an identical key
//! return it verbatim. The chat dialect stores its schema summary the same
//! way, so one schema is summarized once per run.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

/// Purpose tag for table-order entries.
pub const TABLES_TAG: &str = "tables";

/// Purpose tag for schema-summary entries.
pub const SUMMARY_TAG: &str = "summary";

/// Cache key: `(purpose tag, instruction, serialized table list)`.
pub type CacheKey = (String, String, String);

/// Run-scoped map from request key to rendered table order.
///
/// Safe to share between formatters and threads via `Arc`.
#[derive(Debug, Default)]
pub struct TableOrderCache {
    entries: Mutex<HashMap<CacheKey, Vec<String>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TableOrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored order for `key`, or store and return the result of
    /// `compute`.
    ///
    /// `compute` runs under the cache lock, so concurrent first calls for
    /// the same key agree on one order.
    pub fn get_or_insert_with(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Vec<String>,
    ) -> Vec<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(order) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("table order cache hit ({} tables)", order.len());
            return order.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let order = compute();
        trace!("table order cache miss, stored {} tables", order.len());
        entries.insert(key, order.clone());
        order
    }

    /// Stored value for `key`, counting a hit or a miss.
    ///
    /// For values computed asynchronously: look up with `get`, compute
    /// outside the lock, then store with [`insert`](Self::insert).
    pub fn get(&self, key: &CacheKey) -> Option<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("cache hit for {}", key.0);
                Some(value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `value` unless `key` already has one. Returns the stored value.
    pub fn insert(&self, key: CacheKey, value: Vec<String>) -> Vec<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.entry(key).or_insert(value).clone()
    }

    /// Stored order for `key`, if any. Does not touch the counters.
    pub fn peek(&self, key: &CacheKey) -> Option<Vec<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate as a fraction (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// Build a table-order key.
pub fn table_key(instruction: &str, serialized_tables: &str) -> CacheKey {
    (
        TABLES_TAG.to_string(),
        instruction.to_string(),
        serialized_tables.to_string(),
    )
}

/// Build a schema-summary key. `settings` identifies the summary model
/// and sampling parameters.
pub fn summary_key(settings: &str, schema: &str) -> CacheKey {
    (
        SUMMARY_TAG.to_string(),
        settings.to_string(),
        schema.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_insert_wins() {
        let cache = TableOrderCache::new();
        let key = table_key("q", "[t]");
        let first = cache.get_or_insert_with(key.clone(), || order(&["b", "a"]));
        let second = cache.get_or_insert_with(key, || order(&["a", "b"]));
        assert_eq!(first, order(&["b", "a"]));
        assert_eq!(second, first);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn instruction_is_part_of_the_key() {
        let cache = TableOrderCache::new();
        cache.get_or_insert_with(table_key("q1", "[t]"), || order(&["a"]));
        cache.get_or_insert_with(table_key("q2", "[t]"), || order(&["a"]));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn hit_does_not_call_compute() {
        let cache = TableOrderCache::new();
        let key = table_key("q", "[t]");
        cache.get_or_insert_with(key.clone(), || order(&["a"]));
        cache.get_or_insert_with(key, || panic!("compute called on hit"));
    }

    #[test]
    fn get_then_insert_keeps_first_value() {
        let cache = TableOrderCache::new();
        let key = summary_key("m|0|0", "CREATE TABLE t");
        assert_eq!(cache.get(&key), None);
        assert_eq!(cache.insert(key.clone(), order(&["first"])), order(&["first"]));
        assert_eq!(cache.insert(key.clone(), order(&["second"])), order(&["first"]));
        assert_eq!(cache.get(&key), Some(order(&["first"])));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn summary_and_table_keys_do_not_collide() {
        let cache = TableOrderCache::new();
        cache.insert(table_key("x", "y"), order(&["a"]));
        assert_eq!(cache.peek(&summary_key("x", "y")), None);
    }

    #[test]
    fn clear_resets_everything() {
        let cache = TableOrderCache::new();
        cache.get_or_insert_with(table_key("q", "[t]"), || order(&["a"]));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hit_rate(), 0.0);
    }

    #[test]
    fn concurrent_first_calls_agree() {
        let cache = Arc::new(TableOrderCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.get_or_insert_with(table_key("q", "[t]"), || vec![i.to_string()])
                })
            })
            .collect();
        let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 7);
    }
}
