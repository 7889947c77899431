use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::dataset::CrashRecord;

/// Bounded in-memory cache of evaluated query results, keyed by the
/// canonical criteria string.
#[derive(Debug, Clone)]
pub struct ResultCache {
    cache: Cache<String, Arc<Vec<CrashRecord>>>,
}

impl ResultCache {
    pub fn new(max_entries: u32, ttl_seconds: u64) -> Self {
        let max_capacity = if max_entries == 0 { 1 } else { max_entries as u64 };
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<CrashRecord>>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, results: Arc<Vec<CrashRecord>>) {
        self.cache.insert(key, results);
    }

    /// Drop every entry. Called on dataset reload.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
