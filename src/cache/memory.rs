//! In-memory cache.
//!
//! HashMap storage bounded by LRU eviction. Entries carry no TTL; logical
//! expiry of records is the engine's business.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheStats, LruTracker, RecordCache};
use crate::error::Result;

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, Vec<u8>>,
    lru: LruTracker,
    stats: CacheStats,
}

// == Memory Cache ==
/// Volatile key to serialized-payload cache.
///
/// Lookups reorder the LRU and update statistics, so every operation takes
/// the single lock exclusively.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Mutex<Inner>,
    /// Maximum number of entries held before the least recently used is dropped
    max_entries: usize,
}

impl MemoryCache {
    /// Creates an empty cache holding at most `max_entries` payloads.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                stats: CacheStats::new(),
            }),
            max_entries: max_entries.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.inner.lock().await;
        let value = inner.entries.get(key).cloned();
        inner.stats.record_lookup(value.is_some());
        if value.is_some() {
            inner.lru.touch(key);
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock().await;

        if !inner.entries.contains_key(key) && inner.entries.len() >= self.max_entries {
            if let Some(evicted) = inner.lru.evict_oldest() {
                debug!(key = %evicted, "Evicting least recently used payload");
                inner.entries.remove(&evicted);
                inner.stats.record_eviction();
            }
        }

        inner.entries.insert(key.to_string(), value);
        inner.lru.touch(key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        inner.lru.remove(key);
        Ok(inner.entries.remove(key).is_some())
    }

    async fn stats(&self) -> Option<CacheStats> {
        let inner = self.inner.lock().await;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        Some(stats)
    }
}
