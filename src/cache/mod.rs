//! Cache Module
//!
//! Volatile key to serialized-payload storage sitting in front of the record
//! store. The cache is advisory: anything it holds may be stale, and the
//! engine re-validates every hit against the store.

mod lru;
mod memory;
#[cfg(feature = "redis")]
mod redis;
mod stats;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use lru::LruTracker;
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisCache;
pub use stats::CacheStats;

// == Record Cache Trait ==
/// Key-value cache of serialized record payloads.
///
/// Implementations surface faults as [`crate::error::RegistryError::Cache`].
/// No TTL is required; entries live until deleted or evicted.
#[async_trait]
pub trait RecordCache: Send + Sync {
    /// Returns the bytes cached under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes `key`. Returns whether an entry existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Hit/miss counters, for caches that keep them.
    async fn stats(&self) -> Option<CacheStats> {
        None
    }
}
