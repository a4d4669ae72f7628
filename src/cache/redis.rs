//! Redis-backed cache.
//!
//! Talks to an external Redis through a `ConnectionManager`, which reconnects
//! on its own after a dropped connection. Every Redis fault surfaces as
//! `RegistryError::Cache`; the engine decides whether it matters.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use super::RecordCache;
use crate::error::Result;

// == Redis Cache ==
/// Cache of serialized payloads held in an external Redis.
///
/// Keys are the GUID strings, values the raw payload bytes. No TTL is set.
/// Hit/miss counters are not kept locally.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Opens a managed connection to the Redis at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connected to Redis cache");
        Ok(Self { connection })
    }
}

#[async_trait]
impl RecordCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}
