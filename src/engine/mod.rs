//! Consistency Engine
//!
//! Cache-aside coordination between the record store and the cache.
//!
//! The store is authoritative. The cache is only populated on a read miss and
//! is invalidated, never updated, on write. Because cached payloads carry no
//! TTL, every cache hit is re-confirmed against the store before it is served,
//! so a dangling entry heals itself on the next read.
//!
//! Expired records are reclaimed lazily: whichever read or delete first
//! notices a past `expire` removes the record from both the store and the
//! cache. There is no background sweep; an expired row stays in the store
//! until something reads or deletes it.
//!
//! Cache faults are logged and treated as a miss (or a skipped write) on every
//! advisory path. Store faults always propagate. Nothing is retried.


use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheStats, RecordCache};
use crate::config::{Config, DEFAULT_LIFETIME_SECS};
use crate::error::{RegistryError, Result, REASON_NOT_FOUND, REASON_NOT_FOUND_OR_EXPIRED};
use crate::guid::Guid;
use crate::models::record::FIELD_EXPIRE;
use crate::models::{parse_expire, Document, RecordPayload, WriteInput};
use crate::store::RecordStore;

// == Engine Config ==
/// Tunables for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Seconds added to the write time when a record has no `expire`
    pub default_lifetime: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_lifetime: DEFAULT_LIFETIME_SECS,
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            default_lifetime: config.default_lifetime,
        }
    }
}

// == Liveness ==
/// Outcome of an expiry check.
#[derive(Debug, Clone, PartialEq)]
pub enum Liveness {
    /// The record exists and has not expired; carries the store row.
    Live(Document),
    /// The record is absent, or was expired and has just been reclaimed.
    Expired,
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        matches!(self, Liveness::Live(_))
    }
}

// == Serialized Record ==
/// The JSON bytes of a `{guid, expire, user}` payload, exactly as cached.
///
/// A cache hit is served verbatim, so reads hand back bytes rather than a
/// re-serialized struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedRecord(Vec<u8>);

impl SerializedRecord {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes the bytes back into a payload.
    pub fn decode(&self) -> Result<RecordPayload> {
        serde_json::from_slice(&self.0).map_err(|e| RegistryError::Serialization(e.to_string()))
    }
}

/// Current Unix time in whole seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

// == Consistency Engine ==
/// Orchestrates reads, writes and deletes across a store and a cache.
///
/// Holds no per-request state; clone the surrounding `Arc` and share it
/// across tasks. Locking is left to the adapters.
pub struct ConsistencyEngine {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn RecordCache>,
    config: EngineConfig,
}

impl ConsistencyEngine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        cache: Arc<dyn RecordCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    /// Cache statistics, if the cache keeps any.
    pub async fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.stats().await
    }

    // == Read One ==
    /// Reads one record through the cache.
    ///
    /// 1. A cache hit is re-confirmed against the store. If the store no
    ///    longer has the record the entry is purged and the read falls through
    ///    as a miss. If the store row has expired it is reclaimed and the read
    ///    fails. Otherwise the cached bytes are returned untouched.
    /// 2. On a miss the store row is fetched and expiry-checked, the canonical
    ///    payload is built, cached best-effort, and returned.
    #[instrument(skip_all, fields(guid = %guid))]
    pub async fn read_one(&self, guid: &Guid) -> Result<SerializedRecord> {
        if let Some(cached) = self.cache_get(guid).await {
            match self.store.find_one(guid).await? {
                Some(doc) => {
                    return match self.reclaim_if_expired(guid, Some(doc)).await? {
                        Liveness::Live(_) => {
                            debug!("Serving cached payload");
                            Ok(SerializedRecord(cached))
                        }
                        Liveness::Expired => {
                            Err(RegistryError::NotFound(REASON_NOT_FOUND_OR_EXPIRED))
                        }
                    };
                }
                None => {
                    warn!("Cached payload has no backing record, purging");
                    self.cache_delete(guid).await;
                }
            }
        }

        let row = self.store.find_one(guid).await?;
        let doc = match self.reclaim_if_expired(guid, row).await? {
            Liveness::Live(doc) => doc,
            Liveness::Expired => {
                return Err(RegistryError::NotFound(REASON_NOT_FOUND_OR_EXPIRED));
            }
        };

        let bytes = RecordPayload::from_document(guid, &doc).to_bytes()?;
        if let Err(e) = self.cache.set(guid.as_str(), bytes.clone()).await {
            warn!(error = %e, "Failed to cache payload, serving uncached");
        }
        debug!("Serving payload from store");
        Ok(SerializedRecord(bytes))
    }

    // == Read All ==
    /// Lists every stored record, bypassing the cache.
    ///
    /// Expired rows are included; they are only reclaimed by single-record reads
    /// and deletes.
    pub async fn read_all(&self) -> Result<Vec<Document>> {
        let docs = self.store.find_all().await?;
        debug!(count = docs.len(), "Listed records");
        Ok(docs)
    }

    // == Write ==
    /// Creates or updates a record.
    ///
    /// Validates `input`, assigns a GUID when none is given, defaults `expire`
    /// to now plus the configured lifetime, merges the fields into the store
    /// row and drops any cached payload so the next read rebuilds it.
    #[instrument(skip(self, input))]
    pub async fn write(&self, guid: Option<Guid>, input: Document) -> Result<RecordPayload> {
        let input = WriteInput::from_document(input)?;
        let guid = guid.unwrap_or_else(Guid::generate);
        let expire = input
            .expire
            .unwrap_or_else(|| unix_now().saturating_add(self.config.default_lifetime));

        let doc = input.into_document(&guid, expire);
        let payload = RecordPayload::from_document(&guid, &doc);

        self.store.upsert(&guid, doc).await?;
        self.cache_delete(&guid).await;

        info!(%guid, expire, "Record written");
        Ok(payload)
    }

    // == Delete ==
    /// Deletes a live record from the store and the cache.
    ///
    /// Fails with `NotFound` when there is no live record. If the cache still
    /// answers for the GUID after the delete (a racing read repopulated it, or
    /// the cache could not be reached) the delete is reported as `NotFound`
    /// too, although the store row is already gone.
    #[instrument(skip_all, fields(guid = %guid))]
    pub async fn delete(&self, guid: &Guid) -> Result<()> {
        if !self.expiry_check(guid).await?.is_live() {
            return Err(RegistryError::NotFound(REASON_NOT_FOUND));
        }

        self.store.delete_one(guid).await?;
        self.cache_delete(guid).await;

        match self.cache.get(guid.as_str()).await {
            Ok(None) => {
                info!("Record deleted");
                Ok(())
            }
            Ok(Some(_)) => {
                warn!("Cache still holds payload after delete");
                Err(RegistryError::NotFound(REASON_NOT_FOUND_OR_EXPIRED))
            }
            Err(e) => {
                warn!(error = %e, "Could not verify cache after delete");
                Err(RegistryError::NotFound(REASON_NOT_FOUND_OR_EXPIRED))
            }
        }
    }

    // == Expiry Check ==
    /// Fetches the store row and classifies it, reclaiming it if expired.
    pub async fn expiry_check(&self, guid: &Guid) -> Result<Liveness> {
        let row = self.store.find_one(guid).await?;
        self.reclaim_if_expired(guid, row).await
    }

    /// Classifies an already fetched row. An expired row is deleted from the
    /// store and the cache before `Expired` is returned. A row without
    /// `expire` never expires.
    async fn reclaim_if_expired(&self, guid: &Guid, row: Option<Document>) -> Result<Liveness> {
        let Some(doc) = row else {
            return Ok(Liveness::Expired);
        };

        let expire = match doc.get(FIELD_EXPIRE) {
            None => return Ok(Liveness::Live(doc)),
            Some(raw) => parse_expire(raw).ok_or_else(|| {
                RegistryError::Store(format!("record {} has a malformed expire: {}", guid, raw))
            })?,
        };

        if expire < unix_now() {
            debug!(%guid, expire, "Reclaiming expired record");
            self.store.delete_one(guid).await?;
            self.cache_delete(guid).await;
            return Ok(Liveness::Expired);
        }

        Ok(Liveness::Live(doc))
    }

    // == Advisory Cache Access ==
    async fn cache_get(&self, guid: &Guid) -> Option<Vec<u8>> {
        match self.cache.get(guid.as_str()).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(%guid, error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn cache_delete(&self, guid: &Guid) {
        if let Err(e) = self.cache.delete(guid.as_str()).await {
            warn!(%guid, error = %e, "Cache invalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    // == Test Doubles ==
    /// Cache whose every call fails.
    struct BrokenCache;

    #[async_trait]
    impl RecordCache for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(RegistryError::Cache("connection refused".into()))
        }
        async fn set(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
            Err(RegistryError::Cache("connection refused".into()))
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Err(RegistryError::Cache("connection refused".into()))
        }
    }

    /// Cache that silently ignores deletes.
    struct StickyCache(MemoryCache);

    #[async_trait]
    impl RecordCache for StickyCache {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.0.get(key).await
        }
        async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
            self.0.set(key, value).await
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    /// Store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl RecordStore for BrokenStore {
        async fn find_one(&self, _guid: &Guid) -> Result<Option<Document>> {
            Err(RegistryError::Store("store offline".into()))
        }
        async fn find_all(&self) -> Result<Vec<Document>> {
            Err(RegistryError::Store("store offline".into()))
        }
        async fn upsert(&self, _guid: &Guid, _doc: Document) -> Result<()> {
            Err(RegistryError::Store("store offline".into()))
        }
        async fn delete_one(&self, _guid: &Guid) -> Result<bool> {
            Err(RegistryError::Store("store offline".into()))
        }
    }

    // == Helpers ==
    struct Harness {
        engine: ConsistencyEngine,
        store: Arc<MemoryRecordStore>,
        cache: Arc<MemoryCache>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryRecordStore::new());
        let cache = Arc::new(MemoryCache::new(100));
        let engine = ConsistencyEngine::new(store.clone(), cache.clone(), EngineConfig::default());
        Harness {
            engine,
            store,
            cache,
        }
    }

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    fn not_found_or_expired() -> RegistryError {
        RegistryError::NotFound(REASON_NOT_FOUND_OR_EXPIRED)
    }

    // == Write ==
    #[tokio::test]
    async fn test_write_generates_guid_and_default_expire() {
        let h = harness();
        let before = unix_now();

        let payload = h.engine.write(None, doc(json!({"user": "alice"}))).await.unwrap();

        assert!(Guid::parse(&payload.guid).is_some());
        assert_eq!(payload.user, json!("alice"));
        let expire: i64 = payload.expire.as_deref().unwrap().parse().unwrap();
        assert!(expire >= before + DEFAULT_LIFETIME_SECS);
        assert!(expire <= unix_now() + DEFAULT_LIFETIME_SECS);
    }

    #[tokio::test]
    async fn test_write_rejects_invalid_input() {
        let h = harness();

        let missing_user = h.engine.write(None, doc(json!({"expire": "100"}))).await;
        assert_eq!(missing_user, Err(RegistryError::InvalidInput));

        let bad_expire = h
            .engine
            .write(None, doc(json!({"user": "a", "expire": "later"})))
            .await;
        assert_eq!(bad_expire, Err(RegistryError::InvalidInput));
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_write_keeps_client_guid_and_passthrough_fields() {
        let h = harness();
        let guid = Guid::generate();

        let payload = h
            .engine
            .write(Some(guid.clone()), doc(json!({"user": "carol", "team": "ops"})))
            .await
            .unwrap();
        assert_eq!(payload.guid, guid.to_string());

        let row = h.store.find_one(&guid).await.unwrap().unwrap();
        assert_eq!(row["team"], json!("ops"));
        assert_eq!(row["guid"], json!(guid.to_string()));
    }

    #[tokio::test]
    async fn test_write_invalidates_cache() {
        let h = harness();
        let guid = Guid::generate();

        h.engine
            .write(Some(guid.clone()), doc(json!({"user": "before"})))
            .await
            .unwrap();
        h.engine.read_one(&guid).await.unwrap();
        assert!(h.cache.get(guid.as_str()).await.unwrap().is_some());

        h.engine
            .write(Some(guid.clone()), doc(json!({"user": "after"})))
            .await
            .unwrap();
        assert!(h.cache.get(guid.as_str()).await.unwrap().is_none());

        let payload = h.engine.read_one(&guid).await.unwrap().decode().unwrap();
        assert_eq!(payload.user, json!("after"));
    }

    // == Read One ==
    #[tokio::test]
    async fn test_read_round_trip_populates_cache() {
        let h = harness();

        let written = h.engine.write(None, doc(json!({"user": "alice"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();

        let read = h.engine.read_one(&guid).await.unwrap();
        assert_eq!(read.decode().unwrap(), written);
        assert_eq!(
            h.cache.get(guid.as_str()).await.unwrap().as_deref(),
            Some(read.as_bytes())
        );
    }

    #[tokio::test]
    async fn test_read_is_idempotent() {
        let h = harness();
        let written = h.engine.write(None, doc(json!({"user": "alice"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();

        let first = h.engine.read_one(&guid).await.unwrap();
        let second = h.engine.read_one(&guid).await.unwrap();
        let third = h.engine.read_one(&guid).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[tokio::test]
    async fn test_read_serves_cached_bytes_verbatim() {
        let h = harness();
        let guid = Guid::generate();
        h.store
            .upsert(&guid, doc(json!({"user": "store-copy", "expire": "99999999999"})))
            .await
            .unwrap();
        h.cache
            .set(guid.as_str(), br#"{"guid":"x","expire":null,"user":"cached"}"#.to_vec())
            .await
            .unwrap();

        let read = h.engine.read_one(&guid).await.unwrap();
        assert_eq!(
            read.as_bytes(),
            br#"{"guid":"x","expire":null,"user":"cached"}"#
        );
    }

    #[tokio::test]
    async fn test_read_heals_dangling_cache_entry() {
        let h = harness();
        let guid = Guid::generate();
        h.cache.set(guid.as_str(), b"{}".to_vec()).await.unwrap();

        let result = h.engine.read_one(&guid).await;

        assert_eq!(result, Err(not_found_or_expired()));
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_read_missing_record() {
        let h = harness();
        let result = h.engine.read_one(&Guid::generate()).await;
        assert_eq!(result, Err(not_found_or_expired()));
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_past_expire_is_never_served() {
        let h = harness();

        let written = h
            .engine
            .write(None, doc(json!({"user": "bob", "expire": "100"})))
            .await
            .unwrap();
        assert_eq!(written.expire.as_deref(), Some("100"));
        let guid = Guid::parse(&written.guid).unwrap();

        assert_eq!(h.engine.read_one(&guid).await, Err(not_found_or_expired()));
        assert!(h.store.find_one(&guid).await.unwrap().is_none());
        assert!(h.cache.get(guid.as_str()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_behind_cached_payload_is_reclaimed() {
        let h = harness();
        let guid = Guid::generate();
        h.store
            .upsert(&guid, doc(json!({"user": "old", "expire": "100"})))
            .await
            .unwrap();
        h.cache.set(guid.as_str(), b"{}".to_vec()).await.unwrap();

        assert_eq!(h.engine.read_one(&guid).await, Err(not_found_or_expired()));
        assert!(h.store.is_empty().await);
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_record_without_expire_never_expires() {
        let h = harness();
        let guid = Guid::generate();
        h.store.upsert(&guid, doc(json!({"user": "legacy"}))).await.unwrap();

        let payload = h.engine.read_one(&guid).await.unwrap().decode().unwrap();
        assert_eq!(payload.expire, None);
        assert_eq!(payload.user, json!("legacy"));
    }

    #[tokio::test]
    async fn test_malformed_stored_expire_is_a_store_fault() {
        let h = harness();
        let guid = Guid::generate();
        h.store
            .upsert(&guid, doc(json!({"user": "x", "expire": "never"})))
            .await
            .unwrap();

        let result = h.engine.read_one(&guid).await;
        assert!(matches!(result, Err(RegistryError::Store(_))));
    }

    // == Read All ==
    #[tokio::test]
    async fn test_read_all_includes_expired_rows() {
        let h = harness();
        h.engine.write(None, doc(json!({"user": "a"}))).await.unwrap();
        h.engine
            .write(None, doc(json!({"user": "b", "expire": "100"})))
            .await
            .unwrap();

        let all = h.engine.read_all().await.unwrap();
        let users: Vec<&Value> = all.iter().map(|d| &d["user"]).collect();
        assert_eq!(users, vec![&json!("a"), &json!("b")]);
        assert!(h.cache.is_empty().await);
    }

    // == Delete ==
    #[tokio::test]
    async fn test_delete_then_read() {
        let h = harness();
        let written = h.engine.write(None, doc(json!({"user": "dan"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();
        h.engine.read_one(&guid).await.unwrap();

        h.engine.delete(&guid).await.unwrap();

        assert_eq!(h.engine.read_one(&guid).await, Err(not_found_or_expired()));
        assert_eq!(
            h.engine.delete(&guid).await,
            Err(RegistryError::NotFound(REASON_NOT_FOUND))
        );
        assert!(h.store.is_empty().await);
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_expired_record_is_not_found() {
        let h = harness();
        let written = h
            .engine
            .write(None, doc(json!({"user": "eve", "expire": "100"})))
            .await
            .unwrap();
        let guid = Guid::parse(&written.guid).unwrap();

        assert_eq!(
            h.engine.delete(&guid).await,
            Err(RegistryError::NotFound(REASON_NOT_FOUND))
        );
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_reports_lingering_cache_entry() {
        let store = Arc::new(MemoryRecordStore::new());
        let cache = Arc::new(StickyCache(MemoryCache::new(100)));
        let engine = ConsistencyEngine::new(store.clone(), cache.clone(), EngineConfig::default());

        let written = engine.write(None, doc(json!({"user": "fay"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();
        engine.read_one(&guid).await.unwrap();

        assert_eq!(engine.delete(&guid).await, Err(not_found_or_expired()));
        // The store row is gone regardless
        assert!(store.is_empty().await);
    }

    // == Expiry Check ==
    #[tokio::test]
    async fn test_expiry_check() {
        let h = harness();
        let live = Guid::generate();
        let stale = Guid::generate();
        h.store
            .upsert(&live, doc(json!({"user": "l", "expire": "99999999999"})))
            .await
            .unwrap();
        h.store
            .upsert(&stale, doc(json!({"user": "s", "expire": "100"})))
            .await
            .unwrap();
        h.cache.set(stale.as_str(), b"{}".to_vec()).await.unwrap();

        assert!(h.engine.expiry_check(&live).await.unwrap().is_live());
        assert_eq!(h.engine.expiry_check(&stale).await.unwrap(), Liveness::Expired);
        assert_eq!(
            h.engine.expiry_check(&Guid::generate()).await.unwrap(),
            Liveness::Expired
        );
        assert!(h.store.find_one(&stale).await.unwrap().is_none());
        assert!(h.cache.get(stale.as_str()).await.unwrap().is_none());
    }

    // == Fault Handling ==
    #[tokio::test]
    async fn test_cache_faults_degrade_to_store_reads() {
        let store = Arc::new(MemoryRecordStore::new());
        let engine =
            ConsistencyEngine::new(store.clone(), Arc::new(BrokenCache), EngineConfig::default());

        let written = engine.write(None, doc(json!({"user": "gus"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();

        let read = engine.read_one(&guid).await.unwrap().decode().unwrap();
        assert_eq!(read, written);
        assert!(engine.cache_stats().await.is_none());
    }

    #[tokio::test]
    async fn test_delete_with_unreachable_cache_is_not_found() {
        let store = Arc::new(MemoryRecordStore::new());
        let engine =
            ConsistencyEngine::new(store.clone(), Arc::new(BrokenCache), EngineConfig::default());

        let written = engine.write(None, doc(json!({"user": "hal"}))).await.unwrap();
        let guid = Guid::parse(&written.guid).unwrap();

        assert_eq!(engine.delete(&guid).await, Err(not_found_or_expired()));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        let engine = ConsistencyEngine::new(
            Arc::new(BrokenStore),
            Arc::new(MemoryCache::new(10)),
            EngineConfig::default(),
        );
        let guid = Guid::generate();

        assert!(matches!(
            engine.write(None, doc(json!({"user": "ivy"}))).await,
            Err(RegistryError::Store(_))
        ));
        assert!(matches!(engine.read_one(&guid).await, Err(RegistryError::Store(_))));
        assert!(matches!(engine.read_all().await, Err(RegistryError::Store(_))));
        assert!(matches!(engine.delete(&guid).await, Err(RegistryError::Store(_))));
    }

    #[tokio::test]
    async fn test_store_fault_behind_cached_payload_propagates() {
        let cache = Arc::new(MemoryCache::new(10));
        let engine =
            ConsistencyEngine::new(Arc::new(BrokenStore), cache.clone(), EngineConfig::default());
        let guid = Guid::generate();
        cache.set(guid.as_str(), b"{}".to_vec()).await.unwrap();

        assert!(matches!(engine.read_one(&guid).await, Err(RegistryError::Store(_))));
        // The entry is left alone; only a confirmed absence purges it
        assert!(cache.get(guid.as_str()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_configured_default_lifetime() {
        let engine = ConsistencyEngine::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryCache::new(10)),
            EngineConfig {
                default_lifetime: 60,
            },
        );
        let before = unix_now();
        let payload = engine.write(None, doc(json!({"user": "jo"}))).await.unwrap();
        let expire: i64 = payload.expire.unwrap().parse().unwrap();
        assert!((before + 60..=unix_now() + 60).contains(&expire));
    }

    #[tokio::test]
    async fn test_huge_default_lifetime_saturates() {
        let engine = ConsistencyEngine::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryCache::new(10)),
            EngineConfig {
                default_lifetime: i64::MAX,
            },
        );
        let payload = engine.write(None, doc(json!({"user": "max"}))).await.unwrap();
        assert_eq!(payload.expire.as_deref(), Some("9223372036854775807"));

        let guid = Guid::parse(&payload.guid).unwrap();
        assert!(engine.read_one(&guid).await.is_ok());
    }
}
