//! API Handlers
//!
//! HTTP request handlers for each registry endpoint. Handlers only translate
//! between HTTP and the engine; all consistency logic lives in
//! [`crate::engine`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(not(feature = "redis"))]
use tracing::warn;

#[cfg(feature = "redis")]
use crate::cache::RedisCache;
use crate::cache::{MemoryCache, RecordCache};
use crate::config::Config;
use crate::engine::{ConsistencyEngine, EngineConfig};
use crate::error::{RegistryError, Result, REASON_NOT_FOUND, REASON_NOT_FOUND_OR_EXPIRED};
use crate::guid::Guid;
use crate::models::{
    parse_body, DeleteResponse, Document, HealthResponse, RecordPayload, StatsResponse,
};
use crate::store::MemoryRecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConsistencyEngine>,
}

impl AppState {
    /// Wraps an engine built from explicitly supplied store and cache handles.
    pub fn new(engine: ConsistencyEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Builds the store and cache from configuration.
    ///
    /// The cache is Redis when `redis_url` is set, otherwise in-memory.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let engine = ConsistencyEngine::new(
            Arc::new(MemoryRecordStore::new()),
            build_cache(config).await?,
            EngineConfig::from(config),
        );
        Ok(Self::new(engine))
    }
}

async fn build_cache(config: &Config) -> Result<Arc<dyn RecordCache>> {
    match config.redis_url.as_deref() {
        #[cfg(feature = "redis")]
        Some(url) => Ok(Arc::new(RedisCache::connect(url).await?)),
        #[cfg(not(feature = "redis"))]
        Some(_) => {
            warn!("REDIS_URL is set but the redis feature is disabled, using the in-memory cache");
            Ok(Arc::new(MemoryCache::new(config.cache_max_entries)))
        }
        None => Ok(Arc::new(MemoryCache::new(config.cache_max_entries))),
    }
}

/// Parses a path segment, answering `reason` for anything that is not a GUID.
fn path_guid(raw: &str, reason: &'static str) -> Result<Guid> {
    Guid::parse(raw).ok_or(RegistryError::NotFound(reason))
}

/// Handler for GET /guid
///
/// Lists every stored record, expired or not.
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    Ok(Json(state.engine.read_all().await?))
}

/// Handler for GET /guid/:guid
///
/// Serves the payload bytes exactly as the engine returns them.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Response> {
    let guid = path_guid(&guid, REASON_NOT_FOUND_OR_EXPIRED)?;
    let record = state.engine.read_one(&guid).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        record.into_bytes(),
    )
        .into_response())
}

/// Handler for POST /guid
///
/// Creates a record under a freshly generated GUID.
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecordPayload>> {
    let input = parse_body(&body)?;
    Ok(Json(state.engine.write(None, input).await?))
}

/// Handler for POST /guid/:guid
///
/// Creates or updates the record under a client-chosen GUID.
pub async fn upsert_handler(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    body: Bytes,
) -> Result<Json<RecordPayload>> {
    let guid = path_guid(&guid, REASON_NOT_FOUND)?;
    let input = parse_body(&body)?;
    Ok(Json(state.engine.write(Some(guid), input).await?))
}

/// Handler for DELETE /guid/:guid
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let guid = path_guid(&guid, REASON_NOT_FOUND)?;
    state.engine.delete(&guid).await?;
    Ok(Json(DeleteResponse::deleted()))
}

/// Handler for GET /stats
///
/// Cache counters; all zero when the cache keeps none.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.engine.cache_stats().await.unwrap_or_default();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
