//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Thirty days, the lifetime given to records written without `expire`.
pub const DEFAULT_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of payloads the in-memory cache holds before LRU eviction
    pub cache_max_entries: usize,
    /// Seconds added to the write time when a record has no `expire`
    pub default_lifetime: i64,
    /// Per-request timeout in seconds, enforced at the HTTP boundary
    pub request_timeout_secs: u64,
    /// Redis connection URL; when set (and built with the `redis` feature) the
    /// cache lives in Redis instead of process memory
    pub redis_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8809)
    /// - `CACHE_MAX_ENTRIES` - Cache capacity (default: 10000)
    /// - `DEFAULT_LIFETIME` - Default record lifetime in seconds (default: 2592000)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 10)
    /// - `REDIS_URL` - External cache, e.g. `redis://localhost` (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.cache_max_entries),
            default_lifetime: env::var("DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &i64| *n > 0)
                .unwrap_or(defaults.default_lifetime),
            request_timeout_secs: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8809,
            cache_max_entries: 10_000,
            default_lifetime: DEFAULT_LIFETIME_SECS,
            request_timeout_secs: 10,
            redis_url: None,
        }
    }
}
