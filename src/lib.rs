//! GUID Registry - A GUID-keyed metadata registry
//!
//! Small JSON records with expiration timestamps, held in a durable store and
//! fronted by a cache kept coherent by a cache-aside consistency engine.

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod guid;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use engine::{ConsistencyEngine, EngineConfig};
pub use error::{RegistryError, Result};
pub use guid::Guid;
