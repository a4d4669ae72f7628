//! Record Store Module
//!
//! Durable keyed document storage. The store is the source of truth for every
//! record; the engine only ever talks to it through [`RecordStore`].

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::guid::Guid;
use crate::models::Document;

pub use memory::MemoryRecordStore;

// == Record Store Trait ==
/// Document storage keyed by GUID.
///
/// Implementations surface faults as [`crate::error::RegistryError::Store`].
/// Connection pooling and retries, if any, belong here and not in the engine.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the document stored under `guid`, if any.
    async fn find_one(&self, guid: &Guid) -> Result<Option<Document>>;

    /// Returns every stored document in insertion order.
    async fn find_all(&self) -> Result<Vec<Document>>;

    /// Inserts `doc` under `guid`, or merges its fields into the existing
    /// document, overwriting keys present in both.
    async fn upsert(&self, guid: &Guid, doc: Document) -> Result<()>;

    /// Removes the document under `guid`. Returns whether one existed.
    async fn delete_one(&self, guid: &Guid) -> Result<bool>;
}
