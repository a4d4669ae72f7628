//! In-memory record store.
//!
//! Keeps documents in a HashMap alongside an insertion sequence so listings
//! come back in the order records were first created.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::RecordStore;
use crate::error::Result;
use crate::guid::Guid;
use crate::models::Document;

#[derive(Debug, Clone)]
struct StoredDocument {
    seq: u64,
    doc: Document,
}

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<Guid, StoredDocument>,
    next_seq: u64,
}

// == Memory Record Store ==
/// Record store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_one(&self, guid: &Guid) -> Result<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner.documents.get(guid).map(|stored| stored.doc.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Document>> {
        let inner = self.inner.read().await;
        let mut stored: Vec<&StoredDocument> = inner.documents.values().collect();
        stored.sort_by_key(|s| s.seq);
        Ok(stored.into_iter().map(|s| s.doc.clone()).collect())
    }

    async fn upsert(&self, guid: &Guid, doc: Document) -> Result<()> {
        let mut guard = self.inner.write().await;
        let Inner {
            documents,
            next_seq,
        } = &mut *guard;

        match documents.entry(guid.clone()) {
            Entry::Occupied(mut existing) => {
                debug!(%guid, "Merging fields into existing document");
                existing.get_mut().doc.extend(doc);
            }
            Entry::Vacant(slot) => {
                slot.insert(StoredDocument {
                    seq: *next_seq,
                    doc,
                });
                *next_seq += 1;
            }
        }
        Ok(())
    }

    async fn delete_one(&self, guid: &Guid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.documents.remove(guid).is_some())
    }
}
