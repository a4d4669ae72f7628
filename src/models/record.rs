//! Record models
//!
//! The document shape kept in the store, the validated write input, and the
//! canonical `{guid, expire, user}` payload served to clients and cached.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RegistryError, Result};
use crate::guid::Guid;

/// Generic ordered field mapping. Unknown client fields pass through untouched.
pub type Document = Map<String, Value>;

pub const FIELD_GUID: &str = "guid";
pub const FIELD_USER: &str = "user";
pub const FIELD_EXPIRE: &str = "expire";

// == Record Payload ==
/// Canonical projection of a record, as returned by reads and writes.
///
/// `expire` is `None` only for store rows written without one by some other
/// producer; the engine itself always sets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub guid: String,
    pub expire: Option<String>,
    pub user: Value,
}

impl RecordPayload {
    /// Projects a store document onto the canonical payload.
    pub fn from_document(guid: &Guid, doc: &Document) -> Self {
        Self {
            guid: guid.to_string(),
            expire: doc.get(FIELD_EXPIRE).map(expire_to_string),
            user: doc.get(FIELD_USER).cloned().unwrap_or(Value::Null),
        }
    }

    /// Serializes to the byte form stored in the cache.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RegistryError::Serialization(e.to_string()))
    }
}

fn expire_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// == Write Input ==
/// Client input to a write, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteInput {
    /// Required opaque `user` value
    pub user: Value,
    /// Parsed `expire`, if the client sent one
    pub expire: Option<i64>,
    /// Every other field, in client order, with `user`/`expire`/`guid` removed
    pub extra: Document,
}

/// Parses a raw request body into a document.
///
/// Unparseable JSON yields `InvalidJson`; JSON that is not an object yields
/// `InvalidInput`.
pub fn parse_body(body: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RegistryError::InvalidJson)?;
    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(RegistryError::InvalidInput),
    }
}

impl WriteInput {
    /// Validates client fields: `user` must be present and `expire`, when
    /// present, must parse as whole seconds.
    pub fn from_document(mut doc: Document) -> Result<Self> {
        let user = doc.shift_remove(FIELD_USER).ok_or(RegistryError::InvalidInput)?;
        let expire = match doc.shift_remove(FIELD_EXPIRE) {
            Some(raw) => Some(parse_expire(&raw).ok_or(RegistryError::InvalidInput)?),
            None => None,
        };
        doc.shift_remove(FIELD_GUID);

        Ok(Self {
            user,
            expire,
            extra: doc,
        })
    }

    /// Builds the document to upsert: passthrough fields, then `user`,
    /// `expire` in canonical string form, and `guid`.
    pub fn into_document(self, guid: &Guid, expire: i64) -> Document {
        let mut doc = self.extra;
        doc.insert(FIELD_USER.to_string(), self.user);
        doc.insert(FIELD_EXPIRE.to_string(), Value::String(expire.to_string()));
        doc.insert(FIELD_GUID.to_string(), Value::String(guid.to_string()));
        doc
    }
}

// == Expire Parsing ==
/// Parses an `expire` value as whole Unix seconds.
///
/// Accepts integers, floats (truncated toward zero), and strings holding an
/// optionally signed decimal integer with surrounding whitespace. Anything
/// outside the `i64` range is rejected, whatever its JSON type.
pub fn parse_expire(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|t| (i64::MIN as f64..i64::MAX as f64).contains(t))
                .map(|t| t as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
