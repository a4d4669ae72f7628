//! GUID Module
//!
//! Identifiers naming registry records: 32 uppercase hex characters, no separators.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a rendered GUID in characters.
pub const GUID_LENGTH: usize = 32;

// == Guid ==
/// A validated record identifier.
///
/// Only constructible through [`Guid::parse`] or [`Guid::generate`], so every
/// value in circulation matches `[A-F0-9]{32}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid(String);

impl Guid {
    /// Generates a fresh identifier from a v4 UUID (122 random bits drawn
    /// from `rand`'s thread-local CSPRNG).
    ///
    /// Collisions are not checked.
    pub fn generate() -> Self {
        let mut buf = Uuid::encode_buffer();
        let rendered = Uuid::new_v4().simple().encode_upper(&mut buf);
        Self(rendered.to_string())
    }

    /// Parses a client-supplied identifier, rejecting anything outside `[A-F0-9]{32}`.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == GUID_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Guid {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid GUID: {}", value))
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}
