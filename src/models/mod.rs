//! Record and response models for the registry
//!
//! This module defines the document shapes flowing through the engine and the
//! DTOs serialized into HTTP response bodies.

pub mod record;
pub mod responses;

// Re-export commonly used types
pub use record::{parse_body, parse_expire, Document, RecordPayload, WriteInput};
pub use responses::{DeleteResponse, HealthResponse, StatsResponse};
