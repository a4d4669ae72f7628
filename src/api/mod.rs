//! API Module
//!
//! HTTP handlers and routing for the registry REST API.
//!
//! # Endpoints
//! - `GET /guid` - List all records
//! - `POST /guid` - Create a record
//! - `GET /guid/:guid` - Read a record
//! - `POST /guid/:guid` - Create or update a record
//! - `DELETE /guid/:guid` - Delete a record
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
