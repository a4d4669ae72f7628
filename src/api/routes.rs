//! API Routes
//!
//! Configures the Axum router with all registry endpoints.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, get_handler, health_handler, list_handler, stats_handler,
    upsert_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /guid` - List all records
/// - `POST /guid` - Create a record under a generated GUID
/// - `GET /guid/:guid` - Read one record through the cache
/// - `POST /guid/:guid` - Create or update a record
/// - `DELETE /guid/:guid` - Delete a record
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Timeout: Requests running longer than `request_timeout` get 408
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/guid", get(list_handler).post(create_handler))
        .route(
            "/guid/:guid",
            get(get_handler).post(upsert_handler).delete(delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
