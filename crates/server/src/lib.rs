// crates/server/src/lib.rs
//! Mediadrop server library.
//!
//! Axum-based HTTP server exposing file storage and background job tracking
//! over uploaded files: clients upload blobs, submit a job per blob, and
//! poll the job record until the runner marks it finished.

pub mod error;
pub mod jobs;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use mediadrop_core::BlobStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, files, jobs)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(store: BlobStore) -> Router {
    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
