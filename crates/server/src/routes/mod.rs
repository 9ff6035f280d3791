//! API route handlers for the mediadrop server.

pub mod files;
pub mod health;
pub mod jobs;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/files - List stored files
/// - POST /api/files/{filename} - Upload a file (raw request body)
/// - GET /api/files/{filename} - Download a file
/// - DELETE /api/files/{filename} - Delete a file
/// - GET /api/jobs - List jobs partitioned into running and finished
/// - POST /api/jobs/{filename} - Submit a job for a file (202 Accepted)
/// - GET /api/jobs/{filename} - Poll one job record
/// - DELETE /api/jobs/{filename} - Delete a job record
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", files::router())
        .nest("/api", jobs::router())
        .with_state(state)
}
