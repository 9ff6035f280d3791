// crates/server/src/routes/health.rs
//! Service health endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Liveness plus a quick look at both halves of the service: what is on
/// disk and what is in flight.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Directory the blob store writes into.
    pub data_dir: String,
    /// Blobs currently stored.
    pub files: usize,
    /// Jobs currently running.
    pub jobs_running: usize,
}

/// GET /api/health - Health check.
///
/// Lists the blob store, so an unreadable data directory surfaces here as
/// a storage error instead of an empty "ok".
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthResponse>> {
    let files = state.store.list().await?.len();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        data_dir: state.store.root().display().to_string(),
        files,
        jobs_running: state.jobs.list().running.len(),
    }))
}

/// Create the health routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mediadrop_core::BlobStore;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_store_and_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::open(dir.path()).unwrap();
        store.put("clip.mp4", b"x").await.unwrap();

        let state = AppState::new(store);
        state.jobs.create("clip.mp4", "clip.mp4").unwrap();

        let app = router().with_state(state);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["files"], 1);
        assert_eq!(json["jobs_running"], 1);
        assert_eq!(
            json["data_dir"],
            dir.path().display().to_string().as_str()
        );
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_health_on_empty_service() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::open(dir.path()).unwrap();
        let app = router().with_state(AppState::new(store));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["files"], 0);
        assert_eq!(json["jobs_running"], 0);
    }
}
