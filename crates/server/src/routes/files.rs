// crates/server/src/routes/files.rs
//! File upload, download, listing and deletion endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Response naming the file an upload or delete acted on.
#[derive(Debug, Serialize)]
pub struct FileName {
    pub filename: String,
}

/// Response for GET /api/files.
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// GET /api/files - Names of all stored files.
async fn list_files(State(state): State<Arc<AppState>>) -> ApiResult<Json<FileListResponse>> {
    let files = state.store.list().await?;
    Ok(Json(FileListResponse { files }))
}

/// POST /api/files/{filename} - Store the raw request body under `filename`.
/// Overwrites an existing file of the same name.
async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<FileName>)> {
    state.store.put(&filename, &body).await?;
    tracing::info!(file = %filename, bytes = body.len(), "file stored");
    Ok((StatusCode::CREATED, Json(FileName { filename })))
}

/// GET /api/files/{filename} - Raw file bytes.
async fn fetch_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let bytes = state.store.get(&filename).await?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], bytes))
}

/// DELETE /api/files/{filename} - Remove a file. 404 if absent, including
/// on a repeated delete.
async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Json<FileName>> {
    state.store.delete(&filename).await?;
    tracing::info!(file = %filename, "file deleted");
    Ok(Json(FileName { filename }))
}

/// Build the files router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/files", get(list_files))
        .route(
            "/files/{filename}",
            get(fetch_file).post(upload_file).delete(delete_file),
        )
}
