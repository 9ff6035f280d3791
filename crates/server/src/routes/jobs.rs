// crates/server/src/routes/jobs.rs
//! API routes for job submission, polling, listing and deletion.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::jobs::{runner, JobList, JobRecord};
use crate::state::AppState;

/// Response naming the job a submit or delete acted on.
#[derive(Debug, Serialize)]
pub struct JobName {
    pub filename: String,
}

/// GET /api/jobs - All jobs partitioned into running and finished.
async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<JobList> {
    Json(state.jobs.list())
}

/// POST /api/jobs/{filename} - Register a job for a file and dispatch its
/// runner.
///
/// Returns 202 before the runner makes any progress; the caller polls
/// GET /api/jobs/{filename} for completion. 409 while an earlier job for
/// the same file is still running. The file itself is not checked — a job
/// may be submitted for a name that was never uploaded.
async fn submit_job(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<(StatusCode, Json<JobName>)> {
    state.jobs.create(&filename, &filename)?;
    runner::dispatch(
        Arc::clone(&state.jobs),
        filename.clone(),
        runner::transcode,
    );
    tracing::info!(job = %filename, "job submitted");
    Ok((StatusCode::ACCEPTED, Json(JobName { filename })))
}

/// GET /api/jobs/{filename} - Current record for one job.
async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Json<JobRecord>> {
    state
        .jobs
        .get(&filename)
        .map(Json)
        .ok_or(ApiError::JobNotFound(filename))
}

/// DELETE /api/jobs/{filename} - Drop the job record. 404 if absent. Does
/// not stop a runner still working under this key; its remaining writes
/// land on the absent key as no-ops.
async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<Json<JobName>> {
    state
        .jobs
        .remove(&filename)
        .ok_or_else(|| ApiError::JobNotFound(filename.clone()))?;
    tracing::info!(job = %filename, "job deleted");
    Ok(Json(JobName { filename }))
}

/// Build the jobs router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route(
            "/jobs/{filename}",
            get(get_job).post(submit_job).delete(delete_job),
        )
}
