// crates/server/src/jobs/types.rs
//! Wire types for the job table.

use serde::Serialize;

/// Status of a tracked job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Done,
    Failed,
}

impl JobStatus {
    /// Done and Failed are absorbing: a finished record never re-enters
    /// Running.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

/// A tracked job, keyed in the registry by the blob name it operates on.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub status: JobStatus,
    /// Percentage in 0..=100, non-decreasing while Running; frozen at its
    /// last value once the job finishes.
    pub progress: u8,
    /// Blob name the job reads from (currently always the registry key).
    /// Serialized as `src`, the name pollers of this API already consume.
    #[serde(rename = "src")]
    pub source: String,
}

impl JobRecord {
    pub(crate) fn new(source: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Running,
            progress: 0,
            source: source.into(),
        }
    }
}
