// crates/server/src/state.rs
//! Application state for the axum server.

use std::sync::Arc;
use std::time::Instant;

use mediadrop_core::BlobStore;

use crate::jobs::JobRegistry;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Blob store holding uploaded files.
    pub store: BlobStore,
    /// Job table, shared with every spawned runner. In-memory only: a
    /// restart loses all job history while blobs survive on disk.
    pub jobs: Arc<JobRegistry>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(store: BlobStore) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            store,
            jobs: Arc::new(JobRegistry::new()),
        })
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
