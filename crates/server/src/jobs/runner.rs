// crates/server/src/jobs/runner.rs
//! Fire-and-forget execution of submitted jobs.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::registry::JobRegistry;
use super::types::JobStatus;

/// Number of progress steps the placeholder workload takes.
const TRANSCODE_STEPS: u8 = 10;

/// Pause between steps. A real workload would transcode one chunk of the
/// source blob here instead of sleeping.
const STEP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn `work` for `key` on its own task and return immediately.
///
/// The handle is never joined by the server; the task reports exclusively
/// through the registry. `Ok` marks the record Done, `Err` marks it Failed.
/// There is no cancellation: deleting the record mid-run turns the
/// remaining writes into no-ops while the task still runs out.
pub fn dispatch<F, Fut>(registry: Arc<JobRegistry>, key: String, work: F) -> JoinHandle<()>
where
    F: FnOnce(Arc<JobRegistry>, String) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), String>> + Send + 'static,
{
    tokio::spawn(async move {
        tracing::info!(job = %key, "job started");
        match work(Arc::clone(&registry), key.clone()).await {
            Ok(()) => {
                registry.set_status(&key, JobStatus::Done);
                tracing::info!(job = %key, "job done");
            }
            Err(e) => {
                registry.set_status(&key, JobStatus::Failed);
                tracing::error!(job = %key, error = %e, "job failed");
            }
        }
    })
}

/// Placeholder transcode workload: advances progress through ten steps of
/// ten percent (0, 10, .., 90), pausing one interval per step. Every write
/// goes through the registry; the task holds no copy of the record.
pub async fn transcode(registry: Arc<JobRegistry>, key: String) -> Result<(), String> {
    for step in 0..TRANSCODE_STEPS {
        registry.update_progress(&key, step * 10);
        tokio::time::sleep(STEP_INTERVAL).await;
    }
    Ok(())
}
