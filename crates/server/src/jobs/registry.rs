// crates/server/src/jobs/registry.rs
//! Shared table of job records.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use thiserror::Error;

use super::types::{JobRecord, JobStatus};

/// Rejected job submission: the key already has a live runner.
#[derive(Debug, Error)]
#[error("A job for {key} is already running")]
pub struct JobConflict {
    pub key: String,
}

/// Snapshot of the job table partitioned by status. Both maps are computed
/// under one read guard, so every key appears in exactly one of them.
#[derive(Debug, Serialize)]
pub struct JobList {
    #[serde(rename = "running_jobs")]
    pub running: HashMap<String, JobRecord>,
    /// Done and Failed records.
    #[serde(rename = "finished_jobs")]
    pub finished: HashMap<String, JobRecord>,
}

/// Process-wide table of job records.
///
/// Single source of truth for job state: the submitting handler, every
/// runner, and every polling reader go through these operations. One
/// `RwLock` guards the whole table and is held only for the duration of a
/// call, never across an await point. Mutations on a key that has been
/// removed are no-ops — a runner must survive a concurrent delete of its
/// own job.
pub struct JobRegistry {
    jobs: RwLock<HashMap<String, JobRecord>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    fn read_table(&self) -> RwLockReadGuard<'_, HashMap<String, JobRecord>> {
        self.jobs.read().unwrap_or_else(|poisoned| {
            tracing::error!("job table lock poisoned; reading through it");
            poisoned.into_inner()
        })
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, HashMap<String, JobRecord>> {
        self.jobs.write().unwrap_or_else(|poisoned| {
            tracing::error!("job table lock poisoned; writing through it");
            poisoned.into_inner()
        })
    }

    /// Insert a fresh Running/0 record for `key`.
    ///
    /// Fails while an earlier record under the same key is still Running,
    /// so a live runner is never silently orphaned. A finished record is
    /// replaced.
    pub fn create(&self, key: &str, source: &str) -> Result<(), JobConflict> {
        let mut jobs = self.write_table();
        if let Some(existing) = jobs.get(key) {
            if existing.status == JobStatus::Running {
                return Err(JobConflict {
                    key: key.to_string(),
                });
            }
        }
        jobs.insert(key.to_string(), JobRecord::new(source));
        Ok(())
    }

    /// Set the progress of `key`. No-op if the record has been removed.
    pub fn update_progress(&self, key: &str, progress: u8) {
        let mut jobs = self.write_table();
        match jobs.get_mut(key) {
            Some(record) => record.progress = progress,
            None => {
                tracing::debug!(job = %key, progress, "progress write to removed job ignored")
            }
        }
    }

    /// Set the status of `key`. No-op if the record has been removed or is
    /// already in a terminal status.
    pub fn set_status(&self, key: &str, status: JobStatus) {
        let mut jobs = self.write_table();
        match jobs.get_mut(key) {
            Some(record) if record.status.is_terminal() => {
                tracing::debug!(job = %key, ?status, "status write to finished job ignored")
            }
            Some(record) => record.status = status,
            None => {
                tracing::debug!(job = %key, ?status, "status write to removed job ignored")
            }
        }
    }

    /// Snapshot of the record for `key`, if present.
    pub fn get(&self, key: &str) -> Option<JobRecord> {
        self.read_table().get(key).cloned()
    }

    /// All records partitioned into running and finished.
    pub fn list(&self) -> JobList {
        let jobs = self.read_table();
        let mut list = JobList {
            running: HashMap::new(),
            finished: HashMap::new(),
        };
        for (key, record) in jobs.iter() {
            let bucket = if record.status == JobStatus::Running {
                &mut list.running
            } else {
                &mut list.finished
            };
            bucket.insert(key.clone(), record.clone());
        }
        list
    }

    /// Remove the record for `key`, returning it if it existed. Does not
    /// stop a runner still working under this key; its remaining writes
    /// become no-ops.
    pub fn remove(&self, key: &str) -> Option<JobRecord> {
        self.write_table().remove(key)
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_and_get() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();

        let record = registry.get("clip.mp4").unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.progress, 0);
        assert_eq!(record.source, "clip.mp4");
    }

    #[test]
    fn test_get_unknown_key_is_none() {
        let registry = JobRegistry::new();
        assert!(registry.get("never-submitted").is_none());
    }

    #[test]
    fn test_create_rejects_duplicate_while_running() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();

        let err = registry.create("clip.mp4", "clip.mp4").unwrap_err();
        assert_eq!(err.key, "clip.mp4");
        // The first record is untouched.
        assert_eq!(registry.get("clip.mp4").unwrap().progress, 0);
    }

    #[test]
    fn test_create_replaces_finished_record() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();
        registry.update_progress("clip.mp4", 90);
        registry.set_status("clip.mp4", JobStatus::Done);

        registry.create("clip.mp4", "clip.mp4").unwrap();
        let record = registry.get("clip.mp4").unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.progress, 0);
    }

    #[test]
    fn test_mutations_on_missing_key_are_no_ops() {
        let registry = JobRegistry::new();
        registry.update_progress("ghost", 50);
        registry.set_status("ghost", JobStatus::Done);
        assert!(registry.get("ghost").is_none());
    }

    #[test]
    fn test_terminal_status_is_absorbing() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();
        registry.set_status("clip.mp4", JobStatus::Done);

        registry.set_status("clip.mp4", JobStatus::Running);
        assert_eq!(registry.get("clip.mp4").unwrap().status, JobStatus::Done);

        registry.set_status("clip.mp4", JobStatus::Failed);
        assert_eq!(registry.get("clip.mp4").unwrap().status, JobStatus::Done);
    }

    #[test]
    fn test_list_partitions_by_status() {
        let registry = JobRegistry::new();
        registry.create("running.mp4", "running.mp4").unwrap();
        registry.create("done.mp4", "done.mp4").unwrap();
        registry.set_status("done.mp4", JobStatus::Done);
        registry.create("failed.mp4", "failed.mp4").unwrap();
        registry.set_status("failed.mp4", JobStatus::Failed);

        let list = registry.list();
        assert_eq!(list.running.len(), 1);
        assert!(list.running.contains_key("running.mp4"));
        assert_eq!(list.finished.len(), 2);
        assert!(list.finished.contains_key("done.mp4"));
        assert!(list.finished.contains_key("failed.mp4"));
    }

    #[test]
    fn test_list_serializes_wire_names() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();

        let json = serde_json::to_value(registry.list()).unwrap();
        assert!(json["running_jobs"]["clip.mp4"].is_object());
        assert!(json["finished_jobs"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_remove_then_get_is_none() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();

        assert!(registry.remove("clip.mp4").is_some());
        assert!(registry.get("clip.mp4").is_none());
        assert!(registry.remove("clip.mp4").is_none());
    }

    #[test]
    fn test_late_writes_after_remove_do_not_resurrect() {
        let registry = JobRegistry::new();
        registry.create("clip.mp4", "clip.mp4").unwrap();
        registry.remove("clip.mp4");

        // A runner caught mid-flight keeps writing; nothing comes back.
        registry.update_progress("clip.mp4", 70);
        registry.set_status("clip.mp4", JobStatus::Done);
        assert!(registry.get("clip.mp4").is_none());
        assert!(registry.list().finished.is_empty());
    }

    #[test]
    fn test_concurrent_updates_and_reads() {
        use std::sync::Arc;

        let registry = Arc::new(JobRegistry::new());
        registry.create("clip.mp4", "clip.mp4").unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for step in 0u8..10 {
                    registry.update_progress("clip.mp4", step * 10);
                }
                registry.set_status("clip.mp4", JobStatus::Done);
            })
        };

        // Reads racing the writer must always see a coherent record with a
        // valid progress value.
        for _ in 0..100 {
            if let Some(record) = registry.get("clip.mp4") {
                assert!(record.progress <= 90);
                assert_eq!(record.progress % 10, 0);
            }
        }

        writer.join().unwrap();
        let record = registry.get("clip.mp4").unwrap();
        assert_eq!(record.status, JobStatus::Done);
        assert_eq!(record.progress, 90);
    }
}
