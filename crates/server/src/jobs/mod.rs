// crates/server/src/jobs/mod.rs
//! Background job tracking for uploaded files.
//!
//! Provides:
//! - `JobRegistry` — shared table of job records, one per blob name
//! - `runner` — fire-and-forget job execution reporting through the registry
//! - `JobRecord` / `JobStatus` — wire types the API serves to pollers

pub mod registry;
pub mod runner;
pub mod types;

pub use registry::{JobConflict, JobList, JobRegistry};
pub use types::{JobRecord, JobStatus};
