// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Blob not found: {name}")]
    NotFound { name: String },

    #[error("IO error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Classify an IO failure on blob `name`: a missing file is `NotFound`,
    /// everything else keeps the underlying error with its path.
    pub fn io(name: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                name: name.to_string(),
            },
            _ => Self::Io {
                path: path.into(),
                source,
            },
        }
    }
}
