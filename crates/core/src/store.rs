// crates/core/src/store.rs
//! Filesystem-backed blob store.

use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Named byte blobs stored as files under a root directory.
///
/// Each operation maps to a single filesystem call and relies on the
/// filesystem's per-file atomicity; there is no cross-operation locking.
/// Concurrent writes to the same name are last-writer-wins. Names are used
/// verbatim as file names — the router only ever hands the store a single
/// path segment.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| StorageError::Io {
            path: root.clone(),
            source: e,
        })?;
        tracing::debug!(root = %root.display(), "blob store opened");
        Ok(Self { root })
    }

    /// Directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write or overwrite the blob `name`.
    pub async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.blob_path(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io { path, source: e })?;
        tracing::debug!(blob = %name, bytes = bytes.len(), "blob written");
        Ok(())
    }

    /// Read the full contents of blob `name`.
    pub async fn get(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.blob_path(name);
        tokio::fs::read(&path)
            .await
            .map_err(|e| StorageError::io(name, path, e))
    }

    /// Names of all blobs currently present. Unordered snapshot of the
    /// directory at call time, not a live view.
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            StorageError::Io {
                path: self.root.clone(),
                source: e,
            }
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StorageError::Io {
            path: self.root.clone(),
            source: e,
        })? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Remove blob `name`. Not idempotent: a second delete of the same name
    /// fails with `NotFound`.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.blob_path(name);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io(name, path, e))?;
        tracing::debug!(blob = %name, "blob removed");
        Ok(())
    }
}
