//! Result Storage Port - ephemeral per-request output files.
//!
//! A ranked table is persisted only long enough to be attached to an email.
//! Each stored file gets a unique name, so concurrent requests never share
//! a path, and is removed when its [`StoredResult`] guard is dropped.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Port for writing ranked result files.
#[async_trait]
pub trait ResultStorage: Send + Sync {
    /// Write `contents` to a new, uniquely named file.
    async fn store(&self, contents: &[u8]) -> Result<StoredResult, StorageError>;
}

/// Errors from result file storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io(message.into())
    }
}

/// A stored result file, deleted on drop.
///
/// Dropping the guard removes the file on every exit path, including early
/// returns after a failed dispatch.
#[derive(Debug)]
pub struct StoredResult {
    path: PathBuf,
}

impl StoredResult {
    /// Takes ownership of an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoredResult {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed result file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove result file"
            ),
        }
    }
}
