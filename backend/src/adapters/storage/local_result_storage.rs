//! Local Filesystem Result Storage - Implementation of ResultStorage.
//!
//! Writes each ranked table to `{output_dir}/result_{uuid}.csv`. The unique
//! name keeps concurrent requests apart; the returned guard deletes the file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{ResultStorage, StorageError, StoredResult};

/// Local filesystem storage for ephemeral result files.
///
/// # Atomic Writes
///
/// Content is written to `result_{id}.csv.tmp`, synced, then renamed to
/// `result_{id}.csv`, so a reader never sees a partial file.
#[derive(Debug, Clone)]
pub struct LocalResultStorage {
    output_dir: PathBuf,
}

impl LocalResultStorage {
    /// Creates storage rooted at `output_dir`. The directory is created on
    /// first write if missing.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn result_path(&self, id: Uuid) -> PathBuf {
        self.output_dir.join(format!("result_{}.csv", id))
    }

    fn temp_path(&self, id: Uuid) -> PathBuf {
        self.output_dir.join(format!("result_{}.csv.tmp", id))
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ResultStorage for LocalResultStorage {
    async fn store(&self, contents: &[u8]) -> Result<StoredResult, StorageError> {
        let size = contents.len();
        self.ensure_dir().await?;

        let id = Uuid::new_v4();
        let temp_path = self.temp_path(id);
        let final_path = self.result_path(id);

        // Guard the temp file too, so a failed write leaves nothing behind
        let temp_guard = StoredResult::new(&temp_path);

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(contents).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;
        drop(temp_guard);

        tracing::debug!(path = %final_path.display(), size, "Stored result file");
        Ok(StoredResult::new(final_path))
    }
}
