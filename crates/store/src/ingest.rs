//! The uploads directory.

use std::path::{Path, PathBuf};

use dronemap_core::upload::extension_of;

use crate::error::StoreError;

/// Default uploads directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Length of the random file stem.
const STEM_LEN: usize = 8;

/// Writes uploaded bytes under random names and removes them again.
#[derive(Debug, Clone)]
pub struct FileIngestor {
    dir: PathBuf,
}

impl FileIngestor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))
    }

    /// Write `bytes` to `<dir>/<random>.<ext>` and return that path.
    ///
    /// The extension comes from `original_name`; allow-list and size checks
    /// are the caller's job.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        self.ensure_dir().await?;

        let ext = extension_of(original_name).unwrap_or_else(|| "bin".to_string());
        let path = loop {
            let stem = uuid::Uuid::new_v4().simple().to_string();
            let candidate = self.dir.join(format!("{}.{ext}", &stem[..STEM_LEN]));
            if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                break candidate;
            }
        };

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), original = original_name, "Stored upload");
        Ok(path)
    }

    /// Best-effort delete. Returns whether a file was actually removed.
    pub async fn remove(&self, path: &Path) -> bool {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Removed media file");
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove media file");
                false
            }
        }
    }
}

/// Whether a stored `filepath` currently points at a regular file.
pub fn exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// File name component of a stored path, used to build `/uploads/<name>` URLs.
pub fn file_name_of(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|n| n.to_str())
}
