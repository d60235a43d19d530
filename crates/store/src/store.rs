//! The media data file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dronemap_core::media::{seed_records, MediaRecord};

use crate::error::StoreError;

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "media_data.json";

/// Reads and rewrites the whole media collection as one JSON array.
#[derive(Debug, Clone)]
pub struct MediaStore {
    path: PathBuf,
}

impl MediaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection.
    ///
    /// Never fails: a missing, unreadable or corrupt file yields the seed
    /// collection instead.
    pub async fn load(&self) -> Vec<MediaRecord> {
        match self.try_load().await {
            Ok(Some(records)) => {
                tracing::debug!(path = %self.path.display(), count = records.len(), "Loaded media data");
                records
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "No media data file, using seed data");
                seed_records()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable media data, using seed data");
                seed_records()
            }
        }
    }

    /// `Ok(None)` when the file does not exist.
    async fn try_load(&self) -> Result<Option<Vec<MediaRecord>>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Overwrite the file with `records`.
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so readers never observe a half-written file.
    pub async fn save(&self, records: &[MediaRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Saved media data");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
