use std::path::PathBuf;

use dronemap_core::upload::MAX_UPLOAD_BYTES;
use dronemap_store::ingest::DEFAULT_UPLOAD_DIR;
use dronemap_store::store::DEFAULT_DATA_FILE;

/// Server configuration loaded from environment variables.
///
/// The defaults reproduce the fixed layout of a local install: data file and
/// uploads directory next to the working directory, 200 MB upload cap.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8501`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// JSON file holding the media collection.
    pub data_file: PathBuf,
    /// Directory holding uploaded media files.
    pub upload_dir: PathBuf,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8501`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8501`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `DATA_FILE`            | `media_data.json`          |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `209715200`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8501".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_file = std::env::var("DATA_FILE")
            .unwrap_or_else(|_| DEFAULT_DATA_FILE.into())
            .into();

        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into())
            .into();

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid u64"))
            .unwrap_or(MAX_UPLOAD_BYTES);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_file,
            upload_dir,
            max_upload_bytes,
        }
    }

    /// Request body cap: the largest file plus room for the form fields.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_upload_bytes)
            .unwrap_or(usize::MAX)
            .saturating_add(1024 * 1024)
    }
}
