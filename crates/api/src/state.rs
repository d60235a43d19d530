use std::sync::Arc;

use dronemap_store::{FileIngestor, MediaStore};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::session::Session;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The JSON data file.
    pub store: Arc<MediaStore>,
    /// The uploads directory.
    pub ingestor: Arc<FileIngestor>,
    /// In-memory collection plus viewer and UI flags.
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Build state from config, loading the collection from disk.
    pub async fn load(config: ServerConfig) -> Self {
        let store = MediaStore::new(&config.data_file);
        let ingestor = FileIngestor::new(&config.upload_dir);
        if let Err(e) = ingestor.ensure_dir().await {
            tracing::warn!(error = %e, "Could not create uploads directory");
        }
        let records = store.load().await;
        tracing::info!(count = records.len(), "Media collection loaded");

        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            ingestor: Arc::new(ingestor),
            session: Arc::new(RwLock::new(Session::new(records))),
        }
    }
}
