//! The mutating UI flows shared by the HTML pages and the JSON API.
//!
//! Persistence failures are logged and swallowed: the in-memory collection
//! stays authoritative and the next successful save catches the file up.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use dronemap_core::error::CoreError;
use dronemap_core::map::{render_map, MapMode, MapView};
use dronemap_core::media::{next_id, MediaRecord, MediaType};
use dronemap_core::thumbnail::{marker_thumbnail_png, to_data_uri, MARKER_THUMB_PX};
use dronemap_core::types::MediaId;
use dronemap_core::upload::{build_record, classify_upload, NewMediaForm};
use dronemap_store::ingest;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Raw multipart submission, kept as text so a rejected form can be
/// re-rendered with what the user typed.
#[derive(Debug, Default, Clone)]
pub struct UploadSubmission {
    pub title: String,
    pub description: String,
    pub lat: String,
    pub lon: String,
    pub altitude: String,
    pub timestamp: String,
    pub file_name: Option<String>,
    pub file: Option<Bytes>,
}

impl UploadSubmission {
    /// Drain a multipart body. Unknown fields are ignored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut out = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(AppError::from_multipart)?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(AppError::from_multipart)?;
                // Browsers send an empty part when no file was chosen.
                if file_name.as_deref().is_some_and(|n| !n.is_empty()) {
                    out.file_name = file_name;
                    out.file = Some(data);
                }
                continue;
            }
            let value = field.text().await.map_err(AppError::from_multipart)?;
            match name.as_str() {
                "title" => out.title = value,
                "description" => out.description = value,
                "lat" => out.lat = value,
                "lon" => out.lon = value,
                "altitude" => out.altitude = value,
                "timestamp" | "date" => out.timestamp = value,
                other => tracing::debug!(field = other, "Ignoring unknown upload field"),
            }
        }
        Ok(out)
    }

    /// Parse the numeric fields and validate the form.
    pub fn form(&self) -> Result<NewMediaForm, CoreError> {
        let defaults = NewMediaForm::default();
        let form = NewMediaForm {
            title: self.title.clone(),
            description: self.description.clone(),
            lat: parse_number("Latitude", &self.lat, defaults.lat)?,
            lon: parse_number("Longitude", &self.lon, defaults.lon)?,
            altitude: parse_number("Altitude", &self.altitude, defaults.altitude)?,
            timestamp: Some(self.timestamp.clone()).filter(|t| !t.trim().is_empty()),
        };
        form.check()?;
        Ok(form)
    }
}

fn parse_number(label: &str, raw: &str, default: f64) -> Result<f64, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::Validation(format!("{label} must be a number")))
}

/// Validate, store the file, append the record, persist, and open the
/// viewer on the new story.
pub async fn upload(state: &AppState, submission: &UploadSubmission) -> AppResult<MediaRecord> {
    let form = submission.form()?;

    let (Some(file_name), Some(bytes)) = (&submission.file_name, &submission.file) else {
        return Err(CoreError::Validation("Please choose a photo or video file".into()).into());
    };
    let media_type = classify_upload(file_name, bytes.len() as u64, state.config.max_upload_bytes)?;

    let path = state.ingestor.store(file_name, bytes).await?;
    let filepath = path.to_string_lossy().into_owned();
    let now = chrono::Local::now().naive_local();

    let mut session = state.session.write().await;
    let record = build_record(next_id(&session.records), &form, media_type, filepath, now);
    let record = session.add(record).clone();
    session.ui.upload_form_open = false;
    persist(state, &session.records).await;

    tracing::info!(media_id = record.id, media_type = record.media_type.name(), "Story added");
    Ok(record)
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Remove the story and its file. Returns `false` when no record had `id`.
pub async fn delete(state: &AppState, id: MediaId) -> bool {
    let mut session = state.session.write().await;
    let Some(removed) = session.remove(id) else {
        tracing::debug!(media_id = id, "Delete of unknown story ignored");
        return false;
    };

    if let Some(path) = removed.filepath.as_deref() {
        state.ingestor.remove(Path::new(path)).await;
    }
    persist(state, &session.records).await;

    tracing::info!(media_id = id, "Story deleted");
    true
}

async fn persist(state: &AppState, records: &[MediaRecord]) {
    if let Err(e) = state.store.save(records).await {
        tracing::warn!(error = %e, "Failed to persist media data");
    }
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// The record's backing file, when it is present on disk.
pub fn existing_file(record: &MediaRecord) -> Option<&str> {
    record.filepath.as_deref().filter(|p| ingest::exists(p))
}

/// Public URL of the record's file, when it is present on disk.
pub fn media_url(record: &MediaRecord) -> Option<String> {
    existing_file(record)
        .and_then(ingest::file_name_of)
        .map(|name| format!("/uploads/{name}"))
}

/// Whether a photo preview can be produced for the record.
pub fn has_photo_preview(record: &MediaRecord) -> bool {
    record.media_type == MediaType::Photo && existing_file(record).is_some()
}

/// Build the map off the async runtime, since photo markers decode images.
pub async fn build_map(records: Vec<MediaRecord>, mode: MapMode) -> MapView {
    let fallback_records = records.clone();
    tokio::task::spawn_blocking(move || render_map(&records, mode, marker_data_uri))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Map render task failed, using glyph markers");
            render_map(&fallback_records, mode, |_| None)
        })
}

fn marker_data_uri(record: &MediaRecord) -> Option<String> {
    if !has_photo_preview(record) {
        return None;
    }
    let path = existing_file(record)?;
    match marker_thumbnail_png(Path::new(path), MARKER_THUMB_PX) {
        Ok(png) => Some(to_data_uri("image/png", &png)),
        Err(e) => {
            tracing::warn!(media_id = record.id, error = %e, "Marker thumbnail failed, using glyph");
            None
        }
    }
}
