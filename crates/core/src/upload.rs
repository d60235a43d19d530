//! Upload constraints and form validation.
//!
//! The file itself is checked here (extension allow-list, size cap) before
//! anything touches the uploads directory; the accompanying form fields are
//! validated with `validator`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::media::{MediaRecord, MediaType};
use crate::types::{MediaId, TIMESTAMP_FORMAT};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accepted photo extensions (lowercase, no dot).
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Accepted video extensions (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

/// Maximum accepted upload size (200 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Form defaults.
pub const DEFAULT_LAT: f64 = 34.0522;
pub const DEFAULT_LON: f64 = -118.2437;
pub const DEFAULT_ALTITUDE: f64 = 100.0;

/// Upper bound of the altitude slider.
pub const MAX_SLIDER_ALTITUDE: f64 = 500.0;

// ---------------------------------------------------------------------------
// File checks
// ---------------------------------------------------------------------------

/// Lowercased extension of `file_name` (text after the last `.`).
pub fn extension_of(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    let ext = ext.trim().to_ascii_lowercase();
    (!ext.is_empty()).then_some(ext)
}

/// Media type implied by an extension, if it is on an allow-list.
pub fn media_type_for_extension(ext: &str) -> Option<MediaType> {
    if PHOTO_EXTENSIONS.contains(&ext) {
        Some(MediaType::Photo)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaType::Video)
    } else {
        None
    }
}

/// Check an uploaded file against the allow-lists and the size cap.
pub fn classify_upload(file_name: &str, size: u64, max_bytes: u64) -> Result<MediaType, CoreError> {
    let ext = extension_of(file_name).ok_or_else(|| {
        CoreError::Validation(format!("File '{file_name}' has no extension"))
    })?;

    let media_type = media_type_for_extension(&ext).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Photos: {}; videos: {}",
            PHOTO_EXTENSIONS.join(", "),
            VIDEO_EXTENSIONS.join(", ")
        ))
    })?;

    if size == 0 {
        return Err(CoreError::Validation(format!("File '{file_name}' is empty")));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large ({} MB). Maximum is {} MB",
            size.div_ceil(1024 * 1024),
            max_bytes / (1024 * 1024)
        )));
    }

    Ok(media_type)
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Text fields submitted alongside the uploaded file.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMediaForm {
    #[validate(custom(function = "not_blank", message = "Please add a title"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Please add a description"))]
    pub description: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub lon: f64,
    #[validate(range(min = 0.0, message = "Altitude cannot be negative"))]
    pub altitude: f64,
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM:SS`.
    /// Empty means "now".
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Default for NewMediaForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            altitude: DEFAULT_ALTITUDE,
            timestamp: None,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

impl NewMediaForm {
    /// Validate every field, collapsing failures into one readable message.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;
        if let Some(raw) = self.timestamp.as_deref() {
            if !raw.trim().is_empty() && parse_timestamp(raw).is_none() {
                return Err(CoreError::Validation(format!("Unrecognized date '{raw}'")));
            }
        }
        Ok(())
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse the accepted timestamp spellings. A bare date gets midnight.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Resolve the form's timestamp to the stored format.
///
/// A bare date keeps the time of day from `now`.
pub fn resolve_timestamp(raw: Option<&str>, now: NaiveDateTime) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return now.format(TIMESTAMP_FORMAT).to_string();
    };
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_time(now.time()).format(TIMESTAMP_FORMAT).to_string();
    }
    parse_timestamp(raw)
        .unwrap_or(now)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Assemble the record for a stored upload.
pub fn build_record(
    id: MediaId,
    form: &NewMediaForm,
    media_type: MediaType,
    filepath: String,
    now: NaiveDateTime,
) -> MediaRecord {
    MediaRecord {
        id,
        media_type,
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        lat: form.lat,
        lon: form.lon,
        altitude: form.altitude,
        timestamp: resolve_timestamp(form.timestamp.as_deref(), now),
        filepath: Some(filepath),
    }
}
