//! The media record model and the list operations the UI runs over it.
//!
//! The collection is always held in memory as a `Vec<MediaRecord>` in
//! insertion order; filtering, sorting and statistics are computed on demand.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::MediaId;

// ---------------------------------------------------------------------------
// Media type
// ---------------------------------------------------------------------------

/// Kind of media backing a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Older data files stored photos as `"image"`.
    #[serde(alias = "image")]
    Photo,
    Video,
}

impl MediaType {
    /// Stored/serialized name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Photo => "Photo",
            Self::Video => "Video",
        }
    }

    /// Emoji glyph used on markers, cards and the viewer avatar.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Photo => "\u{1F4F7}",
            Self::Video => "\u{1F3AC}",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One geotagged story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: MediaId,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    /// Meters above ground, never negative.
    pub altitude: f64,
    /// `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Backing file. Absent for seed records; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
}

impl MediaRecord {
    /// Date portion of the timestamp (first 10 characters).
    pub fn date_part(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }

    /// Time portion of the timestamp (everything after the date and separator).
    pub fn time_part(&self) -> &str {
        self.timestamp.get(11..).unwrap_or("")
    }
}

/// Next identifier for a new record: `max(existing ids) + 1`, or 1 when empty.
pub fn next_id(records: &[MediaRecord]) -> MediaId {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

/// Position of the record with `id` in the list.
pub fn index_of(records: &[MediaRecord], id: MediaId) -> Option<usize> {
    records.iter().position(|r| r.id == id)
}

/// Look up a record by id.
pub fn find(records: &[MediaRecord], id: MediaId) -> Option<&MediaRecord> {
    records.iter().find(|r| r.id == id)
}

// ---------------------------------------------------------------------------
// Filtering and sorting
// ---------------------------------------------------------------------------

/// Type filter offered by the story browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFilter {
    #[default]
    All,
    #[serde(alias = "photos")]
    Photo,
    #[serde(alias = "videos")]
    Video,
}

impl MediaFilter {
    /// Parse a filter name, case-insensitive, accepting singular and plural.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "photo" | "photos" | "image" | "images" => Ok(Self::Photo),
            "video" | "videos" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown filter '{other}'. Must be one of: all, photo, video"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Photo => "Photos",
            Self::Video => "Videos",
        }
    }

    pub fn matches(self, media_type: MediaType) -> bool {
        match self {
            Self::All => true,
            Self::Photo => media_type == MediaType::Photo,
            Self::Video => media_type == MediaType::Video,
        }
    }

    pub const ALL: [MediaFilter; 3] = [Self::All, Self::Photo, Self::Video];
}

/// Records matching `filter`, in their original relative order.
pub fn filter_records(records: &[MediaRecord], filter: MediaFilter) -> Vec<MediaRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r.media_type))
        .cloned()
        .collect()
}

/// Sort newest first. Timestamps share one fixed-width format, so the
/// lexical order is the chronological order. The sort is stable.
pub fn sort_newest_first(records: &mut [MediaRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counts shown in the stats boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediaStats {
    pub total: usize,
    pub photos: usize,
    pub videos: usize,
}

pub fn stats(records: &[MediaRecord]) -> MediaStats {
    let photos = records
        .iter()
        .filter(|r| r.media_type == MediaType::Photo)
        .count();
    MediaStats {
        total: records.len(),
        photos,
        videos: records.len() - photos,
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Fallback collection used when no readable data file exists.
pub fn seed_records() -> Vec<MediaRecord> {
    vec![
        MediaRecord {
            id: 1,
            media_type: MediaType::Photo,
            title: "Sunset over Santa Monica".to_string(),
            description: "Golden hour pass along the pier with the Ferris wheel lit up."
                .to_string(),
            lat: 34.0094,
            lon: -118.4973,
            altitude: 120.0,
            timestamp: "2024-06-14 19:42:00".to_string(),
            filepath: None,
        },
        MediaRecord {
            id: 2,
            media_type: MediaType::Video,
            title: "Downtown skyline orbit".to_string(),
            description: "Slow orbit around the downtown towers just after sunrise."
                .to_string(),
            lat: 34.0522,
            lon: -118.2437,
            altitude: 250.0,
            timestamp: "2024-06-15 06:18:30".to_string(),
            filepath: None,
        },
    ]
}

#[cfg(test)]
pub(crate) fn sample(id: MediaId, media_type: MediaType, timestamp: &str) -> MediaRecord {
    MediaRecord {
        id,
        media_type,
        title: format!("Story {id}"),
        description: format!("Description {id}"),
        lat: 34.0 + id as f64 * 0.01,
        lon: -118.0 - id as f64 * 0.01,
        altitude: 100.0,
        timestamp: timestamp.to_string(),
        filepath: None,
    }
}
