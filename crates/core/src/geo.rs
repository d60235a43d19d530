//! Coordinate helpers: map centering and the "nearby stories" search.

use serde::Serialize;

use crate::media::MediaRecord;
use crate::types::{LatLon, MediaId};

/// Initial map view when there is nothing to center on (Los Angeles).
pub const DEFAULT_CENTER: LatLon = (34.0522, -118.2437);

/// Mean Earth radius used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Arithmetic mean of all record coordinates, or [`DEFAULT_CENTER`].
pub fn map_center(records: &[MediaRecord]) -> LatLon {
    if records.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = records.len() as f64;
    let (lat_sum, lon_sum) = records
        .iter()
        .fold((0.0, 0.0), |(lat, lon), r| (lat + r.lat, lon + r.lon));
    (lat_sum / n, lon_sum / n)
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// A record paired with its distance from the origin story.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyStory {
    pub record: MediaRecord,
    pub distance_km: f64,
}

/// The `limit` records closest to the record with `origin`, nearest first.
///
/// Returns an empty list when `origin` is not in `records`.
pub fn nearby(records: &[MediaRecord], origin: MediaId, limit: usize) -> Vec<NearbyStory> {
    let Some(from) = records.iter().find(|r| r.id == origin) else {
        return Vec::new();
    };
    let mut found: Vec<NearbyStory> = records
        .iter()
        .filter(|r| r.id != origin)
        .map(|r| NearbyStory {
            distance_km: haversine_km((from.lat, from.lon), (r.lat, r.lon)),
            record: r.clone(),
        })
        .collect();
    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found.truncate(limit);
    found
}
