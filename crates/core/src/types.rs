/// Media record identifiers, assigned as `max(existing) + 1`.
pub type MediaId = i64;

/// Display/storage format of record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A latitude/longitude pair in decimal degrees.
pub type LatLon = (f64, f64);
