//! Shared query parameter types for handlers.

use serde::Deserialize;

/// `?filter=` / `?type=` on story listings.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(alias = "type")]
    pub filter: Option<String>,
    /// `newest` sorts newest first; anything else keeps stored order.
    pub sort: Option<String>,
}

/// `?w=&h=` on thumbnail requests.
#[derive(Debug, Default, Deserialize)]
pub struct ThumbnailParams {
    pub w: Option<u32>,
    pub h: Option<u32>,
}

/// `?limit=` on nearby-story requests.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

/// `?mode=` on map requests.
#[derive(Debug, Default, Deserialize)]
pub struct MapParams {
    pub mode: Option<dronemap_core::map::MapMode>,
}
