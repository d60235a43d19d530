//! Map rendering: one Leaflet marker per story.
//!
//! The renderer is pure. Thumbnail data URIs are supplied by the caller
//! through a closure, so nothing here touches the uploads directory.
//!
//! Click contract:
//! - [`MapMode::Stories`]: each marker opens a popup whose link navigates to
//!   the story viewer (`/stories/{id}`).
//! - [`MapMode::PickLocation`]: no story markers; clicking the map writes the
//!   coordinates into the `lat`/`lon` inputs of the page's upload form,
//!   drops a temporary pin and stores the pick in the session via
//!   `PUT` [`SELECTED_LOCATION_URL`].

use serde::{Deserialize, Serialize};

use crate::geo::map_center;
use crate::media::{MediaRecord, MediaType};
use crate::types::{LatLon, MediaId};

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

pub const DEFAULT_ZOOM: u8 = 10;
const MARKER_PX: u32 = 40;

/// Endpoint that remembers the location picked on the map.
pub const SELECTED_LOCATION_URL: &str = "/api/v1/ui";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether the map shows stories or acts as a location picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    #[default]
    Stories,
    #[serde(alias = "pick")]
    PickLocation,
}

/// What a marker looks like.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Circular photo crop baked into the icon.
    Thumbnail { data_uri: String },
    /// Colored circle keyed by media type.
    Glyph {
        fill: &'static str,
        ring: &'static str,
        symbol: &'static str,
    },
}

impl MarkerIcon {
    /// Type-keyed glyph: green family for photos, orange for videos.
    pub fn glyph_for(media_type: MediaType) -> Self {
        let (fill, ring) = match media_type {
            MediaType::Photo => ("#00C853", "#1B5E20"),
            MediaType::Video => ("#FF6D00", "#E65100"),
        };
        Self::Glyph {
            fill,
            ring,
            symbol: media_type.glyph(),
        }
    }

    /// HTML used as the Leaflet `divIcon` body.
    pub fn to_html(&self) -> String {
        match self {
            Self::Thumbnail { data_uri } => format!(
                "<div class=\"story-marker story-marker-thumb\" style=\"width:{MARKER_PX}px;height:{MARKER_PX}px;\
                 border-radius:50%;overflow:hidden;border:3px solid #FFFC00;box-shadow:0 2px 6px rgba(0,0,0,.4);\">\
                 <img src=\"{}\" alt=\"\" style=\"width:100%;height:100%;object-fit:cover;\"></div>",
                escape_html(data_uri)
            ),
            Self::Glyph { fill, ring, symbol } => format!(
                "<div class=\"story-marker story-marker-glyph\" style=\"width:{MARKER_PX}px;height:{MARKER_PX}px;\
                 border-radius:50%;background:{fill};border:3px solid {ring};display:flex;align-items:center;\
                 justify-content:center;font-size:18px;box-shadow:0 2px 6px rgba(0,0,0,.4);\">{symbol}</div>"
            ),
        }
    }
}

/// One marker on the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub id: MediaId,
    pub lat: f64,
    pub lon: f64,
    pub title: String,
    pub media_type: MediaType,
    pub icon: MarkerIcon,
    pub icon_html: String,
    pub popup_html: String,
    pub story_url: String,
}

/// A renderable map. Holds no state beyond what was passed in.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
    pub mode: MapMode,
    pub markers: Vec<MapMarker>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// URL of the story viewer for `id`.
pub fn story_url(id: MediaId) -> String {
    format!("/stories/{id}")
}

/// Build the map for `records`.
///
/// `thumbnail_for` returns a data URI for records that should show their
/// photo instead of the type glyph (callers return `None` for videos and
/// missing files).
pub fn render_map<F>(records: &[MediaRecord], mode: MapMode, mut thumbnail_for: F) -> MapView
where
    F: FnMut(&MediaRecord) -> Option<String>,
{
    let markers = match mode {
        MapMode::PickLocation => Vec::new(),
        MapMode::Stories => records
            .iter()
            .map(|record| {
                let icon = thumbnail_for(record)
                    .map(|data_uri| MarkerIcon::Thumbnail { data_uri })
                    .unwrap_or_else(|| MarkerIcon::glyph_for(record.media_type));
                MapMarker {
                    id: record.id,
                    lat: record.lat,
                    lon: record.lon,
                    title: record.title.clone(),
                    media_type: record.media_type,
                    icon_html: icon.to_html(),
                    icon,
                    popup_html: popup_html(record),
                    story_url: story_url(record.id),
                }
            })
            .collect(),
    };

    MapView {
        center: map_center(records),
        zoom: DEFAULT_ZOOM,
        mode,
        markers,
    }
}

fn popup_html(record: &MediaRecord) -> String {
    format!(
        "<div class=\"story-popup\"><strong>{}</strong><br>\
         <small>{} &bull; {}m</small><br>\
         <a href=\"{}\">View story</a></div>",
        escape_html(&record.title),
        escape_html(record.date_part()),
        record.altitude,
        story_url(record.id)
    )
}

impl MapView {
    /// Container `<div>` plus the inline script that draws the map.
    ///
    /// The page must include [`LEAFLET_CSS`] and [`LEAFLET_JS`].
    pub fn to_html(&self, element_id: &str) -> String {
        let markers_json = serde_json::to_string(
            &self
                .markers
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "lat": m.lat,
                        "lon": m.lon,
                        "title": m.title,
                        "icon": m.icon_html,
                        "popup": m.popup_html,
                    })
                })
                .collect::<Vec<_>>(),
        )
        .unwrap_or_else(|_| "[]".to_string())
        // Keep the JSON from closing the surrounding <script>.
        .replace("</", "<\\/");

        let id = escape_html(element_id);
        let pick = matches!(self.mode, MapMode::PickLocation);
        format!(
            r#"<div id="{id}" class="story-map" style="height:480px;border-radius:16px;"></div>
<script>
(function() {{
  var map = L.map("{id}").setView([{lat}, {lon}], {zoom});
  L.tileLayer("{tiles}", {{ maxZoom: 19, attribution: "{attribution}" }}).addTo(map);
  var markers = {markers_json};
  markers.forEach(function(m) {{
    var icon = L.divIcon({{ className: "", html: m.icon, iconSize: [{px}, {px}], iconAnchor: [{half}, {half}] }});
    L.marker([m.lat, m.lon], {{ icon: icon, title: m.title }}).addTo(map).bindPopup(m.popup);
  }});
  if ({pick}) {{
    var pin = null;
    map.on("click", function(e) {{
      var lat = document.querySelector("input[name=lat]");
      var lon = document.querySelector("input[name=lon]");
      if (lat) lat.value = e.latlng.lat.toFixed(6);
      if (lon) lon.value = e.latlng.lng.toFixed(6);
      if (pin) {{ pin.setLatLng(e.latlng); }} else {{ pin = L.marker(e.latlng).addTo(map); }}
      fetch("{pick_url}", {{
        method: "PUT",
        headers: {{ "Content-Type": "application/json" }},
        body: JSON.stringify({{ selected_location: [e.latlng.lat, e.latlng.lng] }})
      }}).catch(function() {{}});
    }});
  }}
}})();
</script>"#,
            lat = self.center.0,
            lon = self.center.1,
            zoom = self.zoom,
            tiles = TILE_URL,
            attribution = TILE_ATTRIBUTION,
            px = MARKER_PX,
            half = MARKER_PX / 2,
            pick_url = SELECTED_LOCATION_URL,
        )
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
