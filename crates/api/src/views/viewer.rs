//! The story viewer panel.

use dronemap_core::geo::NearbyStory;
use dronemap_core::map::{escape_html, story_url};
use dronemap_core::media::{MediaRecord, MediaType};

use crate::flows::media_url;

/// Characters of description shown on the missing-media placeholder.
const PLACEHOLDER_EXCERPT: usize = 100;

/// Render the viewer for `record` at position `index` of `total`.
pub fn story_viewer(
    record: &MediaRecord,
    index: usize,
    total: usize,
    autoplay: bool,
    nearby: &[NearbyStory],
) -> String {
    format!(
        r#"<section class="viewer" id="story-viewer">
  <div class="viewer-header">
    <div class="story-avatar">{glyph}</div>
    <div style="flex: 1;">
      <div style="font-weight: 600; font-size: 20px;">{title}</div>
      <div style="color: rgba(255,255,255,0.7); font-size: 14px;">{date} &bull; {altitude}m &bull; {position} of {total}</div>
    </div>
    <form method="post" action="/stories/close"><button class="button" type="submit">&#x2715; Close</button></form>
  </div>
  <div class="viewer-media">{media}</div>
  <div class="viewer-info">
    <div style="font-size: 16px;">{description}</div>
    <div class="viewer-meta">
      <div><div>&#x1F4CD; Location</div><div style="font-family: monospace; font-weight: 600;">{lat:.4}, {lon:.4}</div></div>
      <div><div>&#x1F552; Time</div><div>{time}</div></div>
      <div><div>&#x2B06;&#xFE0F; Altitude</div><div>{altitude}m</div></div>
    </div>
  </div>
  <div class="viewer-nav">
    <form method="post" action="/stories/previous"><button class="button" type="submit">&lsaquo; Prev</button></form>
    <form method="post" action="/stories/next"><button class="button" type="submit">Next &rsaquo;</button></form>
  </div>
  {nearby}
</section>"#,
        glyph = record.media_type.glyph(),
        title = escape_html(&record.title),
        date = escape_html(record.date_part()),
        altitude = record.altitude,
        position = index + 1,
        media = media_panel(record, autoplay),
        description = escape_html(&record.description),
        lat = record.lat,
        lon = record.lon,
        time = escape_html(record.time_part()),
        nearby = nearby_list(nearby),
    )
}

fn media_panel(record: &MediaRecord, autoplay: bool) -> String {
    match (media_url(record), record.media_type) {
        (Some(url), MediaType::Photo) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&url),
            escape_html(&record.title)
        ),
        (Some(url), MediaType::Video) => format!(
            "<video src=\"{}\" controls playsinline{}></video>",
            escape_html(&url),
            if autoplay { " autoplay muted" } else { "" }
        ),
        (None, media_type) => {
            let excerpt: String = record.description.chars().take(PLACEHOLDER_EXCERPT).collect();
            format!(
                "<div class=\"viewer-placeholder\">\
                 <div style=\"font-size: 64px; margin-bottom: 20px;\">{}</div>\
                 <div style=\"font-size: 24px; margin-bottom: 10px;\">{}</div>\
                 <div style=\"font-size: 16px; opacity: 0.8;\">{}</div></div>",
                media_type.glyph(),
                media_type.label(),
                escape_html(&excerpt)
            )
        }
    }
}

fn nearby_list(nearby: &[NearbyStory]) -> String {
    if nearby.is_empty() {
        return String::new();
    }
    let items: String = nearby
        .iter()
        .map(|n| {
            format!(
                "<li><a href=\"{}\">{}</a> &middot; {:.1} km</li>",
                story_url(n.record.id),
                escape_html(&n.record.title),
                n.distance_km
            )
        })
        .collect();
    format!("<div class=\"nearby\"><div>Nearby stories</div><ul>{items}</ul></div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronemap_core::geo::nearby;
    use dronemap_core::media::seed_records;

    #[test]
    fn missing_file_renders_placeholder() {
        let seeds = seed_records();
        let html = story_viewer(&seeds[1], 1, 2, true, &[]);
        assert!(html.contains("viewer-placeholder"));
        assert!(html.contains("Video"));
        assert!(html.contains("2 of 2"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn viewer_has_navigation_controls() {
        let seeds = seed_records();
        let html = story_viewer(&seeds[0], 0, 2, true, &[]);
        for action in ["/stories/previous", "/stories/next", "/stories/close"] {
            assert!(html.contains(action), "{action}");
        }
    }

    #[test]
    fn nearby_links_are_listed() {
        let seeds = seed_records();
        let near = nearby(&seeds, 1, 3);
        let html = story_viewer(&seeds[0], 0, 2, true, &near);
        assert!(html.contains("Nearby stories"));
        assert!(html.contains("href=\"/stories/2\""));
    }
}
