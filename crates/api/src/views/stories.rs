//! Story cards (map tab grid) and story rows (stories tab list).

use dronemap_core::map::{escape_html, story_url};
use dronemap_core::media::{MediaFilter, MediaRecord, MediaType};
use dronemap_core::thumbnail::{CARD_THUMB, LIST_THUMB};

use crate::flows::has_photo_preview;

fn type_badge(media_type: MediaType) -> String {
    let class = match media_type {
        MediaType::Photo => "type-photo",
        MediaType::Video => "type-video",
    };
    format!(
        "<span class=\"type-badge {class}\">{}</span>",
        media_type.name().to_uppercase()
    )
}

fn thumbnail_img(record: &MediaRecord, (w, h): (u32, u32)) -> String {
    if has_photo_preview(record) {
        format!(
            "<img src=\"/media/{}/thumbnail?w={w}&amp;h={h}\" alt=\"{}\" loading=\"lazy\" onerror=\"this.remove()\">",
            record.id,
            escape_html(&record.title)
        )
    } else {
        String::new()
    }
}

fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    (head, chars.next().is_some())
}

/// Grid of cards, three per row.
pub fn card_grid(records: &[MediaRecord]) -> String {
    if records.is_empty() {
        return "<div class=\"info\">No media yet. Upload some photos or videos!</div>".to_string();
    }
    let cards: String = records.iter().map(card).collect();
    format!("<div class=\"grid\">{cards}</div>")
}

fn card(record: &MediaRecord) -> String {
    let (excerpt, cut) = truncate(&record.description, 80);
    format!(
        r#"<div class="story-card">
  {thumb}
  <div class="story-title">{title}</div>
  <div class="story-info">{date} &bull; {altitude}m</div>
  <div style="margin-bottom: 10px;">{badge}<span class="location-badge">&#x1F4CD; {lat:.2}, {lon:.2}</span></div>
  <div style="font-size: 14px; color: #555; margin-bottom: 12px;">{excerpt}{ellipsis}</div>
  <a class="button primary" href="{url}">&#x1F441;&#xFE0F; View Story</a>
</div>"#,
        thumb = thumbnail_img(record, CARD_THUMB),
        title = escape_html(&record.title),
        date = escape_html(record.date_part()),
        altitude = record.altitude,
        badge = type_badge(record.media_type),
        lat = record.lat,
        lon = record.lon,
        excerpt = escape_html(&excerpt),
        ellipsis = if cut { "&hellip;" } else { "" },
        url = story_url(record.id),
    )
}

/// Filter selector that reloads the list.
pub fn filter_form(active: MediaFilter) -> String {
    let options: String = MediaFilter::ALL
        .iter()
        .map(|f| {
            let selected = if *f == active { " selected" } else { "" };
            format!("<option value=\"{}\"{selected}>{}</option>", f.name(), f.label())
        })
        .collect();
    format!(
        "<form method=\"get\" action=\"/stories\" style=\"margin-bottom: 16px;\">\
         <label>Filter by type <select name=\"filter\" onchange=\"this.form.submit()\">{options}</select></label>\
         <noscript><button class=\"button\" type=\"submit\">Apply</button></noscript></form>"
    )
}

/// Rows for the stories tab, in the order given.
pub fn story_list(records: &[MediaRecord]) -> String {
    if records.is_empty() {
        return "<div class=\"info\">No stories found. Upload some media!</div>".to_string();
    }
    records.iter().map(row).collect()
}

fn row(record: &MediaRecord) -> String {
    format!(
        r#"<div class="story-row">
  <div>
    <div style="display: flex; justify-content: space-between; align-items: start; margin-bottom: 10px;">
      <div style="font-size: 18px; font-weight: 600;">{title}</div>{badge}
    </div>
    <div style="color: #666; font-size: 14px; margin-bottom: 10px;">&#x1F4C5; {timestamp} &bull; &#x1F4CD; {lat:.4}, {lon:.4} &bull; &#x2B06;&#xFE0F; {altitude}m</div>
    <div style="color: #444; font-size: 15px; line-height: 1.5;">{description}</div>
  </div>
  <div>
    {thumb}
    <a class="button" href="{url}">&#x1F441;&#xFE0F; View</a>
    <form method="post" action="/stories/{id}/delete" style="display: inline;">
      <button class="button danger" type="submit">&#x1F5D1;&#xFE0F; Delete</button>
    </form>
  </div>
</div>"#,
        title = escape_html(&record.title),
        badge = type_badge(record.media_type),
        timestamp = escape_html(&record.timestamp),
        lat = record.lat,
        lon = record.lon,
        altitude = record.altitude,
        description = escape_html(&record.description),
        thumb = thumbnail_img(record, LIST_THUMB),
        url = story_url(record.id),
        id = record.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronemap_core::media::seed_records;

    #[test]
    fn empty_grid_shows_hint() {
        assert!(card_grid(&[]).contains("No media yet"));
    }

    #[test]
    fn cards_link_to_viewer_and_skip_missing_thumbnails() {
        let html = card_grid(&seed_records());
        assert!(html.contains("href=\"/stories/1\""));
        assert!(html.contains("href=\"/stories/2\""));
        assert!(!html.contains("<img"));
        assert!(html.contains("type-video"));
    }

    #[test]
    fn long_descriptions_are_cut() {
        let mut record = seed_records().remove(0);
        record.description = "x".repeat(120);
        let html = card_grid(&[record]);
        assert!(html.contains(&format!("{}&hellip;", "x".repeat(80))));
    }

    #[test]
    fn filter_form_selects_active() {
        let html = filter_form(MediaFilter::Video);
        assert!(html.contains("<option value=\"video\" selected>Videos</option>"));
    }

    #[test]
    fn rows_have_delete_forms() {
        let html = story_list(&seed_records());
        assert!(html.contains("action=\"/stories/2/delete\""));
    }
}
