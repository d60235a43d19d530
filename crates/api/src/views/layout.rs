//! Page shell: head, header, tab bar, stats boxes.

use dronemap_core::map::{escape_html, LEAFLET_CSS, LEAFLET_JS};
use dronemap_core::media::MediaStats;

/// Which tab is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
    Upload,
    Stories,
}

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 24px; background: #fafafa; color: #111; }
a { color: inherit; }
.main-title { font-size: 32px; font-weight: 800; margin-bottom: 20px; display: flex; align-items: center; gap: 10px; }
.snap-badge { background: #FFFC00; color: #000; padding: 4px 12px; border-radius: 20px; font-size: 14px; font-weight: 600; }
.tabs { display: flex; gap: 8px; margin-bottom: 24px; }
.tabs a { padding: 8px 16px; border-radius: 20px; text-decoration: none; background: #eee; font-weight: 600; }
.tabs a.active { background: #FFFC00; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; margin-top: 24px; }
.story-card { background: white; border-radius: 16px; padding: 20px; box-shadow: 0 4px 12px rgba(0,0,0,0.1); border: 2px solid #FFFC00; }
.story-card img { width: 100%; border-radius: 12px; margin-bottom: 12px; }
.story-title { font-size: 18px; font-weight: 600; margin-bottom: 8px; }
.story-info { font-size: 12px; color: #666; margin-bottom: 10px; }
.type-badge { display: inline-block; padding: 4px 10px; border-radius: 12px; font-size: 11px; font-weight: 600; margin-right: 8px; color: white; }
.type-photo { background: #00C853; }
.type-video { background: #FF6D00; }
.location-badge { background: #2962FF; color: white; padding: 4px 10px; border-radius: 12px; font-size: 11px; display: inline-block; }
.button { display: inline-block; padding: 8px 14px; border-radius: 10px; border: 1px solid #ccc; background: white; cursor: pointer; text-decoration: none; font-size: 14px; }
.button.primary { background: #FFFC00; border-color: #e0dd00; font-weight: 700; }
.button.danger { color: #c62828; }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-bottom: 20px; }
.stats-box { background: white; padding: 20px; border-radius: 12px; text-align: center; box-shadow: 0 4px 12px rgba(0,0,0,0.08); }
.stats-number { font-size: 32px; font-weight: 700; }
.stats-label { font-size: 14px; color: #666; }
.story-row { display: grid; grid-template-columns: 3fr 1fr; gap: 16px; padding: 16px 0; border-bottom: 1px solid #ddd; }
.story-row img { width: 100%; border-radius: 8px; }
.viewer { background: #000; color: white; border-radius: 20px; max-width: 640px; margin: 0 auto 32px; overflow: hidden; }
.viewer-header { padding: 20px; display: flex; align-items: center; gap: 15px; }
.story-avatar { width: 50px; height: 50px; border-radius: 50%; background: linear-gradient(45deg, #FFFC00, #FF6B6B); display: flex; align-items: center; justify-content: center; font-size: 20px; }
.viewer-media img, .viewer-media video { width: 100%; display: block; }
.viewer-placeholder { background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%); height: 400px; display: flex; flex-direction: column; align-items: center; justify-content: center; }
.viewer-info { background: #111; padding: 20px; }
.viewer-meta { display: flex; justify-content: space-between; color: rgba(255,255,255,0.7); font-size: 14px; margin-top: 12px; }
.viewer-nav { display: flex; justify-content: space-between; padding: 12px 20px 20px; background: #111; }
.viewer-nav form { margin: 0; }
.nearby { padding: 0 20px 20px; background: #111; font-size: 13px; }
.nearby a { color: #FFFC00; }
.upload-section { background: #f8f9fa; padding: 30px; border-radius: 16px; border: 2px dashed #FFFC00; }
.upload-columns { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
.upload-section label { display: block; font-weight: 600; margin-top: 12px; }
.upload-section input, .upload-section textarea, .upload-section select { width: 100%; padding: 8px; box-sizing: border-box; }
.warning { background: #fff3cd; border: 1px solid #ffe08a; padding: 12px 16px; border-radius: 10px; margin-bottom: 16px; }
.info { background: #e3f2fd; padding: 12px 16px; border-radius: 10px; }
.footer { text-align: center; color: #999; font-size: 12px; padding: 30px 0; }
"#;

/// Wrap `body` in the full document.
pub fn page(title: &str, active: Tab, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title} &middot; Drone Media Map</title>
  <link rel="stylesheet" href="{LEAFLET_CSS}" />
  <script src="{LEAFLET_JS}"></script>
  <style>{STYLE}</style>
</head>
<body>
  <div class="main-title">&#x1F47B; Drone Media Map <span class="snap-badge">SNAP STYLE</span></div>
  {tabs}
  {body}
  <div class="footer">&#x1F47B; Drone Media Map &bull; Click a marker or &quot;View&quot; on any story to open it</div>
</body>
</html>"#,
        title = escape_html(title),
        tabs = tabs(active),
    )
}

fn tabs(active: Tab) -> String {
    let link = |tab: Tab, href: &str, label: &str| {
        let class = if tab == active { " class=\"active\"" } else { "" };
        format!("<a href=\"{href}\"{class}>{label}</a>")
    };
    format!(
        "<nav class=\"tabs\">{}{}{}</nav>",
        link(Tab::Map, "/", "&#x1F5FA;&#xFE0F; Map View"),
        link(Tab::Upload, "/upload", "&#x1F4E4; Add Media"),
        link(Tab::Stories, "/stories", "&#x1F4F1; Stories"),
    )
}

pub fn stats_boxes(stats: &MediaStats) -> String {
    let boxed = |n: usize, label: &str| {
        format!(
            "<div class=\"stats-box\"><div class=\"stats-number\">{n}</div>\
             <div class=\"stats-label\">{label}</div></div>"
        )
    };
    format!(
        "<div class=\"stats\">{}{}{}</div>",
        boxed(stats.total, "Total Stories"),
        boxed(stats.photos, "Photos"),
        boxed(stats.videos, "Videos"),
    )
}
