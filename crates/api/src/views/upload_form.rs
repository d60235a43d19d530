//! The "Add Media" form.

use dronemap_core::map::escape_html;
use dronemap_core::upload::{
    NewMediaForm, MAX_SLIDER_ALTITUDE, PHOTO_EXTENSIONS, VIDEO_EXTENSIONS,
};

use crate::flows::UploadSubmission;

/// Values to prefill the form with.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub lat: String,
    pub lon: String,
    pub altitude: String,
    pub timestamp: String,
}

impl FormValues {
    /// Defaults, optionally centered on a picked location.
    pub fn initial(selected: Option<(f64, f64)>) -> Self {
        let d = NewMediaForm::default();
        let (lat, lon) = selected.unwrap_or((d.lat, d.lon));
        Self {
            title: String::new(),
            description: String::new(),
            lat: format!("{lat:.6}"),
            lon: format!("{lon:.6}"),
            altitude: format!("{}", d.altitude),
            timestamp: String::new(),
        }
    }
}

impl From<&UploadSubmission> for FormValues {
    fn from(s: &UploadSubmission) -> Self {
        Self {
            title: s.title.clone(),
            description: s.description.clone(),
            lat: s.lat.clone(),
            lon: s.lon.clone(),
            altitude: s.altitude.clone(),
            timestamp: s.timestamp.clone(),
        }
    }
}

fn accept_list() -> String {
    PHOTO_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the form. `warning` is shown inline above it; `map_html` is the
/// location picker.
pub fn upload_form(values: &FormValues, warning: Option<&str>, map_html: &str, max_mb: u64) -> String {
    let warning = warning
        .map(|w| format!("<div class=\"warning\">&#x26A0;&#xFE0F; {}</div>", escape_html(w)))
        .unwrap_or_default();
    format!(
        r#"<h3>&#x1F4E4; Upload New Media</h3>
{warning}
<form class="upload-section" method="post" action="/upload" enctype="multipart/form-data">
  <h3 style="margin-top: 0;">Add your drone media to the map</h3>
  <div class="upload-columns">
    <div>
      <h4>Location Details</h4>
      <p style="font-size: 13px; color: #666;">Click the map to drop a pin, or type coordinates.</p>
      {map_html}
      <label>Latitude <input type="number" name="lat" step="0.000001" min="-90" max="90" value="{lat}"></label>
      <label>Longitude <input type="number" name="lon" step="0.000001" min="-180" max="180" value="{lon}"></label>
      <label>Altitude (meters): <output id="altitude-out">{altitude}</output>
        <input type="range" name="altitude" min="0" max="{max_alt}" value="{altitude}" oninput="document.getElementById('altitude-out').value = this.value"></label>
      <h4>Media Info</h4>
      <label>Story Title <input type="text" name="title" placeholder="e.g., Sunset over the beach" value="{title}"></label>
      <label>Description <textarea name="description" rows="4" placeholder="Describe your shot...">{description}</textarea></label>
      <label>Date <input type="date" name="timestamp" value="{timestamp}"></label>
    </div>
    <div>
      <h4>Upload File</h4>
      <label>Choose a photo or video (max {max_mb} MB)
        <input type="file" name="file" accept="{accept}" onchange="previewUpload(this)"></label>
      <div id="upload-preview" style="margin-top: 12px;"><div class="info">&#x1F446; Select a photo or video file</div></div>
      <button class="button primary" type="submit" style="margin-top: 16px; width: 100%;">&#x1F680; Add to Map</button>
    </div>
  </div>
</form>
<script>
function previewUpload(input) {{
  var box = document.getElementById("upload-preview");
  box.innerHTML = "";
  var file = input.files && input.files[0];
  if (!file) return;
  var url = URL.createObjectURL(file);
  var isVideo = file.type.indexOf("video") === 0;
  var el = document.createElement(isVideo ? "video" : "img");
  el.src = url;
  el.style.width = "100%";
  if (isVideo) el.controls = true;
  var label = document.createElement("p");
  label.textContent = "Preview (" + (isVideo ? "video" : "photo") + ")";
  box.appendChild(label);
  box.appendChild(el);
}}
</script>"#,
        lat = escape_html(&values.lat),
        lon = escape_html(&values.lon),
        altitude = escape_html(&values.altitude),
        max_alt = MAX_SLIDER_ALTITUDE,
        title = escape_html(&values.title),
        description = escape_html(&values.description),
        timestamp = escape_html(&values.timestamp),
        accept = accept_list(),
    )
}
