//! Thumbnail generation for cards, list rows and map markers.
//!
//! Only photos are thumbnailed; videos always fall back to a glyph.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::CoreError;

/// Story card preview bounds.
pub const CARD_THUMB: (u32, u32) = (300, 200);

/// Story list preview bounds.
pub const LIST_THUMB: (u32, u32) = (200, 150);

/// Diameter of the circular marker thumbnail in pixels.
pub const MARKER_THUMB_PX: u32 = 48;

const JPEG_QUALITY: u8 = 85;

fn open(path: &Path) -> Result<DynamicImage, CoreError> {
    image::open(path).map_err(|e| {
        CoreError::Internal(format!("Failed to decode image {}: {e}", path.display()))
    })
}

/// Downscale to fit within `max_w`×`max_h`, keeping the aspect ratio, and
/// encode as JPEG. Images already inside the bounds are not enlarged.
pub fn thumbnail_jpeg(path: &Path, max_w: u32, max_h: u32) -> Result<Vec<u8>, CoreError> {
    if max_w == 0 || max_h == 0 {
        return Err(CoreError::Validation(
            "Thumbnail dimensions must be non-zero".into(),
        ));
    }
    let img = open(path)?;
    let fitted = if img.width() > max_w || img.height() > max_h {
        img.thumbnail(max_w, max_h)
    } else {
        img
    };
    let rgb = fitted.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| CoreError::Internal(format!("Failed to encode thumbnail JPEG: {e}")))?;
    Ok(out.into_inner())
}

/// Center-crop to a square, resize to `size`, and cut a circle out of it
/// (transparent corners). Returns PNG bytes.
pub fn marker_thumbnail_png(path: &Path, size: u32) -> Result<Vec<u8>, CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Marker size must be non-zero".into()));
    }
    let img = open(path)?.to_rgba8();
    let side = img.width().min(img.height());
    let x = (img.width() - side) / 2;
    let y = (img.height() - side) / 2;
    let square = image::imageops::crop_imm(&img, x, y, side, side).to_image();
    let mut resized = image::imageops::resize(&square, size, size, FilterType::Lanczos3);
    mask_circle(&mut resized);

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("Failed to encode marker PNG: {e}")))?;
    Ok(out.into_inner())
}

fn mask_circle(img: &mut RgbaImage) {
    let r = img.width() as f64 / 2.0;
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let dx = px as f64 + 0.5 - r;
        let dy = py as f64 + 0.5 - r;
        if dx * dx + dy * dy > r * r {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// `data:` URI for embedding image bytes directly in HTML.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
