//! Buffer manager — turns decoded images into bounded working buffers.
//!
//! Effects run on a flat [`RgbaImage`] no larger than 800×600.  Oversized
//! sources are downsampled once at load time, preserving aspect ratio;
//! smaller sources are never upscaled.

use image::{DynamicImage, RgbaImage, imageops};

use crate::error::EffectError;

/// Maximum working-buffer width in pixels.
pub const MAX_WIDTH: u32 = 800;
/// Maximum working-buffer height in pixels.
pub const MAX_HEIGHT: u32 = 600;

/// Convert a decoded image into the canonical working buffer.
///
/// Fails with [`EffectError::InvalidImage`] on a zero-area source.
pub fn load_source(source: &DynamicImage) -> Result<RgbaImage, EffectError> {
    let rgba = source.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(EffectError::invalid_image(format!(
            "zero-area source ({}x{})",
            rgba.width(),
            rgba.height()
        )));
    }
    Ok(bound_to_max(&rgba))
}

/// Build a working buffer from raw RGBA bytes (e.g. a frontend's own
/// canvas).  Fails with [`EffectError::InvalidImage`] when the dimensions
/// are zero or the byte count does not match `width * height * 4`.
pub fn buffer_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage, EffectError> {
    if width == 0 || height == 0 {
        return Err(EffectError::invalid_image(format!(
            "zero-area dimensions ({width}x{height})"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| EffectError::invalid_image("dimensions overflow"))?;
    if data.len() != expected {
        return Err(EffectError::invalid_image(format!(
            "buffer length {} does not match {width}x{height} RGBA (expected {expected})",
            data.len()
        )));
    }
    // Length was checked above, so from_raw cannot fail.
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| EffectError::invalid_image("buffer construction failed"))
}

/// Downsample so neither dimension exceeds the bound, keeping aspect ratio.
/// Images already within bounds are returned as-is (no upscaling).
pub fn bound_to_max(flat: &RgbaImage) -> RgbaImage {
    let (w, h) = flat.dimensions();
    if w <= MAX_WIDTH && h <= MAX_HEIGHT {
        return flat.clone();
    }
    let ratio = (MAX_WIDTH as f32 / w as f32).min(MAX_HEIGHT as f32 / h as f32);
    let new_w = ((w as f32 * ratio).round() as u32).max(1);
    let new_h = ((h as f32 * ratio).round() as u32).max(1);
    log::debug!("downsampling source {w}x{h} -> {new_w}x{new_h}");
    imageops::resize(flat, new_w, new_h, imageops::FilterType::Lanczos3)
}
