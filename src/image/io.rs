//! I/O helpers for frames, edge maps and JSON.
//!
//! - `load_color_frame`: read a PNG/JPEG/etc. into an owned RGB frame.
//! - `save_gray_u8`: write an 8-bit single-channel map to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ChannelOrder, GrayU8, OwnedFrame};
use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as an interleaved RGB frame.
pub fn load_color_frame(path: &Path) -> Result<OwnedFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(OwnedFrame::new(width, height, ChannelOrder::Rgb, img.into_raw()))
}

/// Save an 8-bit map (e.g. the binary edge map) to a grayscale PNG.
pub fn save_gray_u8(buffer: &GrayU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: GrayImage =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(buffer.w as u32, buffer.h as u32, buffer.data.clone())
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
