//! Unit tests mirroring the `src/` tree, one file per source module


use image::{Rgb, RgbImage};
use std::path::Path;

/// Solid-color RGB image
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Write a solid-color image, encoding chosen by the path's extension
pub fn write_solid(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    solid(width, height, color)
        .save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}
