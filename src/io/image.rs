//! Image decode/encode and the fixed resampling policies

use crate::io::configuration::THUMBNAIL_FORMAT;
use crate::io::error::{MosaicError, Result, file_system};
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Filter used to shrink source images into thumbnails
pub const THUMBNAIL_FILTER: FilterType = FilterType::CatmullRom;

/// Decode an image file as 8-bit RGB, discarding any alpha channel
///
/// The format is detected from the file contents, so thumbnails keep
/// their source file name even though they are always PNG-encoded.
///
/// # Errors
///
/// Returns `Decode` if the file cannot be opened or is not a readable image.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let decode_error = |source: image::ImageError| MosaicError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?;

    Ok(reader.decode().map_err(decode_error)?.into_rgb8())
}

/// Resize to exact thumbnail dimensions
pub fn resize_thumbnail(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, THUMBNAIL_FILTER)
}

/// Magnify by an integer factor with nearest-neighbor sampling
///
/// Nearest-neighbor keeps every source color intact, so cell signatures
/// are unaffected by the magnification.
pub fn upscale(image: RgbImage, factor: u32) -> RgbImage {
    if factor <= 1 {
        return image;
    }
    let (width, height) = image.dimensions();
    imageops::resize(
        &image,
        width.saturating_mul(factor),
        height.saturating_mul(factor),
        FilterType::Nearest,
    )
}

/// Persist a thumbnail in the fixed thumbnail encoding
///
/// # Errors
///
/// Returns `ImageExport` if encoding or writing fails.
pub fn save_thumbnail(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, THUMBNAIL_FORMAT)
        .map_err(|source| MosaicError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}

/// Write an image, choosing the encoding from the path's extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension has no known encoder or writing fails
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }

    image.save(path).map_err(|source| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}
