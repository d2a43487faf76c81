//! Tunable defaults and the runtime configuration passed through the pipeline

use crate::io::error::{Result, invalid_parameter};
use image::ImageFormat;

// Grid and signature defaults
/// Cell edge length as a fraction of the (upscaled) target width
pub const DEFAULT_TILE_PERCENTAGE: f64 = 0.015;
/// Integer magnification applied to the target before partitioning
pub const DEFAULT_UPSCALE_FACTOR: u32 = 2;
/// Sample every Nth pixel in raster order when computing signatures
pub const DEFAULT_SAMPLE_STRIDE: usize = 1;

// Input formats accepted for targets and tiles
/// Lowercase file extensions treated as color raster images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Encoding used for every persisted thumbnail regardless of its file name
pub const THUMBNAIL_FORMAT: ImageFormat = ImageFormat::Png;

// Workspace layout
/// Suffix appended to the tile source directory name for thumbnails
pub const WORKSPACE_SUFFIX: &str = "_tiles";
/// Extension of the index file written next to the thumbnail directory
pub const INDEX_EXTENSION: &str = "json";

// Output settings
/// Suffix inserted before the target's extension in the mosaic file name
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Directory receiving finished mosaics
pub const DEFAULT_OUTPUT_DIR: &str = "mosaics";
/// Upper bound on numbered output name candidates
pub const MAX_NAME_ATTEMPTS: u32 = u32::MAX;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Parameters shared by the indexer and the composer
///
/// Both stages must see the same `sample_stride` so tile and cell
/// signatures stay comparable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MosaicConfig {
    /// Fraction of the canvas width used as the cell edge length
    pub tile_percentage: f64,
    /// Integer magnification of the target canvas
    pub upscale_factor: u32,
    /// Pixel sampling interval for signature computation
    pub sample_stride: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_percentage: DEFAULT_TILE_PERCENTAGE,
            upscale_factor: DEFAULT_UPSCALE_FACTOR,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
        }
    }
}

impl MosaicConfig {
    /// Check every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `tile_percentage` is not finite or outside (0, 1]
    /// - `upscale_factor` is zero
    /// - `sample_stride` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.tile_percentage.is_finite()
            || self.tile_percentage <= 0.0
            || self.tile_percentage > 1.0
        {
            return Err(invalid_parameter(
                "tile_percentage",
                &self.tile_percentage,
                &"must be a fraction in (0, 1]",
            ));
        }
        if self.upscale_factor == 0 {
            return Err(invalid_parameter(
                "upscale_factor",
                &self.upscale_factor,
                &"must be at least 1",
            ));
        }
        if self.sample_stride == 0 {
            return Err(invalid_parameter(
                "sample_stride",
                &self.sample_stride,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Whether a path carries one of the supported raster extensions
pub fn has_supported_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}
