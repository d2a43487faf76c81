//! Command-line interface: argument parsing, input validation and the run driver

use crate::algorithm::pipeline::MosaicPipeline;
use crate::io::configuration::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_STRIDE, DEFAULT_TILE_PERCENTAGE, DEFAULT_UPSCALE_FACTOR,
    MosaicConfig, SUPPORTED_EXTENSIONS, has_supported_extension,
};
use crate::io::error::{Result, file_system, invalid_input};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image out of tile images matched by mean color"
)]
/// Command-line arguments for the mosaic generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Target image to rebuild (jpg, jpeg or png)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate tile images
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Cell edge length as a fraction of the upscaled target width
    #[arg(short, long, default_value_t = DEFAULT_TILE_PERCENTAGE)]
    pub tile_percentage: f64,

    /// Integer magnification of the target before partitioning
    #[arg(short, long, default_value_t = DEFAULT_UPSCALE_FACTOR)]
    pub upscale: u32,

    /// Sample every Nth pixel when averaging colors
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_STRIDE)]
    pub sample_stride: usize,

    /// Directory receiving the finished mosaic
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Keep the thumbnail directory and index file after the run
    #[arg(short, long)]
    pub keep_workspace: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-file decisions
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log records to this file
    #[arg(short, long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Configuration assembled from the tuning flags
    pub const fn config(&self) -> MosaicConfig {
        MosaicConfig {
            tile_percentage: self.tile_percentage,
            upscale_factor: self.upscale,
            sample_stride: self.sample_stride,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Check the target image before any work starts
///
/// # Errors
///
/// Returns `InvalidInput` if the target is missing, not a regular file,
/// empty, or lacks a supported extension.
pub fn validate_target(target: &Path) -> Result<()> {
    if !target.exists() {
        return Err(invalid_input(target, &"could not find target image"));
    }
    let metadata = target
        .metadata()
        .map_err(file_system(target, "inspect target"))?;
    if !metadata.is_file() {
        return Err(invalid_input(target, &"target is not a file"));
    }
    if metadata.len() == 0 {
        return Err(invalid_input(target, &"target file is empty"));
    }
    if !has_supported_extension(target) {
        return Err(invalid_input(
            target,
            &format!("unsupported file type, expected one of {}", SUPPORTED_EXTENSIONS.join(", ")),
        ));
    }
    Ok(())
}

/// Check the tile directory before any work starts
///
/// # Errors
///
/// Returns `InvalidInput` if the path is missing, not a directory, or has
/// no entries at all.
pub fn validate_tile_dir(tiles: &Path) -> Result<()> {
    if !tiles.exists() {
        return Err(invalid_input(tiles, &"could not find tile directory"));
    }
    if !tiles.is_dir() {
        return Err(invalid_input(tiles, &"tile source is not a directory"));
    }
    let mut entries = std::fs::read_dir(tiles).map_err(file_system(tiles, "read directory"))?;
    if entries.next().is_none() {
        return Err(invalid_input(tiles, &"there are no files in the tile directory"));
    }
    Ok(())
}

/// Validates inputs and drives one pipeline run from parsed arguments
pub struct MosaicRunner {
    cli: Cli,
    progress: ProgressManager,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    ///
    /// Progress bars are hidden when the arguments ask for quiet output.
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        Self { cli, progress }
    }

    /// Bars the run draws on, shared with the log writer
    pub const fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// Parsed arguments this runner was built from
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Validate inputs, build the mosaic and return its path
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for bad inputs, `InvalidParameter` for bad
    /// tuning flags, and any error raised by the pipeline.
    pub fn run(&self) -> Result<PathBuf> {
        let start_time = Instant::now();
        info!(
            target_image = %self.cli.target.display(),
            tiles = %self.cli.tiles.display(),
            tile_percentage = self.cli.tile_percentage,
            upscale = self.cli.upscale,
            sample_stride = self.cli.sample_stride,
            "starting mosaic"
        );

        validate_target(&self.cli.target)?;
        validate_tile_dir(&self.cli.tiles)?;

        let output = MosaicPipeline::new(self.cli.config())?
            .with_output_dir(&self.cli.output_dir)
            .keep_workspace(self.cli.keep_workspace)
            .with_progress(self.progress.clone())
            .run(&self.cli.target, &self.cli.tiles)?;

        info!(
            path = %output.display(),
            elapsed = ?start_time.elapsed(),
            "mosaic finished"
        );
        Ok(output)
    }
}
