//! End-to-end run: canvas, grid, tile index, composition and output

use crate::algorithm::composer::{MosaicComposer, prepare_canvas};
use crate::algorithm::indexer::{TileIndexer, TileSet};
use crate::io::configuration::{DEFAULT_OUTPUT_DIR, MosaicConfig};
use crate::io::error::{Result, file_system};
use crate::io::image::save_image;
use crate::io::index_file::{read_index, write_index};
use crate::io::naming::{default_output_name, unique_output_path};
use crate::io::progress::ProgressManager;
use crate::io::workspace::Workspace;
use crate::spatial::grid::GridLayout;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runs the indexer and composer for one target image
///
/// The thumbnail size equals the grid cell size of the upscaled target, so
/// the canvas is prepared before the tiles are indexed. The index is written
/// to disk in full and read back before composition starts.
pub struct MosaicPipeline {
    config: MosaicConfig,
    output_dir: PathBuf,
    keep_workspace: bool,
    progress: ProgressManager,
}

impl MosaicPipeline {
    /// Create a pipeline writing to the default output directory
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn new(config: MosaicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            keep_workspace: false,
            progress: ProgressManager::hidden(),
        })
    }

    /// Directory receiving the finished mosaic
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Leave thumbnails and the index file on disk after the run
    #[must_use]
    pub const fn keep_workspace(mut self, keep: bool) -> Self {
        self.keep_workspace = keep;
        self
    }

    /// Draw stage progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Configuration used by both stages
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Build a mosaic of `target` from the images in `tile_source`
    ///
    /// Returns the path of the written mosaic. Unless the workspace is kept,
    /// the index and this run's thumbnails are removed afterwards, whether or
    /// not the run succeeded; files already in the thumbnail directory stay.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target or any tile cannot be decoded
    /// - The grid has no cells or the tile directory yields no tiles
    /// - Any workspace, index or output file operation fails
    pub fn run(&self, target: &Path, tile_source: &Path) -> Result<PathBuf> {
        let mut workspace = Workspace::for_source(tile_source);
        let result = self.run_in(&mut workspace, target, tile_source);

        if !self.keep_workspace {
            match (&result, workspace.cleanup()) {
                (Ok(_), Err(cleanup_error)) => return Err(cleanup_error),
                (Err(_), Err(cleanup_error)) => {
                    warn!(%cleanup_error, "workspace left behind after failed run");
                }
                _ => {}
            }
        }
        self.progress.finish();

        result
    }

    fn run_in(
        &self,
        workspace: &mut Workspace,
        target: &Path,
        tile_source: &Path,
    ) -> Result<PathBuf> {
        let canvas = prepare_canvas(target, self.config.upscale_factor)?;
        let layout =
            GridLayout::partition(canvas.width(), canvas.height(), self.config.tile_percentage)?;
        info!(
            rows = layout.rows(),
            cols = layout.cols(),
            cell_size = layout.cell_size(),
            "partitioned canvas"
        );

        workspace.prepare()?;
        workspace.claim_thumbnails(&TileIndexer::collect_sources(tile_source)?);
        let indexed = self.build_index(tile_source, workspace, layout.cell_size())?;

        // Composition consumes only what the indexer persisted
        let tiles = TileSet {
            directory: indexed.directory,
            index: read_index(workspace.index_path())?,
        };

        let composer = MosaicComposer::new(&self.config)?.with_progress(
            self.progress.stage("matching", layout.len()),
            self.progress.stage("painting", layout.rows()),
        );
        let mosaic = composer.compose(canvas, &layout, &tiles)?;

        self.write_mosaic(&mosaic, target)
    }

    /// Index `tile_source` into the workspace and persist the index
    ///
    /// # Errors
    ///
    /// Returns an error if indexing fails or the index cannot be written.
    pub fn build_index(
        &self,
        tile_source: &Path,
        workspace: &Workspace,
        cell_size: u32,
    ) -> Result<TileSet> {
        let tile_set = TileIndexer::new(&self.config, (cell_size, cell_size))?
            .with_progress(self.progress.stage("indexing", 0))
            .index_directory(tile_source, workspace.tile_dir())?;

        write_index(&tile_set.index, workspace.index_path())?;
        info!(
            tiles = tile_set.index.len(),
            index = %workspace.index_path().display(),
            "wrote tile index"
        );
        Ok(tile_set)
    }

    /// Save the mosaic under a fresh name in the output directory
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created, no free
    /// name is found, or encoding fails.
    pub fn write_mosaic(&self, mosaic: &RgbImage, target: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(file_system(&self.output_dir, "create output directory"))?;

        let name = default_output_name(target)?;
        let path = unique_output_path(&self.output_dir, &name)?;
        save_image(mosaic, &path)?;

        info!(path = %path.display(), "wrote mosaic");
        Ok(path)
    }
}
