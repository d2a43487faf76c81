//! Tile indexing: thumbnails and color signatures for a directory of images
//!
//! Every file is handled independently on the rayon pool and the results are
//! merged into one index only after all of them succeed. A supported file that
//! fails to decode aborts the whole run, so the index never silently lacks a
//! tile that was present in the source directory.

use crate::algorithm::index::{TileIndex, TileRecord};
use crate::analysis::signature::ColorSignature;
use crate::io::configuration::{MosaicConfig, has_supported_extension};
use crate::io::error::{Result, file_system, invalid_input, invalid_parameter};
use crate::io::image::{load_rgb, resize_thumbnail, save_thumbnail};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Thumbnail directory and the index describing its contents
#[derive(Debug, Clone)]
pub struct TileSet {
    /// Directory holding one thumbnail per indexed tile
    pub directory: PathBuf,
    /// Signatures keyed by thumbnail file name
    pub index: TileIndex,
}

/// Builds thumbnails and signatures for candidate tile images
pub struct TileIndexer {
    thumbnail_size: (u32, u32),
    sample_stride: usize,
    progress: ProgressBar,
}

impl TileIndexer {
    /// Create an indexer producing thumbnails of the given size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or the
    /// configuration is invalid.
    pub fn new(config: &MosaicConfig, thumbnail_size: (u32, u32)) -> Result<Self> {
        config.validate()?;
        if thumbnail_size.0 == 0 || thumbnail_size.1 == 0 {
            return Err(invalid_parameter(
                "thumbnail_size",
                &format!("{}x{}", thumbnail_size.0, thumbnail_size.1),
                &"both dimensions must be at least one pixel",
            ));
        }
        Ok(Self {
            thumbnail_size,
            sample_stride: config.sample_stride,
            progress: ProgressBar::hidden(),
        })
    }

    /// Report each finished file on `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Thumbnail dimensions (width, height)
    pub const fn thumbnail_size(&self) -> (u32, u32) {
        self.thumbnail_size
    }

    /// Supported image files directly inside `source_dir`, sorted by path
    ///
    /// Symlinks to image files count as images. Subdirectories, dangling
    /// links and files with other extensions are skipped.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the directory or an entry cannot be read.
    pub fn collect_sources(source_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries =
            std::fs::read_dir(source_dir).map_err(file_system(source_dir, "read directory"))?;

        for entry in entries {
            let entry = entry.map_err(file_system(source_dir, "read directory entry"))?;
            let path = entry.path();
            // Symlinks are followed; a dangling one is skipped like any non-file
            let is_file = match std::fs::metadata(&path) {
                Ok(metadata) => metadata.is_file(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
                Err(e) => return Err(file_system(&path, "inspect entry")(e)),
            };

            if is_file && has_supported_extension(&path) {
                files.push(path);
            } else {
                debug!(path = %path.display(), "skipping non-image entry");
            }
        }

        files.sort();
        Ok(files)
    }

    /// Index every supported image in `source_dir` into `tile_dir`
    ///
    /// Creates `tile_dir` if needed; existing thumbnails with the same name
    /// are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source directory cannot be listed or `tile_dir` cannot be created
    /// - Any supported file cannot be decoded (`Decode`)
    /// - A thumbnail cannot be written
    /// - A file name is not valid UTF-8
    pub fn index_directory(&self, source_dir: &Path, tile_dir: &Path) -> Result<TileSet> {
        std::fs::create_dir_all(tile_dir).map_err(file_system(tile_dir, "create tile directory"))?;

        let sources = Self::collect_sources(source_dir)?;
        self.progress.set_length(sources.len() as u64);
        info!(
            tiles = sources.len(),
            width = self.thumbnail_size.0,
            height = self.thumbnail_size.1,
            "indexing tiles"
        );

        let records = sources
            .par_iter()
            .map(|source| {
                let record = self.index_file(source, tile_dir);
                self.progress.inc(1);
                record
            })
            .collect::<Result<Vec<TileRecord>>>()?;
        self.progress.finish();

        Ok(TileSet {
            directory: tile_dir.to_path_buf(),
            index: records.into_iter().collect(),
        })
    }

    /// Decode, shrink, summarize and persist a single tile
    ///
    /// # Errors
    ///
    /// Returns `Decode` for unreadable images, `InvalidInput` for non-UTF-8
    /// names, and `ImageExport` if the thumbnail cannot be written.
    pub fn index_file(&self, source: &Path, tile_dir: &Path) -> Result<TileRecord> {
        let id = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| invalid_input(source, &"tile file name is not valid UTF-8"))?
            .to_string();

        let image = load_rgb(source)?;
        let (width, height) = self.thumbnail_size;
        let thumbnail = resize_thumbnail(&image, width, height);

        let signature = ColorSignature::of_image(&thumbnail, self.sample_stride)
            .ok_or_else(|| invalid_input(source, &"thumbnail has no pixels"))?;

        let thumbnail_path = tile_dir.join(&id);
        save_thumbnail(&thumbnail, &thumbnail_path)?;
        debug!(tile = %id, ?signature, "indexed tile");

        Ok(TileRecord {
            id,
            signature,
            thumbnail: thumbnail_path,
        })
    }
}
