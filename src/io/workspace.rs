//! Per-run working files: the thumbnail directory and the index file
//!
//! A thumbnail directory left over from earlier runs, or made by the user, is
//! reused as is. Cleanup then removes only the thumbnails this run claimed and
//! keeps every other entry; a directory the run created itself is removed whole.

use crate::io::configuration::{INDEX_EXTENSION, WORKSPACE_SUFFIX};
use crate::io::error::{Result, file_system};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of the thumbnail directory and index file for one tile source
///
/// For a source `photos/` these are `photos_tiles/` and `photos_tiles.json`,
/// both siblings of the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    tile_dir: PathBuf,
    index_path: PathBuf,
    prepared: bool,
    created_tile_dir: bool,
    thumbnails: Vec<PathBuf>,
}

impl Workspace {
    /// Derive workspace paths from the tile source directory
    pub fn for_source(source_dir: &Path) -> Self {
        let name = source_dir
            .file_name()
            .map_or_else(|| "tiles".into(), |name| name.to_string_lossy());
        let parent = source_dir.parent().unwrap_or_else(|| Path::new(""));
        let base = format!("{name}{WORKSPACE_SUFFIX}");

        Self {
            tile_dir: parent.join(&base),
            index_path: parent.join(format!("{base}.{INDEX_EXTENSION}")),
            prepared: false,
            created_tile_dir: false,
            thumbnails: Vec::new(),
        }
    }

    /// Directory receiving resized thumbnails
    pub fn tile_dir(&self) -> &Path {
        &self.tile_dir
    }

    /// Path of the persisted index
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Whether [`Self::prepare`] made the thumbnail directory
    pub const fn created_tile_dir(&self) -> bool {
        self.created_tile_dir
    }

    /// Thumbnail paths this run may write and therefore removes on cleanup
    pub fn thumbnails(&self) -> &[PathBuf] {
        &self.thumbnails
    }

    /// Create the thumbnail directory if it does not exist
    ///
    /// Remembers whether the directory was created here, which decides how
    /// much of it [`Self::cleanup`] removes.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the directory cannot be checked or created.
    pub fn prepare(&mut self) -> Result<()> {
        let existed = self
            .tile_dir
            .try_exists()
            .map_err(file_system(&self.tile_dir, "inspect tile directory"))?;
        std::fs::create_dir_all(&self.tile_dir)
            .map_err(file_system(&self.tile_dir, "create tile directory"))?;

        self.prepared = true;
        self.created_tile_dir |= !existed;
        Ok(())
    }

    /// Record the thumbnails written for the given source images
    ///
    /// Thumbnails share the source file name, so each source claims
    /// `tile_dir/<file name>`.
    pub fn claim_thumbnails<'a>(&mut self, sources: impl IntoIterator<Item = &'a PathBuf>) {
        let tile_dir = &self.tile_dir;
        self.thumbnails.extend(
            sources
                .into_iter()
                .filter_map(|source| source.file_name())
                .map(|name| tile_dir.join(name)),
        );
    }

    /// Remove what this run put on disk
    ///
    /// The index file is always removed. The thumbnail directory is removed
    /// entirely when this run created it; otherwise only the claimed
    /// thumbnails are deleted. Nothing is touched before [`Self::prepare`],
    /// and entries that are already gone are not an error.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if an existing entry cannot be removed.
    pub fn cleanup(&self) -> Result<()> {
        if !self.prepared {
            return Ok(());
        }

        remove_if_present(std::fs::remove_file(&self.index_path))
            .map_err(file_system(&self.index_path, "remove index"))?;

        if self.created_tile_dir {
            remove_if_present(std::fs::remove_dir_all(&self.tile_dir))
                .map_err(file_system(&self.tile_dir, "remove tile directory"))?;
        } else {
            for thumbnail in &self.thumbnails {
                remove_if_present(std::fs::remove_file(thumbnail))
                    .map_err(file_system(thumbnail, "remove thumbnail"))?;
            }
        }

        debug!(
            tile_dir = %self.tile_dir.display(),
            whole_directory = self.created_tile_dir,
            "workspace removed"
        );
        Ok(())
    }
}

fn remove_if_present(result: std::io::Result<()>) -> std::io::Result<()> {
    match result {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
