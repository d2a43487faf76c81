//! JSON persistence of the tile index
//!
//! The document is an object mapping each tile file name to `[r, g, b]`.
//! Keys are written in the index's ascending order, so indexing the same
//! directory twice produces identical bytes.

use crate::algorithm::index::TileIndex;
use crate::io::error::{MosaicError, Result, file_system};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write the index as pretty-printed JSON, replacing any existing file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created or flushed
/// - Serialization fails
pub fn write_index(index: &TileIndex, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(file_system(path, "create index"))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, index).map_err(|source| {
        MosaicError::IndexFormat {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(file_system(path, "write index"))
}

/// Read a complete index back from disk
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The document is not an object of 3-element arrays with components in [0, 255]
pub fn read_index(path: &Path) -> Result<TileIndex> {
    let file = File::open(path).map_err(file_system(path, "open index"))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| MosaicError::IndexFormat {
        path: path.to_path_buf(),
        source,
    })
}
