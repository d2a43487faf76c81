//! Photomosaic generation by mean-color tile matching
//!
//! The target image is split into a uniform grid of square cells. Candidate
//! tile images are shrunk to the cell size and summarized by their mean color,
//! and every cell is replaced by the tile whose mean color is closest to its own.

#![forbid(unsafe_code)]

/// Tile indexing, nearest-match search and mosaic composition
pub mod algorithm;
/// Color signatures of images and regions
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Grid partitioning of the canvas
pub mod spatial;

pub use io::error::{MosaicError, Result};
