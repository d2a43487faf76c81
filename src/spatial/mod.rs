//! Spatial layout of the mosaic canvas
//!
//! This module contains:
//! - Pixel rectangles and their clipping
//! - Grid partitioning of the canvas into square cells

/// Grid partitioning and cell geometry
pub mod grid;

pub use grid::{GridCell, GridLayout, PixelRect};
