//! Uniform square grid over the mosaic canvas
//!
//! Cell size is derived from the canvas width, and the row/column counts are
//! rounded rather than floored or ceiled. The final row or column may therefore
//! run past the image (clipped when used) or stop short of it, leaving a thin
//! border of original pixels.

use crate::io::error::{Result, invalid_parameter};

/// Pixel rectangle with exclusive right/bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive)
    pub left: u32,
    /// Top edge (inclusive)
    pub top: u32,
    /// Right edge (exclusive)
    pub right: u32,
    /// Bottom edge (exclusive)
    pub bottom: u32,
}

impl PixelRect {
    /// Create a rectangle from its edges
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent in pixels
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent in pixels
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Intersect with an image of the given size
    ///
    /// Returns `None` when nothing of the rectangle is inside the image.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self {
            left: self.left.min(width),
            top: self.top.min(height),
            right: self.right.min(width),
            bottom: self.bottom.min(height),
        };
        (clipped.width() > 0 && clipped.height() > 0).then_some(clipped)
    }
}

/// One grid position and the canvas region it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Row index, counted from the top
    pub row: usize,
    /// Column index, counted from the left
    pub col: usize,
    /// Region of the canvas, possibly extending past its bounds
    pub rect: PixelRect,
}

/// Row-major partition of a canvas into square cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    cell_size: u32,
    rows: usize,
    cols: usize,
}

impl GridLayout {
    /// Partition a canvas using a cell size relative to its width
    ///
    /// `size = round(width * tile_percentage)`, `cols = round(width / size)`,
    /// `rows = round(height / size)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the percentage is not positive and finite,
    /// or if the resulting cell size rounds to zero.
    pub fn partition(width: u32, height: u32, tile_percentage: f64) -> Result<Self> {
        if !tile_percentage.is_finite() || tile_percentage <= 0.0 {
            return Err(invalid_parameter(
                "tile_percentage",
                &tile_percentage,
                &"must be positive",
            ));
        }
        let size = (f64::from(width) * tile_percentage).round();
        if size < 1.0 {
            return Err(invalid_parameter(
                "tile_percentage",
                &tile_percentage,
                &format!("cell size rounds to zero for a canvas {width} pixels wide"),
            ));
        }
        Self::with_cell_size(width, height, size as u32)
    }

    /// Partition a canvas with an explicit cell edge length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `cell_size` is zero.
    pub fn with_cell_size(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be at least one pixel",
            ));
        }
        let size = f64::from(cell_size);
        let cols = (f64::from(width) / size).round() as usize;
        let rows = (f64::from(height) / size).round() as usize;

        Ok(Self {
            cell_size,
            rows,
            cols,
        })
    }

    /// Edge length of every cell in pixels
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of cell rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the layout has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at a grid position, or `None` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<GridCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let size = self.cell_size;
        let (r, c) = (row as u32, col as u32);
        Some(GridCell {
            row,
            col,
            rect: PixelRect::new(size * c, size * r, size * (c + 1), size * (r + 1)),
        })
    }

    /// All cells in row-major order from the top-left
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).filter_map(move |col| self.cell(row, col)))
    }
}
