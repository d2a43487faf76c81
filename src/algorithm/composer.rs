//! Mosaic composition: match every grid cell to a tile and paint it in
//!
//! Composition runs in three passes over the canvas:
//! 1. plan: each cell's signature is read from the untouched canvas and
//!    matched against the index, cells in parallel
//! 2. load: every distinct selected thumbnail is decoded once
//! 3. paint: the canvas buffer is split into one horizontal band per grid row
//!    and the bands are painted in parallel
//!
//! Bands are disjoint slices of the pixel buffer, so painting needs no locks,
//! and the parallel iterator joining is the barrier before the canvas is saved.

use crate::algorithm::indexer::TileSet;
use crate::analysis::signature::ColorSignature;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{load_rgb, upscale};
use crate::spatial::grid::{GridCell, GridLayout};
use image::{ImageBuffer, Rgb, RgbImage, imageops};
use indicatif::ProgressBar;
use ndarray::Array2;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Decode the target, force RGB and magnify it by `upscale_factor`
///
/// # Errors
///
/// Returns `Decode` if the target cannot be read.
pub fn prepare_canvas(target: &Path, upscale_factor: u32) -> Result<RgbImage> {
    let image = load_rgb(target)?;
    let (width, height) = image.dimensions();
    let canvas = upscale(image, upscale_factor);
    info!(
        width,
        height,
        canvas_width = canvas.width(),
        canvas_height = canvas.height(),
        "prepared canvas"
    );
    Ok(canvas)
}

/// Best-match tile for every grid cell
///
/// Cells refer to positions in [`MatchPlan::tile_ids`], which lists each
/// selected tile once in order of first use (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    tile_ids: Vec<String>,
    assignments: Array2<usize>,
}

impl MatchPlan {
    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.assignments.nrows()
    }

    /// Number of cell columns
    pub fn cols(&self) -> usize {
        self.assignments.ncols()
    }

    /// Distinct tiles used by the plan
    pub fn tile_ids(&self) -> &[String] {
        &self.tile_ids
    }

    /// Position in [`Self::tile_ids`] assigned to a cell
    pub fn assignment(&self, row: usize, col: usize) -> Option<usize> {
        self.assignments.get((row, col)).copied()
    }

    /// Tile name assigned to a cell
    pub fn tile_at(&self, row: usize, col: usize) -> Option<&str> {
        self.assignment(row, col)
            .and_then(|position| self.tile_ids.get(position))
            .map(String::as_str)
    }
}

/// Replaces grid cells of a canvas with their closest tiles
pub struct MosaicComposer {
    sample_stride: usize,
    match_progress: ProgressBar,
    paint_progress: ProgressBar,
}

impl MosaicComposer {
    /// Create a composer sampling cells with the configured stride
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn new(config: &MosaicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sample_stride: config.sample_stride,
            match_progress: ProgressBar::hidden(),
            paint_progress: ProgressBar::hidden(),
        })
    }

    /// Report matched cells and painted rows on the given bars
    #[must_use]
    pub fn with_progress(mut self, matching: ProgressBar, painting: ProgressBar) -> Self {
        self.match_progress = matching;
        self.paint_progress = painting;
        self
    }

    /// Run all three passes and return the painted canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile index is empty (`EmptyIndex`)
    /// - The layout has no cells
    /// - A selected thumbnail cannot be decoded (`Decode`)
    pub fn compose(
        &self,
        mut canvas: RgbImage,
        layout: &GridLayout,
        tiles: &TileSet,
    ) -> Result<RgbImage> {
        let plan = self.plan(&canvas, layout, tiles)?;
        let thumbnails = Self::load_thumbnails(&plan, &tiles.directory)?;
        self.paint(&mut canvas, layout, &plan, &thumbnails)?;
        Ok(canvas)
    }

    /// Choose the closest tile for every cell of `layout`
    ///
    /// # Errors
    ///
    /// Returns `EmptyIndex` when there is nothing to match against, and
    /// `InvalidParameter` when the layout has no cells or a cell lies
    /// entirely outside the canvas.
    pub fn plan(
        &self,
        canvas: &RgbImage,
        layout: &GridLayout,
        tiles: &TileSet,
    ) -> Result<MatchPlan> {
        if tiles.index.is_empty() {
            return Err(MosaicError::EmptyIndex {
                path: tiles.directory.clone(),
            });
        }
        if layout.is_empty() {
            return Err(invalid_parameter(
                "grid",
                &format!("{}x{}", layout.rows(), layout.cols()),
                &"canvas is too small for a single cell",
            ));
        }

        let cells: Vec<GridCell> = layout.cells().collect();
        self.match_progress.set_length(cells.len() as u64);

        let matches = cells
            .par_iter()
            .map(|cell| {
                let tile = self.match_cell(canvas, cell, tiles);
                self.match_progress.inc(1);
                tile
            })
            .collect::<Result<Vec<&str>>>()?;
        self.match_progress.finish();

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut tile_ids = Vec::new();
        let assignments = matches
            .into_iter()
            .map(|id| {
                *positions.entry(id).or_insert_with(|| {
                    tile_ids.push(id.to_string());
                    tile_ids.len() - 1
                })
            })
            .collect::<Vec<usize>>();

        let shape = (layout.rows(), layout.cols());
        let assignments = Array2::from_shape_vec(shape, assignments)
            .map_err(|e| invalid_parameter("grid", &format!("{}x{}", shape.0, shape.1), &e))?;

        info!(
            cells = layout.len(),
            distinct_tiles = tile_ids.len(),
            "matched cells"
        );

        Ok(MatchPlan {
            tile_ids,
            assignments,
        })
    }

    fn match_cell<'a>(
        &self,
        canvas: &RgbImage,
        cell: &GridCell,
        tiles: &'a TileSet,
    ) -> Result<&'a str> {
        let signature = ColorSignature::of_region(canvas, cell.rect, self.sample_stride)
            .ok_or_else(|| {
                invalid_parameter(
                    "grid",
                    &format!("cell ({}, {})", cell.row, cell.col),
                    &"cell lies outside the canvas",
                )
            })?;

        tiles
            .index
            .nearest(signature)
            .map(|(id, _)| id)
            .ok_or_else(|| MosaicError::EmptyIndex {
                path: tiles.directory.clone(),
            })
    }

    /// Decode every thumbnail the plan selected, in plan order
    ///
    /// # Errors
    ///
    /// Returns `Decode` if any selected thumbnail cannot be read.
    pub fn load_thumbnails(plan: &MatchPlan, tile_dir: &Path) -> Result<Vec<RgbImage>> {
        plan.tile_ids
            .par_iter()
            .map(|id| load_rgb(&tile_dir.join(id)))
            .collect()
    }

    /// Paste the planned thumbnails over their cells
    ///
    /// Thumbnails overhanging the canvas are clipped; rows of pixels beyond
    /// the last grid row keep their original content.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the plan does not fit the layout or
    /// refers to a thumbnail that was not loaded.
    pub fn paint(
        &self,
        canvas: &mut RgbImage,
        layout: &GridLayout,
        plan: &MatchPlan,
        thumbnails: &[RgbImage],
    ) -> Result<()> {
        if (plan.rows(), plan.cols()) != (layout.rows(), layout.cols()) {
            return Err(invalid_parameter(
                "plan",
                &format!("{}x{}", plan.rows(), plan.cols()),
                &format!("layout is {}x{}", layout.rows(), layout.cols()),
            ));
        }

        let width = canvas.width();
        let row_bytes = width as usize * 3;
        let band_bytes = row_bytes * layout.cell_size() as usize;
        if band_bytes == 0 {
            return Ok(());
        }
        self.paint_progress.set_length(plan.rows() as u64);

        canvas
            .par_chunks_mut(band_bytes)
            .take(plan.rows())
            .enumerate()
            .try_for_each(|(row, band)| -> Result<()> {
                let band_height = (band.len() / row_bytes) as u32;
                let mut band =
                    ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, band_height, band)
                        .ok_or_else(|| invalid_parameter("band", &row, &"band buffer too small"))?;

                for col in 0..plan.cols() {
                    let (Some(cell), Some(thumbnail)) = (
                        layout.cell(row, col),
                        plan.assignment(row, col).and_then(|i| thumbnails.get(i)),
                    ) else {
                        return Err(invalid_parameter(
                            "plan",
                            &format!("cell ({row}, {col})"),
                            &"no thumbnail loaded for cell",
                        ));
                    };
                    imageops::replace(&mut band, thumbnail, i64::from(cell.rect.left), 0);
                }

                self.paint_progress.inc(1);
                Ok(())
            })?;
        self.paint_progress.finish();

        Ok(())
    }
}
