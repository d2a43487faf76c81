//! Tests for grid partitioning, cell geometry and rectangle clipping

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::spatial::grid::{GridLayout, PixelRect};

    // Tests cell size and counts for the reference 100x100 scenario
    // Verified by using floor instead of round for the cell size
    #[test]
    fn test_partition_reference_canvas() {
        let layout = GridLayout::partition(100, 100, 0.1).unwrap();

        assert_eq!(layout.cell_size(), 10);
        assert_eq!(layout.rows(), 10);
        assert_eq!(layout.cols(), 10);
        assert_eq!(layout.len(), 100);
    }

    // Tests counts are rounded, not floored or ceiled
    // Verified by truncating width / size
    #[test]
    fn test_partition_rounds_counts() {
        let layout = GridLayout::partition(1000, 500, 0.015).unwrap();

        assert_eq!(layout.cell_size(), 15);
        // 1000 / 15 = 66.7, 500 / 15 = 33.3
        assert_eq!(layout.cols(), 67);
        assert_eq!(layout.rows(), 33);
        assert_eq!(layout.cells().count(), 67 * 33);
    }

    // Tests cells cover an evenly divisible canvas exactly once
    // Verified by offsetting rectangles by one pixel
    #[test]
    fn test_cells_cover_canvas_without_gaps_or_overlaps() {
        let (width, height) = (40u32, 30u32);
        let layout = GridLayout::with_cell_size(width, height, 10).unwrap();
        let mut coverage = vec![0u8; (width * height) as usize];

        for cell in layout.cells() {
            for y in cell.rect.top..cell.rect.bottom {
                for x in cell.rect.left..cell.rect.right {
                    if let Some(count) = coverage.get_mut((y * width + x) as usize) {
                        *count += 1;
                    }
                }
            }
        }

        assert_eq!(layout.len(), 4 * 3);
        assert!(coverage.iter().all(|&count| count == 1));
    }

    // Tests horizontally adjacent cells share exactly one vertical edge
    // Verified by using size * col + 1 for the left edge
    #[test]
    fn test_adjacent_cells_share_vertical_edge() {
        let layout = GridLayout::with_cell_size(50, 50, 7).unwrap();

        for row in 0..layout.rows() {
            for col in 0..layout.cols() - 1 {
                let left = layout.cell(row, col).unwrap().rect;
                let right = layout.cell(row, col + 1).unwrap().rect;
                assert_eq!(left.right, right.left);
                assert_eq!(left.top, right.top);
                assert_eq!(left.bottom, right.bottom);
            }
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        let layout = GridLayout::with_cell_size(30, 20, 10).unwrap();
        let order: Vec<(usize, usize)> = layout.cells().map(|c| (c.row, c.col)).collect();

        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    // Tests the last column may overshoot the canvas when counts round up
    // Verified by clamping rectangles in the partitioner
    #[test]
    fn test_last_column_may_overshoot() {
        // 100 / 40 = 2.5 rounds to 3 columns
        let layout = GridLayout::with_cell_size(100, 40, 40).unwrap();
        let last = layout.cell(0, 2).unwrap().rect;

        assert_eq!(layout.cols(), 3);
        assert_eq!(last, PixelRect::new(80, 0, 120, 40));
        assert_eq!(last.clipped(100, 40), Some(PixelRect::new(80, 0, 100, 40)));
    }

    #[test]
    fn test_cell_outside_grid_is_none() {
        let layout = GridLayout::with_cell_size(20, 20, 10).unwrap();

        assert!(layout.cell(2, 0).is_none());
        assert!(layout.cell(0, 2).is_none());
    }

    // Tests cell sizes that round to zero are rejected
    // Verified by removing the zero-size check
    #[test]
    fn test_zero_cell_size_is_rejected() {
        let result = GridLayout::partition(10, 10, 0.01);
        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "tile_percentage",
                ..
            })
        ));

        assert!(GridLayout::with_cell_size(10, 10, 0).is_err());
        assert!(GridLayout::partition(10, 10, f64::NAN).is_err());
        assert!(GridLayout::partition(10, 10, -0.5).is_err());
    }

    #[test]
    fn test_flat_canvas_yields_empty_layout() {
        // 100 x 2 with 10 pixel cells: 2 / 10 rounds to zero rows
        let layout = GridLayout::with_cell_size(100, 2, 10).unwrap();

        assert!(layout.is_empty());
        assert_eq!(layout.cells().count(), 0);
    }

    #[test]
    fn test_rect_dimensions_and_clipping() {
        let rect = PixelRect::new(5, 5, 15, 25);

        assert_eq!(rect.width(), 10);
        assert_eq!(rect.height(), 20);
        assert_eq!(rect.clipped(10, 10), Some(PixelRect::new(5, 5, 10, 10)));
        assert_eq!(rect.clipped(5, 100), None);
    }
}
