//! Tests for mean-color signatures, sampling stride and L1 distance

#[cfg(test)]
mod tests {
    use crate::solid;
    use image::{Rgb, RgbImage};
    use photomosaic::analysis::signature::{ColorSignature, MAX_DISTANCE};
    use photomosaic::spatial::grid::PixelRect;

    fn checker() -> RgbImage {
        // Raster order: (0,0), (1,0), (0,1), (1,1)
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([10, 20, 30]));
        image.put_pixel(0, 1, Rgb([1, 1, 1]));
        image.put_pixel(1, 1, Rgb([2, 2, 2]));
        image
    }

    // Tests channel means are truncated rather than rounded
    // Verified by rounding the mean instead of dividing
    #[test]
    fn test_exact_mean_is_floored() {
        let signature = ColorSignature::of_image(&checker(), 1);

        // Sums 13, 23, 33 over 4 pixels: 3.25, 5.75, 8.25
        assert_eq!(signature, Some(ColorSignature::new(3, 5, 8)));
    }

    // Tests stride samples every Nth pixel in raster order starting with the first
    // Verified by sampling from the second pixel
    #[test]
    fn test_stride_samples_raster_positions() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([10, 10, 10]));
        image.put_pixel(1, 0, Rgb([200, 200, 200]));
        image.put_pixel(0, 1, Rgb([21, 21, 21]));
        image.put_pixel(1, 1, Rgb([200, 200, 200]));

        let signature = ColorSignature::of_image(&image, 2);

        assert_eq!(signature, Some(ColorSignature::new(15, 15, 15)));
    }

    #[test]
    fn test_zero_stride_behaves_like_exact_mean() {
        assert_eq!(
            ColorSignature::of_image(&checker(), 0),
            ColorSignature::of_image(&checker(), 1)
        );
    }

    // Tests saturated channels stay at the top of the range
    // Verified by accumulating into u8
    #[test]
    fn test_saturated_image_stays_in_range() {
        let image = solid(64, 64, [255, 255, 255]);

        let signature = ColorSignature::of_image(&image, 1);

        assert_eq!(signature, Some(ColorSignature::new(255, 255, 255)));
    }

    // Tests regions are clipped to the image before averaging
    // Verified by removing the clip and reading out of bounds
    #[test]
    fn test_region_overhanging_image_is_clipped() {
        let mut image = solid(4, 4, [0, 0, 0]);
        for y in 0..4 {
            image.put_pixel(3, y, Rgb([100, 50, 25]));
        }

        let region = PixelRect::new(3, 0, 8, 8);
        let signature = ColorSignature::of_region(&image, region, 1);

        assert_eq!(signature, Some(ColorSignature::new(100, 50, 25)));
    }

    #[test]
    fn test_region_outside_image_has_no_signature() {
        let image = solid(4, 4, [9, 9, 9]);

        assert_eq!(
            ColorSignature::of_region(&image, PixelRect::new(4, 0, 8, 4), 1),
            None
        );
        assert_eq!(
            ColorSignature::of_region(&image, PixelRect::new(1, 1, 1, 3), 1),
            None
        );
    }

    // Tests distance is symmetric and zero on identical signatures
    // Verified by using signed subtraction for one channel
    #[test]
    fn test_distance_symmetry_and_identity() {
        let samples = [
            ColorSignature::new(0, 0, 0),
            ColorSignature::new(255, 0, 0),
            ColorSignature::new(12, 200, 99),
            ColorSignature::new(255, 255, 255),
        ];

        for a in samples {
            assert_eq!(a.distance(a), 0);
            for b in samples {
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
    }

    // Tests distance is the L1 sum, not Euclidean
    // Verified by squaring the channel differences
    #[test]
    fn test_distance_is_sum_of_channel_differences() {
        let a = ColorSignature::new(200, 10, 10);
        let red = ColorSignature::new(255, 0, 0);

        assert_eq!(a.distance(red), 55 + 10 + 10);
        assert_eq!(
            ColorSignature::new(0, 0, 0).distance(ColorSignature::new(255, 255, 255)),
            MAX_DISTANCE
        );
    }

    #[test]
    fn test_serializes_as_channel_array() {
        let json = serde_json::to_string(&ColorSignature::new(255, 0, 7));
        assert_eq!(json.ok().as_deref(), Some("[255,0,7]"));

        let parsed: Result<ColorSignature, _> = serde_json::from_str("[1, 2, 3]");
        assert_eq!(parsed.ok(), Some(ColorSignature::new(1, 2, 3)));

        let out_of_range: Result<ColorSignature, _> = serde_json::from_str("[256, 0, 0]");
        assert!(out_of_range.is_err());
    }
}
