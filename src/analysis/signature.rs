//! Mean-color signatures and the L1 distance used for tile matching
//!
//! A signature is a lossy 3-channel summary: two visually different tiles
//! with the same mean color are indistinguishable to the matcher.

use crate::spatial::grid::PixelRect;
use image::{GenericImageView, Rgb};
use serde::{Deserialize, Serialize};

/// Largest possible distance between two signatures (3 * 255)
pub const MAX_DISTANCE: u32 = 765;

/// Floored per-channel mean of the sampled pixels of a region
///
/// Persisted as a 3-element array `[red, green, blue]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct ColorSignature {
    /// Mean red intensity
    pub red: u8,
    /// Mean green intensity
    pub green: u8,
    /// Mean blue intensity
    pub blue: u8,
}

impl From<[u8; 3]> for ColorSignature {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl From<ColorSignature> for [u8; 3] {
    fn from(signature: ColorSignature) -> Self {
        signature.channels()
    }
}

impl ColorSignature {
    /// Build a signature from explicit channel values
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels in RGB order
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Sum of absolute per-channel differences (L1 in RGB space)
    pub const fn distance(self, other: Self) -> u32 {
        self.red.abs_diff(other.red) as u32
            + self.green.abs_diff(other.green) as u32
            + self.blue.abs_diff(other.blue) as u32
    }

    /// Signature of a whole image
    ///
    /// Returns `None` for an image without pixels.
    pub fn of_image<I>(image: &I, sample_stride: usize) -> Option<Self>
    where
        I: GenericImageView<Pixel = Rgb<u8>>,
    {
        let (width, height) = image.dimensions();
        Self::of_region(image, PixelRect::new(0, 0, width, height), sample_stride)
    }

    /// Signature of a rectangular region
    ///
    /// The region is clipped to the image first. Pixels are visited in raster
    /// order and every `sample_stride`-th one is sampled, starting with the
    /// first; a stride of 1 gives the exact mean. Returns `None` when no pixel
    /// of the region lies inside the image.
    pub fn of_region<I>(image: &I, region: PixelRect, sample_stride: usize) -> Option<Self>
    where
        I: GenericImageView<Pixel = Rgb<u8>>,
    {
        let (width, height) = image.dimensions();
        let region = region.clipped(width, height)?;
        let stride = sample_stride.max(1);

        let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
        let mut samples = 0u64;
        let mut position = 0usize;

        for y in region.top..region.bottom {
            for x in region.left..region.right {
                if position % stride == 0 {
                    let Rgb([r, g, b]) = image.get_pixel(x, y);
                    red += u64::from(r);
                    green += u64::from(g);
                    blue += u64::from(b);
                    samples += 1;
                }
                position += 1;
            }
        }

        if samples == 0 {
            return None;
        }

        // Integer division truncates, which is the floor for non-negative sums
        let mean = |sum: u64| u8::try_from(sum / samples).unwrap_or(u8::MAX);
        Some(Self::new(mean(red), mean(green), mean(blue)))
    }
}
