use crate::raster::RasterImage;
use image::{Rgba, RgbaImage};

/// Invert color channels, leaving alpha alone.
///
/// Recognizers are tuned for dark text on a light background; light-on-dark
/// sources (dark mode screenshots) read far better once flipped.
pub fn apply(image: &RasterImage) -> RasterImage {
    let source = image.pixels();
    let inverted = RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        Rgba([255 - r, 255 - g, 255 - b, a])
    });

    RasterImage::new(inverted, image.resolution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Resolution;

    fn sample() -> RasterImage {
        let pixels = RgbaImage::from_fn(7, 5, |x, y| {
            Rgba([(x * 30) as u8, (y * 50) as u8, (x * y) as u8, (200 + x) as u8])
        });
        RasterImage::new(pixels, Resolution::uniform(72.0))
    }

    #[test]
    fn test_invert_flips_color_channels() {
        let result = apply(&sample());
        assert_eq!(result.pixels().get_pixel(3, 2).0, [255 - 90, 255 - 100, 255 - 6, 203]);
    }

    #[test]
    fn test_invert_is_an_involution() {
        let original = sample();
        let twice = apply(&apply(&original));
        assert_eq!(twice, original);
    }

    #[test]
    fn test_alpha_untouched() {
        let original = sample();
        let result = apply(&original);
        for (before, after) in original.pixels().pixels().zip(result.pixels().pixels()) {
            assert_eq!(before.0[3], after.0[3]);
        }
    }
}
