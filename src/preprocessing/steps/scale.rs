use crate::raster::{RasterImage, Resolution, CANONICAL_DPI};
use image::imageops::{self, FilterType};

/// Upscale factor that measurably helps small fonts
pub const DEFAULT_FACTOR: f64 = 2.0;

/// Upscale by `factor` unless either scaled side would exceed `max_dimension`.
///
/// There is no clamped fallback: an image that would not fit is returned
/// as-is. Scaled output is `round(w * factor)` by `round(h * factor)`,
/// resampled bicubically, with resolution reset to 96 dpi.
pub fn apply(image: &RasterImage, factor: f64, max_dimension: u32) -> RasterImage {
    if !fits(image.width(), image.height(), factor, max_dimension) {
        tracing::debug!(
            "Skipping scale: {}x{} * {} exceeds {}",
            image.width(),
            image.height(),
            factor,
            max_dimension
        );
        return image.clone();
    }

    let (width, height) = scaled_size(image.width(), image.height(), factor);
    let resized = imageops::resize(image.pixels(), width, height, FilterType::CatmullRom);

    RasterImage::new(resized, Resolution::uniform(CANONICAL_DPI))
}

/// Whether both scaled sides stay within `max_dimension`
pub fn fits(width: u32, height: u32, factor: f64, max_dimension: u32) -> bool {
    let max = f64::from(max_dimension);
    f64::from(width) * factor <= max && f64::from(height) * factor <= max
}

fn scaled_size(width: u32, height: u32, factor: f64) -> (u32, u32) {
    (
        (f64::from(width) * factor).round() as u32,
        (f64::from(height) * factor).round() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage::new(
            RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            Resolution::uniform(300.0),
        )
    }

    #[test]
    fn test_scales_by_factor_and_resets_dpi() {
        let result = apply(&image(80, 90), DEFAULT_FACTOR, 10_000);
        assert_eq!((result.width(), result.height()), (160, 180));
        assert_eq!(result.resolution(), Resolution::uniform(96.0));
    }

    #[test]
    fn test_rounds_fractional_sizes() {
        // 81 * 1.5 = 121.5 -> 122, 33 * 1.5 = 49.5 -> 50
        let result = apply(&image(81, 33), 1.5, 10_000);
        assert_eq!((result.width(), result.height()), (122, 50));
    }

    #[test]
    fn test_skips_when_width_would_exceed_limit() {
        let source = image(600, 100);
        let result = apply(&source, 2.0, 1000);
        assert_eq!(result, source);
        assert_eq!(result.resolution(), Resolution::uniform(300.0));
    }

    #[test]
    fn test_skips_when_height_would_exceed_limit() {
        let source = image(100, 501);
        let result = apply(&source, 2.0, 1000);
        assert_eq!((result.width(), result.height()), (100, 501));
    }

    #[test]
    fn test_exact_limit_still_scales() {
        let result = apply(&image(500, 500), 2.0, 1000);
        assert_eq!((result.width(), result.height()), (1000, 1000));
    }

    #[test]
    fn test_fits_condition() {
        assert!(fits(500, 10, 2.0, 1000));
        assert!(!fits(501, 10, 2.0, 1000));
        assert!(!fits(10, 501, 2.0, 1000));
    }

    #[test]
    fn test_uniform_image_stays_uniform() {
        let result = apply(&image(20, 20), 2.0, 10_000);
        assert!(result.pixels().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
