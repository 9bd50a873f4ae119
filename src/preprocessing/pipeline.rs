use crate::raster::RasterImage;
use std::time::Instant;

use super::steps;

/// Tunables for the preprocessing sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessOptions {
    pub min_width: u32,
    pub min_height: u32,
    pub scale_factor: f64,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            min_width: steps::pad::MIN_WIDTH,
            min_height: steps::pad::MIN_HEIGHT,
            scale_factor: steps::scale::DEFAULT_FACTOR,
        }
    }
}

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub image: RasterImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Whether the conditional upscale was applied
    pub scaled: bool,
    pub steps: Vec<StepTiming>,
}

/// Pad, invert and conditionally scale images ahead of recognition.
///
/// Stateless apart from its options; the same input always yields the same
/// pixels.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    options: PreprocessOptions,
    max_dimension: u32,
}

impl Preprocessor {
    /// `max_dimension` is the largest side the recognizer accepts.
    pub fn new(options: PreprocessOptions, max_dimension: u32) -> Self {
        Self {
            options,
            max_dimension,
        }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn process(&self, image: &RasterImage) -> Preprocessed {
        let start = Instant::now();
        let mut timings = Vec::with_capacity(3);
        let opts = self.options;

        let padded = run_step("pad", &mut timings, || {
            steps::pad::apply(image, opts.min_width, opts.min_height)
        });

        let inverted = run_step("invert", &mut timings, || steps::invert::apply(&padded));
        drop(padded);

        let scaled = steps::scale::fits(
            inverted.width(),
            inverted.height(),
            opts.scale_factor,
            self.max_dimension,
        );
        let image = run_step("scale", &mut timings, || {
            steps::scale::apply(&inverted, opts.scale_factor, self.max_dimension)
        });

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Preprocessed to {}x{} in {}ms (scaled: {}, steps: {:?})",
            image.width(),
            image.height(),
            total_time_ms,
            scaled,
            timings
        );

        Preprocessed {
            image,
            total_time_ms,
            scaled,
            steps: timings,
        }
    }
}

fn run_step<F>(name: &'static str, timings: &mut Vec<StepTiming>, step_fn: F) -> RasterImage
where
    F: FnOnce() -> RasterImage,
{
    let step_start = Instant::now();
    let result = step_fn();
    timings.push(StepTiming {
        name,
        time_ms: step_start.elapsed().as_millis() as u64,
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Resolution;
    use image::{Rgba, RgbaImage};

    fn white_text_on_black(width: u32, height: u32) -> RasterImage {
        let mut pixels = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        pixels.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        RasterImage::new(pixels, Resolution::uniform(144.0))
    }

    #[test]
    fn test_runs_pad_invert_scale_in_order() {
        let preprocessor = Preprocessor::new(PreprocessOptions::default(), 10_000);
        let result = preprocessor.process(&white_text_on_black(100, 40));

        // pad: 116x80, scale x2: 232x160
        assert_eq!((result.image.width(), result.image.height()), (232, 160));
        assert!(result.scaled);
        assert_eq!(result.image.resolution(), Resolution::uniform(96.0));

        let names: Vec<&str> = result.steps.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["pad", "invert", "scale"]);
    }

    #[test]
    fn test_border_becomes_black_after_inversion() {
        let preprocessor = Preprocessor::new(PreprocessOptions::default(), 10_000);
        let result = preprocessor.process(&white_text_on_black(100, 40));
        assert_eq!(result.image.pixels().get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_scale_decision_uses_padded_size() {
        // 484 + 16 = 500 fits exactly under 1000 at factor 2
        let preprocessor = Preprocessor::new(PreprocessOptions::default(), 1000);
        let fits = preprocessor.process(&white_text_on_black(484, 100));
        assert!(fits.scaled);
        assert_eq!(fits.image.width(), 1000);

        let too_big = preprocessor.process(&white_text_on_black(485, 100));
        assert!(!too_big.scaled);
        assert_eq!((too_big.image.width(), too_big.image.height()), (501, 116));
        assert_eq!(too_big.image.resolution(), Resolution::uniform(144.0));
    }

    #[test]
    fn test_deterministic() {
        let preprocessor = Preprocessor::new(PreprocessOptions::default(), 10_000);
        let source = white_text_on_black(37, 23);
        let first = preprocessor.process(&source);
        let second = preprocessor.process(&source);
        assert_eq!(first.image, second.image);
    }
}
