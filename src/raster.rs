//! Immutable raster value passed between pipeline stages.

use image::{ColorType, DynamicImage, RgbaImage};

/// Resolution every rescaled image is normalised to, and the value assumed
/// when a source carries no usable metadata.
pub const CANONICAL_DPI: f32 = 96.0;

/// Horizontal and vertical resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Resolution {
    pub const fn uniform(dpi: f32) -> Self {
        Self {
            horizontal: dpi,
            vertical: dpi,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::uniform(CANONICAL_DPI)
    }
}

/// A decoded image in 8-bit RGBA with its resolution metadata.
///
/// Stages never mutate a `RasterImage`; they borrow one and build a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
    resolution: Resolution,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage, resolution: Resolution) -> Self {
        Self { pixels, resolution }
    }

    /// Convert any decoded image to RGBA, keeping the given resolution.
    pub fn from_dynamic(image: DynamicImage, resolution: Resolution) -> Self {
        Self::new(image.into_rgba8(), resolution)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixel_format(&self) -> ColorType {
        ColorType::Rgba8
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.pixels.clone())
    }
}
