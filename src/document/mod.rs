//! Paged documents that can be rasterized one page at a time.

pub mod pdf;

pub use pdf::PdfDocument;

use crate::error::OcrError;
use crate::raster::{RasterImage, CANONICAL_DPI};

/// Rendering settings for a single page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Resolution the page is drawn at
    pub dpi: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { dpi: CANONICAL_DPI }
    }
}

/// A document whose pages render to raster images on demand.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Render page `index` (0-based). Fails with `OcrError::Document` when
    /// the index is out of range or the page cannot be read.
    fn render(&self, index: usize, options: &RenderOptions) -> Result<RasterImage, OcrError>;
}
