//! PDF page rasterizer built on hayro.
//!
//! Every page is drawn in full (text, vector paths and images) onto a white
//! background at `RenderOptions::dpi`.

use super::{PageSource, RenderOptions};
use crate::error::OcrError;
use crate::raster::{RasterImage, Resolution};
use hayro::{InterpreterSettings, Pdf, RenderSettings};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

/// Points per inch in PDF user space
const POINTS_PER_INCH: f32 = 72.0;

/// PDF document handler that renders pages in memory.
pub struct PdfDocument {
    pdf: Pdf,
    page_count: usize,
}

impl PdfDocument {
    /// Load a PDF file
    pub fn open(path: &Path) -> Result<Self, OcrError> {
        if !path.exists() {
            return Err(OcrError::NotFound(path.to_path_buf()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data).map_err(|e| match e {
            OcrError::Document(msg) => {
                OcrError::Document(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load a PDF from memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, OcrError> {
        let pdf = Pdf::new(Arc::new(data))
            .map_err(|e| OcrError::Document(format!("Failed to parse PDF: {:?}", e)))?;
        let page_count = pdf.pages().len();

        Ok(Self { pdf, page_count })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render(&self, index: usize, options: &RenderOptions) -> Result<RasterImage, OcrError> {
        let page = self.pdf.pages().get(index).ok_or_else(|| {
            OcrError::Document(format!(
                "Page index {} out of range (document has {} pages)",
                index, self.page_count
            ))
        })?;

        let media_box = page.media_box();
        let width = (media_box.x1 - media_box.x0) as f32;
        let height = (media_box.y1 - media_box.y0) as f32;
        if !(width > 0.0 && height > 0.0) {
            return Err(OcrError::Document(format!(
                "Invalid page size on page {}: {}x{}",
                index + 1,
                width,
                height
            )));
        }

        let scale = options.dpi / POINTS_PER_INCH;
        let settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };
        let pixmap = hayro::render(page, &InterpreterSettings::default(), &settings);

        let (px_width, px_height) = (u32::from(pixmap.width()), u32::from(pixmap.height()));
        tracing::debug!(
            "Rendered page {} ({}x{}pt) to {}x{}px",
            index + 1,
            width,
            height,
            px_width,
            px_height
        );

        let flattened = over_white(pixmap.data_as_u8_slice());
        let pixels = RgbaImage::from_raw(px_width, px_height, flattened).ok_or_else(|| {
            OcrError::Document(format!(
                "Rendered page {} has an unexpected buffer size",
                index + 1
            ))
        })?;

        Ok(RasterImage::new(pixels, Resolution::uniform(options.dpi)))
    }
}

/// Flatten premultiplied RGBA onto an opaque white background
fn over_white(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let uncovered = 255 - px[3];
            [
                px[0].saturating_add(uncovered),
                px[1].saturating_add(uncovered),
                px[2].saturating_add(uncovered),
                255,
            ]
        })
        .collect()
}
