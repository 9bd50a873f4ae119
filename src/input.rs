//! Input validation and routing between the image and document paths.

use crate::codec;
use crate::document::PdfDocument;
use crate::error::OcrError;
use crate::pipeline::{DocumentPipeline, DocumentText, PageText};
use std::path::Path;

/// Extensions handled as single images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif"];
/// Extensions handled as paged documents
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
    Document,
}

/// Route by extension alone (case-insensitive)
pub fn classify(path: &Path) -> Result<InputKind, OcrError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Image)
    } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Document)
    } else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Err(OcrError::UnsupportedFormat(format!(
            "{} is not a supported image or document (expected one of: {})",
            name,
            IMAGE_EXTENSIONS
                .iter()
                .chain(DOCUMENT_EXTENSIONS)
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Check the input exists, then classify it. Does no decoding.
pub fn validate(path: &Path) -> Result<InputKind, OcrError> {
    if !path.is_file() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }
    classify(path)
}

/// Text extracted from one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Image(String),
    Document(DocumentText),
}

impl Extraction {
    /// Full text as written to the output file
    pub fn text(&self) -> String {
        match self {
            Extraction::Image(text) => text.clone(),
            Extraction::Document(doc) => doc.render(),
        }
    }

    /// Page list; a single image counts as page 0
    pub fn pages(&self) -> Vec<PageText> {
        match self {
            Extraction::Image(text) => vec![PageText {
                page_index: 0,
                text: text.clone(),
            }],
            Extraction::Document(doc) => doc.pages.clone(),
        }
    }
}

/// Validate, decode and OCR one file
pub fn extract(path: &Path, pipeline: &DocumentPipeline) -> Result<Extraction, OcrError> {
    match validate(path)? {
        InputKind::Image => {
            tracing::info!("Image detected. Starting preprocessing and OCR...");
            let image = codec::open(path)?;
            Ok(Extraction::Image(pipeline.process_image(image)?))
        }
        InputKind::Document => {
            tracing::info!("PDF document detected. Starting page-by-page rendering...");
            let document = PdfDocument::open(path)?;
            Ok(Extraction::Document(pipeline.process_document_pages(&document)?))
        }
    }
}
