//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine. Better for noisy/messy images like phone photos
//! and the only engine here with non-Latin scripts.
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::codec;
use crate::engine::{
    check_input, RecognitionCapability, RecognitionResult, RecognizedLine,
};
use crate::error::OcrError;
use crate::language::Language;
use crate::raster::RasterImage;
use std::path::PathBuf;
use tesseract_static::tesseract::Tesseract;

/// Tesseract's own limit on image sides
const MAX_IMAGE_DIMENSION: u32 = 32_767;

/// Language tags offered by this engine, with the tessdata name for each.
/// Order matters: the first entry is the fallback language.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "eng"),
    ("de", "deu"),
    ("fr", "fra"),
    ("es", "spa"),
    ("it", "ita"),
    ("pt", "por"),
    ("nl", "nld"),
    ("ru", "rus"),
    ("uk", "ukr"),
    ("pl", "pol"),
    ("ar", "ara"),
    ("ko", "kor"),
    ("ja", "jpn"),
    ("zh-CN", "chi_sim"),
    ("zh-TW", "chi_tra"),
];

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: PathBuf,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine.
    ///
    /// `tessdata_path` overrides the download cache (e.g. `TESSDATA_PREFIX`).
    pub fn new(tessdata_path: Option<PathBuf>) -> Result<Self, OcrError> {
        let tessdata_path = tessdata_path.unwrap_or_else(|| cache_dir().join("tessdata"));

        tracing::info!("Leptess engine initialized (tessdata: {:?})", tessdata_path);

        Ok(Self { tessdata_path })
    }

    /// Ensure tessdata for `code` is available, downloading if needed
    fn ensure_tessdata(&self, code: &str) -> Result<String, OcrError> {
        ensure_downloaded(
            &tessdata_url(code),
            &self.tessdata_path,
            &format!("{}.traineddata", code),
        )?;

        // Tesseract expects the directory, not the file
        self.tessdata_path
            .to_str()
            .map(|s| s.to_string())
            .ok_or_else(|| OcrError::Configuration("Invalid tessdata path".to_string()))
    }
}

impl RecognitionCapability for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn available_languages(&self) -> Vec<String> {
        LANGUAGES.iter().map(|(tag, _)| tag.to_string()).collect()
    }

    fn max_image_dimension(&self) -> u32 {
        MAX_IMAGE_DIMENSION
    }

    fn recognize(
        &self,
        image: &RasterImage,
        language: &Language,
    ) -> Result<RecognitionResult, OcrError> {
        check_input(self, image, language)?;

        let code = tessdata_code(language.tag()).ok_or_else(|| {
            OcrError::Recognition(format!("No tessdata for language '{}'", language.tag()))
        })?;
        let datapath = self.ensure_tessdata(code)?;

        // BMP is always supported by leptonica
        let bmp_data = codec::encode(image, image::ImageFormat::Bmp)?;

        tracing::debug!(
            "Processing image: {}x{}, BMP size: {} bytes, tessdata: {}",
            image.width(),
            image.height(),
            bmp_data.len(),
            code
        );

        let mut tess = Tesseract::new(Some(&datapath), Some(code))
            .map_err(|e| OcrError::Recognition(format!("Failed to create Tesseract: {}", e)))?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::Recognition(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                image.width(),
                image.height(),
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| OcrError::Recognition(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| OcrError::Recognition(format!("Failed to get text: {}", e)))?;

        Ok(split_lines(&text))
    }
}

/// Map a language tag to its tessdata name: exact tag first, then primary subtag
fn tessdata_code(tag: &str) -> Option<&'static str> {
    let primary = tag.split('-').next().unwrap_or(tag);
    LANGUAGES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(tag))
        .or_else(|| {
            LANGUAGES
                .iter()
                .find(|(t, _)| t.split('-').next().unwrap_or(t).eq_ignore_ascii_case(primary))
        })
        .map(|(_, code)| *code)
}

/// Get tessdata download URL for a language
fn tessdata_url(code: &str) -> String {
    // Use tessdata_fast for smaller, faster downloads
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        code
    )
}

/// Tesseract returns plain text; rebuild lines and words from it
fn split_lines(text: &str) -> RecognitionResult {
    let lines = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| RecognizedLine::new(line.trim_start(), line.split_whitespace()))
        .collect();

    RecognitionResult { lines }
}
