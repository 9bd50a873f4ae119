//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::engine::{
    check_input, RecognitionCapability, RecognitionResult, RecognizedLine,
};
use crate::error::OcrError;
use crate::language::Language;
use crate::raster::RasterImage;
use image::DynamicImage;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams};
use rten::Model;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// ocrs has no hard limit; this keeps detection memory bounded
const MAX_IMAGE_DIMENSION: u32 = 10_000;

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new OCR processor, downloading models if needed
    pub fn new() -> Result<Self, OcrError> {
        tracing::info!("Initializing ocrs OCR engine...");

        let dir = cache_dir();
        let detection_model_path =
            ensure_downloaded(DETECTION_MODEL_URL, &dir, "text-detection.rten")?;
        let recognition_model_path =
            ensure_downloaded(RECOGNITION_MODEL_URL, &dir, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            OcrError::Configuration(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::Configuration(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| OcrError::Configuration(format!("Failed to create OCR engine: {}", e)))?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }

    fn recognize_lines(&self, img: DynamicImage) -> Result<Vec<RecognizedLine>, OcrError> {
        // HWC RGB is what ImageSource::from_bytes expects
        let rgb_img = img.into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::Recognition(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::Recognition(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::Recognition(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::Recognition(format!("Failed to recognize text: {}", e)))?;

        // Lines the recognizer could not read come back as None
        Ok(line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .map(|line| {
                RecognizedLine::new(line.to_string(), line.words().map(|w| w.to_string()))
            })
            .collect())
    }
}

impl RecognitionCapability for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn available_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["en".to_string()]
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

        let lines = self.recognize_lines(image.to_dynamic())?;
        tracing::debug!(
            "ocrs recognized {} lines in {}x{} image",
            lines.len(),
            image.width(),
            image.height()
        );

        Ok(RecognitionResult { lines })
    }
}
