use crate::error::OcrError;
use crate::language::Language;
use crate::raster::RasterImage;

/// A single recognized word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedWord {
    pub text: String,
}

/// One line of recognized text, with its words in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedLine {
    /// Line text as the engine renders it, native spacing included
    pub text: String,
    pub words: Vec<RecognizedWord>,
}

impl RecognizedLine {
    pub fn new<W, S>(text: impl Into<String>, words: W) -> Self
    where
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            words: words
                .into_iter()
                .map(|w| RecognizedWord { text: w.into() })
                .collect(),
        }
    }
}

/// OCR processing result: lines top to bottom, exactly as the engine produced them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
    pub lines: Vec<RecognizedLine>,
}

/// Trait that all OCR engines must implement
pub trait RecognitionCapability: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Language tags this engine can recognize, in preference order
    fn available_languages(&self) -> Vec<String>;

    fn supports_language(&self, tag: &str) -> bool {
        self.available_languages()
            .iter()
            .any(|l| l.eq_ignore_ascii_case(tag))
    }

    /// Largest width or height accepted by `recognize`
    fn max_image_dimension(&self) -> u32;

    /// Recognize text in an already preprocessed image
    fn recognize(
        &self,
        image: &RasterImage,
        language: &Language,
    ) -> Result<RecognitionResult, OcrError>;
}

/// Shared input checks every engine runs before touching its backend.
pub fn check_input(
    engine: &dyn RecognitionCapability,
    image: &RasterImage,
    language: &Language,
) -> Result<(), OcrError> {
    if image.is_empty() {
        return Err(OcrError::Recognition(format!(
            "Empty image ({}x{})",
            image.width(),
            image.height()
        )));
    }

    let max = engine.max_image_dimension();
    if image.width() > max || image.height() > max {
        return Err(OcrError::Recognition(format!(
            "Image {}x{} exceeds the {} engine limit of {}px",
            image.width(),
            image.height(),
            engine.name(),
            max
        )));
    }

    if !engine.supports_language(language.tag()) {
        return Err(OcrError::Recognition(format!(
            "Language '{}' is not supported by the {} engine",
            language.tag(),
            engine.name()
        )));
    }

    Ok(())
}
