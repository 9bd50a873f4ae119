//! Page-by-page OCR pipeline.
//!
//! Rasterize → preprocess → recognize → assemble, one page at a time in
//! ascending order. Rendering and recognition are the only blocking calls.

use crate::assemble::assemble;
use crate::config::Config;
use crate::document::{PageSource, RenderOptions};
use crate::engine::RecognitionCapability;
use crate::error::OcrError;
use crate::language::Language;
use crate::preprocessing::steps::pad::BORDER;
use crate::preprocessing::Preprocessor;
use crate::raster::RasterImage;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// What to do when a single page of a document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFailurePolicy {
    /// Fail the whole document, returning nothing
    #[default]
    Abort,
    /// Record a placeholder for the page and keep going
    Placeholder,
}

impl FromStr for PageFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "placeholder" | "skip" => Ok(Self::Placeholder),
            other => Err(format!(
                "unknown page failure policy '{}' (expected abort or placeholder)",
                other
            )),
        }
    }
}

/// Per-page state of a run, traced on every transition and named when a
/// page fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Rasterizing,
    Preprocessing,
    Recognizing,
    Assembling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Rasterizing => "rasterizing",
            Stage::Preprocessing => "preprocessing",
            Stage::Recognizing => "recognizing",
            Stage::Assembling => "assembling",
        })
    }
}

/// Cooperative cancellation, checked before each page
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Cancel, returning whether the flag was already set
    pub fn interrupt(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }
}

/// Text of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    /// 0-based
    pub page_index: usize,
    pub text: String,
}

/// Page texts in ascending page order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentText {
    pub pages: Vec<PageText>,
}

impl DocumentText {
    /// Aggregate into one string: a marker line, the page text, a blank line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&page_marker(page.page_index));
            out.push('\n');
            out.push_str(&page.text);
            out.push_str("\n\n");
        }
        out
    }
}

/// `--- Page N ---` for the 0-based `page_index`
pub fn page_marker(page_index: usize) -> String {
    format!("--- Page {} ---", page_index + 1)
}

pub struct DocumentPipeline {
    engine: Arc<dyn RecognitionCapability>,
    language: Language,
    preprocessor: Preprocessor,
    page_failure: PageFailurePolicy,
    cancel: Option<CancelFlag>,
}

impl DocumentPipeline {
    /// Validate the config and fix the run language.
    ///
    /// Fails with `OcrError::Configuration` when the engine offers no
    /// language at all.
    pub fn new(engine: Arc<dyn RecognitionCapability>, config: &Config) -> Result<Self, OcrError> {
        config.validate()?;

        let max = engine.max_image_dimension();
        let padded = config
            .preprocess
            .min_width
            .max(config.preprocess.min_height)
            .saturating_add(BORDER);
        if padded > max {
            return Err(OcrError::Configuration(format!(
                "Minimum image size plus border ({}px) exceeds the {} engine limit of {}px",
                padded,
                engine.name(),
                max
            )));
        }

        let language = Language::select(
            config.language.as_deref(),
            &config.default_locale,
            engine.as_ref(),
        )?;
        let preprocessor = Preprocessor::new(config.preprocess, max);

        tracing::info!(
            "Using {} engine with language '{}'",
            engine.name(),
            language.tag()
        );

        Ok(Self {
            engine,
            language,
            preprocessor,
            page_failure: config.page_failure,
            cancel: None,
        })
    }

    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// OCR a single image. Errors pass through untouched.
    pub fn process_image(&self, image: RasterImage) -> Result<String, OcrError> {
        let mut stage = Stage::Preprocessing;
        self.recognize_image(image, &mut stage)
    }

    /// OCR every page of a document, returning the aggregated text.
    pub fn process_document(&self, document: &dyn PageSource) -> Result<String, OcrError> {
        Ok(self.process_document_pages(document)?.render())
    }

    /// OCR every page of a document, keeping page texts separate.
    pub fn process_document_pages(
        &self,
        document: &dyn PageSource,
    ) -> Result<DocumentText, OcrError> {
        let page_count = document.page_count();
        tracing::info!("Pages found: {}", page_count);

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                tracing::warn!("Cancelled before page {}", page_index + 1);
                return Err(OcrError::Cancelled { page: page_index });
            }

            tracing::info!("Processing page {} of {}...", page_index + 1, page_count);
            let start = Instant::now();
            let mut stage = Stage::Rasterizing;

            let text = match self.process_page(document, page_index, &mut stage) {
                Ok(text) => text,
                Err(e) => match self.page_failure {
                    PageFailurePolicy::Abort => {
                        tracing::error!(
                            "Page {} failed while {}: {}",
                            page_index + 1,
                            stage,
                            e
                        );
                        return Err(e.on_page(page_index));
                    }
                    PageFailurePolicy::Placeholder => {
                        tracing::warn!(
                            "Page {} failed while {}, writing placeholder: {}",
                            page_index + 1,
                            stage,
                            e
                        );
                        format!("[page {} could not be processed: {}]", page_index + 1, e)
                    }
                },
            };

            tracing::debug!(
                "Page {} done in {}ms ({} chars)",
                page_index + 1,
                start.elapsed().as_millis(),
                text.chars().count()
            );
            pages.push(PageText { page_index, text });
        }

        Ok(DocumentText { pages })
    }

    fn process_page(
        &self,
        document: &dyn PageSource,
        page_index: usize,
        stage: &mut Stage,
    ) -> Result<String, OcrError> {
        advance(stage, Stage::Rasterizing);
        // No upscaling at render time; preprocessing owns the scale factor
        let image = document.render(page_index, &RenderOptions::default())?;
        self.recognize_image(image, stage)
    }

    /// Takes ownership so each page raster is freed as soon as it is used
    fn recognize_image(&self, image: RasterImage, stage: &mut Stage) -> Result<String, OcrError> {
        advance(stage, Stage::Preprocessing);
        let prepared = self.preprocessor.process(&image);
        drop(image);

        advance(stage, Stage::Recognizing);
        let result = self.engine.recognize(&prepared.image, &self.language)?;
        drop(prepared);

        advance(stage, Stage::Assembling);
        Ok(assemble(&result, &self.language))
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    tracing::trace!("{} -> {}", stage, next);
    *stage = next;
}
