//! Text extraction from images and scanned PDFs.
//!
//! Every image is padded, inverted and (when it fits) upscaled before it is
//! handed to a [`RecognitionCapability`]; documents are rasterized and
//! recognized one page at a time, in order.

pub mod assemble;
pub mod codec;
pub mod config;
pub mod document;
pub mod engine;
pub mod engines;
pub mod error;
pub mod input;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod preprocessing;
pub mod raster;

pub use config::Config;
pub use document::{PageSource, PdfDocument, RenderOptions};
pub use engine::{RecognitionCapability, RecognitionResult, RecognizedLine, RecognizedWord};
pub use error::{ErrorKind, OcrError};
pub use input::{Extraction, InputKind};
pub use language::Language;
pub use pipeline::{CancelFlag, DocumentPipeline, DocumentText, PageFailurePolicy, PageText};
pub use raster::{RasterImage, Resolution};
