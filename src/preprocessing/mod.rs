//! Image preprocessing module for OCR enhancement
//!
//! Every image goes through the same fixed sequence before recognition:
//! pad, invert, then conditionally upscale.

pub mod pipeline;
pub mod steps;

pub use pipeline::{PreprocessOptions, Preprocessed, Preprocessor, StepTiming};
