//! OCR engine implementations
//!
//! This module contains implementations of the RecognitionCapability trait
//! for different OCR backends. Engines are conditionally compiled based on
//! feature flags.

mod download;

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

use crate::config::Config;
use crate::engine::RecognitionCapability;
use crate::error::OcrError;
use std::sync::Arc;

/// Names of the engines compiled into this build, default first
pub fn available_engines() -> Vec<&'static str> {
    let mut engines = Vec::new();

    #[cfg(feature = "engine-ocrs")]
    engines.push("ocrs");

    #[cfg(feature = "engine-leptess")]
    engines.push("leptess");

    engines
}

/// Name of the engine used when none is configured
pub fn default_engine() -> Option<&'static str> {
    available_engines().first().copied()
}

/// Initialize the engine named in the config (or the default one)
pub fn create(config: &Config) -> Result<Arc<dyn RecognitionCapability>, OcrError> {
    let name = match config.engine.as_deref() {
        Some(name) => name,
        None => default_engine().ok_or_else(|| {
            OcrError::Configuration(
                "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string(),
            )
        })?,
    };

    match name {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => {
            tracing::info!("Initializing ocrs engine...");
            Ok(Arc::new(ocrs::OcrsEngine::new()?))
        }
        #[cfg(feature = "engine-leptess")]
        "leptess" => {
            tracing::info!("Initializing leptess engine...");
            Ok(Arc::new(leptess::LeptessEngine::new(
                config.tessdata_path.clone(),
            )?))
        }
        other => Err(OcrError::Configuration(format!(
            "Unknown OCR engine '{}' (available: {})",
            other,
            available_engines().join(", ")
        ))),
    }
}
