use crate::error::OcrError;
use crate::output::OutputFormat;
use crate::pipeline::PageFailurePolicy;
use crate::preprocessing::steps::pad::BORDER;
use crate::preprocessing::PreprocessOptions;
use std::path::PathBuf;

/// Locale used when no language is requested
pub const DEFAULT_LOCALE: &str = "en-US";
/// Characters of the result echoed to the console
pub const DEFAULT_PREVIEW_CHARS: usize = 500;
/// Upper bound for the minimum content width and height
pub const MAX_MIN_SIZE: u32 = 16_384;

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Engine name; `None` picks the first compiled-in engine
    pub engine: Option<String>,
    /// Requested recognition language tag
    pub language: Option<String>,
    /// Language tried when none is requested
    pub default_locale: String,
    pub preprocess: PreprocessOptions,
    pub page_failure: PageFailurePolicy,
    pub output_format: OutputFormat,
    pub preview_chars: usize,
    pub tessdata_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: None,
            language: None,
            default_locale: DEFAULT_LOCALE.to_string(),
            preprocess: PreprocessOptions::default(),
            page_failure: PageFailurePolicy::default(),
            output_format: OutputFormat::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            tessdata_path: None,
        }
    }
}

impl Config {
    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), OcrError> {
        let PreprocessOptions {
            min_width,
            min_height,
            scale_factor: factor,
        } = self.preprocess;

        if !factor.is_finite() || factor <= 0.0 {
            return Err(OcrError::Configuration(format!(
                "Scale factor must be a positive number, got {}",
                factor
            )));
        }

        if min_width == 0 || min_height == 0 {
            return Err(OcrError::Configuration(
                "Minimum image size must be at least 1px".to_string(),
            ));
        }

        if min_width > MAX_MIN_SIZE || min_height > MAX_MIN_SIZE {
            return Err(OcrError::Configuration(format!(
                "Minimum image size must be at most {}px, got {}x{}",
                MAX_MIN_SIZE, min_width, min_height
            )));
        }

        // Every padded image is at least this large on its shorter side
        let smallest = f64::from(min_width.min(min_height) + BORDER);
        if (smallest * factor).round() < 1.0 {
            return Err(OcrError::Configuration(format!(
                "Scale factor {} shrinks a {}px side to nothing",
                factor, smallest
            )));
        }

        if self.default_locale.trim().is_empty() {
            return Err(OcrError::Configuration(
                "Default locale must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_scale_factor() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut config = Config::default();
            config.preprocess.scale_factor = factor;
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_rejects_zero_min_size() {
        let mut config = Config::default();
        config.preprocess.min_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_min_size() {
        let mut config = Config::default();
        config.preprocess.min_width = u32::MAX - 4;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        config.preprocess.min_width = MAX_MIN_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_factor_that_collapses_image() {
        let mut config = Config::default();
        // 80px * 0.001 rounds to 0
        config.preprocess.scale_factor = 0.001;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("0.001"));

        // 80px * 0.01 rounds to 1
        config.preprocess.scale_factor = 0.01;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_locale() {
        let config = Config {
            default_locale: " ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
