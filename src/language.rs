//! Recognition language selection and the word-joining rule.

use crate::engine::RecognitionCapability;
use crate::error::OcrError;

/// Language used for a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    tag: String,
    uses_whitespace_joining: bool,
}

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let uses_whitespace_joining = uses_whitespace_joining(&tag);
        Self {
            tag,
            uses_whitespace_joining,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Primary subtag, i.e. the text before the first `-`
    pub fn primary(&self) -> &str {
        primary_subtag(&self.tag)
    }

    /// False for scripts written without spaces between words
    pub fn uses_whitespace_joining(&self) -> bool {
        self.uses_whitespace_joining
    }

    /// Pick the language to run with.
    ///
    /// Exact match, then the first available tag with the same primary
    /// subtag, then the first available tag. Fails only when the engine
    /// reports no languages at all.
    pub fn select(
        requested: Option<&str>,
        default_locale: &str,
        engine: &dyn RecognitionCapability,
    ) -> Result<Self, OcrError> {
        let requested = requested
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default_locale);
        let available = engine.available_languages();

        if engine.supports_language(requested) {
            return Ok(Self::new(requested));
        }

        let primary = primary_subtag(requested);
        if let Some(tag) = available
            .iter()
            .find(|tag| primary_subtag(tag).eq_ignore_ascii_case(primary))
        {
            tracing::info!("Language '{}' not available, using '{}'", requested, tag);
            return Ok(Self::new(tag.clone()));
        }

        match available.first() {
            Some(tag) => {
                tracing::warn!(
                    "No {} language available for '{}', falling back to '{}'",
                    engine.name(),
                    requested,
                    tag
                );
                Ok(Self::new(tag.clone()))
            }
            None => Err(OcrError::Configuration(format!(
                "The {} engine reports no recognition languages",
                engine.name()
            ))),
        }
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

fn uses_whitespace_joining(tag: &str) -> bool {
    let native = primary_subtag(tag).eq_ignore_ascii_case("zh") || tag.eq_ignore_ascii_case("ja");
    !native
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecognitionResult;
    use crate::error::ErrorKind;
    use crate::raster::RasterImage;

    struct Langs(Vec<&'static str>);

    impl RecognitionCapability for Langs {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn description(&self) -> &'static str {
            "language list only"
        }

        fn available_languages(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }

        fn max_image_dimension(&self) -> u32 {
            1000
        }

        fn recognize(&self, _: &RasterImage, _: &Language) -> Result<RecognitionResult, OcrError> {
            Ok(RecognitionResult::default())
        }
    }

    #[test]
    fn test_exact_match() {
        let engine = Langs(vec!["en-US", "ru-RU"]);
        let lang = Language::select(Some("ru-RU"), "en-US", &engine).unwrap();
        assert_eq!(lang.tag(), "ru-RU");
    }

    #[test]
    fn test_primary_subtag_match() {
        let engine = Langs(vec!["en-US", "ru-RU"]);
        let lang = Language::select(Some("ru-BY"), "en-US", &engine).unwrap();
        assert_eq!(lang.tag(), "ru-RU");
    }

    #[test]
    fn test_primary_subtag_is_not_a_prefix_match() {
        // "e" shares a prefix with "en" but not the primary subtag
        let engine = Langs(vec!["de-DE", "en-US"]);
        let lang = Language::select(Some("e"), "en-US", &engine).unwrap();
        assert_eq!(lang.tag(), "de-DE");
    }

    #[test]
    fn test_unknown_falls_back_to_first_available() {
        let engine = Langs(vec!["en-US"]);
        let lang = Language::select(Some("xx-XX"), "de-DE", &engine).unwrap();
        assert_eq!(lang.tag(), "en-US");
    }

    #[test]
    fn test_missing_request_uses_default_locale() {
        let engine = Langs(vec!["en-US", "de-DE"]);
        let lang = Language::select(None, "de-DE", &engine).unwrap();
        assert_eq!(lang.tag(), "de-DE");

        let blank = Language::select(Some("  "), "de-DE", &engine).unwrap();
        assert_eq!(blank.tag(), "de-DE");
    }

    #[test]
    fn test_no_languages_is_configuration_error() {
        let err = Language::select(Some("en-US"), "en-US", &Langs(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_joining_rule() {
        assert!(!Language::new("zh-CN").uses_whitespace_joining());
        assert!(!Language::new("ZH-Hant").uses_whitespace_joining());
        assert!(!Language::new("ja").uses_whitespace_joining());
        assert!(!Language::new("JA").uses_whitespace_joining());
        assert!(Language::new("en-US").uses_whitespace_joining());
        assert!(Language::new("ru-RU").uses_whitespace_joining());
        // Only the bare tag counts for Japanese
        assert!(Language::new("ja-JP").uses_whitespace_joining());
    }

    #[test]
    fn test_primary() {
        assert_eq!(Language::new("zh-Hans-CN").primary(), "zh");
        assert_eq!(Language::new("en").primary(), "en");
    }
}
