//! Result file and console preview.

use crate::error::OcrError;
use crate::input::Extraction;
use crate::pipeline::PageText;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<input>.txt` with the aggregated text
    #[default]
    Text,
    /// `<input>.json` with per-page text
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

/// JSON output document
#[derive(Serialize)]
struct JsonReport<'a> {
    source: String,
    engine: &'a str,
    language: &'a str,
    pages: Vec<PageText>,
}

/// Sibling output path: the full input file name plus the format extension
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Write the extraction next to the input file and return the path written
pub fn write(
    input: &Path,
    extraction: &Extraction,
    format: OutputFormat,
    engine: &str,
    language: &str,
) -> Result<PathBuf, OcrError> {
    let path = output_path(input, format);

    let contents = match format {
        OutputFormat::Text => extraction.text(),
        OutputFormat::Json => {
            let report = JsonReport {
                source: input.display().to_string(),
                engine,
                language,
                pages: extraction.pages(),
            };
            serde_json::to_string_pretty(&report).map_err(|e| {
                OcrError::Io(std::io::Error::other(format!("Failed to serialize result: {}", e)))
            })?
        }
    };

    std::fs::write(&path, contents)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(path)
}

/// First `max_chars` characters, with a note when the text was cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}\n... [text truncated for console] ...", &text[..cut]),
        None => text.to_string(),
    }
}
