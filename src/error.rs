use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt input: {0}")]
    CorruptInput(String),

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Page {} failed: {source}", .index + 1)]
    Page {
        index: usize,
        #[source]
        source: Box<OcrError>,
    },

    #[error("Cancelled before page {}", .page + 1)]
    Cancelled { page: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category, independent of the page context an error was wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnsupportedFormat,
    CorruptInput,
    Recognition,
    Configuration,
    Document,
    Cancelled,
    Io,
}

impl OcrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OcrError::NotFound(_) => ErrorKind::NotFound,
            OcrError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            OcrError::CorruptInput(_) => ErrorKind::CorruptInput,
            OcrError::Recognition(_) => ErrorKind::Recognition,
            OcrError::Configuration(_) => ErrorKind::Configuration,
            OcrError::Document(_) => ErrorKind::Document,
            OcrError::Page { source, .. } => source.kind(),
            OcrError::Cancelled { .. } => ErrorKind::Cancelled,
            OcrError::Io(_) => ErrorKind::Io,
        }
    }

    /// Attach a 0-based page index to an error raised while processing that page.
    pub fn on_page(self, index: usize) -> Self {
        match self {
            // Already carries its position
            OcrError::Page { .. } | OcrError::Cancelled { .. } => self,
            other => OcrError::Page {
                index,
                source: Box::new(other),
            },
        }
    }
}
