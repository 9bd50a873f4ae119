//! Model and training data cache shared by the engines.

use crate::error::OcrError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Cache directory for downloaded models
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ocr-extract")
}

/// Ensure `filename` exists under `dir`, downloading it from `url` if needed
pub fn ensure_downloaded(url: &str, dir: &Path, filename: &str) -> Result<PathBuf, OcrError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        OcrError::Configuration(format!(
            "Failed to create cache directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(filename);

    if !path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &path)?;
        tracing::info!("Downloaded {} to {:?}", filename, path);
    } else {
        tracing::debug!("Using cached {:?}", path);
    }

    Ok(path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::Configuration(format!("Failed to download {}: {}", url, e)))?;

    // Read response body before creating the file so a failed download
    // never leaves a truncated file in the cache
    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::Configuration(format!("Failed to read response body: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        OcrError::Configuration(format!("Failed to create {}: {}", path.display(), e))
    })?;

    file.write_all(&buffer)
        .map_err(|e| OcrError::Configuration(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_file_is_not_downloaded_again() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.rten"), b"cached").unwrap();

        // An unroutable URL proves no request is made
        let path = ensure_downloaded("http://invalid.invalid/model.rten", dir.path(), "model.rten")
            .unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"cached");
    }

    #[test]
    fn test_cache_dir_is_namespaced() {
        assert!(cache_dir().ends_with("ocr-extract"));
    }
}
