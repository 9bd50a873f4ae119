//! Image decode/encode helpers around the `image` crate.

use crate::error::OcrError;
use crate::raster::{RasterImage, Resolution};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// Decode an in-memory image (format sniffed from the bytes).
pub fn decode(bytes: &[u8]) -> Result<RasterImage, OcrError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| OcrError::CorruptInput(format!("Failed to decode image: {}", e)))?;

    Ok(RasterImage::from_dynamic(img, Resolution::default()))
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<RasterImage, OcrError> {
    if !path.exists() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    decode(&bytes).map_err(|e| match e {
        OcrError::CorruptInput(msg) => {
            OcrError::CorruptInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Encode a raster into the given wire format.
pub fn encode(image: &RasterImage, format: ImageFormat) -> Result<Vec<u8>, OcrError> {
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);

    // BMP and JPEG writers reject an alpha channel
    let result = match format {
        ImageFormat::Bmp | ImageFormat::Jpeg => {
            image.to_dynamic().to_rgb8().write_to(&mut cursor, format)
        }
        _ => image.pixels().write_to(&mut cursor, format),
    };

    result.map_err(|e| {
        OcrError::Recognition(format!(
            "Failed to encode {}x{} image as {:?}: {}",
            image.width(),
            image.height(),
            format,
            e
        ))
    })?;

    Ok(buffer)
}
