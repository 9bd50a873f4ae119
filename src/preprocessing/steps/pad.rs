use crate::raster::RasterImage;
use image::{imageops, Rgba, RgbaImage};

/// Border added on top of the larger of the image and the minimum size
pub const BORDER: u32 = 16;
/// Smallest content area worth handing to a recognizer
pub const MIN_WIDTH: u32 = 64;
pub const MIN_HEIGHT: u32 = 64;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Center the image on a white canvas so no glyph touches the edge.
///
/// Output is `max(w + 16, min_width + 16)` by `max(h + 16, min_height + 16)`;
/// the source is placed at floor-divided offsets and copied unchanged.
pub fn apply(image: &RasterImage, min_width: u32, min_height: u32) -> RasterImage {
    let width = image
        .width()
        .max(min_width)
        .saturating_add(BORDER);
    let height = image
        .height()
        .max(min_height)
        .saturating_add(BORDER);

    let mut canvas = RgbaImage::from_pixel(width, height, WHITE);
    let x = (width - image.width()) / 2;
    let y = (height - image.height()) / 2;
    imageops::replace(&mut canvas, image.pixels(), i64::from(x), i64::from(y));

    RasterImage::new(canvas, image.resolution())
}
