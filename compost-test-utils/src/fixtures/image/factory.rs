//! Factory functions for generating encoded test images in memory.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::TestError;

/// Encode a solid red image of the given size.
///
/// # Arguments
/// - `width` - Image width in pixels
/// - `height` - Image height in pixels
/// - `format` - Encoding, e.g. `ImageFormat::Png`
pub fn solid_image(width: u32, height: u32, format: ImageFormat) -> Result<Vec<u8>, TestError> {
    let image = RgbImage::from_pixel(width, height, Rgb([255, 0, 0]));

    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format)?;

    Ok(bytes.into_inner())
}

/// Decode an image and return its `(width, height)`.
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), TestError> {
    let image = image::load_from_memory(bytes)?;

    Ok((image.width(), image.height()))
}
