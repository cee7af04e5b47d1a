//! Avatar normalization.
//!
//! Stored avatars never exceed [`AVATAR_MAX_DIMENSION`] pixels on either side. Larger images
//! are scaled down to fit that box with their aspect ratio preserved and re-encoded in the
//! format they were uploaded in. Smaller images are stored untouched.

use std::{io::Cursor, path::Path};

use image::{imageops::FilterType, DynamicImage, ImageFormat};

use crate::server::{
    error::{avatar::AvatarError, Error},
    media::storage::MediaStorage,
};

/// Maximum width and height of a stored avatar in pixels.
pub const AVATAR_MAX_DIMENSION: u32 = 100;

/// Scales `(width, height)` to fit within a `max` x `max` box, preserving aspect ratio.
///
/// Dimensions already within the box are returned unchanged. The shorter side is rounded to
/// the nearest pixel and never drops below 1.
pub fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let larger = u64::from(width.max(height));
    let scale = |dimension: u32| -> u32 {
        let scaled = (u64::from(dimension) * u64::from(max) + larger / 2) / larger;
        scaled.clamp(1, u64::from(max)) as u32
    };

    (scale(width), scale(height))
}

/// Determines the image format from the file contents, falling back to the file extension.
pub fn detect_format(bytes: &[u8], path_hint: &Path) -> Result<ImageFormat, AvatarError> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path_hint))
        .map_err(|_| AvatarError::UnknownFormat)
}

/// Resizes avatar images to the configured bounding box.
#[derive(Clone, Copy, Debug)]
pub struct AvatarNormalizer {
    max_dimension: u32,
}

impl Default for AvatarNormalizer {
    fn default() -> Self {
        Self::new(AVATAR_MAX_DIMENSION)
    }
}

impl AvatarNormalizer {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Normalizes an encoded image.
    ///
    /// # Arguments
    /// - `bytes` - Encoded image as uploaded
    /// - `path_hint` - File name used to determine the format when the contents do not
    ///
    /// # Returns
    /// - `Ok(Some(Vec<u8>))` - Image was larger than the box; resized and re-encoded bytes
    /// - `Ok(None)` - Image already fits; the original bytes should be kept
    /// - `Err(AvatarError::Decode | UnknownFormat)` - Bytes are not a readable image
    /// - `Err(AvatarError::Encode)` - Resized image could not be encoded
    pub fn normalize(&self, bytes: &[u8], path_hint: &Path) -> Result<Option<Vec<u8>>, AvatarError> {
        let format = detect_format(bytes, path_hint)?;
        let image = image::load_from_memory_with_format(bytes, format).map_err(AvatarError::Decode)?;

        let (width, height) = (image.width(), image.height());
        let (new_width, new_height) = bounded_dimensions(width, height, self.max_dimension);

        if (new_width, new_height) == (width, height) {
            return Ok(None);
        }

        let mut resized = image.resize_exact(new_width, new_height, FilterType::Lanczos3);
        // JPEG has no alpha channel
        if format == ImageFormat::Jpeg {
            resized = DynamicImage::ImageRgb8(resized.to_rgb8());
        }

        let mut encoded = Cursor::new(Vec::new());
        resized
            .write_to(&mut encoded, format)
            .map_err(AvatarError::Encode)?;

        Ok(Some(encoded.into_inner()))
    }

    /// Normalizes a stored avatar in place.
    ///
    /// Decoding and resizing run on the blocking thread pool. A missing file is skipped.
    ///
    /// # Returns
    /// - `Ok(true)` - File was resized and atomically replaced
    /// - `Ok(false)` - File is missing or already fits the box
    /// - `Err(Error)` - File could not be read, decoded or written
    pub async fn normalize_file(&self, storage: &MediaStorage, relative: &str) -> Result<bool, Error> {
        let Some(bytes) = storage.read(relative).await? else {
            tracing::debug!("Avatar {} does not exist, skipping resize", relative);

            return Ok(false);
        };

        let normalizer = *self;
        let path_hint = storage.path(relative)?;
        let resized =
            tokio::task::spawn_blocking(move || normalizer.normalize(&bytes, &path_hint)).await??;

        match resized {
            Some(resized) => {
                storage.write_atomic(relative, resized).await?;
                tracing::debug!("Resized avatar {}", relative);

                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Normalizes an upload before it is stored, returning the bytes to write.
    pub async fn normalize_upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<Vec<u8>, Error> {
        let normalizer = *self;
        let path_hint = Path::new(file_name).to_path_buf();

        let normalized = tokio::task::spawn_blocking(move || {
            normalizer
                .normalize(&bytes, &path_hint)
                .map(|resized| resized.unwrap_or(bytes))
        })
        .await??;

        Ok(normalized)
    }
}
