use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::{validation::ValidationError, InternalServerError};

pub const INVALID_IMAGE_MESSAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Failed to decode avatar image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Avatar image format could not be determined")]
    UnknownFormat,
    #[error("Failed to encode resized avatar image: {0}")]
    Encode(#[source] image::ImageError),
}

impl AvatarError {
    /// True when the upload itself is at fault rather than the server.
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::UnknownFormat)
    }
}

impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        match self {
            Self::Decode(_) | Self::UnknownFormat => {
                tracing::debug!("{}", self);

                ValidationError::field("avatar", INVALID_IMAGE_MESSAGE).into_response()
            }
            Self::Encode(_) => InternalServerError(self).into_response(),
        }
    }
}
