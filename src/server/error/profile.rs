use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum ProfileError {
    /// Every account owns a profile from the moment it is created, so a missing profile is
    /// never an expected state.
    #[error("Profile for account ID {0:?} not found")]
    NotFound(i32),
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
