use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to deliver email to {to:?}: {reason}")]
    Delivery { to: Vec<String>, reason: String },
}

impl IntoResponse for MailError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
