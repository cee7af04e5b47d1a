use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Shown for any failed login so the response never reveals which field was wrong.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Account ID is not present in session")]
    AccountNotInSession,
    #[error("Account ID {0:?} not found in database despite having an active session")]
    AccountNotInDatabase(i32),
    #[error("Login failed due to an incorrect username or password")]
    InvalidCredentials,
}

impl AuthError {
    fn login_required() -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Authentication required".to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AccountNotInSession => {
                tracing::debug!("{}", self);

                Self::login_required()
            }
            Self::AccountNotInDatabase(account_id) => {
                tracing::debug!(account_id = %account_id, "{}", self);

                Self::login_required()
            }
            Self::InvalidCredentials => {
                tracing::debug!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: INVALID_LOGIN_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
