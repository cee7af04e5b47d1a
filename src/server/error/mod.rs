//! Error types for the accounts server.
//!
//! This module provides the error handling system with specialized error types for each
//! domain (authentication, configuration, form validation, profiles, avatars, mail). All
//! errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic
//! error definitions.

pub mod auth;
pub mod avatar;
pub mod config;
pub mod mail;
pub mod profile;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, avatar::AvatarError, config::ConfigError, mail::MailError,
        profile::ProfileError, validation::ValidationError,
    },
};

/// Main error type for the accounts server.
///
/// Aggregates all domain-specific error types and external library errors into a single
/// type. `#[from]` conversions allow the `?` operator everywhere, and the `IntoResponse`
/// implementation maps errors to HTTP responses for API consumers.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (not logged in, bad credentials, stale session).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Submitted form data failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Profile lookup or lifecycle error.
    #[error(transparent)]
    ProfileError(#[from] ProfileError),
    /// Avatar image could not be decoded, resized or encoded.
    #[error(transparent)]
    AvatarError(#[from] AvatarError),
    /// Outbound mail could not be delivered.
    #[error(transparent)]
    MailError(#[from] MailError),
    /// Multipart request body could not be read.
    #[error(transparent)]
    MultipartError(#[from] axum::extract::multipart::MultipartError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Filesystem error while reading or writing media files.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Password hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHashError(argon2::password_hash::Error),
    /// A blocking task (image processing) panicked or was cancelled.
    #[error(transparent)]
    TaskJoinError(#[from] tokio::task::JoinError),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHashError(err)
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Form validation failures, undecodable avatar uploads and malformed
///   multipart bodies
/// - 401 Unauthorized - Missing login or incorrect credentials
/// - 500 Internal Server Error - Everything else (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::ProfileError(err) => err.into_response(),
            Self::AvatarError(err) => err.into_response(),
            Self::MailError(err) => err.into_response(),
            Self::MultipartError(err) => {
                tracing::debug!("{}", err);

                err.into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
