//! Field-level form validation errors.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ValidationErrorDto;

/// Summary message returned alongside field errors.
pub const VALIDATION_SUMMARY_MESSAGE: &str = "Please correct the errors below.";

/// Field-level validation errors collected while checking a submitted form.
///
/// Errors are keyed by form field name; messages are kept in insertion order per field.
/// A `ValidationError` with no entries means the form is valid, see [`Self::into_result`].
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Form validation failed: {fields:?}")]
pub struct ValidationError {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// Creates an empty set of validation errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates validation errors with a single message for `field`.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records an error message for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns the messages recorded for `field`, empty if the field is valid.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `field` has at least one error.
    pub fn has(&self, field: &str) -> bool {
        !self.messages(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Moves every error from `other` into `self`.
    pub fn merge(&mut self, other: ValidationError) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when no errors were recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorDto {
                error: VALIDATION_SUMMARY_MESSAGE.to_string(),
                fields: self.fields,
            }),
        )
            .into_response()
    }
}
