use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when submitted form data fails validation
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ValidationErrorDto {
    /// Summary message for the whole form
    pub error: String,
    /// Error messages keyed by form field name
    pub fields: BTreeMap<String, Vec<String>>,
}

/// A one-shot status message queued in the session by a previous request
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, utoipa::ToSchema)]
pub struct FlashMessageDto {
    /// Message severity, e.g. `success` or `info`
    pub level: String,
    /// The message text
    pub message: String,
}
