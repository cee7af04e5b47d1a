use axum::{http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, FlashMessageDto},
    server::{error::Error, model::session::flash::SessionFlash},
};

pub static MESSAGES_TAG: &str = "messages";

/// Returns and clears the flash messages queued by earlier form submissions
///
/// # Responses
/// - 200 (Success): Queued messages, oldest first; empty when nothing is queued
/// - 500 (Internal Server Error): Session storage failed
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = MESSAGES_TAG,
    responses(
        (status = 200, description = "Queued flash messages", body = Vec<FlashMessageDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_messages(session: Session) -> Result<impl IntoResponse, Error> {
    let messages = SessionFlash::drain(&session).await?;

    Ok((StatusCode::OK, Json(messages)))
}
