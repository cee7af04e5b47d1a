//! One-shot flash messages.
//!
//! A handler that finishes a form submission with a redirect queues a message here; the next
//! `GET /api/messages` drains the queue so each message is shown exactly once.

use tower_sessions::Session;

use crate::{model::api::FlashMessageDto, server::error::Error};

/// Session key for the queued flash messages.
pub const SESSION_FLASH_KEY: &str = "compost:flash";

/// Severity of a flash message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

pub struct SessionFlash;

impl SessionFlash {
    /// Appends a message to the session's flash queue.
    ///
    /// # Arguments
    /// - `session` - Session to queue the message in
    /// - `level` - Message severity
    /// - `message` - Message text
    ///
    /// # Returns
    /// - `Ok(())` - Message queued
    /// - `Err(Error)` - Session storage failed
    pub async fn push(session: &Session, level: FlashLevel, message: &str) -> Result<(), Error> {
        let mut messages: Vec<FlashMessageDto> =
            session.get(SESSION_FLASH_KEY).await?.unwrap_or_default();

        messages.push(FlashMessageDto {
            level: level.as_str().to_string(),
            message: message.to_string(),
        });

        session.insert(SESSION_FLASH_KEY, messages).await?;

        Ok(())
    }

    /// Removes and returns every queued message, oldest first.
    pub async fn drain(session: &Session) -> Result<Vec<FlashMessageDto>, Error> {
        Ok(session
            .remove::<Vec<FlashMessageDto>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}
