//! Outbound mail capability.
//!
//! Handlers never talk to a mail transport directly. They receive a [`Mailer`] through
//! [`AppState`](crate::server::model::app::AppState), which lets the server log mail in
//! development and lets tests capture every message in a [`MemoryMailer`] outbox without any
//! process-wide state.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::server::error::mail::MailError;

/// A single plain-text email ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Delivers outbound email.
///
/// Delivery failures are returned to the caller as [`MailError`] and are not retried.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// Writes every email to the log instead of delivering it.
#[derive(Clone, Debug, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            "Outbound email:\n{}",
            email.body
        );

        Ok(())
    }
}

/// Collects every email in an in-memory outbox.
///
/// Clones share the same outbox, so a test can keep one handle and give another to the
/// application state.
#[derive(Clone, Debug, Default)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every email sent so far, oldest first.
    pub fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(email);

        Ok(())
    }
}
