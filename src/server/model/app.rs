use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::SiteConfig, mail::Mailer, media::MediaStorage, service::lifecycle::AccountEventBus,
};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: MediaStorage,
    pub mailer: Arc<dyn Mailer>,
    pub site: SiteConfig,
    pub events: Arc<AccountEventBus>,
}

impl AppState {
    /// Builds the application state with the standard account lifecycle handlers registered.
    pub fn new(
        db: DatabaseConnection,
        media: MediaStorage,
        mailer: Arc<dyn Mailer>,
        site: SiteConfig,
    ) -> Self {
        let events = Arc::new(AccountEventBus::with_profile_binder(media.clone()));
        tracing::debug!(
            handlers = events.handler_count(),
            "Registered account event handlers"
        );

        Self {
            db,
            media,
            mailer,
            site,
            events,
        }
    }
}
