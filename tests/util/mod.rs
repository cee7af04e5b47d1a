//! Shared helpers for controller integration tests.

pub mod http;

use std::sync::Arc;

use axum::Router;
use compost::server::{
    config::SiteConfig, mail::MemoryMailer, media::MediaStorage, model::app::AppState, router,
};
use compost_test_utils::TestContext;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Extension trait for TestContext to create application state backed by the test database
/// and temporary media root
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
    fn into_app_state_with_mailer(&self, mailer: MemoryMailer) -> AppState;
    fn into_router(&self) -> Router;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with_mailer(MemoryMailer::new())
    }

    /// Keep a clone of `mailer` to inspect the outbox after the request
    fn into_app_state_with_mailer(&self, mailer: MemoryMailer) -> AppState {
        AppState::new(
            self.db.clone(),
            MediaStorage::new(self.media_root()),
            Arc::new(mailer),
            SiteConfig::default(),
        )
    }

    /// Full router with an in-memory session layer, for requests sent with `oneshot`
    fn into_router(&self) -> Router {
        let session = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

        router::routes()
            .with_state(self.into_app_state())
            .layer(session)
    }
}
