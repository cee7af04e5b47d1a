//! Account lifecycle event delivery.
//!
//! Services publish an [`AccountEvent`] inside the transaction that created or saved an
//! account. The [`AccountEventBus`] hands the event to every registered
//! [`AccountEventHandler`] in registration order and waits for each one, so handlers see the
//! uncommitted rows and a handler error rolls back the whole operation.
//!
//! The bus is built once at startup and carried in
//! [`AppState`](crate::server::model::app::AppState); nothing subscribes implicitly.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use crate::server::{
    data::profile::ProfileRepository,
    error::{profile::ProfileError, Error},
    media::{MediaStorage, DEFAULT_AVATAR},
    model::{db::ProfileModel, event::AccountEvent},
    service::profile::ProfileService,
};

/// Receives account lifecycle events.
#[async_trait]
pub trait AccountEventHandler: Send + Sync {
    /// Handles a single event inside the publisher's transaction.
    ///
    /// Returning an error stops delivery to later handlers and fails the publishing operation.
    async fn handle(&self, txn: &DatabaseTransaction, event: AccountEvent) -> Result<(), Error>;
}

/// Ordered, synchronous delivery of account events to registered handlers.
#[derive(Default)]
pub struct AccountEventBus {
    handlers: Vec<Arc<dyn AccountEventHandler>>,
}

impl AccountEventBus {
    /// Creates a bus with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus with the [`ProfileLifecycleBinder`] registered.
    pub fn with_profile_binder(media: MediaStorage) -> Self {
        Self::new().with_handler(Arc::new(ProfileLifecycleBinder::new(media)))
    }

    /// Registers a handler after all previously registered ones.
    pub fn with_handler(mut self, handler: Arc<dyn AccountEventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers `event` to every handler in registration order.
    ///
    /// # Returns
    /// - `Ok(())` - Every handler succeeded
    /// - `Err(Error)` - The first handler error; later handlers were not called
    pub async fn publish(&self, txn: &DatabaseTransaction, event: AccountEvent) -> Result<(), Error> {
        tracing::debug!(
            account_id = event.account_id(),
            ?event,
            handlers = self.handlers.len(),
            "Publishing account event"
        );

        for handler in &self.handlers {
            handler.handle(txn, event).await?;
        }

        Ok(())
    }
}

/// Keeps every account paired with exactly one profile.
///
/// - [`AccountEvent::Created`] creates a profile with an empty bio and the default avatar,
///   unless one already exists.
/// - [`AccountEvent::Updated`] re-saves the profile, refreshing `updated_at` and renormalizing
///   the stored avatar.
pub struct ProfileLifecycleBinder {
    media: MediaStorage,
}

impl ProfileLifecycleBinder {
    pub fn new(media: MediaStorage) -> Self {
        Self { media }
    }

    /// Creates the profile of a new account, returning the existing one if present.
    pub async fn ensure_profile(
        &self,
        txn: &DatabaseTransaction,
        account_id: i32,
    ) -> Result<ProfileModel, Error> {
        let profile_repo = ProfileRepository::new(txn);

        if let Some(profile) = profile_repo.find_by_account_id(account_id).await? {
            tracing::debug!(account_id, "Profile already exists, skipping creation");

            return Ok(profile);
        }

        let profile = profile_repo.create(account_id, "", DEFAULT_AVATAR).await?;
        tracing::info!(account_id, profile_id = profile.id, "Created profile for account");

        Ok(profile)
    }

    /// Re-saves the profile of an updated account.
    ///
    /// # Returns
    /// - `Ok(ProfileModel)` - Saved profile
    /// - `Err(Error::ProfileError(ProfileError::NotFound))` - Account has no profile
    /// - `Err(Error)` - Avatar normalization or database update failed
    pub async fn resave_profile(
        &self,
        txn: &DatabaseTransaction,
        account_id: i32,
    ) -> Result<ProfileModel, Error> {
        let Some(profile) = ProfileRepository::new(txn)
            .find_by_account_id(account_id)
            .await?
        else {
            return Err(ProfileError::NotFound(account_id).into());
        };

        ProfileService::save(txn, &self.media, profile).await
    }
}

#[async_trait]
impl AccountEventHandler for ProfileLifecycleBinder {
    async fn handle(&self, txn: &DatabaseTransaction, event: AccountEvent) -> Result<(), Error> {
        match event {
            AccountEvent::Created(account_id) => {
                self.ensure_profile(txn, account_id).await?;
            }
            AccountEvent::Updated(account_id) => {
                self.resave_profile(txn, account_id).await?;
            }
        }

        Ok(())
    }
}
