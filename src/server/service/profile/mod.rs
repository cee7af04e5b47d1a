//! Profile service layer.
//!
//! Reading and editing the profile of the logged-in account. Every profile save goes through
//! [`ProfileService::save`], which renormalizes the stored avatar before persisting.

#[cfg(test)]
mod tests;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::user::{AvatarUpload, ProfileDto, ProfileUpdateForm, UserDto},
    server::{
        data::{account::AccountRepository, profile::ProfileRepository},
        error::{
            auth::AuthError,
            avatar::INVALID_IMAGE_MESSAGE,
            profile::ProfileError,
            Error,
        },
        media::{AvatarNormalizer, MediaStorage, DEFAULT_AVATAR, PROFILE_IMAGES_DIR},
        model::{db::ProfileModel, event::AccountEvent},
        service::{account::AccountService, lifecycle::AccountEventBus},
        util::validation::normalize_email,
    },
};

pub struct ProfileService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaStorage,
    events: &'a AccountEventBus,
}

impl<'a> ProfileService<'a> {
    /// Creates a new instance of [`ProfileService`]
    pub fn new(
        db: &'a DatabaseConnection,
        media: &'a MediaStorage,
        events: &'a AccountEventBus,
    ) -> Self {
        Self { db, media, events }
    }

    /// Retrieves an account together with its profile.
    ///
    /// # Returns
    /// - `Ok(Some(ProfileDto))` - Account and profile found
    /// - `Ok(None)` - Account does not exist
    /// - `Err(Error::ProfileError(ProfileError::NotFound))` - Account exists without a profile
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_profile(&self, account_id: i32) -> Result<Option<ProfileDto>, Error> {
        let Some(account) = AccountRepository::new(self.db).get(account_id).await? else {
            return Ok(None);
        };

        let Some(profile) = ProfileRepository::new(self.db)
            .find_by_account_id(account_id)
            .await?
        else {
            return Err(ProfileError::NotFound(account_id).into());
        };

        Ok(Some(ProfileDto {
            user: UserDto {
                id: account.id,
                username: account.username,
                email: account.email,
            },
            bio: profile.bio,
            avatar: profile.avatar,
            updated_at: profile.updated_at,
        }))
    }

    /// Applies a profile edit submission.
    ///
    /// Username and email are validated like at registration, and an uploaded avatar must
    /// decode as an image. All field errors are reported together and nothing is changed when
    /// any are present. A valid upload is resized in memory, written under `profile_images/`,
    /// and then the account identity, bio and avatar are updated in one transaction that also
    /// publishes [`AccountEvent::Updated`]. If the transaction fails the written file is
    /// removed again. Once it commits, the avatar file it replaced is removed unless it is the
    /// shared default avatar.
    ///
    /// # Returns
    /// - `Ok(ProfileModel)` - Saved profile
    /// - `Err(Error::ValidationError)` - One or more fields are invalid
    /// - `Err(Error::AuthError(AuthError::AccountNotInDatabase))` - Account does not exist
    /// - `Err(Error)` - Media, database or lifecycle handler failure
    pub async fn update_profile(
        &self,
        account_id: i32,
        form: ProfileUpdateForm,
    ) -> Result<ProfileModel, Error> {
        if AccountRepository::new(self.db).get(account_id).await?.is_none() {
            return Err(AuthError::AccountNotInDatabase(account_id).into());
        }

        let ProfileUpdateForm {
            username,
            email,
            bio,
            avatar,
        } = form;
        let email = normalize_email(&email);

        let mut errors =
            AccountService::validate_identity(self.db, Some(account_id), &username, &email).await?;

        let avatar = match avatar {
            Some(upload) => match self.normalize_upload(upload).await {
                Ok(upload) => Some(upload),
                Err(Error::AvatarError(err)) if err.is_invalid_image() => {
                    tracing::debug!(account_id, "Rejected avatar upload: {}", err);
                    errors.add("avatar", INVALID_IMAGE_MESSAGE);

                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        errors.into_result()?;

        let stored_avatar = match avatar {
            Some(upload) => Some(
                self.media
                    .save_upload(PROFILE_IMAGES_DIR, &upload.file_name, upload.bytes)
                    .await?,
            ),
            None => None,
        };

        let result = self
            .apply_update(account_id, &username, &email, &bio, stored_avatar.as_deref())
            .await;

        if result.is_err() {
            if let Some(stored_avatar) = &stored_avatar {
                if let Err(err) = self.media.remove(stored_avatar).await {
                    tracing::warn!(
                        "Failed to remove avatar {} after failed update: {}",
                        stored_avatar,
                        err
                    );
                }
            }
        }

        let (profile, replaced_avatar) = result?;
        tracing::info!(account_id, "Updated profile");

        if let Some(replaced_avatar) = replaced_avatar.filter(|avatar| avatar != DEFAULT_AVATAR) {
            if let Err(err) = self.media.remove(&replaced_avatar).await {
                tracing::warn!("Failed to remove replaced avatar {}: {}", replaced_avatar, err);
            }
        }

        Ok(profile)
    }

    async fn normalize_upload(&self, upload: AvatarUpload) -> Result<AvatarUpload, Error> {
        let bytes = AvatarNormalizer::default()
            .normalize_upload(upload.bytes, &upload.file_name)
            .await?;

        Ok(AvatarUpload {
            file_name: upload.file_name,
            bytes,
        })
    }

    /// Returns the saved profile and the avatar path it no longer uses, if any.
    async fn apply_update(
        &self,
        account_id: i32,
        username: &str,
        email: &str,
        bio: &str,
        avatar: Option<&str>,
    ) -> Result<(ProfileModel, Option<String>), Error> {
        let txn = self.db.begin().await?;

        AccountService::update_identity(&txn, account_id, username, email).await?;

        let Some(mut profile) = ProfileRepository::new(&txn)
            .find_by_account_id(account_id)
            .await?
        else {
            return Err(ProfileError::NotFound(account_id).into());
        };

        profile.bio = bio.to_string();
        let replaced_avatar = match avatar {
            Some(avatar) if avatar != profile.avatar => {
                Some(std::mem::replace(&mut profile.avatar, avatar.to_string()))
            }
            _ => None,
        };

        let profile = Self::save(&txn, self.media, profile).await?;
        self.events
            .publish(&txn, AccountEvent::Updated(account_id))
            .await?;

        txn.commit().await?;

        Ok((profile, replaced_avatar))
    }

    /// Persists a profile after renormalizing its stored avatar.
    ///
    /// An avatar larger than the bounding box is resized and atomically replaced on disk
    /// before the row is written with a fresh `updated_at`. A missing avatar file is skipped.
    pub async fn save<C: ConnectionTrait>(
        db: &C,
        media: &MediaStorage,
        profile: ProfileModel,
    ) -> Result<ProfileModel, Error> {
        AvatarNormalizer::default()
            .normalize_file(media, &profile.avatar)
            .await?;

        Ok(ProfileRepository::new(db).update(profile).await?)
    }
}
