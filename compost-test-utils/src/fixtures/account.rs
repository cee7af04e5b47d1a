//! Account and profile fixtures.

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::DEFAULT_AVATAR_PATH, error::TestError, TestContext};

impl TestContext {
    pub fn account<'a>(&'a self) -> AccountFixtures<'a> {
        AccountFixtures { setup: self }
    }
}

pub struct AccountFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> AccountFixtures<'a> {
    /// Insert an account without a profile.
    ///
    /// # Arguments
    /// - `username` - Account username
    /// - `email` - Account email, stored as given
    /// - `password` - Plain text password, stored as an Argon2id hash
    pub async fn insert_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<entity::account::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Account::insert(entity::account::ActiveModel {
                username: ActiveValue::Set(username.to_string()),
                email: ActiveValue::Set(email.to_string()),
                password_hash: ActiveValue::Set(hash_password(password)?),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a profile with the given avatar path and an empty bio.
    pub async fn insert_profile(
        &self,
        account_id: i32,
        avatar: &str,
    ) -> Result<entity::profile::Model, TestError> {
        Ok(
            entity::prelude::Profile::insert(entity::profile::ActiveModel {
                account_id: ActiveValue::Set(account_id),
                bio: ActiveValue::Set(String::new()),
                avatar: ActiveValue::Set(avatar.to_string()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an account together with a default profile, as registration would.
    pub async fn insert_account_with_profile(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(entity::account::Model, entity::profile::Model), TestError> {
        let account = self.insert_account(username, email, password).await?;
        let profile = self
            .insert_profile(account.id, DEFAULT_AVATAR_PATH)
            .await?;

        Ok((account, profile))
    }
}

fn hash_password(password: &str) -> Result<String, TestError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| TestError::PasswordHashError(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TestError::PasswordHashError(e.to_string()))
}
