//! Password reset by emailed single-use link.

#[cfg(test)]
mod tests;

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};
use sha2::{Digest, Sha256};

use crate::{
    model::auth::{PasswordResetConfirmForm, PasswordResetForm},
    server::{
        config::SiteConfig,
        data::{account::AccountRepository, password_reset_token::PasswordResetTokenRepository},
        error::{validation::ValidationError, Error},
        mail::{Mailer, OutboundEmail},
        model::db::{AccountModel, PasswordResetTokenModel},
        service::{
            account::{new_password_errors, AccountService},
            lifecycle::AccountEventBus,
        },
        util::validation::{email_error, normalize_email},
    },
};

pub const INVALID_RESET_LINK_MESSAGE: &str = "The password reset link was invalid, possibly because it has already been used. Please request a new password reset.";

/// Number of random bytes in an emailed reset token.
const RESET_TOKEN_BYTES: usize = 32;

pub struct PasswordResetService<'a> {
    db: &'a DatabaseConnection,
    events: &'a AccountEventBus,
    mailer: &'a dyn Mailer,
    site: &'a SiteConfig,
}

impl<'a> PasswordResetService<'a> {
    /// Creates a new instance of [`PasswordResetService`]
    pub fn new(
        db: &'a DatabaseConnection,
        events: &'a AccountEventBus,
        mailer: &'a dyn Mailer,
        site: &'a SiteConfig,
    ) -> Self {
        Self {
            db,
            events,
            mailer,
            site,
        }
    }

    /// Issues a reset token and emails the reset link to the account owning `form.email`.
    ///
    /// Only the SHA-256 of the token is stored. An email address without an account sends
    /// nothing, callers respond identically in both cases so the form cannot be used to probe
    /// for registered addresses. Used and expired tokens of every account are deleted first.
    ///
    /// # Returns
    /// - `Ok(true)` - Reset email sent
    /// - `Ok(false)` - No account uses this email address
    /// - `Err(Error::ValidationError)` - Email missing or malformed
    /// - `Err(Error::MailError)` - Delivery failed; the issued token stays unused
    pub async fn request_reset(&self, form: &PasswordResetForm) -> Result<bool, Error> {
        let email = normalize_email(&form.email);

        if let Some(message) = email_error(&email) {
            return Err(ValidationError::field("email", message).into());
        }

        let pruned = PasswordResetTokenRepository::new(self.db).delete_stale().await?;
        if pruned > 0 {
            tracing::debug!(pruned, "Deleted stale password reset tokens");
        }

        let Some(account) = AccountRepository::new(self.db).find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");

            return Ok(false);
        };

        let token = generate_token();
        let expires_at =
            Utc::now().naive_utc() + Duration::seconds(self.site.password_reset_timeout_secs);

        PasswordResetTokenRepository::new(self.db)
            .create(account.id, &hash_token(&token), expires_at)
            .await?;

        self.mailer
            .send(OutboundEmail {
                from: self.site.from_email.clone(),
                to: vec![account.email.clone()],
                subject: format!("Password reset on {}", self.site.name),
                body: reset_email_body(self.site, &account.username, &token),
            })
            .await?;

        tracing::info!(account_id = account.id, "Sent password reset email");

        Ok(true)
    }

    /// Sets a new password using an emailed reset token.
    ///
    /// The token must exist, be unused and not be expired. It is spent inside the same
    /// transaction that sets the password, so concurrent confirmations of one token succeed at
    /// most once. On success every outstanding token of the account is marked used.
    ///
    /// # Returns
    /// - `Ok(AccountModel)` - Password reset
    /// - `Err(Error::ValidationError)` - Token invalid, or new passwords invalid
    /// - `Err(Error)` - Database or lifecycle handler failure
    pub async fn confirm_reset(&self, form: &PasswordResetConfirmForm) -> Result<AccountModel, Error> {
        let Some(token) = self.find_valid_token(&form.token).await? else {
            return Err(ValidationError::field("token", INVALID_RESET_LINK_MESSAGE).into());
        };

        let Some(account) = AccountRepository::new(self.db).get(token.account_id).await? else {
            return Err(ValidationError::field("token", INVALID_RESET_LINK_MESSAGE).into());
        };

        new_password_errors(
            "new_password1",
            "new_password2",
            &form.new_password1,
            &form.new_password2,
            &account.username,
        )
        .into_result()?;

        let txn = self.db.begin().await?;
        if !PasswordResetTokenRepository::new(&txn)
            .consume(&token.token_hash)
            .await?
        {
            tracing::debug!(account_id = account.id, "Password reset token spent concurrently");

            return Err(ValidationError::field("token", INVALID_RESET_LINK_MESSAGE).into());
        }
        let account =
            AccountService::set_password(&txn, self.events, account.id, &form.new_password1)
                .await?;
        txn.commit().await?;

        tracing::info!(account_id = account.id, "Reset account password");

        Ok(account)
    }

    async fn find_valid_token(&self, token: &str) -> Result<Option<PasswordResetTokenModel>, Error> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(stored) = PasswordResetTokenRepository::new(self.db)
            .find_by_token_hash(&hash_token(token))
            .await?
        else {
            tracing::debug!("Password reset attempted with unknown token");

            return Ok(None);
        };

        if stored.used_at.is_some() {
            tracing::debug!(account_id = stored.account_id, "Password reset token already used");

            return Ok(None);
        }

        if stored.expires_at <= Utc::now().naive_utc() {
            tracing::debug!(account_id = stored.account_id, "Password reset token expired");

            return Ok(None);
        }

        Ok(Some(stored))
    }
}

/// SHA-256 hex digest of a reset token, the form in which tokens are stored.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn generate_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::rng().fill(&mut bytes);

    hex::encode(bytes)
}

fn reset_email_body(site: &SiteConfig, username: &str, token: &str) -> String {
    format!(
        "You're receiving this email because you requested a password reset for your user account at {name}.\n\
         \n\
         Please go to the following page and choose a new password:\n\
         \n\
         {url}/reset/{token}\n\
         \n\
         Your username, in case you've forgotten: {username}\n\
         \n\
         Thanks for using our site!\n\
         \n\
         The {name} team\n",
        name = site.name,
        url = site.url,
    )
}
