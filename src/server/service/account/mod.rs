//! Account service layer.
//!
//! Registration, credential checks, password changes and identity updates. Every write that
//! creates or saves an account runs in a transaction and publishes the matching
//! [`AccountEvent`] before committing.

#[cfg(test)]
mod tests;

use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    model::auth::{ChangePasswordForm, RegisterForm},
    server::{
        data::{account::AccountRepository, password_reset_token::PasswordResetTokenRepository},
        error::{auth::AuthError, validation::ValidationError, Error},
        model::{db::AccountModel, event::AccountEvent},
        service::lifecycle::AccountEventBus,
        util::{
            password::{hash_password_async, password_strength_errors, verify_password_async},
            validation::{email_error, normalize_email, username_error, REQUIRED_MESSAGE},
        },
    },
};

pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";
pub const OLD_PASSWORD_INCORRECT_MESSAGE: &str =
    "Your old password was entered incorrectly. Please enter it again.";
pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";
pub const EMAIL_TAKEN_MESSAGE: &str = "A user with that email already exists.";

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
    events: &'a AccountEventBus,
}

impl<'a> AccountService<'a> {
    /// Creates a new instance of [`AccountService`]
    pub fn new(db: &'a DatabaseConnection, events: &'a AccountEventBus) -> Self {
        Self { db, events }
    }

    /// Creates a new account from a registration form.
    ///
    /// The account is inserted and [`AccountEvent::Created`] is published in one transaction,
    /// so the account and its profile exist together or not at all.
    ///
    /// # Returns
    /// - `Ok(AccountModel)` - Account created
    /// - `Err(Error::ValidationError)` - Form is invalid; nothing was written
    /// - `Err(Error)` - Database or lifecycle handler failure
    pub async fn register(&self, form: &RegisterForm) -> Result<AccountModel, Error> {
        let username = form.username.as_str();
        let email = normalize_email(&form.email);

        let mut errors = Self::validate_identity(self.db, None, username, &email).await?;
        errors.merge(new_password_errors(
            "password1",
            "password2",
            &form.password1,
            &form.password2,
            username,
        ));
        errors.into_result()?;

        let password_hash = hash_password_async(&form.password1).await?;

        let txn = self.db.begin().await?;

        let account = AccountRepository::new(&txn)
            .create(username, &email, &password_hash)
            .await?;
        self.events
            .publish(&txn, AccountEvent::Created(account.id))
            .await?;

        txn.commit().await?;

        tracing::info!(account_id = account.id, username = %account.username, "Registered account");

        Ok(account)
    }

    /// Retrieves an account by ID, `None` if it was deleted.
    pub async fn get_account(&self, account_id: i32) -> Result<Option<AccountModel>, Error> {
        Ok(AccountRepository::new(self.db).get(account_id).await?)
    }

    /// Checks a username and password.
    ///
    /// The username must match exactly.
    ///
    /// # Returns
    /// - `Ok(Some(AccountModel))` - Credentials are correct
    /// - `Ok(None)` - Unknown username or wrong password
    /// - `Err(Error)` - Database failure or malformed stored hash
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountModel>, Error> {
        let Some(account) = AccountRepository::new(self.db)
            .find_by_username(username)
            .await?
        else {
            tracing::debug!(username, "Login attempt for unknown username");

            return Ok(None);
        };

        if !verify_password_async(password, &account.password_hash).await? {
            tracing::debug!(account_id = account.id, "Login attempt with wrong password");

            return Ok(None);
        }

        Ok(Some(account))
    }

    /// Changes the password of a logged-in account.
    ///
    /// Outstanding password reset links of the account stop working.
    ///
    /// # Returns
    /// - `Ok(AccountModel)` - Password changed
    /// - `Err(Error::ValidationError)` - Old password wrong or new passwords invalid
    /// - `Err(Error::AuthError(AuthError::AccountNotInDatabase))` - Account does not exist
    /// - `Err(Error)` - Database or lifecycle handler failure
    pub async fn change_password(
        &self,
        account_id: i32,
        form: &ChangePasswordForm,
    ) -> Result<AccountModel, Error> {
        let Some(account) = AccountRepository::new(self.db).get(account_id).await? else {
            return Err(AuthError::AccountNotInDatabase(account_id).into());
        };

        let mut errors = ValidationError::new();

        if form.old_password.is_empty() {
            errors.add("old_password", REQUIRED_MESSAGE);
        } else if !verify_password_async(&form.old_password, &account.password_hash).await? {
            errors.add("old_password", OLD_PASSWORD_INCORRECT_MESSAGE);
        }

        errors.merge(new_password_errors(
            "new_password1",
            "new_password2",
            &form.new_password1,
            &form.new_password2,
            &account.username,
        ));
        errors.into_result()?;

        let txn = self.db.begin().await?;
        let account = Self::set_password(&txn, self.events, account_id, &form.new_password1).await?;
        txn.commit().await?;

        tracing::info!(account_id, "Changed account password");

        Ok(account)
    }

    /// Stores a new password for an account inside an open transaction.
    ///
    /// Invalidates every unused reset token of the account and publishes
    /// [`AccountEvent::Updated`].
    pub async fn set_password(
        txn: &DatabaseTransaction,
        events: &AccountEventBus,
        account_id: i32,
        password: &str,
    ) -> Result<AccountModel, Error> {
        let password_hash = hash_password_async(password).await?;

        let Some(account) = AccountRepository::new(txn)
            .update_password_hash(account_id, &password_hash)
            .await?
        else {
            return Err(AuthError::AccountNotInDatabase(account_id).into());
        };

        let invalidated = PasswordResetTokenRepository::new(txn)
            .invalidate_for_account(account_id)
            .await?;
        if invalidated > 0 {
            tracing::debug!(account_id, invalidated, "Invalidated outstanding reset tokens");
        }

        events.publish(txn, AccountEvent::Updated(account_id)).await?;

        Ok(account)
    }

    /// Checks username and email syntax and that no other account uses them.
    ///
    /// `account_id` is the account being edited, `None` for a new account.
    ///
    /// # Returns
    /// - `Ok(ValidationError)` - Collected field errors, empty if both fields are valid
    /// - `Err(Error::DbErr)` - Uniqueness lookup failed
    pub async fn validate_identity<C: ConnectionTrait>(
        db: &C,
        account_id: Option<i32>,
        username: &str,
        email: &str,
    ) -> Result<ValidationError, Error> {
        let account_repo = AccountRepository::new(db);
        let mut errors = ValidationError::new();

        match username_error(username) {
            Some(message) => errors.add("username", message),
            None => {
                if account_repo.username_taken(username, account_id).await? {
                    errors.add("username", USERNAME_TAKEN_MESSAGE);
                }
            }
        }

        match email_error(email) {
            Some(message) => errors.add("email", message),
            None => {
                if account_repo.email_taken(email, account_id).await? {
                    errors.add("email", EMAIL_TAKEN_MESSAGE);
                }
            }
        }

        Ok(errors)
    }

    /// Updates username and email after re-checking them on the given connection.
    ///
    /// # Returns
    /// - `Ok(AccountModel)` - Account updated
    /// - `Err(Error::ValidationError)` - Username or email invalid or taken
    /// - `Err(Error::AuthError(AuthError::AccountNotInDatabase))` - Account does not exist
    pub async fn update_identity<C: ConnectionTrait>(
        db: &C,
        account_id: i32,
        username: &str,
        email: &str,
    ) -> Result<AccountModel, Error> {
        let email = normalize_email(email);

        Self::validate_identity(db, Some(account_id), username, &email)
            .await?
            .into_result()?;

        AccountRepository::new(db)
            .update_identity(account_id, username, &email)
            .await?
            .ok_or_else(|| AuthError::AccountNotInDatabase(account_id).into())
    }
}

/// Validates a new password and its confirmation.
///
/// Missing values are reported on their own field. A mismatch and any strength rule
/// violations are reported on the confirmation field; strength is only checked once both
/// values match.
pub fn new_password_errors(
    password_field: &str,
    confirmation_field: &str,
    password: &str,
    confirmation: &str,
    username: &str,
) -> ValidationError {
    let mut errors = ValidationError::new();

    if password.is_empty() {
        errors.add(password_field, REQUIRED_MESSAGE);
    }
    if confirmation.is_empty() {
        errors.add(confirmation_field, REQUIRED_MESSAGE);
    }
    if !errors.is_empty() {
        return errors;
    }

    if password != confirmation {
        errors.add(confirmation_field, PASSWORD_MISMATCH_MESSAGE);
        return errors;
    }

    for message in password_strength_errors(password, username) {
        errors.add(confirmation_field, message);
    }

    errors
}
