//! Database model type aliases.
//!
//! Short names for the SeaORM entity models used throughout the server, so services and
//! repositories do not import from the `entity` crate directly.

/// Type alias for the account database model.
///
/// # Fields (from `entity::account::Model`)
/// - `id` - Primary key
/// - `username` - Unique login name
/// - `email` - Unique email address, domain lowercased
/// - `password_hash` - Argon2id PHC string
/// - `created_at` - Timestamp when the account was created
/// - `updated_at` - Timestamp of the last account update
pub type AccountModel = entity::account::Model;

/// Type alias for the profile database model.
///
/// Exactly one profile exists per account, created together with it.
///
/// # Fields (from `entity::profile::Model`)
/// - `id` - Primary key
/// - `account_id` - Unique foreign key to the owning account
/// - `bio` - Free text biography
/// - `avatar` - Avatar path relative to the media root
/// - `updated_at` - Timestamp of the last profile save
pub type ProfileModel = entity::profile::Model;

/// Type alias for the password reset token database model.
pub type PasswordResetTokenModel = entity::password_reset_token::Model;
