//! Password hashing and strength rules.
//!
//! Passwords are stored as Argon2id PHC strings, which embed the algorithm parameters and salt
//! so hashes created with older parameters keep verifying.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

use crate::server::error::Error;

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const PASSWORD_TOO_SHORT_MESSAGE: &str =
    "This password is too short. It must contain at least 8 characters.";
pub const PASSWORD_ENTIRELY_NUMERIC_MESSAGE: &str = "This password is entirely numeric.";
pub const PASSWORD_TOO_SIMILAR_MESSAGE: &str = "The password is too similar to the username.";

/// Hashes a password with Argon2id and a random 16-byte salt.
///
/// # Returns
/// - `Ok(String)` - PHC formatted hash
/// - `Err(password_hash::Error)` - Hashing failed
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)?;

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC hash.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(password_hash::Error)` - Stored hash is malformed or uses an unsupported algorithm
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(password_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Runs [`hash_password`] on the blocking thread pool so request workers are not stalled.
pub async fn hash_password_async(password: &str) -> Result<String, Error> {
    let password = password.to_owned();

    Ok(tokio::task::spawn_blocking(move || hash_password(&password)).await??)
}

/// Runs [`verify_password`] on the blocking thread pool so request workers are not stalled.
pub async fn verify_password_async(password: &str, password_hash: &str) -> Result<bool, Error> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();

    Ok(tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await??)
}

/// Returns every strength rule the password breaks, in a stable order.
///
/// An empty list means the password is acceptable.
pub fn password_strength_errors(password: &str, username: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if !username.is_empty() && password.to_lowercase() == username.to_lowercase() {
        errors.push(PASSWORD_TOO_SIMILAR_MESSAGE);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(PASSWORD_TOO_SHORT_MESSAGE);
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.push(PASSWORD_ENTIRELY_NUMERIC_MESSAGE);
    }

    errors
}
