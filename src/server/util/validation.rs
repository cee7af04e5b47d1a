//! Syntax checks for account identity fields.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum username length in characters.
pub const USERNAME_MAX_LENGTH: usize = 150;

pub const USERNAME_INVALID_MESSAGE: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const USERNAME_TOO_LONG_MESSAGE: &str = "Ensure this value has at most 150 characters.";
pub const EMAIL_INVALID_MESSAGE: &str = "Enter a valid email address.";
pub const REQUIRED_MESSAGE: &str = "This field is required.";

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("username pattern is a valid regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is a valid regex")
});

/// Returns the first rule the username breaks, if any.
pub fn username_error(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if username.chars().count() > USERNAME_MAX_LENGTH {
        Some(USERNAME_TOO_LONG_MESSAGE)
    } else if !USERNAME_RE.is_match(username) {
        Some(USERNAME_INVALID_MESSAGE)
    } else {
        None
    }
}

/// Returns the first rule the email address breaks, if any.
pub fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if email.len() > 254 || !EMAIL_RE.is_match(email) {
        Some(EMAIL_INVALID_MESSAGE)
    } else {
        None
    }
}

/// Trims the address and lowercases its domain part.
///
/// The local part is kept as given since some mail servers treat it as case-sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();

    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
