//! Session lifetime chosen at login.

use time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, Session};

/// Lifetime of a remembered login in seconds (14 days).
pub const REMEMBER_ME_AGE_SECS: i64 = 1_209_600;

pub struct SessionLoginExpiry;

impl SessionLoginExpiry {
    /// Sets the session lifetime for a fresh login.
    ///
    /// Without `remember_me` the session ends when the browser closes; with it the session
    /// stays valid for [`REMEMBER_ME_AGE_SECS`] of inactivity.
    pub fn apply(session: &Session, remember_me: bool) {
        let expiry = if remember_me {
            Expiry::OnInactivity(Duration::seconds(REMEMBER_ME_AGE_SECS))
        } else {
            Expiry::OnSessionEnd
        };

        session.set_expiry(Some(expiry));
    }

    /// Returns the configured session lifetime in seconds.
    ///
    /// Browser-session cookies report `0`.
    pub fn age_secs(session: &Session) -> i64 {
        match session.expiry() {
            Some(Expiry::OnInactivity(duration)) => duration.whole_seconds(),
            Some(Expiry::AtDateTime(at)) => (at - OffsetDateTime::now_utc()).whole_seconds().max(0),
            Some(Expiry::OnSessionEnd) | None => 0,
        }
    }
}
