//! Account lifecycle events.

/// Something that happened to an account, published inside the database transaction that
/// caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountEvent {
    /// A new account row was inserted.
    Created(i32),
    /// An existing account was saved.
    Updated(i32),
}

impl AccountEvent {
    /// ID of the account the event refers to.
    pub fn account_id(&self) -> i32 {
        match self {
            Self::Created(account_id) | Self::Updated(account_id) => *account_id,
        }
    }
}
