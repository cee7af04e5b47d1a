//! SeaORM entities for accounts, profiles and password reset tokens.

pub mod prelude;

pub mod account;
pub mod password_reset_token;
pub mod profile;
