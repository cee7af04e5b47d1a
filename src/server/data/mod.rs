//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries for one table each. They are generic over
//! [`ConnectionTrait`](sea_orm::ConnectionTrait) so services can run them on a plain connection
//! or inside a transaction.

pub mod account;
pub mod password_reset_token;
pub mod profile;
