//! Session data models and utilities.
//!
//! Type-safe wrappers for the state kept in the tower-sessions session (Redis-backed in
//! production): the logged-in account, queued flash messages and the login expiry policy.

pub mod account;
pub mod expiry;
pub mod flash;
