//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers shared by services and controllers: password
//! hashing and strength rules, and syntax checks for usernames and email addresses.

pub mod password;
pub mod validation;
