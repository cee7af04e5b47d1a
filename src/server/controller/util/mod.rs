//! Utility functions for controller request handling.
//!
//! This module provides reusable helpers used across controllers, such as resolving the
//! logged-in account for protected endpoints.

pub mod get_account;
