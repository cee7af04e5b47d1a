//! Server application core modules.
//!
//! This module contains all server-side functionality for the accounts service: HTTP routing,
//! session-based authentication, database access, the account lifecycle event bus, avatar
//! normalization and media storage, and the outbound mail capability.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod mail;
pub mod media;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
