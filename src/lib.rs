//! Account, profile and avatar management for the NYC Compost community site.
//!
//! The crate is split into shared DTOs (`model`) and the axum backend (`server`).

pub mod model;
pub mod server;
