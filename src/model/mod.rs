//! Request and response DTOs shared by the HTTP API and its consumers.

pub mod api;
pub mod auth;
pub mod user;
