//! HTTP controller endpoints for the accounts API.
//!
//! This module contains Axum handlers for registration, login, password management, profile
//! editing and flash messages. Controllers extract the submitted form, call into the service
//! layer and answer successful submissions with a `303 See Other` redirect plus a flash
//! message. They integrate with tower-sessions for session management and use utoipa for
//! OpenAPI documentation.

pub mod auth;
pub mod messages;
pub mod user;
pub mod util;
