//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! database model type aliases, session data structures and account lifecycle events. These
//! models bridge the gap between database entities, HTTP handlers and services.

pub mod app;
pub mod db;
pub mod event;
pub mod session;
