//! Service layer for business logic.
//!
//! Services validate submitted forms, coordinate repositories inside database transactions,
//! publish account lifecycle events and talk to the mail and media capabilities.

pub mod account;
pub mod lifecycle;
pub mod password_reset;
pub mod profile;
