//! Tests for user controller endpoints.
//!
//! Profile retrieval and the multipart profile edit flow.

mod get_profile;
mod update_profile;

use super::*;
