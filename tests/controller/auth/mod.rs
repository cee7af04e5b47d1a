//! Tests for authentication controller endpoints.
//!
//! Registration, login with remember-me, logout and the password change and reset flows.

mod change_password;
mod login;
mod logout;
mod password_reset;
mod register;

use super::*;
