//! Test fixture modules for database records and media files.
//!
//! Fixtures are used during test execution, after `TestBuilder::build()`:
//!
//! - `account` - Account and profile records with known passwords
//! - `image` - Generated images and files under the temporary media root

pub mod account;
pub mod image;
