pub use super::account::Entity as Account;
pub use super::password_reset_token::Entity as PasswordResetToken;
pub use super::profile::Entity as Profile;
