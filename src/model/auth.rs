use serde::{Deserialize, Serialize};

/// Registration form submission
#[derive(Clone, Serialize, Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// Login form submission
#[derive(Clone, Serialize, Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Keep the session alive for two weeks instead of until the browser closes
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub remember_me: bool,
}

/// Password change form submission for a logged in account
#[derive(Clone, Serialize, Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct ChangePasswordForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

/// Password reset request form submission
#[derive(Clone, Serialize, Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct PasswordResetForm {
    #[serde(default)]
    pub email: String,
}

/// Password reset confirmation using the token from the reset email
#[derive(Clone, Serialize, Deserialize, Debug, Default, utoipa::ToSchema)]
pub struct PasswordResetConfirmForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

/// HTML checkboxes submit `on` when ticked and nothing at all otherwise, API clients tend
/// to submit `true`/`false`.
fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    Ok(matches!(
        value.to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    ))
}
