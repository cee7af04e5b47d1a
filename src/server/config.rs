//! Environment-based server configuration.

use std::path::PathBuf;

use crate::server::error::config::ConfigError;

/// Seconds a password reset link stays valid when `PASSWORD_RESET_TIMEOUT_SECS` is unset (3 days).
pub const DEFAULT_PASSWORD_RESET_TIMEOUT_SECS: i64 = 259_200;

/// Site identity used in outbound emails and generated links.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Human readable site name, used in email subjects
    pub name: String,
    /// Public base URL without trailing slash, used to build reset links
    pub url: String,
    /// Sender address for outbound email
    pub from_email: String,
    /// Lifetime of password reset tokens in seconds
    pub password_reset_timeout_secs: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Example.com".to_string(),
            url: "http://localhost:8080".to_string(),
            from_email: "webmaster@localhost".to_string(),
            password_reset_timeout_secs: DEFAULT_PASSWORD_RESET_TIMEOUT_SECS,
        }
    }
}

/// Server configuration loaded from environment variables.
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub media_root: PathBuf,
    pub bind_address: String,
    pub site: SiteConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `DATABASE_URL` and `VALKEY_URL` are required; everything else falls back to a
    /// development default.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SiteConfig::default();

        let password_reset_timeout_secs = match std::env::var("PASSWORD_RESET_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnvValue {
                    var: "PASSWORD_RESET_TIMEOUT_SECS".to_string(),
                    reason: format!("expected a positive number of seconds, got {:?}", value),
                })?,
            Err(_) => defaults.password_reset_timeout_secs,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            media_root: PathBuf::from(optional("MEDIA_ROOT", "media")),
            bind_address: optional("BIND_ADDRESS", "0.0.0.0:8080"),
            site: SiteConfig {
                name: optional("SITE_NAME", &defaults.name),
                url: optional("SITE_URL", &defaults.url)
                    .trim_end_matches('/')
                    .to_string(),
                from_email: optional("DEFAULT_FROM_EMAIL", &defaults.from_email),
                password_reset_timeout_secs,
            },
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}
