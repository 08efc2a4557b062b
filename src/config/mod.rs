//! Application configuration module
//!
//! Two sources feed the configuration:
//!
//! 1. the JSON credentials file (`{"token": ..., "fav": [...], "action": ...}`),
//!    whose path comes from the CLI;
//! 2. environment variables with the `COURSE_SNIPER` prefix (double underscore
//!    as separator) for the endpoint URLs, loaded through the `config` crate
//!    on top of built-in defaults.
//!
//! A missing or unparsable credentials file is fatal at startup.

mod cli;
mod error;

pub use cli::CliArgs;
pub use error::{ConfigError, ValidationError};

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::RegistrationAction;

/// Endpoint configuration, overridable via environment for test rigs.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Registration endpoint receiving the write requests.
    #[serde(default = "default_registration_url")]
    pub registration_url: String,

    /// Real-time feed URL; the auth token is appended as a query parameter.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Referer header value the endpoint expects.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_registration_url() -> String {
    "https://my.edu.sharif.edu/api/reg".to_string()
}

fn default_feed_url() -> String {
    "wss://my.edu.sharif.edu/api/ws".to_string()
}

fn default_referer() -> String {
    "https://my.edu.sharif.edu/courses/marked".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            registration_url: default_registration_url(),
            feed_url: default_feed_url(),
            referer: default_referer(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Shape of the JSON credentials file.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    token: String,
    #[serde(default)]
    fav: Vec<String>,
    #[serde(default)]
    action: String,
}

/// Root application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    token: Secret<String>,
    /// Favorites from the credentials file; empty means "take them from the
    /// first session-info event".
    pub favorites: Vec<String>,
    /// Honored literally: `"drop"` drops. Empty defaults to add.
    pub action: RegistrationAction,
    pub endpoints: EndpointConfig,
}

impl AppConfig {
    /// Load configuration from the credentials file and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the credentials file is missing or
    /// unparsable, if the environment overrides cannot be deserialized, or
    /// if validation fails.
    pub fn load(credentials_path: &Path) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let credentials: CredentialsFile = config::Config::builder()
            .add_source(config::File::from(credentials_path).format(config::FileFormat::Json))
            .build()?
            .try_deserialize()?;

        let endpoints: EndpointConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COURSE_SNIPER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        let action = if credentials.action.is_empty() {
            RegistrationAction::default()
        } else {
            credentials
                .action
                .parse::<RegistrationAction>()
                .map_err(ValidationError::from)?
        };

        let config = Self {
            token: Secret::new(credentials.token),
            favorites: credentials.fav,
            action,
            endpoints,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.expose_secret().is_empty() {
            return Err(ValidationError::MissingToken);
        }
        if self.endpoints.registration_url.is_empty() {
            return Err(ValidationError::MissingRegistrationUrl);
        }
        if self.endpoints.feed_url.is_empty() {
            return Err(ValidationError::MissingFeedUrl);
        }
        Ok(())
    }

    /// Bearer credential for the registration endpoint's Authorization header.
    pub fn token(&self) -> &Secret<String> {
        &self.token
    }

    /// Feed URL with the auth token appended as a query parameter.
    pub fn feed_url_with_token(&self) -> String {
        format!(
            "{}?token={}",
            self.endpoints.feed_url,
            self.token.expose_secret()
        )
    }
}
