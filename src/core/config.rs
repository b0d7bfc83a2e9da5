//! Application configuration management
//!
//! Credentials come from the process environment (optionally seeded from a
//! `.env` file). Non-secret settings come from an optional TOML file.
//! Everything is loaded once at startup and handed to the rest of the
//! program as a single [`Config`] value.

use crate::core::constants::{DEFAULT_CONFIG_FILE, DEFAULT_LOG_LEVEL, api, env};
use anyhow::Context;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised while assembling the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Missing required environment variables: {}. Please set TWITTER_API_KEY, TWITTER_API_SECRET, and TWITTER_BEARER_TOKEN.",
        .0.join(", ")
    )]
    MissingCredentials(Vec<&'static str>),

    #[error("{0:#}")]
    Settings(#[from] anyhow::Error),
}

/// Twitter API credentials
///
/// Only the bearer token is sent on the wire. The key and secret are still
/// required so a half-configured environment is rejected up front.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub bearer_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials through an arbitrary variable lookup
    ///
    /// An unset variable and an empty one are both reported as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every absent
    /// variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let api_key = read(env::API_KEY);
        let api_secret = read(env::API_SECRET);
        let bearer_token = read(env::BEARER_TOKEN);

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        Ok(Self {
            api_key,
            api_secret,
            bearer_token,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

/// Shape of the optional TOML settings file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
}

impl TomlConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse TOML configuration")
    }
}

/// Application configuration, built once in `main`
#[derive(Debug, Clone)]
pub struct Config {
    /// Twitter API credentials
    pub credentials: Credentials,

    /// API base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds; `None` keeps the transport default
    pub request_timeout: Option<u64>,

    /// Logging level
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment and settings file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Credentials are checked first so a missing secret is reported even
    /// when the settings file is also broken.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Any credential variable is unset or empty
    /// - `CONFIG_PATH` is set but the file cannot be read or parsed
    /// - `config.toml` exists in the working directory but cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;

        let settings = match lookup(env::CONFIG_PATH).filter(|path| !path.is_empty()) {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        Ok(Self::from_parts(
            credentials,
            settings,
            lookup(env::LOG_LEVEL).filter(|level| !level.is_empty()),
        ))
    }

    fn from_parts(
        credentials: Credentials,
        settings: TomlConfig,
        log_level_override: Option<String>,
    ) -> Self {
        let base_url = settings
            .api
            .base_url
            .unwrap_or_else(|| api::BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level_override
            .or(settings.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Config {
            credentials,
            base_url,
            request_timeout: settings.api.request_timeout,
            log_level,
        }
    }
}
