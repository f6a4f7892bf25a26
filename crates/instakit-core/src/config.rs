//! Configuration module for Instakit.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, environment overrides, validation, defaults, and a builder
//! pattern for programmatic use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ConsumerCredentials, DomainError};

/// Environment variable overriding `oauth.consumer_key`
pub const ENV_CONSUMER_KEY: &str = "INSTAKIT_CONSUMER_KEY";

/// Environment variable overriding `oauth.consumer_secret`
pub const ENV_CONSUMER_SECRET: &str = "INSTAKIT_CONSUMER_SECRET";

/// Base URL of the Full API
pub const DEFAULT_BASE_URL: &str = "https://www.instapaper.com";

/// Base URL of the Simple API
pub const DEFAULT_SIMPLE_BASE_URL: &str = "https://www.instapaper.com/api";

/// Feature switch that logs request and response bodies at debug level
pub const FEATURE_LOG_HTTP_TRAFFIC: &str = "log_http_traffic";

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for Instakit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub oauth: OAuthConfig,
    /// Named feature switches; absent names are off.
    pub features: BTreeMap<String, bool>,
    pub logging: LoggingConfig,
}

/// Service endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for the OAuth (Full) API.
    pub base_url: String,
    /// Base URL for the Basic-auth (Simple) API.
    pub simple_base_url: String,
}

/// OAuth consumer credentials issued to the application.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/instakit/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("instakit")
            .join("config.yaml")
    }

    /// Overrides consumer credentials from the process environment.
    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Overrides consumer credentials from `lookup`, which maps an
    /// environment variable name to its value.
    ///
    /// Values returned by `lookup` win over values read from the file.
    pub fn apply_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_CONSUMER_KEY) {
            self.oauth.consumer_key = Some(key);
        }
        if let Some(secret) = lookup(ENV_CONSUMER_SECRET) {
            self.oauth.consumer_secret = Some(secret);
        }
        self
    }

    /// Returns the consumer credentials, failing if either is missing.
    pub fn consumer_credentials(&self) -> Result<ConsumerCredentials, DomainError> {
        ConsumerCredentials::new(
            self.oauth.consumer_key.clone(),
            self.oauth.consumer_secret.clone(),
        )
    }

    /// Returns whether the named feature is switched on.
    pub fn feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Returns whether HTTP request and response bodies should be logged.
    pub fn log_http_traffic(&self) -> bool {
        self.feature(FEATURE_LOG_HTTP_TRAFFIC)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            simple_base_url: DEFAULT_SIMPLE_BASE_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"api.base_url"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Consumer
    /// credentials are not checked here; clients refuse to start without them.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- api ---
        for (field, value) in [
            ("api.base_url", &self.api.base_url),
            ("api.simple_base_url", &self.api.simple_base_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                errors.push(ValidationError {
                    field: field.into(),
                    message: format!("must be an http(s) URL, got '{}'", value),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use instakit_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .consumer_key("my-key")
///     .consumer_secret("my-secret")
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    pub fn simple_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api.simple_base_url = url.into();
        self
    }

    pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
        self.config.oauth.consumer_key = Some(key.into());
        self
    }

    pub fn consumer_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.oauth.consumer_secret = Some(secret.into());
        self
    }

    pub fn feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.config.features.insert(name.into(), enabled);
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Consume the builder, validate, and return the [`Config`] or the
    /// list of validation errors.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let errors = self.config.validate();
        if errors.is_empty() {
            Ok(self.config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
