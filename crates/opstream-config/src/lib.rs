//! Configuration system for opstream.
//!
//! Load registry configuration from TOML or YAML to control duplicate
//! handling, built-in operations and log filtering without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use opstream_config::{DuplicatePolicy, StreamConfig};
//!
//! let config = StreamConfig::from_toml_str(r#"
//!     duplicate_policy = "reject"
//!     builtins = false
//!     log_filter = "opstream_dynamic=debug"
//! "#).unwrap();
//!
//! assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
//! assert!(!config.builtins);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use opstream_config::StreamConfig;
//!
//! let config = StreamConfig::load("opstream.toml").unwrap_or_default();
//! assert!(config.builtins);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StreamConfig {
    /// How an exact re-registration of a signature is handled.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Whether registries start with the built-in operations (`then`).
    #[serde(default = "default_builtins")]
    pub builtins: bool,

    /// Extra `EnvFilter` directive for console output, e.g. `opstream_dynamic=trace`.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_builtins() -> bool {
    true
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            builtins: default_builtins(),
            log_filter: None,
        }
    }
}

impl StreamConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    /// Sets the duplicate policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Enables or disables the built-in operations.
    pub fn with_builtins(mut self, builtins: bool) -> Self {
        self.builtins = builtins;
        self
    }

    /// Sets the console log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "log_filter must not be empty".to_string(),
                ));
            }
        }
        Ok(self)
    }
}

/// Handling of an exact re-registration (same name, same full signature).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept it; streams created afterwards report the operation as ambiguous.
    #[default]
    Defer,

    /// Fail the registration with a duplicated-operation error.
    Reject,
}
