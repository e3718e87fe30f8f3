//! Engine configuration.
//!
//! Configuration is plain JSON. Every field has a default, so an empty
//! object (or no file at all) yields `EngineConfig::default()`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// What the transition engine does when a hook reports a missing resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingResourcePolicy {
    /// Log a warning and report `TransitionOutcome::Abandoned`.
    #[default]
    Log,

    /// Return `TransitionError::ResourceNotFound` to the caller.
    Propagate,
}

/// Settings for a `TransitionEngine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub missing_resource: MissingResourcePolicy,
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if the content is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build configuration from an already decoded JSON value, e.g. a
    /// section of a larger application config.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}
