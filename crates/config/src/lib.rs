//! Configuration management for the pattern intent matcher
//!
//! Supports loading configuration from:
//! - YAML/TOML settings files (`config/default`, `config/{env}`)
//! - Environment variables (PATTERN_INTENT__ prefix)
//! - Model definition files describing intents and entities
//!
//! Also owns tracing initialisation for binaries and tests.

pub mod definition;
pub mod observability;
pub mod settings;

pub use definition::{EntityDefinition, EntityKind, EntityMode, IntentDefinition, ModelDefinition};
pub use observability::init_tracing;
pub use settings::{
    load_settings, MatcherSettings, ObservabilityConfig, RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
