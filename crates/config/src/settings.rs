//! Main settings module

use config::{Config, Environment, File};
use pattern_intent_core::Language;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Unsupported language tags only warn
    #[default]
    Development,
    Staging,
    /// Unsupported language tags are rejected
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Matcher configuration
    #[serde(default)]
    pub matcher: MatcherSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Matcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSettings {
    /// BCP-47 tag used when a model is created without one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Drop the no-break space French puts before `:;!?»` in input
    #[serde(default = "default_true")]
    pub normalize_french_spacing: bool,

    /// Strip trailing sentence-end punctuation from input
    #[serde(default = "default_true")]
    pub strip_sentence_end: bool,

    /// Model definition loaded at startup (YAML or TOML)
    #[serde(default)]
    pub definition_path: Option<String>,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            normalize_french_spacing: true,
            strip_sentence_end: true,
            definition_path: None,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_matcher()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_matcher(&self) -> Result<(), ConfigError> {
        let tag = self.matcher.default_language.trim();
        if tag.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "matcher.default_language".to_string(),
                message: "Language tag must not be empty".to_string(),
            });
        }

        if Language::from_bcp47(tag).is_none() {
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "matcher.default_language".to_string(),
                    message: format!("Unsupported language tag '{}'", tag),
                });
            }
            tracing::warn!(tag = %tag, "Unsupported default language, models will fall back to English");
        }

        if let Some(path) = &self.matcher.definition_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "matcher.definition_path".to_string(),
                    message: "Definition path must not be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown log level '{}', expected one of {}",
                    self.observability.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (PATTERN_INTENT__ prefix, `__` separator)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("PATTERN_INTENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.matcher.default_language, "en-US");
        assert!(settings.matcher.normalize_french_spacing);
        assert!(settings.matcher.strip_sentence_end);
        assert_eq!(settings.observability.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "loud".to_string();
        assert!(settings.validate().is_err());

        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());

        settings.matcher.default_language = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unsupported_language_strict_only() {
        let mut settings = Settings::default();
        settings.matcher.default_language = "ko-KR".to_string();
        assert!(settings.validate().is_ok());

        settings.environment = RuntimeEnvironment::Production;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "matcher:\n  default_language: fr-FR\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.matcher.default_language, "fr-FR");
        assert!(settings.matcher.strip_sentence_end);
        assert_eq!(settings.environment, RuntimeEnvironment::Development);
    }

    #[test]
    fn test_load_settings_without_files() {
        let settings = load_settings(Some("nonexistent-env")).unwrap();
        assert!(settings.validate().is_ok());
    }
}
