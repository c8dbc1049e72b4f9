//! Model definition files
//!
//! A definition lists the intents (each with its phrase templates) and the
//! entities a model should be built with:
//!
//! ```yaml
//! language: en-US
//! intents:
//!   - id: turnOn
//!     phrases: ["turn on [the] {device}"]
//! entities:
//!   - name: device
//!     kind: list
//!     mode: basic
//!     phrases: ["living room light", "fan"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[default]
    List,
    Any,
    PrebuiltInteger,
}

/// Entity match mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityMode {
    #[default]
    Basic,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub id: String,

    #[serde(default)]
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub name: String,

    #[serde(default)]
    pub kind: EntityKind,

    #[serde(default)]
    pub mode: EntityMode,

    /// Only meaningful for list entities
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// Intents and entities for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// BCP-47 tag
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub intents: Vec<IntentDefinition>,

    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for ModelDefinition {
    fn default() -> Self {
        Self {
            language: default_language(),
            intents: Vec::new(),
            entities: Vec::new(),
        }
    }
}

impl ModelDefinition {
    /// Load a definition, choosing the format from the file extension
    /// (`.toml`, otherwise YAML)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        let definition = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        tracing::debug!(
            path = %path.display(),
            intents = definition.intents.len(),
            entities = definition.entities.len(),
            "Loaded model definition"
        );
        Ok(definition)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let definition: Self = serde_yaml::from_str(content)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let definition: Self = toml::from_str(content)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Structural checks; phrase syntax is checked when the model compiles it
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, intent) in self.intents.iter().enumerate() {
            if intent.id.trim().is_empty() {
                return Err(ConfigError::MissingField(format!("intents[{}].id", i)));
            }
        }

        for (i, entity) in self.entities.iter().enumerate() {
            if entity.name.trim().is_empty() {
                return Err(ConfigError::MissingField(format!("entities[{}].name", i)));
            }
            if entity.kind != EntityKind::List && !entity.phrases.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("entities[{}].phrases", i),
                    message: format!("Only list entities take phrases ('{}')", entity.name),
                });
            }
            if entity.kind != EntityKind::List && entity.mode == EntityMode::Strict {
                return Err(ConfigError::InvalidValue {
                    field: format!("entities[{}].mode", i),
                    message: format!("Only list entities can be strict ('{}')", entity.name),
                });
            }
        }

        Ok(())
    }
}
