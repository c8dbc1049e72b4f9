//! Entities captured by `{name}` placeholders
//!
//! An entity is created unbound and bound to the model's orthography and
//! number parsers when it is registered: list phrases get normalized, the
//! list greed becomes the longest phrase's word count, and integer entities
//! pick their language's spoken-number parser.

use std::fmt;
use std::sync::Arc;

use pattern_intent_config::{EntityDefinition, EntityKind, EntityMode};
use pattern_intent_core::Orthography;
use pattern_intent_numbers::{NoopNumberParser, NumberParserRegistry, SpokenNumberParser};
use serde::{Deserialize, Serialize};

use crate::words::{count_words, normalize_phrase};

/// Entity variant as reported in match results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    List,
    Any,
    PrebuiltInteger,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Any => write!(f, "any"),
            Self::PrebuiltInteger => write!(f, "prebuilt_integer"),
        }
    }
}

/// How strictly a captured value is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityMatchMode {
    /// Any text is accepted
    #[default]
    Basic,
    /// Value must equal a registered phrase
    Strict,
}

impl From<EntityMode> for EntityMatchMode {
    fn from(mode: EntityMode) -> Self {
        match mode {
            EntityMode::Basic => Self::Basic,
            EntityMode::Strict => Self::Strict,
        }
    }
}

#[derive(Clone)]
enum EntityKindState {
    List {
        mode: EntityMatchMode,
        phrases: Vec<String>,
        greed: usize,
    },
    Any,
    PrebuiltInteger {
        parser: Arc<dyn SpokenNumberParser>,
    },
}

/// A named value extractor
#[derive(Clone)]
pub struct Entity {
    name: String,
    kind: EntityKindState,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("type", &self.entity_type())
            .field("mode", &self.mode())
            .field("greed", &self.greed())
            .finish()
    }
}

impl Entity {
    /// Enumeration of phrases
    pub fn list<I, S>(name: impl Into<String>, mode: EntityMatchMode, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: EntityKindState::List {
                mode,
                phrases: phrases.into_iter().map(Into::into).collect(),
                greed: 0,
            },
        }
    }

    /// Free text
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKindState::Any,
        }
    }

    /// Spoken or written integer; the parser is chosen when the entity is
    /// registered with a model
    pub fn prebuilt_integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKindState::PrebuiltInteger {
                parser: Arc::new(NoopNumberParser),
            },
        }
    }

    pub fn from_definition(definition: &EntityDefinition) -> Self {
        match definition.kind {
            EntityKind::List => Self::list(
                definition.name.clone(),
                definition.mode.into(),
                definition.phrases.iter().cloned(),
            ),
            EntityKind::Any => Self::any(definition.name.clone()),
            EntityKind::PrebuiltInteger => Self::prebuilt_integer(definition.name.clone()),
        }
    }

    /// Resolve language-dependent state for a model
    pub(crate) fn bind(&mut self, orthography: &Orthography, numbers: &NumberParserRegistry) {
        match &mut self.kind {
            EntityKindState::List { phrases, greed, .. } => {
                let mut normalized: Vec<String> = phrases
                    .iter()
                    .map(|p| normalize_phrase(orthography, p))
                    .filter(|p| !p.is_empty())
                    .collect();
                normalized.sort();
                normalized.dedup();
                *greed = normalized
                    .iter()
                    .map(|p| count_words(orthography, p))
                    .max()
                    .unwrap_or(0);
                *phrases = normalized;
            }
            EntityKindState::PrebuiltInteger { parser } => {
                *parser = numbers.parser_or_noop(orthography.language());
            }
            EntityKindState::Any => {}
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKindState::List { .. } => EntityType::List,
            EntityKindState::Any => EntityType::Any,
            EntityKindState::PrebuiltInteger { .. } => EntityType::PrebuiltInteger,
        }
    }

    pub fn mode(&self) -> EntityMatchMode {
        match self.kind {
            EntityKindState::List { mode, .. } => mode,
            _ => EntityMatchMode::Basic,
        }
    }

    /// Maximum words one capture may span; 0 is unbounded
    pub fn greed(&self) -> usize {
        match self.kind {
            EntityKindState::List { greed, .. } => greed,
            _ => 0,
        }
    }

    /// Whether a capture must be present and valid for the pattern to match
    pub fn is_required(&self) -> bool {
        match self.kind {
            EntityKindState::List { mode, .. } => mode == EntityMatchMode::Strict,
            EntityKindState::Any => false,
            EntityKindState::PrebuiltInteger { .. } => true,
        }
    }

    /// Registered phrases (normalized once bound); empty for other variants
    pub fn phrases(&self) -> &[String] {
        match &self.kind {
            EntityKindState::List { phrases, .. } => phrases,
            _ => &[],
        }
    }

    /// Value for a captured span, `None` if the span is not acceptable
    pub fn parse(&self, text: &str) -> Option<String> {
        match &self.kind {
            EntityKindState::List {
                mode: EntityMatchMode::Strict,
                phrases,
                ..
            } => {
                let candidate = collapse(text);
                phrases.iter().find(|p| **p == candidate).cloned()
            }
            EntityKindState::List { .. } | EntityKindState::Any => Some(text.to_string()),
            EntityKindState::PrebuiltInteger { parser } => parser.parse(text),
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_intent_core::Language;

    fn bound(mut entity: Entity, language: Language) -> Entity {
        entity.bind(
            Orthography::for_language(language),
            &NumberParserRegistry::new(),
        );
        entity
    }

    #[test]
    fn test_list_greed_and_normalization() {
        let entity = bound(
            Entity::list(
                "device",
                EntityMatchMode::Strict,
                ["Living  Room Light", "fan", "fan"],
            ),
            Language::English,
        );
        assert_eq!(entity.greed(), 3);
        assert_eq!(entity.phrases(), ["fan", "living room light"]);
        assert!(entity.is_required());
        assert_eq!(entity.parse("living room light").as_deref(), Some("living room light"));
        assert_eq!(entity.parse("Fan").as_deref(), Some("fan"));
        assert_eq!(entity.parse("lamp"), None);
    }

    #[test]
    fn test_basic_list_accepts_anything() {
        let entity = bound(
            Entity::list("device", EntityMatchMode::Basic, ["fan"]),
            Language::English,
        );
        assert!(!entity.is_required());
        assert_eq!(entity.parse("toaster").as_deref(), Some("toaster"));
    }

    #[test]
    fn test_any_entity() {
        let entity = Entity::any("app");
        assert_eq!(entity.greed(), 0);
        assert_eq!(entity.mode(), EntityMatchMode::Basic);
        assert_eq!(entity.entity_type(), EntityType::Any);
        assert!(!entity.is_required());
        assert_eq!(entity.parse("microsoft word").as_deref(), Some("microsoft word"));
    }

    #[test]
    fn test_prebuilt_integer_binding() {
        let unbound = Entity::prebuilt_integer("count");
        assert_eq!(unbound.parse("five"), None);

        let english = bound(Entity::prebuilt_integer("count"), Language::English);
        assert!(english.is_required());
        assert_eq!(english.parse("twenty five").as_deref(), Some("25"));

        let german = bound(Entity::prebuilt_integer("count"), Language::German);
        assert_eq!(german.parse("5"), None);
    }

    #[test]
    fn test_from_definition() {
        let definition = EntityDefinition {
            name: "size".to_string(),
            kind: EntityKind::List,
            mode: EntityMode::Strict,
            phrases: vec!["large".to_string()],
        };
        let entity = Entity::from_definition(&definition);
        assert_eq!(entity.name(), "size");
        assert_eq!(entity.mode(), EntityMatchMode::Strict);
        assert_eq!(entity.entity_type(), EntityType::List);
    }
}
