//! Pattern matching model
//!
//! Owns the intents (by id) and entities (by name) of one language. All
//! registration goes through a write lock and every registration is fully
//! validated before the state is touched, so matching never sees a partial
//! update.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use pattern_intent_config::{MatcherSettings, ModelDefinition};
use pattern_intent_core::{Language, Orthography};
use pattern_intent_numbers::NumberParserRegistry;

use crate::compiler::{compile_pattern, IntentPattern};
use crate::entity::Entity;
use crate::matcher::PatternMatcher;
use crate::result::{rank_matches, IntentMatchResult};
use crate::words::{normalize_input, MatchOptions};
use crate::{MatcherError, Result};

/// An intent and its compiled patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    id: String,
    priority: u32,
    patterns: Vec<IntentPattern>,
}

impl Intent {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn patterns(&self) -> &[IntentPattern] {
        &self.patterns
    }
}

#[derive(Debug, Default)]
struct ModelState {
    intents: BTreeMap<String, Intent>,
    entities: HashMap<String, Entity>,
}

/// Intents and entities for one language
#[derive(Debug)]
pub struct PatternMatchingModel {
    orthography: &'static Orthography,
    numbers: Arc<NumberParserRegistry>,
    options: MatchOptions,
    state: RwLock<ModelState>,
}

impl PatternMatchingModel {
    /// Create a model for a BCP-47 tag. Unsupported tags fall back to
    /// English with a warning.
    pub fn new(language_tag: &str, numbers: Arc<NumberParserRegistry>) -> Self {
        let orthography = Orthography::for_tag(language_tag);
        tracing::debug!(
            tag = %language_tag,
            language = %orthography.language(),
            "Created pattern matching model"
        );
        Self {
            orthography,
            numbers,
            options: MatchOptions::default(),
            state: RwLock::new(ModelState::default()),
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a model from a definition: entities first, then intents
    pub fn from_definition(definition: &ModelDefinition, numbers: Arc<NumberParserRegistry>) -> Result<Self> {
        definition.validate()?;
        let model = Self::new(&definition.language, numbers);
        for entity in &definition.entities {
            model.add_entity(Entity::from_definition(entity))?;
        }
        for intent in &definition.intents {
            model.add_intent(&intent.id, &intent.phrases)?;
        }
        Ok(model)
    }

    /// Build a model from matcher settings, loading `definition_path` when set
    pub fn from_settings(settings: &MatcherSettings, numbers: Arc<NumberParserRegistry>) -> Result<Self> {
        let model = match &settings.definition_path {
            Some(path) => {
                let mut definition = ModelDefinition::from_path(path)?;
                if definition.language.trim().is_empty() {
                    definition.language = settings.default_language.clone();
                }
                Self::from_definition(&definition, numbers)?
            }
            None => Self::new(&settings.default_language, numbers),
        };
        Ok(model.with_options(MatchOptions::from(settings)))
    }

    pub fn language(&self) -> Language {
        self.orthography.language()
    }

    pub fn orthography(&self) -> &'static Orthography {
        self.orthography
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Register phrases for an intent.
    ///
    /// Every phrase is compiled before anything is stored; one bad phrase
    /// rejects the whole call. Adding to an existing id appends its
    /// patterns, skipping ones it already has.
    pub fn add_intent<I, S>(&self, intent_id: &str, phrases: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if intent_id.trim().is_empty() {
            return Err(MatcherError::EmptyIntentId);
        }

        let patterns = phrases
            .into_iter()
            .map(|phrase| compile_pattern(phrase.as_ref(), self.orthography))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut state = self.state.write();
        let intent = state
            .intents
            .entry(intent_id.to_string())
            .or_insert_with(|| Intent {
                id: intent_id.to_string(),
                priority: 0,
                patterns: Vec::new(),
            });

        let mut added = 0;
        for pattern in patterns {
            if intent
                .patterns
                .iter()
                .any(|existing| existing.normalized() == pattern.normalized())
            {
                continue;
            }
            intent.patterns.push(pattern);
            added += 1;
        }

        tracing::debug!(
            intent = %intent_id,
            added,
            total = intent.patterns.len(),
            "Registered intent patterns"
        );
        Ok(())
    }

    /// Register an entity, replacing any entity with the same name
    pub fn add_entity(&self, mut entity: Entity) -> Result<()> {
        if entity.name().trim().is_empty() {
            return Err(MatcherError::EmptyEntityName);
        }
        entity.bind(self.orthography, &self.numbers);

        let mut state = self.state.write();
        let name = entity.name().to_string();
        if state.entities.insert(name.clone(), entity).is_some() {
            tracing::debug!(entity = %name, "Replaced existing entity");
        } else {
            tracing::debug!(entity = %name, "Registered entity");
        }
        Ok(())
    }

    /// Remove an intent; returns whether it existed
    pub fn remove_intent(&self, intent_id: &str) -> bool {
        self.state.write().intents.remove(intent_id).is_some()
    }

    pub fn intent(&self, intent_id: &str) -> Option<Intent> {
        self.state.read().intents.get(intent_id).cloned()
    }

    pub fn intent_ids(&self) -> Vec<String> {
        self.state.read().intents.keys().cloned().collect()
    }

    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().entities.keys().cloned().collect();
        names.sort();
        names
    }

    /// Every pattern that matches `input`, in no particular order
    pub fn find_matches(&self, input: &str) -> Vec<IntentMatchResult> {
        let normalized = normalize_input(self.orthography, input, &self.options);
        let respace = self.language() == Language::French && self.options.normalize_french_spacing;

        let state = self.state.read();
        let matcher = PatternMatcher::new(self.orthography, &state.entities, &normalized, respace);

        let mut results = Vec::new();
        for intent in state.intents.values() {
            for pattern in &intent.patterns {
                match matcher.check_pattern(pattern.normalized()) {
                    Some((entities, bytes_matched)) => {
                        tracing::trace!(
                            intent = %intent.id,
                            pattern = %pattern.phrase(),
                            bytes_matched,
                            "Pattern matched"
                        );
                        results.push(IntentMatchResult {
                            intent_id: intent.id.clone(),
                            pattern: pattern.phrase().to_string(),
                            entities,
                            priority: intent.priority,
                            bytes_matched,
                        });
                    }
                    None => {
                        tracing::trace!(intent = %intent.id, pattern = %pattern.phrase(), "No match");
                    }
                }
            }
        }
        results
    }

    /// Highest ranked match for `input`
    pub fn best_match(&self, input: &str) -> Option<IntentMatchResult> {
        rank_matches(self.find_matches(input)).into_iter().next()
    }
}
