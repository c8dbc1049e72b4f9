//! Offline pattern-matching intent recognizer
//!
//! Intents are registered as phrase templates such as
//! `"turn on [the] {device}"`. Input text is matched against every pattern
//! of every intent; each match yields the intent id plus the values captured
//! by its `{entity}` placeholders, and candidates are ranked so the most
//! specific match comes first.
//!
//! ```
//! use std::sync::Arc;
//!
//! use pattern_intent_matcher::{Entity, EntityMatchMode, PatternMatchingModel};
//! use pattern_intent_numbers::NumberParserRegistry;
//!
//! fn main() -> pattern_intent_matcher::Result<()> {
//!     let model = PatternMatchingModel::new("en-US", Arc::new(NumberParserRegistry::new()));
//!     model.add_entity(Entity::list(
//!         "device",
//!         EntityMatchMode::Basic,
//!         ["living room light", "fan"],
//!     ))?;
//!     model.add_intent("turnOn", ["turn on [the] {device}"])?;
//!
//!     let best = model.best_match("Turn on the living room light").unwrap();
//!     assert_eq!(best.intent_id, "turnOn");
//!     assert_eq!(best.entity_value("device"), Some("living room light"));
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod entity;
pub mod model;
pub mod result;
pub mod words;

mod matcher;

pub use compiler::{compile_pattern, IntentPattern, PatternError, WORD_BOUNDARY_ANCHOR};
pub use entity::{Entity, EntityMatchMode, EntityType};
pub use model::{Intent, PatternMatchingModel};
pub use result::{compare_matches, rank_matches, EntityValue, IntentMatchResult};
pub use words::{count_words, grab_next_word, normalize_input, normalize_phrase, remove_last_token, MatchOptions};

use pattern_intent_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("Intent id must not be empty")]
    EmptyIntentId,

    #[error("Entity name must not be empty")]
    EmptyEntityName,

    #[error("Model definition error: {0}")]
    Definition(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MatcherError>;
