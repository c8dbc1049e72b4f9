//! Match results and ranking

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// Captured value of one placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityValue {
    pub value: String,
    pub entity_type: EntityType,
}

/// One successful pattern match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentMatchResult {
    pub intent_id: String,
    /// Phrase of the matched pattern as registered
    pub pattern: String,
    /// Keyed by the full placeholder name (including any `:` suffix)
    pub entities: BTreeMap<String, EntityValue>,
    pub priority: u32,
    /// Non-whitespace input bytes consumed by literals and captures
    pub bytes_matched: usize,
}

impl IntentMatchResult {
    pub fn entity_value(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(|e| e.value.as_str())
    }

    fn count_of(&self, entity_type: EntityType) -> usize {
        self.entities
            .values()
            .filter(|e| e.entity_type == entity_type)
            .count()
    }
}

/// Order two candidates for the same input, better first.
///
/// 1. lower priority
/// 2. fewer entities (an exact match with none beats any capture)
/// 3. more integer entities
/// 4. more list entities
/// 5. more input bytes matched
pub fn compare_matches(a: &IntentMatchResult, b: &IntentMatchResult) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.entities.len().cmp(&b.entities.len()))
        .then_with(|| {
            b.count_of(EntityType::PrebuiltInteger)
                .cmp(&a.count_of(EntityType::PrebuiltInteger))
        })
        .then_with(|| b.count_of(EntityType::List).cmp(&a.count_of(EntityType::List)))
        .then_with(|| b.bytes_matched.cmp(&a.bytes_matched))
}

/// Sort candidates best first; equal candidates keep their order
pub fn rank_matches(mut matches: Vec<IntentMatchResult>) -> Vec<IntentMatchResult> {
    matches.sort_by(compare_matches);
    matches
}
