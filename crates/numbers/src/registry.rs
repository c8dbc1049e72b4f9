//! Explicit language → parser registry
//!
//! Built once and shared (usually behind an `Arc`) by every model that needs
//! integer entities. Languages without a parser resolve to
//! [`NoopNumberParser`].

use std::collections::HashMap;
use std::sync::Arc;

use pattern_intent_core::Language;

use crate::chinese::ChineseNumberParser;
use crate::english::EnglishNumberParser;
use crate::french::FrenchNumberParser;
use crate::japanese::JapaneseNumberParser;
use crate::lexicon::LexiconTable;
use crate::spanish::SpanishNumberParser;
use crate::{NoopNumberParser, SpokenNumberParser};

#[derive(Debug, Clone, Default)]
pub struct NumberParserRegistry {
    parsers: HashMap<Language, Arc<dyn SpokenNumberParser>>,
}

impl NumberParserRegistry {
    /// Registry with a parser for every language that has a lexicon
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for language in Language::all() {
            if let Some(table) = LexiconTable::for_language(*language) {
                registry.register(*language, build_parser(&table));
            }
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Add or replace the parser for a language
    pub fn register(&mut self, language: Language, parser: Arc<dyn SpokenNumberParser>) {
        tracing::debug!(language = %language, "Registered number parser");
        self.parsers.insert(language, parser);
    }

    pub fn parser(&self, language: Language) -> Option<Arc<dyn SpokenNumberParser>> {
        self.parsers.get(&language).cloned()
    }

    /// Parser for `language`, or a parser that never yields a value
    pub fn parser_or_noop(&self, language: Language) -> Arc<dyn SpokenNumberParser> {
        match self.parser(language) {
            Some(parser) => parser,
            None => {
                tracing::warn!(
                    language = %language,
                    "No spoken-number parser for language, integer entities will never match"
                );
                Arc::new(NoopNumberParser)
            }
        }
    }

    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.parsers.keys().copied().collect();
        languages.sort();
        languages
    }
}

fn build_parser(table: &LexiconTable) -> Arc<dyn SpokenNumberParser> {
    match table.language() {
        Language::Spanish => Arc::new(SpanishNumberParser::new(table)),
        Language::French => Arc::new(FrenchNumberParser::new(table)),
        Language::Japanese => Arc::new(JapaneseNumberParser::new(table)),
        Language::Chinese => Arc::new(ChineseNumberParser::new(table)),
        _ => Arc::new(EnglishNumberParser::new(table)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_languages() {
        let registry = NumberParserRegistry::new();
        assert_eq!(
            registry.languages(),
            vec![
                Language::English,
                Language::Spanish,
                Language::French,
                Language::Japanese,
                Language::Chinese
            ]
        );
        for language in registry.languages() {
            assert_eq!(registry.parser(language).unwrap().language(), Some(language));
        }
    }

    #[test]
    fn test_noop_fallback() {
        let registry = NumberParserRegistry::new();
        assert!(registry.parser(Language::German).is_none());
        let parser = registry.parser_or_noop(Language::German);
        assert_eq!(parser.language(), None);
        assert_eq!(parser.parse("eins"), None);
        assert_eq!(parser.parse("42"), None);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = NumberParserRegistry::empty();
        assert!(registry.languages().is_empty());
        registry.register(Language::German, Arc::new(NoopNumberParser));
        assert_eq!(registry.languages(), vec![Language::German]);
    }

    #[test]
    fn test_parsers_through_registry() {
        let registry = NumberParserRegistry::new();
        let parse = |language, text| registry.parser(language).unwrap().parse(text);
        assert_eq!(parse(Language::English, "forty two").as_deref(), Some("42"));
        assert_eq!(parse(Language::Spanish, "cuarenta y dos").as_deref(), Some("42"));
        assert_eq!(parse(Language::French, "quarante-deux").as_deref(), Some("42"));
        assert_eq!(parse(Language::Japanese, "四十二").as_deref(), Some("42"));
        assert_eq!(parse(Language::Chinese, "四十二").as_deref(), Some("42"));
    }
}
