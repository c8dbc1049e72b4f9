//! Spanish spoken-number parser
//!
//! Words are looked up exactly after splitting on whitespace, commas and
//! hyphens. Hundreds ("doscientos") are plain additive words with their own
//! digit mask; "cien"/"ciento", "mil" and "millón" multiply.

use std::collections::HashMap;

use pattern_intent_core::Language;

use crate::aggregate::{self, ConnectorRule, ReadingOrder, WesternGroup};
use crate::lexicon::LexiconTable;
use crate::token::Token;
use crate::SpokenNumberParser;

#[derive(Debug)]
pub struct SpanishNumberParser {
    words: HashMap<String, Token>,
}

impl SpanishNumberParser {
    pub fn new(table: &LexiconTable) -> Self {
        Self {
            words: table
                .entries()
                .iter()
                .map(|entry| (entry.word.clone(), entry.token()))
                .collect(),
        }
    }
}

impl SpokenNumberParser for SpanishNumberParser {
    fn language(&self) -> Option<Language> {
        Some(Language::Spanish)
    }

    fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let text = text.to_lowercase();
        let tokens = text
            .split(|c: char| c.is_whitespace() || c == ',' || c == '-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                if word.bytes().all(|b| b.is_ascii_digit()) {
                    Token::explicit(word)
                } else {
                    self.words.get(word).copied()
                }
            })
            .collect::<Option<Vec<_>>>()?;

        if tokens.is_empty() {
            None
        } else {
            Some(tokens)
        }
    }

    fn parse(&self, text: &str) -> Option<String> {
        let tokens = self.tokenize(text)?;
        if aggregate::has_ambiguous_tens(&tokens) {
            return None;
        }
        aggregate::resolve(
            &tokens,
            || WesternGroup::new(ConnectorRule::BeforeUnit),
            ReadingOrder::RightToLeft,
        )
    }
}
