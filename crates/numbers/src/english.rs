//! English spoken-number parser
//!
//! Number words are located with one regex alternation over the lexicon
//! (longest word first) plus `\d+`. Anything between two matches other than
//! whitespace, hyphens or commas makes the whole input unparseable.

use std::collections::HashMap;

use pattern_intent_core::Language;
use regex::Regex;

use crate::aggregate::{self, ConnectorRule, ReadingOrder, WesternGroup};
use crate::lexicon::LexiconTable;
use crate::token::Token;
use crate::SpokenNumberParser;

#[derive(Debug)]
pub struct EnglishNumberParser {
    words: HashMap<String, Token>,
    pattern: Regex,
}

impl EnglishNumberParser {
    pub fn new(table: &LexiconTable) -> Self {
        let words: HashMap<String, Token> = table
            .entries()
            .iter()
            .map(|entry| (entry.word.clone(), entry.token()))
            .collect();
        Self {
            pattern: word_alternation(table, true),
            words,
        }
    }

    fn token_for(&self, word: &str) -> Option<Token> {
        if word.bytes().all(|b| b.is_ascii_digit()) {
            return Token::explicit(word);
        }
        self.words.get(word).copied()
    }
}

impl SpokenNumberParser for EnglishNumberParser {
    fn language(&self) -> Option<Language> {
        Some(Language::English)
    }

    fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let text = text.to_lowercase();
        scan_with_regex(&self.pattern, &text, is_english_gap, |word| self.token_for(word))
    }

    fn parse(&self, text: &str) -> Option<String> {
        let tokens = self.tokenize(text)?;
        if aggregate::has_ambiguous_tens(&tokens) {
            tracing::debug!(text = %text, "Ambiguous repeated tens, no value");
            return None;
        }
        aggregate::resolve(
            &tokens,
            || WesternGroup::new(ConnectorRule::BeforeNumber),
            ReadingOrder::RightToLeft,
        )
    }
}

fn is_english_gap(gap: &str) -> bool {
    gap.chars().all(|c| c.is_whitespace() || c == '-' || c == ',')
}

/// Regex matching any lexicon word (longest first) or a digit run
pub(crate) fn word_alternation(table: &LexiconTable, word_bounded: bool) -> Regex {
    let mut words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.dedup();

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .chain(std::iter::once(r"\d+".to_string()))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = if word_bounded {
        format!(r"\b(?:{alternation})\b")
    } else {
        format!("(?:{alternation})")
    };
    Regex::new(&pattern).expect("escaped lexicon alternation is a valid regex")
}

/// Collect tokens for every regex match, rejecting the input when any gap
/// between matches fails `is_gap` or a match has no token.
pub(crate) fn scan_with_regex<G, T>(
    pattern: &Regex,
    text: &str,
    is_gap: G,
    mut token_for: T,
) -> Option<Vec<Token>>
where
    G: Fn(&str) -> bool,
    T: FnMut(&str) -> Option<Token>,
{
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if !is_gap(&text[last..m.start()]) {
            return None;
        }
        tokens.push(token_for(m.as_str())?);
        last = m.end();
    }
    if tokens.is_empty() || !is_gap(&text[last..]) {
        return None;
    }
    Some(tokens)
}
