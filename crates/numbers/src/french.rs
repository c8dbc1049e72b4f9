//! French spoken-number parser
//!
//! Hyphens are read as spaces, so "quatre-vingt-douze" and
//! "quatre vingt douze" tokenize the same way. Compounds live in a
//! [`SubstringTrie`]; at each word the longest entry that ends on a word
//! boundary wins.

use pattern_intent_core::{Language, SubstringTrie};

use crate::aggregate::{self, ConnectorRule, ReadingOrder, WesternGroup};
use crate::lexicon::LexiconTable;
use crate::token::Token;
use crate::SpokenNumberParser;

#[derive(Debug)]
pub struct FrenchNumberParser {
    trie: SubstringTrie<Token>,
}

impl FrenchNumberParser {
    pub fn new(table: &LexiconTable) -> Self {
        Self {
            trie: table
                .entries()
                .iter()
                .map(|entry| (entry.word.as_str(), entry.token()))
                .collect(),
        }
    }

    fn next_token(&self, text: &str, pos: usize) -> Option<(Token, usize)> {
        let bytes = text.as_bytes();
        let at_boundary = |end: usize| end == bytes.len() || bytes[end] == b' ';

        let word = self
            .trie
            .matches_at(bytes, pos)
            .into_iter()
            .rev()
            .find(|m| at_boundary(m.end()));
        if let Some(m) = word {
            return Some((*m.value, m.end()));
        }

        let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 && at_boundary(pos + digits) {
            return Some((Token::explicit(&text[pos..pos + digits])?, pos + digits));
        }
        None
    }
}

/// Lowercase, hyphens and commas to spaces, single spaces between words
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['-', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl SpokenNumberParser for FrenchNumberParser {
    fn language(&self) -> Option<Language> {
        Some(Language::French)
    }

    fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let text = normalize(text);
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            if text.as_bytes()[pos] == b' ' {
                pos += 1;
                continue;
            }
            let (token, end) = self.next_token(&text, pos)?;
            tokens.push(token);
            pos = end;
        }

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
            || WesternGroup::new(ConnectorRule::BeforeNumber),
            ReadingOrder::RightToLeft,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FrenchNumberParser {
        FrenchNumberParser::new(&LexiconTable::french())
    }

    #[test]
    fn test_seventy_to_ninety_nine() {
        let p = parser();
        let cases = [
            ("soixante et onze", "71"),
            ("soixante-dix-sept", "77"),
            ("quatre-vingts", "80"),
            ("quatre vingt", "80"),
            ("quatre-vingt-un", "81"),
            ("quatre-vingt-onze", "91"),
            ("quatre-vingt-dix-neuf", "99"),
        ];
        for (text, expected) in cases {
            assert_eq!(p.parse(text).as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_hyphenated_and_spaced_forms_agree() {
        let p = parser();
        assert_eq!(p.parse("quatre-vingt-douze").as_deref(), Some("92"));
        assert_eq!(p.parse("quatre vingt douze").as_deref(), Some("92"));
    }

    #[test]
    fn test_larger_numbers() {
        let p = parser();
        assert_eq!(p.parse("vingt et un").as_deref(), Some("21"));
        assert_eq!(p.parse("dix-huit").as_deref(), Some("18"));
        assert_eq!(p.parse("deux cent quatre-vingt-douze").as_deref(), Some("292"));
        assert_eq!(p.parse("mille deux cents").as_deref(), Some("1200"));
        assert_eq!(p.parse("trois millions").as_deref(), Some("3000000"));
        assert_eq!(p.parse("Zéro").as_deref(), Some("0"));
    }

    #[test]
    fn test_prefix_needs_word_boundary() {
        let p = parser();
        // "six" must not match the start of "sixième"
        assert_eq!(p.parse("sixième"), None);
        assert_eq!(p.parse("quatre"), Some("4".to_string()));
        assert_eq!(p.parse("quatre pommes"), None);
    }
}
