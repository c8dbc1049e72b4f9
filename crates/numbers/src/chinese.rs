//! Chinese spoken-number parser
//!
//! Numerals are located with a regex alternation over the lexicon plus
//! `\d+`, so mixed forms like "2千3" tokenize naturally. 零/〇 directly
//! after a multiplier is a connector (一千零五); anywhere else it is the
//! digit zero, which keeps digit-by-digit readings such as 三二〇五八二
//! intact. A bare unit right after a multiplier abbreviates the next lower
//! position (两百五 = 250).

use std::collections::HashMap;

use pattern_intent_core::Language;
use regex::Regex;

use crate::aggregate::{self, CjkGroup, ReadingOrder};
use crate::english::{scan_with_regex, word_alternation};
use crate::japanese::ascii_digit;
use crate::lexicon::LexiconTable;
use crate::token::Token;
use crate::SpokenNumberParser;

const ZEROS: [&str; 2] = ["零", "〇"];

#[derive(Debug)]
pub struct ChineseNumberParser {
    words: HashMap<String, Token>,
    pattern: Regex,
}

impl ChineseNumberParser {
    pub fn new(table: &LexiconTable) -> Self {
        Self {
            words: table
                .entries()
                .iter()
                .map(|entry| (entry.word.clone(), entry.token()))
                .collect(),
            pattern: word_alternation(table, false),
        }
    }

    fn token_for(&self, word: &str) -> Option<Token> {
        if let Some(token) = self.words.get(word) {
            return Some(*token);
        }
        let digits: String = word.chars().map(ascii_digit).collect::<Option<_>>()?;
        Token::explicit(&digits)
    }
}

impl SpokenNumberParser for ChineseNumberParser {
    fn language(&self) -> Option<Language> {
        Some(Language::Chinese)
    }

    fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let mut previous: Option<Token> = None;
        scan_with_regex(
            &self.pattern,
            text,
            |gap| gap.chars().all(|c| c.is_whitespace() || c == ',' || c == '，'),
            |word| {
                let structured = previous.is_some_and(|p| p.is_power_of_ten(10));
                let token = if ZEROS.contains(&word) && structured {
                    Token::connector()
                } else {
                    self.token_for(word)?
                };
                previous = Some(token);
                Some(token)
            },
        )
    }

    fn parse(&self, text: &str) -> Option<String> {
        let tokens = self.tokenize(text)?;
        aggregate::resolve(&tokens, || CjkGroup::new(true), ReadingOrder::LeftToRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ChineseNumberParser {
        ChineseNumberParser::new(&LexiconTable::chinese())
    }

    #[test]
    fn test_structured_numbers() {
        let p = parser();
        let cases = [
            ("零", "0"),
            ("十五", "15"),
            ("二十一", "21"),
            ("一百零一", "101"),
            ("一千零五", "1005"),
            ("一万", "10000"),
            ("一亿五千万", "150000000"),
        ];
        for (text, expected) in cases {
            assert_eq!(p.parse(text).as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_continuous_digit_reading() {
        assert_eq!(parser().parse("三二〇五八二").as_deref(), Some("320582"));
        assert_eq!(parser().parse("幺三八").as_deref(), Some("138"));
        assert_eq!(parser().parse("一千一千").as_deref(), Some("10001000"));
    }

    #[test]
    fn test_abbreviated_forms() {
        let p = parser();
        assert_eq!(p.parse("两百五").as_deref(), Some("250"));
        assert_eq!(p.parse("2千3").as_deref(), Some("2300"));
        assert_eq!(p.parse("三万五").as_deref(), Some("35000"));
        assert_eq!(p.parse("一百一").as_deref(), Some("110"));
    }

    #[test]
    fn test_failures() {
        let p = parser();
        assert_eq!(p.parse("你好"), None);
        assert_eq!(p.parse("三个"), None);
        assert_eq!(p.parse(""), None);
    }
}
