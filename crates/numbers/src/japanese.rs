//! Japanese spoken-number parser
//!
//! Kanji and hiragana readings run together without separators, so the
//! input is scanned with a longest-match trie. Rendaku readings such as
//! さんびゃく and はっぴゃく are whole lexicon entries. Runs of ASCII or
//! full-width digits become explicit tokens.

use pattern_intent_core::{utf8, Language, SubstringTrie};

use crate::aggregate::{self, CjkGroup, ReadingOrder};
use crate::lexicon::LexiconTable;
use crate::token::Token;
use crate::SpokenNumberParser;

#[derive(Debug)]
pub struct JapaneseNumberParser {
    trie: SubstringTrie<Token>,
}

impl JapaneseNumberParser {
    pub fn new(table: &LexiconTable) -> Self {
        Self {
            trie: table
                .entries()
                .iter()
                .map(|entry| (entry.word.as_str(), entry.token()))
                .collect(),
        }
    }
}

/// ASCII digit for an ASCII or full-width (U+FF10..U+FF19) digit
pub(crate) fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
        _ => None,
    }
}

/// Read a digit run at `pos`, returning the explicit token and end offset
pub(crate) fn digit_run(text: &str, pos: usize) -> Option<(Token, usize)> {
    let mut digits = String::new();
    let mut end = pos;
    for c in text[pos..].chars() {
        match ascii_digit(c) {
            Some(d) => {
                digits.push(d);
                end += c.len_utf8();
            }
            None => break,
        }
    }
    if digits.is_empty() {
        return None;
    }
    Some((Token::explicit(&digits)?, end))
}

impl SpokenNumberParser for JapaneseNumberParser {
    fn language(&self) -> Option<Language> {
        Some(Language::Japanese)
    }

    fn tokenize(&self, text: &str) -> Option<Vec<Token>> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let len = utf8::char_len_at(bytes, pos);
            if len == 0 {
                return None;
            }
            if text[pos..pos + len].chars().all(char::is_whitespace) {
                pos += len;
                continue;
            }
            if let Some((token, end)) = digit_run(text, pos) {
                tokens.push(token);
                pos = end;
                continue;
            }
            let m = self.trie.find(bytes, pos, 1)?;
            tokens.push(*m.value);
            pos = m.end();
        }

        if tokens.is_empty() {
            None
        } else {
            Some(tokens)
        }
    }

    fn parse(&self, text: &str) -> Option<String> {
        let tokens = self.tokenize(text)?;
        aggregate::resolve(&tokens, || CjkGroup::new(false), ReadingOrder::LeftToRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> JapaneseNumberParser {
        JapaneseNumberParser::new(&LexiconTable::japanese())
    }

    #[test]
    fn test_kanji_numbers() {
        let p = parser();
        let cases = [
            ("一", "1"),
            ("十五", "15"),
            ("四十二", "42"),
            ("百", "100"),
            ("二百三十四", "234"),
            ("千二百三十四", "1234"),
            ("一万", "10000"),
            ("三万五千", "35000"),
            ("百万", "1000000"),
            ("一億五千万", "150000000"),
        ];
        for (text, expected) in cases {
            assert_eq!(p.parse(text).as_deref(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_no_abbreviation() {
        assert_eq!(parser().parse("千三").as_deref(), Some("1003"));
    }

    #[test]
    fn test_hiragana_readings() {
        let p = parser();
        assert_eq!(p.parse("さんびゃく").as_deref(), Some("300"));
        assert_eq!(p.parse("はっぴゃくご").as_deref(), Some("805"));
        assert_eq!(p.parse("にじゅうご").as_deref(), Some("25"));
        assert_eq!(p.parse("しち").as_deref(), Some("7"));
    }

    #[test]
    fn test_digits() {
        let p = parser();
        assert_eq!(p.parse("２０２４").as_deref(), Some("2024"));
        assert_eq!(p.parse("15万").as_deref(), Some("150000"));
        assert_eq!(p.parse("二〇二四").as_deref(), Some("2024"));
    }

    #[test]
    fn test_failures() {
        let p = parser();
        assert_eq!(p.parse("りんご"), None);
        assert_eq!(p.parse(""), None);
    }
}
