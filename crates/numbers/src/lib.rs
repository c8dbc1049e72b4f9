//! Spoken-number parsers
//!
//! Converts number words (and digit strings mixed with them) into a decimal
//! string, for English, Spanish, French, Japanese and Chinese. Each parser
//! runs the same three stages:
//! 1. Lexical scan into [`Token`]s
//! 2. Segmentation into independent numeral groups by digit-mask overlap
//! 3. Aggregation of each group and concatenation in reading order
//!
//! A parser returns `None` rather than an error for anything it cannot read.

pub mod chinese;
pub mod english;
pub mod french;
pub mod japanese;
pub mod lexicon;
pub mod registry;
pub mod spanish;
pub mod token;

mod aggregate;

use pattern_intent_core::Language;

pub use chinese::ChineseNumberParser;
pub use english::EnglishNumberParser;
pub use french::FrenchNumberParser;
pub use japanese::JapaneseNumberParser;
pub use lexicon::{LexiconEntry, LexiconTable};
pub use registry::NumberParserRegistry;
pub use spanish::SpanishNumberParser;
pub use token::{Token, TokenKind};

/// Locale-specific spoken-number parser
pub trait SpokenNumberParser: Send + Sync + std::fmt::Debug {
    /// Language this parser reads, `None` for the no-op parser
    fn language(&self) -> Option<Language>;

    /// Lexical stage only
    fn tokenize(&self, text: &str) -> Option<Vec<Token>>;

    /// Decimal string for `text`, or `None` when it is not a number
    fn parse(&self, text: &str) -> Option<String>;
}

/// Parser for languages without number support; never yields a value
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNumberParser;

impl SpokenNumberParser for NoopNumberParser {
    fn language(&self) -> Option<Language> {
        None
    }

    fn tokenize(&self, _text: &str) -> Option<Vec<Token>> {
        None
    }

    fn parse(&self, _text: &str) -> Option<String> {
        None
    }
}
