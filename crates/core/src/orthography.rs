//! Per-language orthography table
//!
//! Each supported language has one immutable entry describing which
//! characters count as whitespace, which punctuation is skipped in user input
//! and in compiled patterns, which characters end a sentence, and what marks
//! a word boundary (empty for languages written without spaces).
//!
//! Classification goes through a [`SubstringTrie`] so that multi-codepoint
//! punctuation can be added without changing the scanners.

use once_cell::sync::Lazy;

use crate::language::Language;
use crate::trie::SubstringTrie;

/// Set of character classes a codepoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharClasses(u8);

impl CharClasses {
    pub const WHITESPACE: Self = Self(0b001);
    pub const PUNCTUATION: Self = Self(0b010);
    pub const SENTENCE_END: Self = Self(0b100);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_whitespace(&self) -> bool {
        self.contains(Self::WHITESPACE)
    }

    pub fn is_punctuation(&self) -> bool {
        self.contains(Self::PUNCTUATION)
    }

    fn merge(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

const LATIN_WHITESPACE: &str = " \t\n\r\u{0B}\u{0C}\u{A0}\u{2009}\u{202F}\u{3000}";
const CJK_WHITESPACE: &str = " \t\n\r\u{0B}\u{0C}\u{A0}\u{3000}";

const LATIN_INPUT_PUNCTUATION: &str = ",;:.!?\"'`’‘“”«»…–—-/";
const LATIN_PATTERN_PUNCTUATION: &str = ",;:.!?\"'`’‘“”«»…–—-/¿¡*#~";
const LATIN_SENTENCE_END: &str = ".!?…";

const SPANISH_INPUT_PUNCTUATION: &str = ",;:.!?\"'`’‘“”«»…–—-/¿¡";

const JAPANESE_INPUT_PUNCTUATION: &str = "、。，．！？：；・「」『』（）…〜!?,.";
const JAPANESE_PATTERN_PUNCTUATION: &str = "、。，．！？：；・「」『』（）…〜!?,.\"'*#";
const JAPANESE_SENTENCE_END: &str = "。．！？!?.";

const CHINESE_INPUT_PUNCTUATION: &str = "，。！？、；：“”‘’（）《》…·!?,.";
const CHINESE_PATTERN_PUNCTUATION: &str = "，。！？、；：“”‘’（）《》…·!?,.\"'*#";
const CHINESE_SENTENCE_END: &str = "。！？!?.";

/// Orthography information for one language
#[derive(Debug)]
pub struct Orthography {
    language: Language,
    whitespace: &'static str,
    input_punctuation: &'static str,
    pattern_punctuation: &'static str,
    sentence_end: &'static str,
    word_boundary: &'static str,
    right_to_left: bool,
    input_classes: SubstringTrie<CharClasses>,
    pattern_classes: SubstringTrie<CharClasses>,
}

static ORTHOGRAPHY_TABLE: Lazy<Vec<Orthography>> = Lazy::new(|| {
    Language::all()
        .iter()
        .map(|language| match language {
            Language::Japanese => Orthography::new(
                *language,
                CJK_WHITESPACE,
                JAPANESE_INPUT_PUNCTUATION,
                JAPANESE_PATTERN_PUNCTUATION,
                JAPANESE_SENTENCE_END,
                "",
            ),
            Language::Chinese => Orthography::new(
                *language,
                CJK_WHITESPACE,
                CHINESE_INPUT_PUNCTUATION,
                CHINESE_PATTERN_PUNCTUATION,
                CHINESE_SENTENCE_END,
                "",
            ),
            Language::Spanish => Orthography::new(
                *language,
                LATIN_WHITESPACE,
                SPANISH_INPUT_PUNCTUATION,
                LATIN_PATTERN_PUNCTUATION,
                LATIN_SENTENCE_END,
                " ",
            ),
            _ => Orthography::new(
                *language,
                LATIN_WHITESPACE,
                LATIN_INPUT_PUNCTUATION,
                LATIN_PATTERN_PUNCTUATION,
                LATIN_SENTENCE_END,
                " ",
            ),
        })
        .collect()
});

impl Orthography {
    fn new(
        language: Language,
        whitespace: &'static str,
        input_punctuation: &'static str,
        pattern_punctuation: &'static str,
        sentence_end: &'static str,
        word_boundary: &'static str,
    ) -> Self {
        Self {
            language,
            whitespace,
            input_punctuation,
            pattern_punctuation,
            sentence_end,
            word_boundary,
            right_to_left: false,
            input_classes: classifier(whitespace, input_punctuation, sentence_end),
            pattern_classes: classifier(whitespace, pattern_punctuation, sentence_end),
        }
    }

    /// Get the table entry for a language
    pub fn for_language(language: Language) -> &'static Orthography {
        ORTHOGRAPHY_TABLE
            .iter()
            .find(|o| o.language == language)
            .unwrap_or(&ORTHOGRAPHY_TABLE[0])
    }

    /// Resolve a BCP-47 tag, falling back to English for unsupported tags
    pub fn for_tag(tag: &str) -> &'static Orthography {
        match Language::from_bcp47(tag) {
            Some(language) => Self::for_language(language),
            None => {
                tracing::warn!(
                    tag = %tag,
                    "Unsupported language tag, falling back to English orthography"
                );
                Self::for_language(Language::English)
            }
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn whitespace(&self) -> &'static str {
        self.whitespace
    }

    pub fn input_punctuation(&self) -> &'static str {
        self.input_punctuation
    }

    pub fn pattern_punctuation(&self) -> &'static str {
        self.pattern_punctuation
    }

    pub fn sentence_end(&self) -> &'static str {
        self.sentence_end
    }

    /// Word boundary marker; empty for languages written without spaces
    pub fn word_boundary(&self) -> &'static str {
        self.word_boundary
    }

    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub fn has_word_spacing(&self) -> bool {
        !self.word_boundary.is_empty()
    }

    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(c)
    }

    pub fn is_sentence_end(&self, c: char) -> bool {
        self.sentence_end.contains(c)
    }

    /// Classify the character run starting at `pos` in user input
    pub fn input_class_at(&self, text: &str, pos: usize) -> Option<(CharClasses, usize)> {
        self.input_classes
            .find(text.as_bytes(), pos, 1)
            .map(|m| (*m.value, m.len))
    }

    /// Classify the character run starting at `pos` in a pattern
    pub fn pattern_class_at(&self, text: &str, pos: usize) -> Option<(CharClasses, usize)> {
        self.pattern_classes
            .find(text.as_bytes(), pos, 1)
            .map(|m| (*m.value, m.len))
    }

    pub fn is_input_punctuation_at(&self, text: &str, pos: usize) -> bool {
        self.input_class_at(text, pos)
            .map(|(classes, _)| classes.is_punctuation() && !classes.is_whitespace())
            .unwrap_or(false)
    }

    /// Skip input punctuation (not whitespace) starting at `pos`
    pub fn skip_input_punctuation(&self, text: &str, pos: usize) -> usize {
        skip_while(text, pos, |at| {
            self.input_class_at(text, at)
                .filter(|(classes, _)| classes.is_punctuation() && !classes.is_whitespace())
                .map(|(_, len)| len)
        })
    }

    /// Skip input punctuation and whitespace starting at `pos`
    pub fn skip_input_separators(&self, text: &str, pos: usize) -> usize {
        skip_while(text, pos, |at| self.input_class_at(text, at).map(|(_, len)| len))
    }

    /// Skip pattern punctuation (not whitespace) starting at `pos`
    pub fn skip_pattern_punctuation(&self, text: &str, pos: usize) -> usize {
        skip_while(text, pos, |at| {
            self.pattern_class_at(text, at)
                .filter(|(classes, _)| classes.is_punctuation() && !classes.is_whitespace())
                .map(|(_, len)| len)
        })
    }
}

fn skip_while<F>(text: &str, mut pos: usize, mut step: F) -> usize
where
    F: FnMut(usize) -> Option<usize>,
{
    while pos < text.len() {
        match step(pos) {
            Some(len) if len > 0 => pos += len,
            _ => break,
        }
    }
    pos
}

fn classifier(
    whitespace: &str,
    punctuation: &str,
    sentence_end: &str,
) -> SubstringTrie<CharClasses> {
    let entries = whitespace
        .chars()
        .map(|c| (c, CharClasses::WHITESPACE))
        .chain(punctuation.chars().map(|c| (c, CharClasses::PUNCTUATION)))
        .chain(sentence_end.chars().map(|c| {
            (
                c,
                CharClasses(CharClasses::PUNCTUATION.0 | CharClasses::SENTENCE_END.0),
            )
        }))
        .map(|(c, classes)| (c.to_string(), classes));

    SubstringTrie::build_with(entries, |classes| classes, |acc, classes| acc.merge(classes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_english() {
        let orthography = Orthography::for_tag("xx-YY");
        assert_eq!(orthography.language(), Language::English);
        assert_eq!(Orthography::for_tag("fr-FR").language(), Language::French);
    }

    #[test]
    fn test_word_boundary() {
        assert_eq!(Orthography::for_language(Language::English).word_boundary(), " ");
        assert!(!Orthography::for_language(Language::Japanese).has_word_spacing());
        assert!(!Orthography::for_language(Language::Chinese).has_word_spacing());
        assert!(!Orthography::for_language(Language::German).is_right_to_left());
    }

    #[test]
    fn test_pattern_punctuation_is_superset() {
        for language in Language::all() {
            let o = Orthography::for_language(*language);
            for c in o.input_punctuation().chars() {
                assert!(o.pattern_punctuation().contains(c), "{language}: {c}");
            }
        }
    }

    #[test]
    fn test_classes_merge() {
        let o = Orthography::for_language(Language::English);
        let (classes, len) = o.input_class_at("?", 0).unwrap();
        assert!(classes.is_punctuation());
        assert!(classes.contains(CharClasses::SENTENCE_END));
        assert_eq!(len, 1);

        let (classes, len) = o.input_class_at("\u{A0}x", 0).unwrap();
        assert!(classes.is_whitespace());
        assert_eq!(len, 2);
        assert!(o.input_class_at("x", 0).is_none());
    }

    #[test]
    fn test_skip_helpers() {
        let o = Orthography::for_language(Language::English);
        assert_eq!(o.skip_input_punctuation("'' a", 0), 2);
        assert_eq!(o.skip_input_separators("'' a", 0), 3);
        assert_eq!(o.skip_input_separators("abc", 0), 0);

        let ja = Orthography::for_language(Language::Japanese);
        assert_eq!(ja.skip_input_punctuation("、。あ", 0), 6);
    }

    #[test]
    fn test_parentheses_not_pattern_punctuation() {
        let o = Orthography::for_language(Language::French);
        for c in "{}[]()|".chars() {
            assert!(!o.pattern_punctuation().contains(c));
        }
    }
}
