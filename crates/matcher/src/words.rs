//! Word and boundary helpers
//!
//! Everything works on byte offsets into an already normalized string.
//! For languages written with spaces a word runs to the next whitespace;
//! for Japanese and Chinese every codepoint is a word.

use pattern_intent_config::MatcherSettings;
use pattern_intent_core::{utf8, Language, Orthography};
use serde::{Deserialize, Serialize};

const FRENCH_NO_BREAK_SPACES: [char; 2] = ['\u{A0}', '\u{202F}'];
const FRENCH_SPACED_PUNCTUATION: &str = ":;!?»";
const FRENCH_RESPACED_PUNCTUATION: &str = ":;!?";

/// Input normalization switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Remove the no-break space before French high punctuation in input
    /// and put it back into captured entity values
    pub normalize_french_spacing: bool,
    /// Drop trailing sentence-end punctuation from input
    pub strip_sentence_end: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            normalize_french_spacing: true,
            strip_sentence_end: true,
        }
    }
}

impl From<&MatcherSettings> for MatchOptions {
    fn from(settings: &MatcherSettings) -> Self {
        Self {
            normalize_french_spacing: settings.normalize_french_spacing,
            strip_sentence_end: settings.strip_sentence_end,
        }
    }
}

/// Lowercase `text` and collapse whitespace runs to the language's word
/// boundary (dropped entirely for languages without spacing).
pub fn normalize_phrase(orthography: &Orthography, text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| orthography.is_whitespace(c) || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(orthography.word_boundary())
}

/// Normalize user input before matching
pub fn normalize_input(orthography: &Orthography, text: &str, options: &MatchOptions) -> String {
    let text = if orthography.language() == Language::French && options.normalize_french_spacing {
        remove_french_spacing(text)
    } else {
        text.to_string()
    };

    let mut normalized = normalize_phrase(orthography, &text);
    if options.strip_sentence_end {
        while let Some(c) = normalized.chars().last() {
            if !orthography.is_sentence_end(c) && !c.is_whitespace() {
                break;
            }
            normalized.pop();
        }
    }
    normalized
}

fn remove_french_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let before_punctuation = chars
            .peek()
            .is_some_and(|next| FRENCH_SPACED_PUNCTUATION.contains(*next));
        if FRENCH_NO_BREAK_SPACES.contains(&c) && before_punctuation {
            continue;
        }
        out.push(c);
    }
    out
}

/// Put a no-break space back before `:;!?` wherever no space precedes it
pub(crate) fn respace_french(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let mut previous: Option<char> = None;
    for c in value.chars() {
        if FRENCH_RESPACED_PUNCTUATION.contains(c) && previous.is_some_and(|p| !p.is_whitespace()) {
            out.push('\u{A0}');
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

/// Find the next word at or after `pos`, skipping input punctuation and
/// whitespace first. Returns the word's `(start, end)` byte span.
pub fn grab_next_word(orthography: &Orthography, text: &str, pos: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let start = orthography.skip_input_separators(text, pos);
    if start >= bytes.len() {
        return None;
    }

    let first = utf8::char_len_at(bytes, start);
    if first == 0 {
        return None;
    }
    if !orthography.has_word_spacing() {
        return Some((start, start + first));
    }

    let mut end = start;
    while end < bytes.len() {
        let len = utf8::char_len_at(bytes, end);
        if len == 0 || is_whitespace_at(orthography, text, end) {
            break;
        }
        end += len;
    }
    Some((start, end))
}

/// Shrink the span `[start, end)` by its last word, returning the new end.
///
/// Trailing separators are dropped on both sides of the removed word, so
/// the returned span never ends in whitespace or punctuation.
pub fn remove_last_token(orthography: &Orthography, text: &str, start: usize, end: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = trim_end_separators(orthography, text, start, end);
    if end <= start {
        return start;
    }

    if orthography.has_word_spacing() {
        while end > start {
            let len = utf8::last_char_len(bytes, end);
            if len == 0 {
                return start;
            }
            if is_whitespace_at(orthography, text, end - len) {
                break;
            }
            end -= len;
        }
    } else {
        let len = utf8::last_char_len(bytes, end);
        if len == 0 {
            return start;
        }
        end -= len;
    }

    trim_end_separators(orthography, text, start, end.max(start))
}

/// Number of words in `text`
pub fn count_words(orthography: &Orthography, text: &str) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while let Some((_, end)) = grab_next_word(orthography, text, pos) {
        count += 1;
        pos = end;
    }
    count
}

/// Move `end` left past any trailing whitespace or input punctuation
pub(crate) fn trim_end_separators(orthography: &Orthography, text: &str, start: usize, end: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = end.min(bytes.len());
    while end > start {
        let len = utf8::last_char_len(bytes, end);
        if len == 0 || orthography.input_class_at(text, end - len).is_none() {
            break;
        }
        end -= len;
    }
    end
}

pub(crate) fn is_whitespace_at(orthography: &Orthography, text: &str, pos: usize) -> bool {
    match orthography.input_class_at(text, pos) {
        Some((classes, _)) => classes.is_whitespace(),
        None => text[pos..].chars().next().is_some_and(char::is_whitespace),
    }
}

/// Whether `pos` sits between words: at either end of `text`, or next to
/// whitespace or punctuation. Always true without word spacing.
pub(crate) fn at_word_boundary(orthography: &Orthography, text: &str, pos: usize) -> bool {
    if !orthography.has_word_spacing() || pos == 0 || pos >= text.len() {
        return true;
    }
    let previous = utf8::last_char_len(text.as_bytes(), pos);
    if previous == 0 {
        return true;
    }
    orthography.input_class_at(text, pos - previous).is_some()
        || orthography.input_class_at(text, pos).is_some()
}
