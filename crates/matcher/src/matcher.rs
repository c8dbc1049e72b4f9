//! Recursive pattern matcher
//!
//! Two byte cursors walk a normalized input and a compiled pattern. Each
//! step either consumes something and recurses on the remainder or fails the
//! branch; groups and entity captures try their options in order and keep
//! the first one whose remainder also matches. Entity captures are written
//! into the capture map before recursing and undone when the branch fails.

use std::collections::{BTreeMap, HashMap};

use pattern_intent_core::{utf8, Orthography};

use crate::compiler::{split_group, WORD_BOUNDARY_ANCHOR};
use crate::entity::Entity;
use crate::result::EntityValue;
use crate::words::{
    at_word_boundary, grab_next_word, is_whitespace_at, remove_last_token, respace_french,
    trim_end_separators,
};

pub(crate) type Captures = BTreeMap<String, EntityValue>;

/// Entity class referenced by a placeholder (`City:from` → `City`)
pub(crate) fn entity_class(placeholder: &str) -> &str {
    placeholder.split(':').next().unwrap_or(placeholder)
}

pub(crate) struct PatternMatcher<'a> {
    orthography: &'a Orthography,
    entities: &'a HashMap<String, Entity>,
    input: &'a str,
    respace_values: bool,
}

impl<'a> PatternMatcher<'a> {
    pub(crate) fn new(
        orthography: &'a Orthography,
        entities: &'a HashMap<String, Entity>,
        input: &'a str,
        respace_values: bool,
    ) -> Self {
        Self {
            orthography,
            entities,
            input,
            respace_values,
        }
    }

    /// Match the whole input against a compiled pattern, returning the
    /// captures and the number of input bytes matched
    pub(crate) fn check_pattern(&self, pattern: &str) -> Option<(Captures, usize)> {
        let mut captures = Captures::new();
        let bytes_matched = self.check(pattern, 0, 0, &mut captures)?;
        Some((captures, bytes_matched))
    }

    fn check(&self, pattern: &str, p: usize, i: usize, captures: &mut Captures) -> Option<usize> {
        let input = self.input;
        // Punctuation is transparent, and so is the whitespace after it
        let after_punctuation = self.orthography.skip_input_punctuation(input, i);
        let i = if after_punctuation > i {
            self.orthography.skip_input_separators(input, after_punctuation)
        } else {
            i
        };

        let Some(c) = pattern[p..].chars().next() else {
            let rest = self.orthography.skip_input_separators(input, i);
            return (rest >= input.len()).then_some(0);
        };
        let next = p + c.len_utf8();

        match c {
            WORD_BOUNDARY_ANCHOR => {
                if at_word_boundary(self.orthography, input, i) {
                    self.check(pattern, next, i, captures)
                } else {
                    None
                }
            }
            ' ' => self.match_space(pattern, next, i, captures),
            '{' => self.match_entity(pattern, p, i, captures),
            '[' | '(' => self.match_group(pattern, p, i, captures),
            _ => {
                let (buf, len) = utf8::char_bytes_at(input.as_bytes(), i);
                let mut expected = [0u8; 4];
                if len == 0 || buf[..len] != *c.encode_utf8(&mut expected).as_bytes() {
                    return None;
                }
                self.check(pattern, next, i + len, captures)
                    .map(|n| n + len)
            }
        }
    }

    /// A pattern space consumes input whitespace, or nothing when the input
    /// already sits at a word boundary
    fn match_space(&self, pattern: &str, next: usize, i: usize, captures: &mut Captures) -> Option<usize> {
        let mut end = i;
        while end < self.input.len() && is_whitespace_at(self.orthography, self.input, end) {
            let len = utf8::char_len_at(self.input.as_bytes(), end);
            if len == 0 {
                break;
            }
            end += len;
        }

        if end > i {
            self.check(pattern, next, end, captures)
        } else if at_word_boundary(self.orthography, self.input, i) {
            self.check(pattern, next, i, captures)
        } else {
            None
        }
    }

    fn match_group(&self, pattern: &str, p: usize, i: usize, captures: &mut Captures) -> Option<usize> {
        let group = split_group(pattern, p)?;
        let rest = &pattern[group.end..];

        for alternative in &group.alternatives {
            let candidate = format!("{}{}", alternative, rest);
            if let Some(n) = self.check(&candidate, 0, i, captures) {
                return Some(n);
            }
        }

        if group.optional {
            self.check(pattern, group.end, i, captures)
        } else {
            None
        }
    }

    fn match_entity(&self, pattern: &str, p: usize, i: usize, captures: &mut Captures) -> Option<usize> {
        let close = p + pattern[p..].find('}')?;
        let name = &pattern[p + 1..close];
        let rest = close + 1;

        let class = entity_class(name);
        let implicit;
        let entity = match self.entities.get(class) {
            Some(entity) => entity,
            None => {
                implicit = Entity::any(class);
                &implicit
            }
        };

        let start = self.orthography.skip_input_separators(self.input, i);
        if entity.greed() > 0 {
            // Grow one word at a time up to the greed limit
            let mut end = start;
            for _ in 0..entity.greed() {
                let Some((_, word_end)) = grab_next_word(self.orthography, self.input, end) else {
                    break;
                };
                end = word_end;
                if let Some(n) = self.try_capture(entity, name, pattern, rest, start, end, captures) {
                    return Some(n);
                }
            }
            if entity.is_required() {
                return None;
            }
            self.check(pattern, rest, i, captures)
        } else {
            // Take everything, then give words back from the right
            let mut end = trim_end_separators(self.orthography, self.input, start, self.input.len());
            while end > start {
                if let Some(n) = self.try_capture(entity, name, pattern, rest, start, end, captures) {
                    return Some(n);
                }
                end = remove_last_token(self.orthography, self.input, start, end);
            }
            None
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_capture(
        &self,
        entity: &Entity,
        name: &str,
        pattern: &str,
        rest: usize,
        start: usize,
        end: usize,
        captures: &mut Captures,
    ) -> Option<usize> {
        let value_end = trim_end_separators(self.orthography, self.input, start, end);
        if value_end <= start {
            return None;
        }
        let span = &self.input[start..value_end];
        let mut value = entity.parse(span)?;
        if self.respace_values {
            value = respace_french(&value);
        }

        let previous = captures.insert(
            name.to_string(),
            EntityValue {
                value,
                entity_type: entity.entity_type(),
            },
        );
        match self.check(pattern, rest, end, captures) {
            Some(n) => Some(n + self.significant_len(span)),
            None => {
                match previous {
                    Some(old) => captures.insert(name.to_string(), old),
                    None => captures.remove(name),
                };
                None
            }
        }
    }

    /// Bytes of `text` a literal could have matched: whitespace and input
    /// punctuation are not counted
    fn significant_len(&self, text: &str) -> usize {
        let mut count = 0;
        let mut pos = 0;
        while pos < text.len() {
            if let Some((_, len)) = self.orthography.input_class_at(text, pos) {
                pos += len;
                continue;
            }
            let len = utf8::char_len_at(text.as_bytes(), pos);
            if len == 0 {
                break;
            }
            if !text[pos..pos + len].chars().all(char::is_whitespace) {
                count += len;
            }
            pos += len;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_pattern;
    use crate::entity::{EntityMatchMode, EntityType};
    use pattern_intent_core::Language;
    use pattern_intent_numbers::NumberParserRegistry;

    fn run(
        language: Language,
        entities: Vec<Entity>,
        phrase: &str,
        input: &str,
    ) -> Option<(Captures, usize)> {
        let orthography = Orthography::for_language(language);
        let registry = NumberParserRegistry::new();
        let entities: HashMap<String, Entity> = entities
            .into_iter()
            .map(|mut e| {
                e.bind(orthography, &registry);
                (e.name().to_string(), e)
            })
            .collect();
        let pattern = compile_pattern(phrase, orthography).unwrap();
        PatternMatcher::new(orthography, &entities, input, false).check_pattern(pattern.normalized())
    }

    fn english(phrase: &str, input: &str) -> Option<(Captures, usize)> {
        run(Language::English, Vec::new(), phrase, input)
    }

    #[test]
    fn test_literal_match() {
        let (captures, bytes) = english("what time is it", "what time is it").unwrap();
        assert!(captures.is_empty());
        assert_eq!(bytes, 12);
        assert!(english("what time is it", "what time is it now").is_none());
        assert!(english("what time is it", "what time").is_none());
    }

    #[test]
    fn test_punctuation_skipped() {
        assert!(english("don't stop", "dont stop").is_some());
        assert!(english("dont stop", "don't stop").is_some());
        assert!(english("hello world", "hello, world").is_some());
    }

    #[test]
    fn test_spaced_punctuation_skipped() {
        let (_, bytes) = english("hello world", "hello , world").unwrap();
        assert_eq!(bytes, 10);
        assert!(english("wait what", "wait - what").is_some());
        assert!(english("hello world", "hello ,world").is_some());

        let french = run(Language::French, Vec::new(), "bonjour comment vas tu", "bonjour ? comment vas tu");
        assert!(french.is_some());
    }

    #[test]
    fn test_entity_bytes_skip_punctuation() {
        let (captures, bytes) = english("open {app}", "open a-b").unwrap();
        assert_eq!(captures["app"].value, "a-b");
        assert_eq!(bytes, 6);
        let (_, bytes) = english("open a b", "open a-b").unwrap();
        assert_eq!(bytes, 6);
    }

    #[test]
    fn test_optional_group() {
        assert!(english("a[ b] c", "a c").is_some());
        assert!(english("a[ b] c", "a b c").is_some());
        assert!(english("a[ b] c", "a bc").is_none());
        assert!(english("a[ b] c", "ac").is_none());
    }

    #[test]
    fn test_required_group() {
        assert!(english("turn (on|off) the light", "turn off the light").is_some());
        assert!(english("turn (on|off) the light", "turn the light").is_none());
        assert!(english("stop [the music|it]", "stop it").is_some());
        assert!(english("stop [the music|it]", "stop").is_some());
    }

    #[test]
    fn test_greedy_any_backtracks() {
        let (captures, bytes) = english("open {app} please", "open microsoft word please").unwrap();
        assert_eq!(captures["app"].value, "microsoft word");
        assert_eq!(captures["app"].entity_type, EntityType::Any);
        assert_eq!(bytes, 23);
    }

    #[test]
    fn test_two_any_entities() {
        let (captures, _) = english("from {city:from} to {city:to}", "from new york to san jose").unwrap();
        assert_eq!(captures["city:from"].value, "new york");
        assert_eq!(captures["city:to"].value, "san jose");
    }

    #[test]
    fn test_anchor_blocks_glued_words() {
        let app = Entity::list("app", EntityMatchMode::Strict, ["onedrive", "edge"]);
        let captured = run(Language::English, vec![app.clone()], "click [on] {app}", "click onedrive");
        assert_eq!(captured.unwrap().0["app"].value, "onedrive");
        assert!(run(Language::English, vec![app.clone()], "click [on] {app}", "click on edge").is_some());
        assert!(run(Language::English, vec![app], "click [on] {app}", "clickonedrive").is_none());
    }

    #[test]
    fn test_strict_list_required() {
        let size = Entity::list("size", EntityMatchMode::Strict, ["large", "extra large"]);
        let (captures, _) =
            run(Language::English, vec![size.clone()], "a {size} pizza", "a extra large pizza").unwrap();
        assert_eq!(captures["size"].value, "extra large");
        assert!(run(Language::English, vec![size], "a {size} pizza", "a huge pizza").is_none());
    }

    #[test]
    fn test_basic_list_may_be_empty() {
        let color = Entity::list("color", EntityMatchMode::Basic, ["red"]);
        let (captures, _) = run(Language::English, vec![color], "paint it {color}", "paint it").unwrap();
        assert!(captures.is_empty());
    }

    #[test]
    fn test_integer_entity() {
        let count = Entity::prebuilt_integer("count");
        let (captures, _) = run(
            Language::English,
            vec![count.clone()],
            "order {count} pizzas",
            "order two hundred pizzas",
        )
        .unwrap();
        assert_eq!(captures["count"].value, "200");
        assert!(run(Language::English, vec![count], "order {count} pizzas", "order some pizzas").is_none());
    }

    #[test]
    fn test_japanese_without_spaces() {
        let (captures, _) = run(Language::Japanese, Vec::new(), "{部屋}の電気をつけて", "台所の電気をつけて").unwrap();
        assert_eq!(captures["部屋"].value, "台所");

        let count = Entity::prebuilt_integer("数");
        let (captures, _) =
            run(Language::Japanese, vec![count], "{数}個ください", "三百個ください").unwrap();
        assert_eq!(captures["数"].value, "300");
    }

    #[test]
    fn test_entity_class() {
        assert_eq!(entity_class("City:from"), "City");
        assert_eq!(entity_class("City"), "City");
    }
}
