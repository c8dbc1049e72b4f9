//! Phrase template compiler
//!
//! Turns `"Turn on [the] {device}, please"` into the normalized form the
//! matcher walks: literal text lowercased, pattern punctuation removed,
//! whitespace collapsed to single spaces (removed for languages without
//! spacing), entity placeholders kept as `{name}` and groups as `[a|b]` /
//! `(a|b)`. An optional group directly followed by a placeholder gets a
//! [`WORD_BOUNDARY_ANCHOR`] after its closing bracket.

use pattern_intent_core::Orthography;
use thiserror::Error;

/// Internal marker requiring the input to sit at a word boundary
pub const WORD_BOUNDARY_ANCHOR: char = '\u{1E}';

/// Syntax error in a phrase template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern phrase is empty")]
    EmptyPhrase,

    #[error("Unclosed '{{' at byte {position} in '{phrase}'")]
    UnclosedEntity { phrase: String, position: usize },

    #[error("Nested '{{' at byte {position} in '{phrase}'")]
    NestedEntity { phrase: String, position: usize },

    #[error("Empty entity name at byte {position} in '{phrase}'")]
    EmptyEntityName { phrase: String, position: usize },

    #[error("Unclosed '{opener}' at byte {position} in '{phrase}'")]
    UnclosedGroup {
        phrase: String,
        opener: char,
        position: usize,
    },

    #[error("Unexpected '{closer}' at byte {position} in '{phrase}'")]
    UnexpectedCloser {
        phrase: String,
        closer: char,
        position: usize,
    },

    #[error("'|' outside of a group at byte {position} in '{phrase}'")]
    AlternativeOutsideGroup { phrase: String, position: usize },
}

/// A compiled phrase template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentPattern {
    normalized: String,
    entity_names: Vec<String>,
    phrase: String,
}

impl IntentPattern {
    /// Normalized form walked by the matcher
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Placeholder names in order of first appearance
    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    /// Phrase as registered
    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

/// Compile a phrase template for a language
pub fn compile_pattern(phrase: &str, orthography: &Orthography) -> Result<IntentPattern, PatternError> {
    let source = phrase.trim();
    if source.is_empty() {
        return Err(PatternError::EmptyPhrase);
    }

    let mut normalized = String::with_capacity(source.len());
    let mut entity_names: Vec<String> = Vec::new();
    let mut groups: Vec<(char, usize)> = Vec::new();
    let mut has_content = false;
    let mut pending_space = false;

    let mut chars = source.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if orthography.is_whitespace(c) || c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            if orthography.has_word_spacing() && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
        }

        match c {
            '{' => {
                let close = entity_end(source, pos)?;
                let name = source[pos + 1..close].trim();
                if name.is_empty() {
                    return Err(PatternError::EmptyEntityName {
                        phrase: source.to_string(),
                        position: pos,
                    });
                }
                normalized.push('{');
                normalized.push_str(name);
                normalized.push('}');
                if !entity_names.iter().any(|n| n == name) {
                    entity_names.push(name.to_string());
                }
                has_content = true;
                while chars.next_if(|&(p, _)| p <= close).is_some() {}
            }
            '}' => {
                return Err(PatternError::UnexpectedCloser {
                    phrase: source.to_string(),
                    closer: c,
                    position: pos,
                })
            }
            '[' | '(' => {
                groups.push((c, pos));
                normalized.push(c);
            }
            ']' | ')' => {
                let opener = if c == ']' { '[' } else { '(' };
                match groups.pop() {
                    Some((open, _)) if open == opener => normalized.push(c),
                    _ => {
                        return Err(PatternError::UnexpectedCloser {
                            phrase: source.to_string(),
                            closer: c,
                            position: pos,
                        })
                    }
                }
                if c == ']' && next_significant(source, pos + 1) == Some('{') {
                    normalized.push(WORD_BOUNDARY_ANCHOR);
                }
            }
            '|' => {
                if groups.is_empty() {
                    return Err(PatternError::AlternativeOutsideGroup {
                        phrase: source.to_string(),
                        position: pos,
                    });
                }
                normalized.push('|');
            }
            _ => {
                let is_punctuation = orthography
                    .pattern_class_at(source, pos)
                    .is_some_and(|(classes, _)| classes.is_punctuation());
                if !is_punctuation {
                    normalized.extend(c.to_lowercase());
                    has_content = true;
                }
            }
        }
    }

    if let Some((opener, position)) = groups.pop() {
        return Err(PatternError::UnclosedGroup {
            phrase: source.to_string(),
            opener,
            position,
        });
    }
    if !has_content {
        return Err(PatternError::EmptyPhrase);
    }

    Ok(IntentPattern {
        normalized,
        entity_names,
        phrase: phrase.to_string(),
    })
}

/// Byte offset of the `}` closing the placeholder opened at `open`
fn entity_end(source: &str, open: usize) -> Result<usize, PatternError> {
    for (i, c) in source[open + 1..].char_indices() {
        let pos = open + 1 + i;
        match c {
            '}' => return Ok(pos),
            '{' => {
                return Err(PatternError::NestedEntity {
                    phrase: source.to_string(),
                    position: pos,
                })
            }
            '[' | ']' | '(' | ')' | '|' => break,
            _ => {}
        }
    }
    Err(PatternError::UnclosedEntity {
        phrase: source.to_string(),
        position: open,
    })
}

fn next_significant(source: &str, from: usize) -> Option<char> {
    source[from..].chars().find(|c| !c.is_whitespace())
}

/// One `[...]` or `(...)` group in a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group<'a> {
    pub optional: bool,
    pub alternatives: Vec<&'a str>,
    /// Byte offset just past the closing bracket
    pub end: usize,
}

/// Split the group opening at `open` into its top-level alternatives
pub(crate) fn split_group(pattern: &str, open: usize) -> Option<Group<'_>> {
    let optional = match pattern[open..].chars().next()? {
        '[' => true,
        '(' => false,
        _ => return None,
    };

    let mut depth = 0usize;
    let mut alternatives = Vec::new();
    let mut start = open + 1;
    for (i, c) in pattern[open..].char_indices() {
        let pos = open + i;
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => {
                depth -= 1;
                if depth == 0 {
                    alternatives.push(&pattern[start..pos]);
                    return Some(Group {
                        optional,
                        alternatives,
                        end: pos + 1,
                    });
                }
            }
            '|' if depth == 1 => {
                alternatives.push(&pattern[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    None
}
