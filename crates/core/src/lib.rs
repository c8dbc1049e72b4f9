//! Core types for the pattern intent matcher
//!
//! This crate provides the leaf building blocks used by every other crate:
//! - Language definitions and BCP-47 lookup
//! - Per-language orthography table (whitespace, punctuation, word boundary)
//! - UTF-8 byte span utilities
//! - Longest-match substring trie

pub mod language;
pub mod orthography;
pub mod trie;
pub mod utf8;

pub use language::{Language, Script};
pub use orthography::{CharClasses, Orthography};
pub use trie::{SubstringTrie, TrieMatch};
