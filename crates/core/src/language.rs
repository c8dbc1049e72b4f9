//! Language definitions for the supported matching locales
//!
//! A model is created from a BCP-47 tag; only the primary subtag selects the
//! language. Region and script subtags are accepted and ignored.

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
    Spanish,
    French,
    Italian,
    Portuguese,
    Japanese,
    Chinese,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Japanese => "ja",
            Self::Chinese => "zh",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "German",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Japanese => "Japanese",
            Self::Chinese => "Chinese",
        }
    }

    /// Get script used by this language
    pub fn script(&self) -> Script {
        match self {
            Self::Japanese => Script::Japanese,
            Self::Chinese => Script::Han,
            _ => Script::Latin,
        }
    }

    /// Resolve a BCP-47 tag such as `en-US`, `fr_CA` or `zh-Hans-CN`.
    ///
    /// Returns `None` when the primary subtag is not a supported language.
    pub fn from_bcp47(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default();
        Self::from_str_loose(primary)
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "de" | "deu" | "ger" | "german" => Some(Self::German),
            "es" | "spa" | "spanish" => Some(Self::Spanish),
            "fr" | "fra" | "fre" | "french" => Some(Self::French),
            "it" | "ita" | "italian" => Some(Self::Italian),
            "pt" | "por" | "portuguese" => Some(Self::Portuguese),
            "ja" | "jpn" | "japanese" => Some(Self::Japanese),
            "zh" | "zho" | "chi" | "chinese" => Some(Self::Chinese),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Self::English,
            Self::German,
            Self::Spanish,
            Self::French,
            Self::Italian,
            Self::Portuguese,
            Self::Japanese,
            Self::Chinese,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Writing systems of the supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Japanese,
    Han,
}

impl Script {
    /// Whether words are separated by spaces in running text
    pub fn has_word_spacing(&self) -> bool {
        matches!(self, Self::Latin)
    }
}
