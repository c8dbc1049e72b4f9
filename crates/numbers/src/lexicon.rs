//! Number-word lexicons
//!
//! One table per language, built by an explicit constructor and handed to the
//! matching parser. French compounds (17-19, "X et un", 70-99) are generated
//! so the trie can prefer "quatre vingt dix" over "quatre".

use pattern_intent_core::Language;

use crate::token::{Token, TokenKind};

/// One lexicon word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: String,
    pub value: u64,
    pub kind: TokenKind,
}

impl LexiconEntry {
    fn number(word: impl Into<String>, value: u64) -> Self {
        Self {
            word: word.into(),
            value,
            kind: TokenKind::Number,
        }
    }

    fn connector(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            value: 0,
            kind: TokenKind::Connector,
        }
    }

    pub fn token(&self) -> Token {
        match self.kind {
            TokenKind::Connector => Token::connector(),
            _ => Token::number(self.value),
        }
    }
}

/// Number words of one language
#[derive(Debug, Clone)]
pub struct LexiconTable {
    language: Language,
    entries: Vec<LexiconEntry>,
}

impl LexiconTable {
    /// Table for a language, `None` when no number parser exists for it
    pub fn for_language(language: Language) -> Option<Self> {
        match language {
            Language::English => Some(Self::english()),
            Language::Spanish => Some(Self::spanish()),
            Language::French => Some(Self::french()),
            Language::Japanese => Some(Self::japanese()),
            Language::Chinese => Some(Self::chinese()),
            _ => None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-word lookup
    pub fn lookup(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    fn from_numbers(language: Language, numbers: &[(&str, u64)], connectors: &[&str]) -> Self {
        let entries = numbers
            .iter()
            .map(|(word, value)| LexiconEntry::number(*word, *value))
            .chain(connectors.iter().map(|word| LexiconEntry::connector(*word)))
            .collect();
        Self { language, entries }
    }

    pub fn english() -> Self {
        Self::from_numbers(
            Language::English,
            &[
                ("zero", 0),
                ("oh", 0),
                ("one", 1),
                ("two", 2),
                ("three", 3),
                ("four", 4),
                ("five", 5),
                ("six", 6),
                ("seven", 7),
                ("eight", 8),
                ("nine", 9),
                ("ten", 10),
                ("eleven", 11),
                ("twelve", 12),
                ("thirteen", 13),
                ("fourteen", 14),
                ("fifteen", 15),
                ("sixteen", 16),
                ("seventeen", 17),
                ("eighteen", 18),
                ("nineteen", 19),
                ("twenty", 20),
                ("thirty", 30),
                ("forty", 40),
                ("fourty", 40),
                ("fifty", 50),
                ("sixty", 60),
                ("seventy", 70),
                ("eighty", 80),
                ("ninety", 90),
                ("hundred", 100),
                ("thousand", 1_000),
                ("million", 1_000_000),
                ("billion", 1_000_000_000),
                ("trillion", 1_000_000_000_000),
            ],
            &["and"],
        )
    }

    pub fn spanish() -> Self {
        Self::from_numbers(
            Language::Spanish,
            &[
                ("cero", 0),
                ("un", 1),
                ("uno", 1),
                ("una", 1),
                ("dos", 2),
                ("tres", 3),
                ("cuatro", 4),
                ("cinco", 5),
                ("seis", 6),
                ("siete", 7),
                ("ocho", 8),
                ("nueve", 9),
                ("diez", 10),
                ("once", 11),
                ("doce", 12),
                ("trece", 13),
                ("catorce", 14),
                ("quince", 15),
                ("dieciséis", 16),
                ("dieciseis", 16),
                ("diecisiete", 17),
                ("dieciocho", 18),
                ("diecinueve", 19),
                ("veinte", 20),
                ("veintiuno", 21),
                ("veintiún", 21),
                ("veintiun", 21),
                ("veintiuna", 21),
                ("veintidós", 22),
                ("veintidos", 22),
                ("veintitrés", 23),
                ("veintitres", 23),
                ("veinticuatro", 24),
                ("veinticinco", 25),
                ("veintiséis", 26),
                ("veintiseis", 26),
                ("veintisiete", 27),
                ("veintiocho", 28),
                ("veintinueve", 29),
                ("treinta", 30),
                ("cuarenta", 40),
                ("cincuenta", 50),
                ("sesenta", 60),
                ("setenta", 70),
                ("ochenta", 80),
                ("noventa", 90),
                ("cien", 100),
                ("ciento", 100),
                ("doscientos", 200),
                ("doscientas", 200),
                ("trescientos", 300),
                ("trescientas", 300),
                ("cuatrocientos", 400),
                ("cuatrocientas", 400),
                ("quinientos", 500),
                ("quinientas", 500),
                ("seiscientos", 600),
                ("seiscientas", 600),
                ("setecientos", 700),
                ("setecientas", 700),
                ("ochocientos", 800),
                ("ochocientas", 800),
                ("novecientos", 900),
                ("novecientas", 900),
                ("mil", 1_000),
                ("millón", 1_000_000),
                ("millon", 1_000_000),
                ("millones", 1_000_000),
            ],
            &["y"],
        )
    }

    pub fn french() -> Self {
        const UNITS: [&str; 9] = [
            "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
        ];
        const TEENS: [&str; 6] = ["onze", "douze", "treize", "quatorze", "quinze", "seize"];
        const TENS: [(&str, u64); 5] = [
            ("vingt", 20),
            ("trente", 30),
            ("quarante", 40),
            ("cinquante", 50),
            ("soixante", 60),
        ];

        let mut table = Self::from_numbers(
            Language::French,
            &[
                ("zéro", 0),
                ("zero", 0),
                ("une", 1),
                ("dix", 10),
                ("vingts", 20),
                ("septante", 70),
                ("huitante", 80),
                ("octante", 80),
                ("nonante", 90),
                ("cent", 100),
                ("cents", 100),
                ("mille", 1_000),
                ("mil", 1_000),
                ("million", 1_000_000),
                ("millions", 1_000_000),
                ("milliard", 1_000_000_000),
                ("milliards", 1_000_000_000),
            ],
            &["et"],
        );
        let entries = &mut table.entries;

        for (i, word) in UNITS.iter().enumerate() {
            entries.push(LexiconEntry::number(*word, i as u64 + 1));
        }
        for (i, word) in TEENS.iter().enumerate() {
            entries.push(LexiconEntry::number(*word, i as u64 + 11));
        }
        for (word, value) in TENS {
            entries.push(LexiconEntry::number(word, value));
            entries.push(LexiconEntry::number(format!("{word} et un"), value + 1));
            entries.push(LexiconEntry::number(format!("{word} et une"), value + 1));
        }

        // dix-sept .. dix-neuf
        for (i, unit) in UNITS.iter().enumerate().skip(6) {
            entries.push(LexiconEntry::number(format!("dix {unit}"), i as u64 + 11));
        }

        // 70-79 on a base of soixante, 90-99 on quatre-vingt
        for (base, value) in [("soixante", 60u64), ("quatre vingt", 80)] {
            entries.push(LexiconEntry::number(format!("{base} dix"), value + 10));
            for (i, teen) in TEENS.iter().enumerate() {
                entries.push(LexiconEntry::number(format!("{base} {teen}"), value + 11 + i as u64));
            }
            for (i, unit) in UNITS.iter().enumerate().skip(6) {
                entries.push(LexiconEntry::number(
                    format!("{base} dix {unit}"),
                    value + 17 + (i as u64 - 6),
                ));
            }
        }
        entries.push(LexiconEntry::number("soixante et onze", 71));

        // quatre-vingt(s), 81-89
        entries.push(LexiconEntry::number("quatre vingt", 80));
        entries.push(LexiconEntry::number("quatre vingts", 80));
        for (i, unit) in UNITS.iter().enumerate() {
            entries.push(LexiconEntry::number(format!("quatre vingt {unit}"), 81 + i as u64));
        }
        entries.push(LexiconEntry::number("quatre vingt une", 81));

        table
    }

    pub fn japanese() -> Self {
        Self::from_numbers(
            Language::Japanese,
            &[
                ("〇", 0),
                ("零", 0),
                ("一", 1),
                ("二", 2),
                ("三", 3),
                ("四", 4),
                ("五", 5),
                ("六", 6),
                ("七", 7),
                ("八", 8),
                ("九", 9),
                ("十", 10),
                ("百", 100),
                ("千", 1_000),
                ("万", 10_000),
                ("億", 100_000_000),
                ("兆", 1_000_000_000_000),
                ("壱", 1),
                ("弐", 2),
                ("参", 3),
                ("拾", 10),
                ("ぜろ", 0),
                ("れい", 0),
                ("いち", 1),
                ("に", 2),
                ("さん", 3),
                ("よん", 4),
                ("し", 4),
                ("ご", 5),
                ("ろく", 6),
                ("なな", 7),
                ("しち", 7),
                ("はち", 8),
                ("きゅう", 9),
                ("く", 9),
                ("じゅう", 10),
                ("ひゃく", 100),
                ("びゃく", 100),
                ("ぴゃく", 100),
                ("さんびゃく", 300),
                ("ろっぴゃく", 600),
                ("はっぴゃく", 800),
                ("せん", 1_000),
                ("ぜん", 1_000),
                ("さんぜん", 3_000),
                ("はっせん", 8_000),
                ("まん", 10_000),
                ("おく", 100_000_000),
                ("ちょう", 1_000_000_000_000),
            ],
            &[],
        )
    }

    pub fn chinese() -> Self {
        Self::from_numbers(
            Language::Chinese,
            &[
                ("零", 0),
                ("〇", 0),
                ("一", 1),
                ("幺", 1),
                ("壹", 1),
                ("二", 2),
                ("两", 2),
                ("兩", 2),
                ("贰", 2),
                ("三", 3),
                ("叁", 3),
                ("四", 4),
                ("肆", 4),
                ("五", 5),
                ("伍", 5),
                ("六", 6),
                ("陆", 6),
                ("七", 7),
                ("柒", 7),
                ("八", 8),
                ("捌", 8),
                ("九", 9),
                ("玖", 9),
                ("十", 10),
                ("拾", 10),
                ("百", 100),
                ("佰", 100),
                ("千", 1_000),
                ("仟", 1_000),
                ("万", 10_000),
                ("萬", 10_000),
                ("亿", 100_000_000),
                ("億", 100_000_000),
                ("兆", 1_000_000_000_000),
            ],
            &[],
        )
    }
}
