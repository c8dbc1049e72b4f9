//! Number tokens and digit masks

use serde::{Deserialize, Serialize};

/// Largest digit string accepted as an explicit token
const MAX_EXPLICIT_DIGITS: usize = 20;

/// How a token was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Looked up in a lexicon
    Number,
    /// Linking word such as Spanish "y" or French "et"
    Connector,
    /// Literal digit string
    Explicit,
}

/// A parsed numeral unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: u64,
    /// Decimal positions this token may supply (bit 0 = units, bit 1 = tens, ...)
    pub digit_mask: u32,
    pub kind: TokenKind,
}

impl Token {
    /// Lexicon word with the given value
    pub fn number(value: u64) -> Self {
        Self {
            value,
            digit_mask: digit_mask_for(value),
            kind: TokenKind::Number,
        }
    }

    pub fn connector() -> Self {
        Self {
            value: 0,
            digit_mask: 0,
            kind: TokenKind::Connector,
        }
    }

    /// Literal ASCII digit string.
    ///
    /// The mask covers every written position, so `"000"` keeps its width
    /// when rendered. Returns `None` for empty, non-digit or overlong input.
    pub fn explicit(digits: &str) -> Option<Self> {
        if digits.is_empty()
            || digits.len() > MAX_EXPLICIT_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let value = digits.parse::<u64>().ok()?;
        Some(Self {
            value,
            digit_mask: (1u32 << digits.len()) - 1,
            kind: TokenKind::Explicit,
        })
    }

    pub fn is_connector(&self) -> bool {
        self.kind == TokenKind::Connector
    }

    /// Lexicon word worth 1 to 9
    pub fn is_unit(&self) -> bool {
        self.kind == TokenKind::Number && (1..=9).contains(&self.value)
    }

    /// Lexicon word that is a power of ten of at least `min`
    pub fn is_power_of_ten(&self, min: u64) -> bool {
        self.kind == TokenKind::Number && self.value >= min && is_power_of_ten(self.value)
    }

    /// Decimal position of the highest digit (`ilog10`), 0 for zero
    pub fn position(&self) -> u32 {
        self.value.checked_ilog10().unwrap_or(0)
    }

    /// Number of written digits of an explicit token
    pub fn width(&self) -> usize {
        self.digit_mask.count_ones() as usize
    }
}

/// Digit mask for a lexicon value.
///
/// The highest position is always set; lower positions are set where the
/// value has a non-zero digit. "ten" covers bit 1, "twelve" bits 0 and 1,
/// "two hundred" bit 2, "two hundred fifty" bits 1 and 2.
pub fn digit_mask_for(value: u64) -> u32 {
    if value == 0 {
        return 1;
    }
    let mut mask = 1u32 << value.ilog10();
    let mut rest = value;
    let mut position = 0;
    while rest > 0 {
        if rest % 10 != 0 {
            mask |= 1 << position;
        }
        rest /= 10;
        position += 1;
    }
    mask
}

pub(crate) fn is_power_of_ten(mut value: u64) -> bool {
    if value == 0 {
        return false;
    }
    while value % 10 == 0 {
        value /= 10;
    }
    value == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_masks() {
        assert_eq!(digit_mask_for(0), 0b1);
        assert_eq!(digit_mask_for(7), 0b1);
        assert_eq!(digit_mask_for(10), 0b10);
        assert_eq!(digit_mask_for(15), 0b11);
        assert_eq!(digit_mask_for(40), 0b10);
        assert_eq!(digit_mask_for(100), 0b100);
        assert_eq!(digit_mask_for(200), 0b100);
        assert_eq!(digit_mask_for(250), 0b110);
        assert_eq!(digit_mask_for(1000), 0b1000);
    }

    #[test]
    fn test_explicit_tokens() {
        let token = Token::explicit("042").unwrap();
        assert_eq!(token.value, 42);
        assert_eq!(token.width(), 3);
        assert_eq!(token.kind, TokenKind::Explicit);

        assert!(Token::explicit("").is_none());
        assert!(Token::explicit("4a").is_none());
        assert!(Token::explicit("99999999999999999999").is_none());
        assert!(Token::explicit("123456789012345678901").is_none());
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::number(7).is_unit());
        assert!(!Token::number(10).is_unit());
        assert!(Token::number(100).is_power_of_ten(100));
        assert!(!Token::number(10).is_power_of_ten(100));
        assert!(Token::number(10).is_power_of_ten(10));
        assert!(!Token::number(200).is_power_of_ten(10));
        assert!(!Token::explicit("100").unwrap().is_power_of_ten(10));
        assert_eq!(Token::number(10_000).position(), 4);
        assert!(Token::connector().is_connector());
    }
}
