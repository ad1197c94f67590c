//! Codepoint token decoding.
//!
//! # Responsibility
//! - Turn `U+XXXX` token lists into the text they denote.
//! - Render text back into `U+XXXX` tokens for diagnostics.
//!
//! # Invariants
//! - Decoding is deterministic and lossless for valid Unicode scalar values.
//! - Supplementary-plane values (above U+FFFF) are decoded as one `char`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Emoji presentation selector (VS16).
pub const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Fitzpatrick skin-tone modifiers, light to dark.
pub const SKIN_TONE_MODIFIERS: [char; 5] = [
    '\u{1F3FB}',
    '\u{1F3FC}',
    '\u{1F3FD}',
    '\u{1F3FE}',
    '\u{1F3FF}',
];

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[Uu]\+([0-9A-Fa-f]{1,8})$").expect("valid codepoint regex"));

/// Result type for codepoint decoding.
pub type CodepointResult<T> = Result<T, CodepointError>;

/// Malformed codepoint input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodepointError {
    /// Token does not match `U+<hex>`.
    InvalidToken(String),
    /// Hex value is a surrogate or lies beyond U+10FFFF.
    InvalidScalar(u32),
}

impl Display for CodepointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken(token) => write!(f, "invalid codepoint token `{token}`"),
            Self::InvalidScalar(value) => {
                write!(f, "codepoint U+{value:04X} is not a Unicode scalar value")
            }
        }
    }
}

impl Error for CodepointError {}

/// Decodes a single `U+XXXX` token.
pub fn decode_token(token: &str) -> CodepointResult<char> {
    let captures = TOKEN_RE
        .captures(token.trim())
        .ok_or_else(|| CodepointError::InvalidToken(token.to_string()))?;
    let value = u32::from_str_radix(&captures[1], 16)
        .map_err(|_| CodepointError::InvalidToken(token.to_string()))?;
    char::from_u32(value).ok_or(CodepointError::InvalidScalar(value))
}

/// Decodes whitespace-separated `U+XXXX` tokens into text.
///
/// Blank input decodes to an empty string.
pub fn decode_sequence(tokens: &str) -> CodepointResult<String> {
    decode_tokens(tokens.split_whitespace())
}

/// Decodes an already-split token list into text.
pub fn decode_tokens<'a, I>(tokens: I) -> CodepointResult<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().map(decode_token).collect()
}

/// Renders text as upper-case `U+XXXX` tokens.
pub fn encode_tokens(text: &str) -> Vec<String> {
    text.chars().map(|c| format!("U+{:04X}", c as u32)).collect()
}

/// Renders text as one space-separated token string.
pub fn encode_sequence(text: &str) -> String {
    encode_tokens(text).join(" ")
}

/// Returns whether `c` is one of the five skin-tone modifiers.
pub fn is_skin_tone_modifier(c: char) -> bool {
    SKIN_TONE_MODIFIERS.contains(&c)
}

/// Returns whether the field looks like a `U+XXXX` token list rather than literal text.
pub fn looks_like_tokens(field: &str) -> bool {
    let trimmed = field.trim_start();
    trimmed.starts_with("U+") || trimmed.starts_with("u+")
}
