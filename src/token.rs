//! Defines the `Token` enum and the `LocatedToken` wrapper.
//!
//! Tokens are the output of a single scan: the decoded content of a string
//! literal, or the raw characters of a number literal.

use crate::position::Position;
use std::fmt;

/// A JSON primitive produced by the `Lexer`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// The escape-decoded content of a string, without its quotes.
    StringValue(String),
    /// The raw characters of an integer, e.g. `-42`.
    Integer(String),
    /// The raw characters of a number with a fraction and/or exponent,
    /// e.g. `3.14` or `1e+10`.
    Decimal(String),
}

impl Token {
    /// The token's characters: decoded content for strings, source text
    /// for numbers.
    pub fn chars(&self) -> &str {
        match self {
            Token::StringValue(chars) | Token::Integer(chars) | Token::Decimal(chars) => chars,
        }
    }

    /// Consumes the token, returning its characters.
    pub fn into_chars(self) -> String {
        match self {
            Token::StringValue(chars) | Token::Integer(chars) | Token::Decimal(chars) => chars,
        }
    }

    /// Converts a numeric token to a [`JsonNumber`].
    ///
    /// Integers become `I64` when they fit, then `U64`, and fall back to
    /// `F64` when they are too large for either. Decimals are always `F64`.
    /// Returns `None` for string tokens.
    pub fn to_number(&self) -> Option<JsonNumber> {
        match self {
            Token::StringValue(_) => None,
            Token::Integer(chars) => chars
                .parse::<i64>()
                .map(JsonNumber::I64)
                .or_else(|_| chars.parse::<u64>().map(JsonNumber::U64))
                .or_else(|_| chars.parse::<f64>().map(JsonNumber::F64))
                .ok(),
            Token::Decimal(chars) => chars.parse::<f64>().map(JsonNumber::F64).ok(),
        }
    }
}

/// A numeric value read from an `Integer` or `Decimal` token.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum JsonNumber {
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 64-bit integer too large for `i64`.
    U64(u64),
    /// A 64-bit float.
    F64(f64),
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::I64(n) => write!(f, "{}", n),
            JsonNumber::U64(n) => write!(f, "{}", n),
            JsonNumber::F64(n) => write!(f, "{}", n),
        }
    }
}

/// A token together with the position of its first character.
///
/// For strings, `start` points at the opening quote.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LocatedToken {
    /// The scanned token.
    pub token: Token,
    /// Where the token starts in the input.
    pub start: Position,
}
