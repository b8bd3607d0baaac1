//! Contains the `JsonError` type returned by every scanning operation.
use crate::position::Position;
use std::io;
use thiserror::Error;

/// The error type for all lexing operations.
///
/// Every error carries the [`Position`] it was detected at. Its `Display`
/// output has the shape `Invalid JSON ({line}:{column}), {reason}`, which
/// callers match on for diagnostics.
#[derive(Debug, Error)]
#[error("Invalid JSON ({position}), {kind}")]
pub struct JsonError {
    #[source]
    kind: ErrorKind,
    position: Position,
}

impl JsonError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        JsonError { kind, position }
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Where it went wrong.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The 1-based `line:column` pointer of the error.
    pub fn document_pointer(&self) -> String {
        self.position.to_string()
    }

    /// The reason part of the message, without the `Invalid JSON (..)` prefix.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    /// `true` when the backing source failed rather than the input being
    /// malformed. Such errors cannot be fixed by changing how the input is
    /// scanned.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::Io(_))
    }

    /// Unwraps the error into its kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

/// The different ways a scan can fail.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The input ended before the closing quote of a string.
    #[error("End of document scanning for string terminator")]
    UnterminatedString,
    /// A backslash was followed by a character that is not an escape code.
    #[error("'{0}' is not a valid escape code")]
    InvalidEscape(char),
    /// A `\u` escape was not followed by four hex digits.
    #[error(transparent)]
    InvalidUnicodeEscape(UnicodeEscapeFault),
    /// A number literal was missing its digits.
    #[error(transparent)]
    MalformedNumber(NumberFault),
    /// A string literal decoded to more characters than the configured limit.
    #[error("string exceeds the maximum length of {0} characters")]
    StringTooLong(usize),
    /// A character that cannot start a string or number literal.
    #[error("found unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// The backing reader failed.
    #[error("failed to read from the JSON source: {0}")]
    Io(#[source] io::Error),
}

/// Why a `\uXXXX` escape was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnicodeEscapeFault {
    /// The input ended before all four hex digits were read.
    #[error("Unicode characters require 4 hex digits")]
    Truncated,
    /// One of the four characters was not a hex digit.
    #[error("'{0}' is not a valid hex code character")]
    NotHex(char),
}

/// Why a number literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberFault {
    /// A sign with no digits after it.
    #[error("found a '{0}' that was not followed by any digits")]
    DanglingSign(char),
    /// A `.` or exponent marker with no digits after it. Holds the
    /// characters scanned so far.
    #[error("'{0}' is not a valid number")]
    MissingDigits(String),
}
