//! Contains the `Position` type used for every document pointer.
use memchr::{memchr_iter, memrchr};
use std::fmt;

/// A location in the input, tracked as characters are consumed.
///
/// Both fields are zero-based. The `Display` impl renders them 1-based as
/// `line:column`, which is the "document pointer" used in error messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The zero-based line number.
    pub line: usize,
    /// The zero-based column, counted in `char`s since the last newline.
    pub column: usize,
}

impl Position {
    /// The position of the first character of a document.
    pub const fn start() -> Self {
        Position { line: 0, column: 0 }
    }

    /// Moves past a single consumed character.
    #[inline]
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Moves past every character of `text`, as if each one had been
    /// passed to [`Position::advance`] in turn.
    pub fn advance_str(&mut self, text: &str) {
        let bytes = text.as_bytes();
        match memrchr(b'\n', bytes) {
            Some(last_newline) => {
                self.line += memchr_iter(b'\n', bytes).count();
                // '\n' is ASCII, so the slice after it is still valid UTF-8.
                self.column = text[last_newline + 1..].chars().count();
            }
            None => self.column += text.chars().count(),
        }
    }

    /// Formats the position as a 1-based `line:column` document pointer.
    pub fn document_pointer(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}
