//! Character sources the lexer pulls from.
//!
//! A [`CharSource`] gives the lexer one character of lookahead and keeps
//! track of the [`Position`] of the next character to be consumed. There
//! are two implementations:
//!
//! * [`StrSource`] walks an in-memory `&str`.
//! * [`ReaderSource`] decodes UTF-8 from any [`Read`], holding at most one
//!   pending character for lookahead.
//!
//! Position only moves when a character is consumed. Peeking never changes
//! it, for either implementation.
use crate::position::Position;
use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, BufRead, BufReader, Read};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// A pull-based supply of characters with one character of lookahead.
pub trait CharSource {
    /// Consumes and returns the next character, or `None` at the end of the
    /// input. Calling it again after the end keeps returning `None`.
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Returns the next character without consuming it.
    ///
    /// Repeated calls with nothing consumed in between return the same
    /// character and leave the position untouched.
    fn peek_next_char(&mut self) -> io::Result<Option<char>>;

    /// Consumes and discards `count` characters.
    fn advance_by(&mut self, count: usize) -> io::Result<()>;

    /// Consumes and discards one character.
    fn advance(&mut self) -> io::Result<()> {
        self.advance_by(1)
    }

    /// The position of the next character to be consumed.
    fn position(&self) -> Position;

    /// The current position as a 1-based `line:column` string.
    fn document_pointer(&self) -> String {
        self.position().to_string()
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn peek_next_char(&mut self) -> io::Result<Option<char>> {
        (**self).peek_next_char()
    }

    fn advance_by(&mut self, count: usize) -> io::Result<()> {
        (**self).advance_by(count)
    }

    fn position(&self) -> Position {
        (**self).position()
    }
}

// --- In-memory source ---

/// A [`CharSource`] over a borrowed string.
///
/// Never returns an I/O error.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    /// The whole input.
    input: &'a str,
    /// Byte offset of the next character in `input`.
    cursor: usize,
    position: Position,
}

impl<'a> StrSource<'a> {
    /// Creates a source positioned at the first character of `input`.
    pub fn new(input: &'a str) -> Self {
        StrSource {
            input,
            cursor: 0,
            position: Position::start(),
        }
    }

    /// The part of the input that has not been consumed yet.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(input: &'a str) -> Self {
        StrSource::new(input)
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let next = self.current();
        if let Some(ch) = next {
            self.cursor += ch.len_utf8();
            self.position.advance(ch);
        }
        Ok(next)
    }

    fn peek_next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.current())
    }

    /// # Panics
    ///
    /// Panics if fewer than `count` characters remain. Advancing over
    /// characters that are not there is a bug in the caller, the same as
    /// indexing past the end of a slice.
    fn advance_by(&mut self, count: usize) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        let rest = self.remaining();
        let end = match rest.char_indices().nth(count - 1) {
            Some((offset, ch)) => offset + ch.len_utf8(),
            None => panic!(
                "cannot advance {} characters at {}: only {} remain",
                count,
                self.position,
                rest.chars().count()
            ),
        };
        self.position.advance_str(&rest[..end]);
        self.cursor += end;
        Ok(())
    }

    fn position(&self) -> Position {
        self.position
    }
}

// --- Streaming source ---

/// A [`CharSource`] that decodes UTF-8 from a reader.
///
/// The reader is wrapped in a [`BufReader`], so passing an unbuffered
/// `File` or socket is fine. Malformed UTF-8 is not an error: each
/// malformed sequence decodes to U+FFFD and reading carries on. Only a
/// failing `read` is returned as an error.
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    /// A character read ahead by `peek_next_char` and not yet consumed.
    pending: Option<char>,
    position: Position,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a source that reads from `reader`.
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader: BufReader::new(reader),
            pending: None,
            position: Position::start(),
        }
    }

    /// Returns the underlying reader. Any character held for lookahead, and
    /// anything still in the internal buffer, is lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Pulls one character straight from the reader.
    fn read_char(&mut self) -> io::Result<Option<char>> {
        self.decode_char().map_err(|error| {
            warn!(position = %self.position, %error, "failed to read from JSON source");
            error
        })
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.next_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        let width = match utf8_width(lead) {
            Some(width) => width,
            None => return Ok(Some(self.malformed(&[lead]))),
        };
        let mut bytes = [lead, 0, 0, 0];
        for index in 1..width {
            match self.peek_byte()? {
                Some(byte) if continuation_range(lead, index).contains(&byte) => {
                    self.reader.consume(1);
                    bytes[index] = byte;
                }
                // The offending byte is left in place to start the next char.
                _ => return Ok(Some(self.malformed(&bytes[..index]))),
            }
        }
        let decoded = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|text| text.chars().next())
            .unwrap_or(REPLACEMENT_CHARACTER);
        Ok(Some(decoded))
    }

    fn malformed(&self, bytes: &[u8]) -> char {
        debug!(position = %self.position, ?bytes, "replaced malformed UTF-8");
        REPLACEMENT_CHARACTER
    }

    /// Looks at the next byte without consuming it, `None` at the end of
    /// the stream.
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let next = match self.pending.take() {
            Some(ch) => Some(ch),
            None => self.read_char()?,
        };
        if let Some(ch) = next {
            self.position.advance(ch);
        }
        Ok(next)
    }

    fn peek_next_char(&mut self) -> io::Result<Option<char>> {
        if self.pending.is_none() {
            self.pending = self.read_char()?;
        }
        Ok(self.pending)
    }

    /// Stops quietly if the stream ends before `count` characters have been
    /// consumed.
    fn advance_by(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            if self.next_char()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` for a
/// continuation or otherwise invalid lead byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Bytes allowed at `index` of a sequence introduced by `lead`. The second
/// byte is narrowed to rule out overlong forms, surrogates and code points
/// past U+10FFFF.
fn continuation_range(lead: u8, index: usize) -> RangeInclusive<u8> {
    match (lead, index) {
        (0xE0, 1) => 0xA0..=0xBF,
        (0xED, 1) => 0x80..=0x9F,
        (0xF0, 1) => 0x90..=0xBF,
        (0xF4, 1) => 0x80..=0x8F,
        _ => 0x80..=0xBF,
    }
}
