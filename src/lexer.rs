//! The lexer: turns characters from a `CharSource` into primitive tokens.
//!
//! The scanning operations mirror how a recursive JSON parser drives them:
//! the parser skips whitespace, peeks at the next character, consumes it,
//! and then calls [`Lexer::scan_string`] (after a `"`) or
//! [`Lexer::scan_number`] (after a digit or `-`). [`Lexer::next_token`]
//! does that dispatch itself for input made only of primitives.
//!
//! Every failure comes back as a [`JsonError`] carrying the position it was
//! detected at. Nothing is recovered or skipped over.

use crate::config::LexerConfig;
use crate::error::{ErrorKind, JsonError, NumberFault, UnicodeEscapeFault};
use crate::position::Position;
use crate::source::{CharSource, ReaderSource, StrSource};
use crate::token::{LocatedToken, Token};
use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, Read};
use std::iter::FusedIterator;
use tracing::{debug, trace};

#[inline]
fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Whitespace between tokens: Unicode space separators except the no-break
/// ones, line and paragraph separators, the ASCII controls `\t` to `\r` and
/// the information separators U+001C to U+001F.
#[inline]
fn is_whitespace(ch: char) -> bool {
    match ch {
        '\t'..='\r' | '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => ch.is_whitespace(),
    }
}

// --- String buffer ---

/// Collects the decoded characters of one string literal.
///
/// `\u` escapes arrive as UTF-16 code units. A high surrogate is held back
/// until the next character shows whether it completes a pair; a surrogate
/// that never pairs up is written as U+FFFD.
struct StringBuffer {
    chars: String,
    len: usize,
    limit: usize,
    high_surrogate: Option<u16>,
}

impl StringBuffer {
    fn new(config: &LexerConfig) -> Self {
        StringBuffer {
            chars: String::with_capacity(config.string_capacity),
            len: 0,
            limit: config.max_string_length,
            high_surrogate: None,
        }
    }

    fn push(&mut self, ch: char) -> Result<(), ErrorKind> {
        self.flush_surrogate()?;
        self.append(ch)
    }

    fn push_code_unit(&mut self, unit: u16) -> Result<(), ErrorKind> {
        match unit {
            0xD800..=0xDBFF => {
                self.flush_surrogate()?;
                self.high_surrogate = Some(unit);
                Ok(())
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let code = 0x10000
                        + ((u32::from(high) - 0xD800) << 10)
                        + (u32::from(unit) - 0xDC00);
                    self.append(char::from_u32(code).unwrap_or(REPLACEMENT_CHARACTER))
                }
                None => self.append(REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush_surrogate()?;
                self.append(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER))
            }
        }
    }

    fn finish(mut self) -> Result<String, ErrorKind> {
        self.flush_surrogate()?;
        Ok(self.chars)
    }

    fn flush_surrogate(&mut self) -> Result<(), ErrorKind> {
        match self.high_surrogate.take() {
            Some(_) => self.append(REPLACEMENT_CHARACTER),
            None => Ok(()),
        }
    }

    fn append(&mut self, ch: char) -> Result<(), ErrorKind> {
        if self.len >= self.limit {
            return Err(ErrorKind::StringTooLong(self.limit));
        }
        self.chars.push(ch);
        self.len += 1;
        Ok(())
    }
}

// --- Lexer ---

/// Scans JSON primitives out of a single [`CharSource`].
///
/// A lexer is good for one pass over one input. It is also an `Iterator`
/// over [`LocatedToken`]s (see [`Lexer::next_token`]) that stops after the
/// first error.
pub struct Lexer<S> {
    source: S,
    config: LexerConfig,
    /// Set once the iterator has yielded an error.
    failed: bool,
}

impl<'a> Lexer<StrSource<'a>> {
    /// Creates a lexer over an in-memory string.
    pub fn for_str(input: &'a str) -> Self {
        Lexer::new(StrSource::new(input))
    }
}

impl<R: Read> Lexer<ReaderSource<R>> {
    /// Creates a lexer that decodes UTF-8 from `reader`.
    pub fn for_reader(reader: R) -> Self {
        Lexer::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Lexer<S> {
    /// Creates a lexer with the default [`LexerConfig`].
    pub fn new(source: S) -> Self {
        Lexer::with_config(source, LexerConfig::default())
    }

    /// Creates a lexer that sizes and limits its buffers from `config`.
    pub fn with_config(source: S, config: LexerConfig) -> Self {
        Lexer {
            source,
            config,
            failed: false,
        }
    }

    /// The settings this lexer was created with.
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// The source being scanned.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Gives the caller access to the source, e.g. to consume the opening
    /// quote before calling [`Lexer::scan_string`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the lexer, returning the source at its current position.
    pub fn into_source(self) -> S {
        self.source
    }

    /// The position of the next character to be scanned.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// The current position as a 1-based `line:column` string.
    pub fn document_pointer(&self) -> String {
        self.source.document_pointer()
    }

    /// Advances past any whitespace.
    ///
    /// No-break spaces (U+00A0, U+2007, U+202F) and NEL (U+0085) are not
    /// whitespace here; the separators U+001C to U+001F are.
    pub fn skip_whitespace(&mut self) -> Result<(), JsonError> {
        while let Some(ch) = self.peek_char()? {
            if !is_whitespace(ch) {
                break;
            }
            self.advance()?;
        }
        Ok(())
    }

    /// Scans the rest of a string literal whose opening `"` has already
    /// been consumed, decoding escape sequences on the way.
    ///
    /// # Errors
    /// * [`ErrorKind::UnterminatedString`] if the input ends first.
    /// * [`ErrorKind::InvalidEscape`] for an unknown `\x` escape.
    /// * [`ErrorKind::InvalidUnicodeEscape`] if `\u` is not followed by four
    ///   hex digits. The error points at the offending character.
    /// * [`ErrorKind::StringTooLong`] past `max_string_length`.
    pub fn scan_string(&mut self) -> Result<Token, JsonError> {
        let mut buffer = StringBuffer::new(&self.config);
        loop {
            let position = self.source.position();
            match self.next_char()? {
                Some('"') => break,
                Some('\\') => self.scan_escape(&mut buffer)?,
                Some(ch) => buffer
                    .push(ch)
                    .map_err(|kind| self.fail(kind, position))?,
                None => return Err(self.fail(ErrorKind::UnterminatedString, position)),
            }
        }
        let position = self.source.position();
        let chars = buffer.finish().map_err(|kind| self.fail(kind, position))?;
        Ok(Token::StringValue(chars))
    }

    /// Decodes the escape after a consumed `\`.
    fn scan_escape(&mut self, buffer: &mut StringBuffer) -> Result<(), JsonError> {
        let position = self.source.position();
        let decoded = match self.next_char()? {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                let unit = self.scan_unicode_escape()?;
                return buffer
                    .push_code_unit(unit)
                    .map_err(|kind| self.fail(kind, position));
            }
            Some(other) => return Err(self.fail(ErrorKind::InvalidEscape(other), position)),
            None => return Err(self.fail(ErrorKind::UnterminatedString, position)),
        };
        buffer.push(decoded).map_err(|kind| self.fail(kind, position))
    }

    /// Reads the four hex digits of a `\uXXXX` escape.
    fn scan_unicode_escape(&mut self) -> Result<u16, JsonError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let position = self.source.position();
            let digit = match self.next_char()? {
                Some(ch) => ch.to_digit(16).ok_or_else(|| {
                    self.fail(
                        ErrorKind::InvalidUnicodeEscape(UnicodeEscapeFault::NotHex(ch)),
                        position,
                    )
                })?,
                None => {
                    return Err(self.fail(
                        ErrorKind::InvalidUnicodeEscape(UnicodeEscapeFault::Truncated),
                        position,
                    ))
                }
            };
            // to_digit(16) never exceeds 15
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    /// Returns `first` followed by every character, in order, that
    /// `predicate` accepts. Stops at the first rejected character, which is
    /// left unconsumed.
    pub fn consume_chars<P>(&mut self, first: char, predicate: P) -> Result<String, JsonError>
    where
        P: Fn(char) -> bool,
    {
        let mut chars = String::with_capacity(self.config.number_capacity);
        chars.push(first);
        self.take_while(&mut chars, predicate)?;
        Ok(chars)
    }

    /// Appends accepted characters to `chars`, returning how many were taken.
    fn take_while<P>(&mut self, chars: &mut String, predicate: P) -> Result<usize, JsonError>
    where
        P: Fn(char) -> bool,
    {
        let mut taken = 0;
        while let Some(ch) = self.peek_char()? {
            if !predicate(ch) {
                break;
            }
            chars.push(ch);
            self.advance()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Scans a number literal whose first character (a digit or `-`) has
    /// already been consumed.
    ///
    /// Returns [`Token::Integer`] unless a `.`, `e` or `E` follows the
    /// digits, in which case the literal continues as a decimal (see
    /// [`Lexer::scan_decimal_number`]).
    pub fn scan_number(&mut self, first: char) -> Result<Token, JsonError> {
        debug_assert!(first == '-' || is_digit(first), "not a number start: {first:?}");
        let chars = self.consume_chars(first, is_digit)?;
        if first == '-' && chars.len() == 1 {
            return Err(self.fail(
                ErrorKind::MalformedNumber(NumberFault::DanglingSign(first)),
                self.source.position(),
            ));
        }
        match self.peek_char()? {
            Some('.' | 'e' | 'E') => self.scan_decimal_number(chars),
            _ => Ok(Token::Integer(chars)),
        }
    }

    /// Extends the integer part in `chars` with an optional fraction and an
    /// optional exponent.
    ///
    /// Once a `.` or exponent marker is seen at least one digit must follow
    /// it; `3.` is an error, never the integer `3`.
    pub fn scan_decimal_number(&mut self, mut chars: String) -> Result<Token, JsonError> {
        let mut next = self.peek_char()?;
        if next == Some('.') {
            self.advance()?;
            chars.push('.');
            if self.take_while(&mut chars, is_digit)? == 0 {
                return Err(self.missing_digits(chars));
            }
            next = self.peek_char()?;
        }
        if let Some(marker @ ('e' | 'E')) = next {
            self.advance()?;
            chars.push(marker);
            if let Some(sign @ ('+' | '-')) = self.peek_char()? {
                self.advance()?;
                chars.push(sign);
            }
            if self.take_while(&mut chars, is_digit)? == 0 {
                return Err(self.missing_digits(chars));
            }
        }
        Ok(Token::Decimal(chars))
    }

    /// Skips whitespace and scans the next string or number.
    ///
    /// Returns `Ok(None)` at the end of the input. Any character that cannot
    /// start a primitive is an [`ErrorKind::UnexpectedCharacter`] error.
    pub fn next_token(&mut self) -> Result<Option<LocatedToken>, JsonError> {
        self.skip_whitespace()?;
        let start = self.source.position();
        let token = match self.next_char()? {
            None => return Ok(None),
            Some('"') => self.scan_string()?,
            Some(ch) if ch == '-' || is_digit(ch) => self.scan_number(ch)?,
            Some(ch) => return Err(self.fail(ErrorKind::UnexpectedCharacter(ch), start)),
        };
        trace!(start = %start, token = ?token, "scanned token");
        Ok(Some(LocatedToken { token, start }))
    }

    // --- Source helpers ---

    fn next_char(&mut self) -> Result<Option<char>, JsonError> {
        self.source.next_char().map_err(|error| self.io_error(error))
    }

    fn peek_char(&mut self) -> Result<Option<char>, JsonError> {
        self.source.peek_next_char().map_err(|error| self.io_error(error))
    }

    fn advance(&mut self) -> Result<(), JsonError> {
        self.source.advance().map_err(|error| self.io_error(error))
    }

    fn io_error(&self, error: io::Error) -> JsonError {
        self.fail(ErrorKind::Io(error), self.source.position())
    }

    fn missing_digits(&self, chars: String) -> JsonError {
        self.fail(
            ErrorKind::MalformedNumber(NumberFault::MissingDigits(chars)),
            self.source.position(),
        )
    }

    fn fail(&self, kind: ErrorKind, position: Position) -> JsonError {
        debug!(position = %position, reason = %kind, "scan failed");
        JsonError::new(kind, position)
    }
}

impl<S: CharSource> Iterator for Lexer<S> {
    type Item = Result<LocatedToken, JsonError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl<S: CharSource> FusedIterator for Lexer<S> {}

// --- Unit Tests for Lexer ---
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn string_from<S: CharSource>(mut lexer: Lexer<S>) -> Result<Token, JsonError> {
        assert_eq!(lexer.source_mut().next_char().unwrap(), Some('"'));
        lexer.scan_string()
    }

    fn number_from<S: CharSource>(mut lexer: Lexer<S>) -> Result<(Token, Option<char>), JsonError> {
        let first = lexer.source_mut().next_char().unwrap().unwrap();
        let token = lexer.scan_number(first)?;
        Ok((token, lexer.source_mut().next_char().unwrap()))
    }

    /// Runs `scan` over both source kinds and checks they agree.
    fn check_both<'a, T, F, G>(input: &'a str, scan_str: F, scan_reader: G) -> Result<T, JsonError>
    where
        T: PartialEq + std::fmt::Debug,
        F: FnOnce(Lexer<StrSource<'a>>) -> Result<T, JsonError>,
        G: FnOnce(Lexer<ReaderSource<&'a [u8]>>) -> Result<T, JsonError>,
    {
        let from_str = scan_str(Lexer::for_str(input));
        let from_reader = scan_reader(Lexer::for_reader(input.as_bytes()));
        match (&from_str, &from_reader) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            _ => panic!("sources disagree on {input:?}: {from_str:?} vs {from_reader:?}"),
        }
        from_str
    }

    fn scan_string(input: &str) -> Result<Token, JsonError> {
        check_both(input, string_from, string_from)
    }

    fn scan_number(input: &str) -> Result<(Token, Option<char>), JsonError> {
        check_both(input, number_from, number_from)
    }

    fn string(chars: &str) -> Token {
        Token::StringValue(chars.to_string())
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(scan_string(r#""hello world""#).unwrap(), string("hello world"));
        assert_eq!(scan_string(r#""""#).unwrap(), string(""));
        assert_eq!(scan_string("\"ünïcødé 中文 🎉\"").unwrap(), string("ünïcødé 中文 🎉"));
    }

    #[test]
    fn test_string_stops_at_closing_quote() {
        let mut lexer = Lexer::for_str(r#""ab" rest"#);
        lexer.source_mut().next_char().unwrap();
        assert_eq!(lexer.scan_string().unwrap(), string("ab"));
        assert_eq!(lexer.source_mut().next_char().unwrap(), Some(' '));
    }

    #[test]
    fn test_string_escapes() {
        let token = scan_string(r#""a\nb""#).unwrap();
        assert_eq!(token.chars().chars().count(), 3);
        assert_eq!(token, string("a\nb"));
        assert_eq!(scan_string(r#""\u0041""#).unwrap(), string("A"));
        assert_eq!(
            scan_string(r#""\" \\ \/ \b \f \n \r \t""#).unwrap(),
            string("\" \\ / \u{0008} \u{000C} \n \r \t")
        );
        assert_eq!(scan_string(r#""\u00e9\u00C9\u4e2d""#).unwrap(), string("éÉ中"));
    }

    #[test]
    fn test_invalid_escape() {
        let error = scan_string(r#""\q""#).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::InvalidEscape('q')));
        assert_eq!(error.to_string(), "Invalid JSON (1:3), 'q' is not a valid escape code");
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let error = scan_string(r#""\u12""#).unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::InvalidUnicodeEscape(UnicodeEscapeFault::NotHex('"'))
        ));
        assert_eq!(error.document_pointer(), "1:6");

        let error = scan_string(r#""\uXYZ1""#).unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::InvalidUnicodeEscape(UnicodeEscapeFault::NotHex('X'))
        ));
        assert_eq!(
            error.to_string(),
            "Invalid JSON (1:4), 'X' is not a valid hex code character"
        );

        let error = scan_string(r#""\u12"#).unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::InvalidUnicodeEscape(UnicodeEscapeFault::Truncated)
        ));
        assert_eq!(
            error.to_string(),
            "Invalid JSON (1:6), Unicode characters require 4 hex digits"
        );
    }

    #[test]
    fn test_unterminated_string() {
        let error = scan_string(r#""abc"#).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::UnterminatedString));
        assert_eq!(
            error.to_string(),
            "Invalid JSON (1:5), End of document scanning for string terminator"
        );

        let error = scan_string(r#""abc\"#).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::UnterminatedString));

        let error = scan_string("\"line one\nline two").unwrap_err();
        assert_eq!(error.document_pointer(), "2:9");
    }

    #[test]
    fn test_buffer_growth_boundaries() {
        for len in [0, 1, 127, 128, 129, 255, 256, 257, 1000] {
            let filler: String = "abcdefghij".chars().cycle().take(len).collect();
            let token = scan_string(&format!("\"{filler}\"")).unwrap();
            assert_eq!(token.chars().len(), len);
            assert_eq!(token, Token::StringValue(filler));
        }
    }

    #[test]
    fn test_growth_from_tiny_capacity_with_escapes() {
        let config = LexerConfig::default().with_string_capacity(1);
        let input = r#""x\ty\u0041z\\w" "#;
        let mut lexer = Lexer::with_config(StrSource::new(input), config);
        lexer.source_mut().next_char().unwrap();
        assert_eq!(lexer.scan_string().unwrap(), string("x\tyAz\\w"));
    }

    #[test]
    fn test_surrogate_pairs() {
        assert_eq!(scan_string(r#""\ud83d\ude00""#).unwrap(), string("😀"));
        assert_eq!(scan_string(r#""\uD83D\uDE00!""#).unwrap(), string("😀!"));
        assert_eq!(scan_string(r#""\ud83d""#).unwrap(), string("\u{FFFD}"));
        assert_eq!(scan_string(r#""\ud83dx""#).unwrap(), string("\u{FFFD}x"));
        assert_eq!(scan_string(r#""\ude00x""#).unwrap(), string("\u{FFFD}x"));
        assert_eq!(
            scan_string(r#""\ud83d\ud83d\ude00""#).unwrap(),
            string("\u{FFFD}😀")
        );
    }

    #[test]
    fn test_max_string_length() {
        let config = LexerConfig::default().with_max_string_length(3);

        let mut lexer = Lexer::with_config(StrSource::new(r#""abc""#), config);
        lexer.source_mut().next_char().unwrap();
        assert_eq!(lexer.scan_string().unwrap(), string("abc"));

        let mut lexer = Lexer::with_config(StrSource::new(r#""abcd""#), config);
        lexer.source_mut().next_char().unwrap();
        let error = lexer.scan_string().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::StringTooLong(3)));
        assert_eq!(error.document_pointer(), "1:5");
    }

    #[test]
    fn test_integers() {
        assert_eq!(
            scan_number("123").unwrap(),
            (Token::Integer("123".to_string()), None)
        );
        assert_eq!(
            scan_number("-5").unwrap(),
            (Token::Integer("-5".to_string()), None)
        );
        assert_eq!(
            scan_number("0,").unwrap(),
            (Token::Integer("0".to_string()), Some(','))
        );
        assert_eq!(
            scan_number("12abc").unwrap(),
            (Token::Integer("12".to_string()), Some('a'))
        );
    }

    #[test]
    fn test_digits_are_ascii_only() {
        assert_eq!(
            scan_number("1\u{663}").unwrap(),
            (Token::Integer("1".to_string()), Some('\u{663}'))
        );
        let error = Lexer::for_str("\u{661}2").next_token().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::UnexpectedCharacter('\u{661}')));
    }

    #[test]
    fn test_lone_minus() {
        let error = scan_number("-").unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::MalformedNumber(NumberFault::DanglingSign('-'))
        ));
        assert_eq!(
            error.to_string(),
            "Invalid JSON (1:2), found a '-' that was not followed by any digits"
        );
        assert!(scan_number("- 1").is_err());
    }

    #[test]
    fn test_decimals() {
        let cases = [
            ("3.14", "3.14", None),
            ("1e10", "1e10", None),
            ("1e+10", "1e+10", None),
            ("1E-2]", "1E-2", Some(']')),
            ("-0.5e3 ", "-0.5e3", Some(' ')),
            ("1.5.3", "1.5", Some('.')),
        ];
        for (input, expected, rest) in cases {
            assert_eq!(
                scan_number(input).unwrap(),
                (Token::Decimal(expected.to_string()), rest),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_malformed_decimals() {
        let cases = [
            ("3.", "3."),
            ("3.x", "3."),
            ("1e", "1e"),
            ("1e+", "1e+"),
            ("1.e5", "1."),
            ("2.5E-", "2.5E-"),
        ];
        for (input, scanned) in cases {
            let error = scan_number(input).unwrap_err();
            match error.kind() {
                ErrorKind::MalformedNumber(NumberFault::MissingDigits(chars)) => {
                    assert_eq!(chars, scanned, "input {input:?}")
                }
                other => panic!("unexpected error {other:?} for {input:?}"),
            }
        }
        assert_eq!(
            scan_number("3.").unwrap_err().to_string(),
            "Invalid JSON (1:3), '3.' is not a valid number"
        );
    }

    #[test]
    fn test_consume_chars() {
        let mut lexer = Lexer::for_str("bcd1ef");
        let run = lexer.consume_chars('a', |ch| ch.is_ascii_alphabetic()).unwrap();
        assert_eq!(run, "abcd");
        assert_eq!(lexer.source_mut().next_char().unwrap(), Some('1'));

        let mut lexer = Lexer::for_str("");
        assert_eq!(lexer.consume_chars('7', is_digit).unwrap(), "7");
    }

    #[test]
    fn test_consume_chars_past_number_capacity() {
        let config = LexerConfig::default().with_number_capacity(2);
        let mut lexer = Lexer::with_config(StrSource::new("2345678901 "), config);
        assert_eq!(lexer.config().number_capacity, 2);
        assert_eq!(
            lexer.consume_chars('1', is_digit).unwrap(),
            "12345678901"
        );
        assert_eq!(
            lexer.scan_number('9').unwrap(),
            Token::Integer("9".to_string())
        );
    }

    #[test]
    fn test_skip_whitespace() {
        let mut lexer = Lexer::for_str(" \t\r\n \u{2003}\u{3000}\u{1F}\u{0B}x ");
        lexer.skip_whitespace().unwrap();
        assert_eq!(lexer.document_pointer(), "2:6");
        assert_eq!(lexer.source_mut().next_char().unwrap(), Some('x'));

        for stop in ['\u{00A0}', '\u{2007}', '\u{202F}', '\u{85}'] {
            let input = format!(" {stop}1");
            let mut lexer = Lexer::for_reader(input.as_bytes());
            lexer.skip_whitespace().unwrap();
            assert_eq!(lexer.document_pointer(), "1:2");
            assert_eq!(lexer.source_mut().next_char().unwrap(), Some(stop));
        }

        let mut lexer = Lexer::for_str("\u{1C}\u{1D}\u{1E}\u{1F}1");
        lexer.skip_whitespace().unwrap();
        assert_eq!(lexer.source_mut().next_char().unwrap(), Some('1'));

        let mut lexer = Lexer::for_reader("   ".as_bytes());
        lexer.skip_whitespace().unwrap();
        assert_eq!(lexer.source_mut().next_char().unwrap(), None);
        assert_eq!(lexer.document_pointer(), "1:4");
    }

    #[test]
    fn test_next_token_dispatch() {
        let input = "  \"a\" 12\n -3.5e2 \"b\\\"c\"";
        let tokens: Vec<LocatedToken> = Lexer::for_str(input).collect::<Result<_, _>>().unwrap();
        assert_eq!(
            tokens,
            vec![
                LocatedToken {
                    token: string("a"),
                    start: Position { line: 0, column: 2 },
                },
                LocatedToken {
                    token: Token::Integer("12".to_string()),
                    start: Position { line: 0, column: 6 },
                },
                LocatedToken {
                    token: Token::Decimal("-3.5e2".to_string()),
                    start: Position { line: 1, column: 1 },
                },
                LocatedToken {
                    token: string("b\"c"),
                    start: Position { line: 1, column: 8 },
                },
            ]
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::for_reader("1 { 2".as_bytes());
        assert_eq!(
            lexer.next().unwrap().unwrap().token,
            Token::Integer("1".to_string())
        );
        let error = lexer.next().unwrap().unwrap_err();
        assert_eq!(error.to_string(), "Invalid JSON (1:3), found unexpected character '{'");
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_next_token_at_eof() {
        let mut lexer = Lexer::for_str(" \n ");
        assert!(lexer.next_token().unwrap().is_none());
        assert!(lexer.next_token().unwrap().is_none());
    }

    #[test]
    fn test_reader_failure_is_fatal() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let mut lexer = Lexer::for_reader(Broken);
        let error = lexer.next_token().unwrap_err();
        assert!(error.is_fatal());
        assert!(matches!(error.kind(), ErrorKind::Io(_)));
        assert_eq!(
            error.to_string(),
            "Invalid JSON (1:1), failed to read from the JSON source: disk on fire"
        );
    }

    #[test]
    fn test_invalid_utf8_inside_string_is_replaced() {
        let tokens: Vec<LocatedToken> = Lexer::for_reader(&b"\"ab\xFFcd\" 7"[..])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                LocatedToken {
                    token: string("ab\u{FFFD}cd"),
                    start: Position::start(),
                },
                LocatedToken {
                    token: Token::Integer("7".to_string()),
                    start: Position { line: 0, column: 8 },
                },
            ]
        );
    }

    #[test]
    fn test_into_source_keeps_position() {
        let mut lexer = Lexer::for_str("42 rest");
        lexer.next_token().unwrap();
        assert_eq!(lexer.source().remaining(), " rest");
        let source = lexer.into_source();
        assert_eq!(source.remaining(), " rest");
        assert_eq!(source.document_pointer(), "1:3");
    }
}
