//! # pact-json-lexer
//!
//! `pact-json-lexer` is the streaming JSON scanner that sits underneath pact
//! file reading and body comparison. It turns characters into JSON primitive
//! tokens (strings, integers and decimals) and tracks the exact line and
//! column of every character so errors can point at the problem.
//!
//! ## Key Features
//!
//! * **Two sources, one lexer:** scan an in-memory `&str` with [`StrSource`]
//!   or any [`std::io::Read`] with [`ReaderSource`]. Both give one character
//!   of lookahead and the same position tracking.
//! * **Exact numbers:** [`Token::Integer`] and [`Token::Decimal`] keep the
//!   source characters, so no precision is lost before the caller decides
//!   how to convert them.
//! * **Uniform errors:** every failure displays as
//!   `Invalid JSON ({line}:{column}), {reason}`.
//!
//! ## Quick Start
//!
//! A parser drives the lexer one primitive at a time:
//!
//! ```
//! use pact_json_lexer::{CharSource, Lexer, Token};
//!
//! let mut lexer = Lexer::for_str(r#"  "café" 42"#);
//! lexer.skip_whitespace()?;
//! assert_eq!(lexer.source_mut().next_char()?, Some('"'));
//! assert_eq!(lexer.scan_string()?, Token::StringValue("café".to_string()));
//!
//! lexer.skip_whitespace()?;
//! let first = lexer.source_mut().next_char()?.unwrap();
//! assert_eq!(lexer.scan_number(first)?, Token::Integer("42".to_string()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Input made only of primitives can also be iterated directly:
//!
//! ```
//! use pact_json_lexer::{lex_reader, Token};
//!
//! let tokens: Vec<Token> = lex_reader("1 2.5 \"x\"".as_bytes())
//!     .map(|result| result.map(|located| located.token))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tokens[1], Token::Decimal("2.5".to_string()));
//! ```

/// Contains the `LexerConfig` settings and their defaults.
pub mod config;
/// Contains the `JsonError` type and its error kinds.
pub mod error;
/// Contains the `Lexer` and its scanning operations.
pub mod lexer;
/// Contains the `Position` type used for document pointers.
pub mod position;
/// Contains the `CharSource` trait and its in-memory and streaming sources.
pub mod source;
/// Contains the `Token`, `LocatedToken` and `JsonNumber` types.
pub mod token;

pub use config::LexerConfig;
pub use error::{ErrorKind, JsonError, NumberFault, UnicodeEscapeFault};
pub use lexer::Lexer;
pub use position::Position;
pub use source::{CharSource, ReaderSource, StrSource};
pub use token::{JsonNumber, LocatedToken, Token};

use std::io::Read;

/// Creates a lexer over an in-memory JSON string.
///
/// # Examples
/// ```
/// use pact_json_lexer::{lex_str, Token};
///
/// let mut lexer = lex_str("-17");
/// let located = lexer.next_token().unwrap().unwrap();
/// assert_eq!(located.token, Token::Integer("-17".to_string()));
/// assert_eq!(located.start.to_string(), "1:1");
/// ```
pub fn lex_str(input: &str) -> Lexer<StrSource<'_>> {
    Lexer::for_str(input)
}

/// Creates a lexer that reads UTF-8 JSON from `reader`.
///
/// The reader is buffered internally. It is dropped with the lexer, or can
/// be recovered with `lexer.into_source().into_inner()`.
pub fn lex_reader<R: Read>(reader: R) -> Lexer<ReaderSource<R>> {
    Lexer::for_reader(reader)
}
