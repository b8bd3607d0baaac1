//! Tuning knobs for the `Lexer`.

/// Initial capacity of the buffer a string literal is decoded into.
pub const DEFAULT_STRING_CAPACITY: usize = 128;
/// Initial capacity of the buffer a number literal is collected into.
pub const DEFAULT_NUMBER_CAPACITY: usize = 16;
/// The longest string literal (in decoded characters) accepted by default.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 10 * 1024 * 1024;

/// Settings for a `Lexer`.
///
/// ```
/// use pact_json_lexer::LexerConfig;
///
/// let config = LexerConfig::default().with_max_string_length(64);
/// assert_eq!(config.max_string_length, 64);
/// assert_eq!(config.string_capacity, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Starting capacity of the string buffer. It grows as needed.
    pub string_capacity: usize,
    /// Starting capacity of number buffers.
    pub number_capacity: usize,
    /// Maximum decoded length of one string literal.
    pub max_string_length: usize,
}

impl LexerConfig {
    /// Sets the starting capacity of the string buffer.
    pub fn with_string_capacity(mut self, capacity: usize) -> Self {
        self.string_capacity = capacity;
        self
    }

    /// Sets the starting capacity of number buffers.
    pub fn with_number_capacity(mut self, capacity: usize) -> Self {
        self.number_capacity = capacity;
        self
    }

    /// Sets the longest string literal, in decoded characters, that scans
    /// without a `StringTooLong` error.
    pub fn with_max_string_length(mut self, length: usize) -> Self {
        self.max_string_length = length;
        self
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            string_capacity: DEFAULT_STRING_CAPACITY,
            number_capacity: DEFAULT_NUMBER_CAPACITY,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}
