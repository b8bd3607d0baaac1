#![no_main]
use libfuzzer_sys::fuzz_target;
use pact_json_lexer::{lex_reader, lex_str};

fuzz_target!(|data: &[u8]| {
    // Malformed UTF-8 decodes to U+FFFD the same way `from_utf8_lossy` does,
    // so the string source must agree with the reader on any input.
    let text = String::from_utf8_lossy(data);
    let from_str: Vec<_> = lex_str(&text).map(|r| r.map_err(|e| e.to_string())).collect();
    let from_reader: Vec<_> = lex_reader(data).map(|r| r.map_err(|e| e.to_string())).collect();
    assert_eq!(from_str, from_reader);
});
