//! A small binary that shows the `pact-json-lexer` library at work.
//!
//! It tokenizes a file of whitespace-separated JSON primitives (strings and
//! numbers) and prints each token with its document pointer. With no
//! argument it reads from stdin.
//!
//! You can run it with: `cargo run -- tokens.txt`
//! Set `RUST_LOG=pact_json_lexer=trace` to see the lexer's own logging.

use pact_json_lexer::{lex_reader, CharSource, Lexer, Token};
use std::fs::File;
use std::io::{self, Read};
use std::process::ExitCode;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only install a subscriber if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::StringValue(chars) => format!("string  {:?}", chars),
        Token::Integer(chars) => format!("integer {}", chars),
        Token::Decimal(chars) => format!("decimal {}", chars),
    }
}

fn print_tokens<S: CharSource>(lexer: Lexer<S>) -> ExitCode {
    for result in lexer {
        match result {
            Ok(located) => println!("{:>8}  {}", located.start, describe(&located.token)),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    init_tracing();

    let input: Box<dyn Read> = match std::env::args_os().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("cannot open {}: {}", path.to_string_lossy(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    print_tokens(lex_reader(input))
}
