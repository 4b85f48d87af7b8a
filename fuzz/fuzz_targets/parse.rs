#![no_main]

use libfuzzer_sys::fuzz_target;
use rill::frontend::{lexer, parser};
use rill::options::ParseOptions;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            // Best-effort parsing visits every statement, including the ones after a failure.
            let _ = parser::parse_best_effort(&tokens, &ParseOptions::default());
            let _ = parser::parse(&tokens);
        }
    }
});
