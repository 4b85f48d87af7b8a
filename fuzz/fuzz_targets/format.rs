#![no_main]

use libfuzzer_sys::fuzz_target;
use rill::frontend::{lexer, parser, sexp};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(formatted) = rill::format_source(source) else {
        return;
    };

    // Whatever parses must format to source with the same tree.
    let dump = |text: &str| {
        let tokens = lexer::lex(text).ok()?;
        parser::parse(&tokens).ok().map(|program| sexp::program(&program))
    };
    assert_eq!(dump(&formatted), dump(source), "formatted as:\n{formatted}");
    assert_eq!(rill::format_source(&formatted).ok().as_deref(), Some(formatted.as_str()));
});
