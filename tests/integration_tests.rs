//! Integration tests for the Rill front end

use std::fs;
use std::path::Path;

use rill::diagnostics::CompileError;
use rill::frontend::{lexer, parser, sexp};
use rill::{format_source, parse_source};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Helper to run lexer + parser on a source file
fn parse_file(path: &Path) -> Result<String, Vec<CompileError>> {
    let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    let tokens = lexer::lex(&source)?;
    let program = parser::parse(&tokens)?;
    Ok(sexp::program(&program))
}

/// Every valid fixture parses, and formatting it round-trips to the same tree.
#[test]
fn test_valid_fixtures() {
    init_tracing();
    insta::glob!("fixtures/valid/*.rill", |path| {
        let dump = match parse_file(path) {
            Ok(dump) => dump,
            Err(errors) => panic!("expected {} to parse, got errors: {errors:?}", path.display()),
        };

        let source = fs::read_to_string(path).unwrap();
        let formatted = format_source(&source).unwrap();
        let tokens = lexer::lex(&formatted).unwrap();
        let reparsed = parser::parse(&tokens).unwrap_or_else(|e| panic!("formatted output failed: {e:?}\n{formatted}"));
        assert_eq!(sexp::program(&reparsed), dump, "{} changed shape when formatted", path.display());
        assert_eq!(format_source(&formatted).unwrap(), formatted, "formatting {} is not idempotent", path.display());
    });
}

/// Every invalid fixture fails with a located diagnostic.
#[test]
fn test_invalid_fixtures() {
    init_tracing();
    insta::glob!("fixtures/invalid/*.rill", |path| {
        let errors = match parse_file(path) {
            Ok(dump) => panic!("expected {} to fail, but it parsed as {dump}", path.display()),
            Err(errors) => errors,
        };
        assert!(!errors.is_empty());
        for error in &errors {
            assert!(error.span.line >= 1 && error.span.column >= 1, "{error:?}");
        }
    });
}

#[test]
fn test_invalid_fixture_locations() {
    let cases = [
        ("comma_in_record", 1, 10, "unexpected `,` in record literal"),
        ("comma_in_list", 1, 8, "unexpected `,` in list literal"),
        ("shallow_indent", 2, 1, "indentation must grow by at least two spaces or one tab"),
        ("two_decimal_points", 1, 5, "invalid number literal `12.34.56`"),
        ("digit_identifier", 1, 1, "invalid number literal `123user`"),
        ("duplicate_key", 1, 11, "duplicate key `a` in record literal"),
    ];
    for (name, line, column, message) in cases {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/invalid")
            .join(format!("{name}.rill"));
        let errors = parse_file(&path).expect_err(name);
        let first = &errors[0];
        assert_eq!((first.span.line, first.span.column), (line, column), "{name}: {first}");
        assert!(first.message.starts_with(message), "{name}: {}", first.message);
    }
}

#[test]
fn test_parse_source_bundles_diagnostics() {
    let err = parse_source("broken.rill", "x = [1, 2]\n").unwrap_err();
    assert_eq!(err.name, "broken.rill");
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.to_string(), "could not parse `broken.rill`: 1 error(s)");

    let program = parse_source("ok.rill", "x = [1 2]\n").unwrap();
    assert_eq!(sexp::program(&program), "(= x (list 1 2))");
}

/// Test specific lexer behavior
mod lexer_tests {
    use rill::lexer::{TokenKind, lex};

    #[test]
    fn test_indentation_markers() {
        let tokens = lex("users\n  filter _.active\n").unwrap();
        let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
        assert!(matches!(kinds[0], TokenKind::Ident(name) if name == "users"));
        assert!(matches!(kinds[1], TokenKind::Newline));
        assert!(matches!(kinds[2], TokenKind::Indent));
        assert!(matches!(kinds.last(), Some(TokenKind::Eof)));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Dedent)));
    }

    #[test]
    fn test_identifier_punctuation_suffixes() {
        let tokens = lex("empty? save!\n").unwrap();
        assert!(matches!(&tokens[0].kind, TokenKind::Ident(name) if name == "empty?"));
        assert!(matches!(&tokens[1].kind, TokenKind::Ident(name) if name == "save!"));
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("3.14 42\n").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Number(n) if n == 3.14));
        assert!(matches!(tokens[1].kind, TokenKind::Number(n) if n == 42.0));
        assert!(lex("12.34.56\n").is_err());
    }
}
