//! Diagnostic rendering tests: what a user sees when a source file does not parse.

use miette::Diagnostic;
use rill::diagnostics::{CompileError, ErrorKind};
use rill::{parse_source, render_fancy, render_plain};

fn first_error(source: &str) -> CompileError {
    match parse_source("cfg.rill", source) {
        Ok(program) => panic!("expected an error, parsed {} statement(s)", program.statements.len()),
        Err(diagnostics) => diagnostics.errors.into_iter().next().expect("at least one error"),
    }
}

#[test]
fn plain_rendering_points_at_the_comma() {
    let source = "x = {a: 1, b: 2}\n";
    let text = render_plain("cfg.rill", source, &first_error(source));
    assert_eq!(
        text,
        "syntax error[rill::syntax]: unexpected `,` in record literal (expected one of: identifier, `}`)\n\
         \x20 --> cfg.rill:1:10\n\
         \x20 |\n\
         1 | x = {a: 1, b: 2}\n\
         \x20 |          ^\n\
         \x20 = hint: separate elements with whitespace: `{a: 1 b: 2}`\n"
    );
}

#[test]
fn plain_rendering_includes_labels_and_notes() {
    let source = "r = {a: 1 a: 2}\n";
    let error = first_error(source);
    assert_eq!(error.message, "duplicate key `a` in record literal");

    let text = render_plain("cfg.rill", source, &error);
    assert!(text.contains("  --> cfg.rill:1:11\n"), "{text}");
    assert!(text.contains("cfg.rill:1:6"), "label should point at the first key:\n{text}");
}

#[test]
fn scan_errors_carry_their_own_code() {
    let source = "total = 12.34.56\n";
    let err = parse_source("cfg.rill", source).unwrap_err();
    assert_eq!(err.errors[0].kind, ErrorKind::Scan);
    assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("rill::scan"));

    let text = render_plain("cfg.rill", source, &err.errors[0]);
    assert!(text.starts_with("scan error[rill::scan]: invalid number literal `12.34.56`"), "{text}");
}

#[test]
fn fancy_rendering_names_the_file_and_every_error() {
    let err = parse_source("broken.rill", "x = [1, 2]\n").unwrap_err();
    assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("rill::syntax"));
    assert_eq!(err.related().map(|r| r.count()), Some(1));

    let text = render_fancy(&err);
    assert!(text.contains("could not parse `broken.rill`"), "{text}");
    assert!(text.contains("unexpected `,` in list literal"), "{text}");
    assert!(text.contains("broken.rill"), "{text}");
}

#[test]
fn bundles_convert_into_miette_reports() {
    fn load() -> miette::Result<usize> {
        let program = parse_source("cfg.rill", "ok = 1\nbad = [1, 2]\n")?;
        Ok(program.statements.len())
    }

    let report = load().unwrap_err();
    assert_eq!(report.to_string(), "could not parse `cfg.rill`: 1 error(s)");
}
