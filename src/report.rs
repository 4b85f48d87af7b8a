//! Diagnostic rendering
//!
//! The front end only ever hands back [`CompileError`] values. This module turns them into text:
//!
//! - [`render_plain`]: compact caret rendering, stable enough to assert on in tests and to print in a terminal
//!   without color support.
//! - [`render_fancy`]: the `miette` graphical handler over a [`SourceDiagnostics`] bundle.
//!
//! Nothing here writes to stdout/stderr; callers decide where the text goes.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource};

use crate::frontend::diagnostics::CompileError;

/// Every diagnostic of one failed run, together with the source text they point into.
///
/// Implements [`miette::Diagnostic`] with the individual errors as related diagnostics, so it can be returned
/// through `miette::Result` and rendered by any miette handler.
#[derive(Debug, thiserror::Error)]
#[error("could not parse `{name}`: {} error(s)", errors.len())]
pub struct SourceDiagnostics {
    pub name: String,
    pub errors: Vec<CompileError>,
    code: NamedSource<String>,
}

impl SourceDiagnostics {
    pub fn new(name: impl Into<String>, source: impl Into<String>, errors: Vec<CompileError>) -> Self {
        let name = name.into();
        Self {
            code: NamedSource::new(name.clone(), source.into()),
            name,
            errors,
        }
    }
}

impl Diagnostic for SourceDiagnostics {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let first = self.errors.first()?;
        Some(Box::new(first.kind.code()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.code)
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        Some(Box::new(self.errors.iter().map(|e| e as &dyn Diagnostic)))
    }
}

/// Render a bundle with miette's graphical handler (unicode, no color).
pub fn render_fancy(diagnostics: &SourceDiagnostics) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = handler.render_report(&mut out, diagnostics);
    out
}

/// Render one error in caret style:
///
/// ```text
/// syntax error[rill::syntax]: unexpected `,` in record literal (expected one of: identifier, `}`)
///   --> main.rill:1:6
///   |
/// 1 | {a: 1, b: 2}
///   |      ^
///   = hint: separate elements with whitespace: `{a: 1 b: 2}`
/// ```
pub fn render_plain(file_name: &str, source: &str, error: &CompileError) -> String {
    let line_num = error.span.line.max(1);
    let col_num = error.span.column.max(1);
    let line_text = line_at(source, line_num);

    let mut out = String::new();
    out.push_str(&format!("{}[{}]: {}\n", error.kind, error.kind.code(), error));
    out.push_str(&format!("  --> {file_name}:{line_num}:{col_num}\n"));

    let width = line_num.to_string().len();
    out.push_str(&format!("{:>width$} |\n", ""));
    out.push_str(&format!("{line_num:>width$} | {line_text}\n"));

    let underline_len = underline_len(line_text, col_num, error.span.len());
    out.push_str(&format!(
        "{:>width$} | {}{}\n",
        "",
        " ".repeat(col_num - 1),
        "^".repeat(underline_len)
    ));

    for (span, label) in &error.labels {
        out.push_str(&format!(
            "{:>width$} = {label}: {file_name}:{}:{}\n",
            "", span.line, span.column
        ));
    }
    for note in &error.notes {
        out.push_str(&format!("{:>width$} = note: {note}\n", ""));
    }
    for hint in &error.hints {
        out.push_str(&format!("{:>width$} = hint: {hint}\n", ""));
    }
    out
}

/// Text of the 1-based `line`, without its terminator; empty past the end of input.
fn line_at(source: &str, line: usize) -> &str {
    source
        .split('\n')
        .nth(line - 1)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or("")
}

/// Carets under the span, clipped to the rest of the line and never fewer than one.
fn underline_len(line_text: &str, col_num: usize, span_len: usize) -> usize {
    let rest: String = line_text.chars().skip(col_num - 1).collect();
    let mut budget = span_len;
    let mut count = 0;
    for c in rest.chars() {
        if budget == 0 {
            break;
        }
        budget = budget.saturating_sub(c.len_utf8());
        count += 1;
    }
    count.max(1)
}
