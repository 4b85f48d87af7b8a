//! Rill front end
//!
//! - `lexer`: tokenization with indentation markers
//! - `parser`: recursive descent into the AST, plus fragment entry points
//! - `ast`: abstract syntax tree definitions
//! - `builder`: build-time checks and optional pipeline desugaring
//! - `diagnostics`: error values and their miette integration
//! - `sexp`: span-free tree dump for structural comparison

// Syntax components are provided by the shared rill_syntax crate.
pub use rill_syntax::{ast, builder, diagnostics, lexer, options, parser, pipeline, sexp};

use crate::report::SourceDiagnostics;
use ast::Program;
use options::ParseOptions;

/// Lex and parse a named source in strict mode.
///
/// Failures come back bundled with the source so they can be rendered with [`crate::report`].
pub fn parse_source(name: &str, source: &str) -> Result<Program, SourceDiagnostics> {
    parse_source_with_options(name, source, &ParseOptions::default())
}

/// Lex and parse a named source with explicit parser options.
#[tracing::instrument(skip_all, fields(name = name, len = source.len()))]
pub fn parse_source_with_options(
    name: &str,
    source: &str,
    options: &ParseOptions,
) -> Result<Program, SourceDiagnostics> {
    let tokens = lexer::lex(source).map_err(|errors| SourceDiagnostics::new(name, source, errors))?;
    parser::parse_with_options(&tokens, options).map_err(|errors| SourceDiagnostics::new(name, source, errors))
}
