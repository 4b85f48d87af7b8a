#![forbid(unsafe_code)]
//! Rill pipeline language front end
//!
//! Rill programs are sequences of definitions and expressions whose data flows through pipelines of juxtaposed
//! function applications. This crate ties the front end together: syntax (lexer, parser, AST, tree builder) from
//! `rill_syntax`, plus the tooling built on the tree (canonical formatter, diagnostic rendering).
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Lexing and parsing return every
//!   problem as a [`diagnostics::CompileError`] value; malformed input never panics.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a front-end bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.
//!
//! ## Examples
//! ```rust
//! let source = "adults = users\n  filter _.age > 18\n";
//! let program = rill::parse_source("demo.rill", source).unwrap();
//! assert_eq!(program.statements.len(), 1);
//! assert_eq!(rill::format_source(source).unwrap(), source);
//! ```

pub mod format;
pub mod frontend;
pub mod report;

pub use frontend::ast;
pub use frontend::builder;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::options;
pub use frontend::parser;
pub use frontend::sexp;
pub use frontend::{parse_source, parse_source_with_options};

pub use format::{FormatConfig, PipelineLayout, check_formatted, format_diff, format_source, format_source_with_config};
pub use report::{SourceDiagnostics, render_fancy, render_plain};
