//! Syntax front end for the Rill pipeline language: lexer, parser, AST, diagnostics.
//!
//! Source text flows through three stages:
//!
//! 1. [`lexer`] turns text into a token stream. Significant indentation is resolved here into `Indent` / `Newline` /
//!    `Dedent` markers, so everything downstream is context-free.
//! 2. [`parser`] runs a single recursive-descent pass over the marker-augmented stream and produces a [`ast::Program`].
//! 3. [`builder`] runs the build-time checks (duplicate record keys) and, when asked, desugars pipelines through
//!    [`pipeline::resolve_program`].
//!
//! ## Notes
//! - This crate is syntax-only: no evaluation, no name resolution, no type checking.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `rill_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use rill_syntax::{lexer, parser, sexp};
//!
//! let tokens = lexer::lex("add (multiply 5 2) 10\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(sexp::program(&program), "(add (multiply 5 2) 10)");
//! ```
//!
//! ## See also
//! - `rill_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod builder;
pub mod diagnostics;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod sexp;
pub mod token_helpers;
