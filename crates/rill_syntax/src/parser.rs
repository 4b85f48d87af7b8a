//! Parser for the Rill pipeline language
//!
//! Converts the marker-augmented token stream produced by [`crate::lexer`] into a [`Program`]. The grammar is
//! context-free over `Newline` / `Indent` / `Dedent` tokens; all indentation bookkeeping already happened in the
//! lexer.
//!
//! ## Examples
//!
//! ```rust
//! use rill_syntax::{lexer, parser, sexp};
//!
//! let source = "users\n  filter _.age > 18\n  count\n";
//! let tokens = lexer::lex(source).unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(sexp::program(&program), "(pipe users (filter _ (> _.age 18)) (count _))");
//! ```

use std::collections::HashMap;

use crate::ast::*;
use crate::builder::TreeBuilder;
use crate::diagnostics::{CompileError, Expected};
use crate::lexer::{StringPart, Token, TokenKind};
use crate::options::{ParseMode, ParseOptions};
use rill_core::lang::keywords::{self, KeywordId};
use rill_core::lang::operators::{self, OperatorId};
use rill_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/pipeline.rs");
include!("parser/constructs.rs");
include!("parser/patterns.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
