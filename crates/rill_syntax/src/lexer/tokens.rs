//! Token types for the Rill lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including the word operators `and` / `or`)
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use rill_core::lang::keywords::{self, KeywordId};
use rill_core::lang::operators::OperatorId;
use rill_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Number(f64),
    Str(Vec<StringPart>),

    // ========== Layout ==========
    Newline,
    Indent,
    Dedent,

    // ========== Special ==========
    Eof,
}

/// Part of a string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// Literal text with escapes already applied.
    Literal(String),
    /// `{expr}`: the embedded text tokenized on its own, spans pointing into the enclosing source. `span` covers
    /// the text between the braces. The token list ends with its own `Eof`.
    Interpolation { tokens: Vec<Token>, span: Span },
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

/// One entry of the indentation stack: the exact whitespace prefix of the line that opened the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentFrame {
    pub prefix: String,
    /// 1-based line the frame was opened on (0 for the base frame).
    pub line: usize,
}

impl IndentFrame {
    pub fn base() -> Self {
        Self {
            prefix: String::new(),
            line: 0,
        }
    }
}
