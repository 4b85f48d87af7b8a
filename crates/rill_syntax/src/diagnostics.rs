//! Diagnostics for the Rill front end.
//!
//! A [`CompileError`] is a plain value: the lexer and parser collect them and hand them back, they never panic or
//! print. Rendering is left to the caller; the `miette::Diagnostic` impl lets any miette handler draw them.

use std::fmt;

use crate::ast::Span;
use rill_core::lang::keywords::{self, KeywordId};
use rill_core::lang::operators::{self, OperatorId};
use rill_core::lang::punctuation::{self, PunctuationId};
use rill_core::lang::registry::Example;

/// Failure class of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal, unterminated string/comment, bad indentation, stray character or bracket.
    Scan,
    /// Unexpected token, missing closer, empty parameter list, duplicate key, comma separator, bad stage.
    Syntax,
    /// Nesting deeper than the configured limit.
    Limit,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Scan => "rill::scan",
            ErrorKind::Syntax => "rill::syntax",
            ErrorKind::Limit => "rill::limit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Scan => write!(f, "scan error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Limit => write!(f, "limit error"),
        }
    }
}

/// A token class the parser would have accepted at an error position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Identifier,
    Expression,
    Pattern,
    Newline,
    Dedent,
    EndOfInput,
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Identifier => write!(f, "identifier"),
            Expected::Expression => write!(f, "expression"),
            Expected::Pattern => write!(f, "pattern"),
            Expected::Newline => write!(f, "end of line"),
            Expected::Dedent => write!(f, "end of indented block"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::Keyword(id) => write!(f, "`{}`", keywords::as_str(*id)),
            Expected::Operator(id) => write!(f, "`{}`", operators::as_str(*id)),
            Expected::Punctuation(id) => write!(f, "`{}`", punctuation::as_str(*id)),
        }
    }
}

/// A front-end error with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}{}", expected_suffix(.expected))]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// Token classes accepted at `span`; empty when the error is not about a missing token.
    pub expected: Vec<Expected>,
    /// Secondary locations, e.g. the first occurrence of a duplicated key.
    pub labels: Vec<(Span, String)>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            expected: Vec::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn scan(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Scan, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn limit(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Limit, message, span)
    }

    pub fn with_expected(mut self, expected: &[Expected]) -> Self {
        for e in expected {
            if !self.expected.contains(e) {
                self.expected.push(*e);
            }
        }
        self
    }

    pub fn with_label(mut self, span: Span, label: impl Into<String>) -> Self {
        self.labels.push((span, label.into()));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Quote the first registry example as a hint, with its note if it has one.
    pub fn with_example(self, examples: &[Example]) -> Self {
        let Some(example) = examples.first() else {
            return self;
        };
        let err = self.with_hint(format!("for example: `{}`", example.code));
        match example.note {
            Some(note) => err.with_note(note),
            None => err,
        }
    }
}

fn expected_suffix(expected: &[Expected]) -> String {
    if expected.is_empty() {
        return String::new();
    }
    let list: Vec<String> = expected.iter().map(ToString::to_string).collect();
    format!(" (expected one of: {})", list.join(", "))
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

impl miette::Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() && self.notes.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .notes
            .iter()
            .map(|n| format!("note: {n}"))
            .chain(self.hints.iter().cloned())
            .collect();
        Some(Box::new(lines.join("\n")))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let primary = miette::LabeledSpan::new_primary_with_span(Some(self.kind.to_string()), self.span);
        let secondary = self
            .labels
            .iter()
            .map(|(span, text)| miette::LabeledSpan::new_with_span(Some(text.clone()), *span));
        Some(Box::new(std::iter::once(primary).chain(secondary)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_expected_token_classes() {
        let err = CompileError::syntax("unexpected `,` in record literal", Span::new(4, 5, 1, 5)).with_expected(&[
            Expected::Identifier,
            Expected::Punctuation(PunctuationId::RBrace),
        ]);
        assert_eq!(
            err.to_string(),
            "unexpected `,` in record literal (expected one of: identifier, `}`)"
        );
    }

    #[test]
    fn test_expected_set_has_no_duplicates() {
        let err = CompileError::syntax("x", Span::default())
            .with_expected(&[Expected::Newline])
            .with_expected(&[Expected::Newline, Expected::EndOfInput]);
        assert_eq!(err.expected, vec![Expected::Newline, Expected::EndOfInput]);
    }

    #[test]
    fn test_diagnostic_code_follows_kind() {
        use miette::Diagnostic;

        let err = CompileError::limit("nesting too deep", Span::default());
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("rill::limit"));
        assert!(err.help().is_none());

        let err = err.with_hint("split the expression");
        assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("split the expression"));
    }

    #[test]
    fn test_with_example_quotes_code_and_note() {
        let examples = [
            Example {
                code: "xs |> sum",
                note: Some("one stage"),
            },
            Example {
                code: "xs |> count",
                note: None,
            },
        ];
        let err = CompileError::syntax("x", Span::default()).with_example(&examples);
        assert_eq!(err.hints, vec!["for example: `xs |> sum`".to_string()]);
        assert_eq!(err.notes, vec!["one stage".to_string()]);

        let err = CompileError::syntax("x", Span::default()).with_example(&[]);
        assert!(err.hints.is_empty() && err.notes.is_empty());
    }
}
