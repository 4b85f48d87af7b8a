//! String scanning for the Rill lexer
//!
//! Strings are double-quoted and end on the line they start. `{expr}` opens an interpolation: the embedded text is
//! tokenized by a sub-lexer whose spans point into the enclosing source.

use super::Lexer;
use super::tokens::{StringPart, TokenKind};
use crate::diagnostics::CompileError;

/// Deepest allowed nesting of interpolations inside interpolated strings.
pub const MAX_INTERPOLATION_DEPTH: usize = 64;

/// Result of processing an escape sequence
enum EscapeResult {
    /// Successfully parsed escape character
    Char(char),
    /// Unknown escape - preserve as-is (backslash + char)
    Unknown(char),
    /// End of line or input during escape
    Unterminated,
}

/// Outcome of scanning `{ ... }` inside a string.
enum Interpolation {
    Part(StringPart),
    /// Error already recorded; the string continues after the closing brace.
    Rejected,
    /// The line or input ended first.
    Unterminated,
}

impl<'a> Lexer<'a> {
    /// Process a text escape sequence. Called after consuming the backslash.
    fn scan_escape(&mut self) -> EscapeResult {
        if matches!(self.peek(), None | Some('\n')) {
            return EscapeResult::Unterminated;
        }
        match self.advance() {
            Some('n') => EscapeResult::Char('\n'),
            Some('t') => EscapeResult::Char('\t'),
            Some('r') => EscapeResult::Char('\r'),
            Some(c @ ('\\' | '"' | '{' | '}')) => EscapeResult::Char(c),
            Some(c) => EscapeResult::Unknown(c),
            None => EscapeResult::Unterminated,
        }
    }

    /// Scan a string literal whose opening quote at `start` has been consumed.
    pub(super) fn scan_string(&mut self, start: usize) {
        let mut parts = Vec::new();
        let mut literal = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error("unterminated string literal", start);
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape() {
                        EscapeResult::Char(c) => literal.push(c),
                        EscapeResult::Unknown(c) => {
                            literal.push('\\');
                            literal.push(c);
                        }
                        EscapeResult::Unterminated => {
                            self.error("unterminated string literal", start);
                            break;
                        }
                    }
                }
                Some('{') => {
                    let open = self.current_pos;
                    self.advance();
                    if !literal.is_empty() {
                        parts.push(StringPart::Literal(std::mem::take(&mut literal)));
                    }
                    match self.scan_interpolation(open) {
                        Interpolation::Part(part) => parts.push(part),
                        Interpolation::Rejected => {}
                        Interpolation::Unterminated => {
                            self.error("unterminated string literal", start);
                            break;
                        }
                    }
                }
                Some('}') => {
                    let brace = self.current_pos;
                    self.advance();
                    let span = self.span_from(brace);
                    self.errors.push(
                        CompileError::scan("unmatched `}` in string literal", span)
                            .with_hint("write `\\}` for a literal brace"),
                    );
                }
                Some(c) => {
                    literal.push(c);
                    self.advance();
                }
            }
        }

        if !literal.is_empty() {
            parts.push(StringPart::Literal(literal));
        }

        self.add_token(TokenKind::Str(parts), start);
    }

    /// Scan `{ ... }` after its opening brace (at `open`) has been consumed.
    fn scan_interpolation(&mut self, open: usize) -> Interpolation {
        let inner_start = self.current_pos;
        if !self.skip_interpolation_body() {
            return Interpolation::Unterminated;
        }
        // The closing brace is one byte.
        let inner_end = self.current_pos - 1;

        if self.source[inner_start..inner_end].trim().is_empty() {
            let span = self.span_from(open);
            self.errors.push(
                CompileError::scan("empty interpolation `{}`", span).with_hint("write `\\{` for a literal brace"),
            );
            return Interpolation::Rejected;
        }

        let nesting = self.nesting + 1;
        if nesting > MAX_INTERPOLATION_DEPTH {
            let span = self.span_from(open);
            self.errors.push(
                CompileError::limit(
                    format!("string interpolation nesting exceeds the limit of {MAX_INTERPOLATION_DEPTH} levels"),
                    span,
                )
                .with_hint("bind the inner string to a name first"),
            );
            return Interpolation::Rejected;
        }

        let (tokens, errors) = Lexer::embedded(self.source, inner_start, inner_end, nesting).run();
        self.errors.extend(errors);
        Interpolation::Part(StringPart::Interpolation {
            tokens,
            span: self.span_between(inner_start, inner_end),
        })
    }

    /// Skip to and past the `}` closing the current interpolation, honoring nested braces and strings.
    ///
    /// Returns `false` if the line or input ends first.
    fn skip_interpolation_body(&mut self) -> bool {
        // Innermost last: `Brace(n)` is an interpolation with `n` unclosed inner braces.
        let mut stack = vec![Enclosing::Brace(0)];
        while let Some(&top) = stack.last() {
            let Some(c) = self.peek().filter(|&c| c != '\n') else {
                return false;
            };
            self.advance();
            let replaced = match (top, c) {
                (Enclosing::Brace(0), '}') | (Enclosing::Quote, '"') => {
                    stack.pop();
                    continue;
                }
                (Enclosing::Brace(open), '{') => Enclosing::Brace(open + 1),
                (Enclosing::Brace(open), '}') => Enclosing::Brace(open - 1),
                (Enclosing::Brace(_), '"') => {
                    stack.push(Enclosing::Quote);
                    continue;
                }
                (Enclosing::Quote, '{') => {
                    stack.push(Enclosing::Brace(0));
                    continue;
                }
                (Enclosing::Quote, '\\') => {
                    if matches!(self.peek(), None | Some('\n')) {
                        return false;
                    }
                    self.advance();
                    continue;
                }
                _ => continue,
            };
            if let Some(last) = stack.last_mut() {
                *last = replaced;
            }
        }
        true
    }
}

/// What the interpolation skipper is inside of.
#[derive(Clone, Copy)]
enum Enclosing {
    Brace(usize),
    Quote,
}

/// Render `text` as the body of a string literal (without the quotes) that scans back to `text`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' | '"' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
