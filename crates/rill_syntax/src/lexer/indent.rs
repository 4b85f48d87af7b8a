//! Indentation handling for the Rill lexer
//!
//! Keeps a stack of [`IndentFrame`]s holding the exact whitespace prefix of each open level. A line's prefix either
//! matches the top frame, strictly extends it (push, `Indent`), or exactly matches a lower frame (pop, one `Dedent`
//! per frame). Everything else is a scan error; there is no silent dedent.

use super::Lexer;
use super::tokens::{IndentFrame, Token, TokenKind};
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    /// Called at the start of each logical line outside brackets.
    ///
    /// Blank lines and comment-only lines are consumed without touching the stack; the lexer stays at line start.
    pub(super) fn handle_indentation(&mut self) {
        let prefix_start = self.current_pos;
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
        let prefix_end = self.current_pos;

        match self.peek() {
            // Trailing whitespace at end of input.
            None => return,
            Some('\n') | Some('\r') => {
                self.advance();
                return;
            }
            Some('#') => {
                self.skip_line_comment();
                return;
            }
            Some('/') if self.peek_next() == Some('*') => {
                let comment_start = self.current_pos;
                self.advance();
                self.advance();
                self.skip_block_comment(comment_start);
                while matches!(self.peek(), Some(' ' | '\t')) {
                    self.advance();
                }
                if matches!(self.peek(), None | Some('\n' | '\r' | '#')) {
                    return;
                }
                // Code follows the comment on this line: the line is indented by the prefix before the comment.
            }
            _ => {}
        }

        self.at_line_start = false;
        let prefix = self.source[prefix_start..prefix_end].to_string();
        let span = self.span_between(prefix_start, prefix_end);
        self.apply_indentation(prefix, span);
    }

    fn apply_indentation(&mut self, prefix: String, span: Span) {
        let Some(top) = self.indent_stack.last() else {
            return;
        };
        if prefix == top.prefix {
            return;
        }

        if prefix.contains(' ') && prefix.contains('\t') {
            self.errors.push(
                CompileError::scan("indentation mixes tabs and spaces", span)
                    .with_hint("indent each line with only spaces or only tabs"),
            );
            return;
        }

        if let Some(added) = prefix.strip_prefix(top.prefix.as_str()) {
            if !(added.starts_with('\t') || added.len() >= 2) {
                self.errors.push(
                    CompileError::scan(
                        "indentation must grow by at least two spaces or one tab",
                        span,
                    )
                    .with_note(format!("the enclosing level is {}", describe_prefix(&top.prefix))),
                );
                return;
            }
            tracing::trace!(line = span.line, prefix = ?prefix, "push indent frame");
            self.indent_stack.push(IndentFrame {
                prefix,
                line: span.line,
            });
            self.tokens.push(Token::new(TokenKind::Indent, span));
            return;
        }

        let Some(target) = self.indent_stack.iter().rposition(|f| f.prefix == prefix) else {
            let enclosing: Vec<String> = self
                .indent_stack
                .iter()
                .map(|f| describe_prefix(&f.prefix))
                .collect();
            self.errors.push(
                CompileError::scan(
                    "inconsistent indentation: this line does not match any enclosing level",
                    span,
                )
                .with_note(format!("enclosing levels: {}", enclosing.join(", "))),
            );
            return;
        };

        let at = self.span_between(span.end, span.end);
        while self.indent_stack.len() > target + 1 {
            self.pop_frame(at);
        }
    }

    /// Close every open frame at end of input.
    pub(super) fn close_frames(&mut self) {
        let at = self.span_between(self.current_pos, self.current_pos);
        while self.indent_stack.len() > 1 {
            self.pop_frame(at);
        }
    }

    fn pop_frame(&mut self, at: Span) {
        if let Some(frame) = self.indent_stack.pop() {
            tracing::trace!(line = frame.line, prefix = ?frame.prefix, "pop indent frame");
            self.tokens.push(Token::new(TokenKind::Dedent, at));
        }
    }
}

fn describe_prefix(prefix: &str) -> String {
    match (prefix.len(), prefix.starts_with('\t')) {
        (0, _) => "no indentation".to_string(),
        (1, true) => "1 tab".to_string(),
        (n, true) => format!("{n} tabs"),
        (1, false) => "1 space".to_string(),
        (n, false) => format!("{n} spaces"),
    }
}
