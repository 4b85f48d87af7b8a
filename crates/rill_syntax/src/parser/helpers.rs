/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Layout handling (`skip_newlines`, `open_block_if`, `close_block`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    ///
    /// The returned reference borrows the token slice, not the parser.
    fn peek(&self) -> &'a Token {
        self.peek_at(0)
    }

    /// Return the token `offset` positions ahead; past the end this is the final token.
    fn peek_at(&self, offset: usize) -> &'a Token {
        let tokens = self.tokens;
        tokens
            .get(self.pos + offset)
            .or(tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// The most recently consumed token.
    fn previous(&self) -> Option<&'a Token> {
        let tokens = self.tokens;
        self.pos.checked_sub(1).and_then(|i| tokens.get(i))
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(kind) == std::mem::discriminant(&self.peek().kind)
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn check_newline(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Newline)
    }

    /// If the current token is the given keyword, consume it and return `true`.
    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// If the current token is the given punctuation, consume it and return `true`.
    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_newline(&mut self) -> bool {
        if self.check_newline() {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the given punctuation or fail with `unexpected ... {context}`.
    fn expect_punct(&mut self, id: PunctuationId, context: &str) -> ParseResult<Span> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(context, &[Expected::Punctuation(id)]))
        }
    }

    fn expect_op(&mut self, id: OperatorId, context: &str) -> ParseResult<Span> {
        if self.peek().kind.is_operator(id) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(context, &[Expected::Operator(id)]))
        }
    }

    /// Build an "unexpected token" error at the current position.
    fn unexpected(&self, context: &str, expected: &[Expected]) -> CompileError {
        let token = self.peek();
        CompileError::syntax(format!("unexpected {} {context}", token.kind.describe()), token.span)
            .with_expected(expected)
    }

    /// The error for a bracketed form opened at `open` when the input (or line) ends before its closer.
    ///
    /// `expected` is what the form accepts at this point; it should include the closer.
    fn unterminated(&self, what: &str, open: Span, expected: &[Expected]) -> Option<CompileError> {
        if matches!(self.peek().kind, TokenKind::Eof | TokenKind::Newline) {
            Some(
                CompileError::syntax(format!("unterminated {what}"), self.peek().span)
                    .with_expected(expected)
                    .with_label(open, "opened here"),
            )
        } else {
            None
        }
    }

    /// Skip any NEWLINE tokens.
    fn skip_newlines(&mut self) {
        while self.match_newline() {}
    }

    /// Skip any DEDENT tokens.
    fn skip_dedents(&mut self) {
        while self.check(&TokenKind::Dedent) {
            self.advance();
        }
    }

    fn previous_is_dedent(&self) -> bool {
        self.previous().is_some_and(|t| matches!(t.kind, TokenKind::Dedent))
    }

    /// Span of the current token.
    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span from the token at `start` through the last consumed token.
    fn span_since(&self, start: usize) -> Span {
        let first = self.tokens.get(start).map_or(self.current_span(), |t| t.span);
        match self.previous() {
            Some(last) if self.pos > start => first.merge(last.span),
            _ => first,
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// At `NEWLINE INDENT <token>` with `accept(<token>)`: consume the two layout tokens and return `true`.
    fn open_block_if(&mut self, accept: impl Fn(&TokenKind) -> bool) -> bool {
        if self.check_newline()
            && matches!(self.peek_at(1).kind, TokenKind::Indent)
            && accept(&self.peek_at(2).kind)
        {
            self.pos += 2;
            true
        } else {
            false
        }
    }

    /// Position the cursor on the next clause token of a construct.
    ///
    /// The clause may follow on the same line or right after a closed block. Inside the construct's own indented
    /// block it may also start the next line; outside one, an indented line starting with a clause token opens that
    /// block.
    fn clause_ahead(&mut self, in_block: &mut bool, accept: impl Fn(&TokenKind) -> bool) -> bool {
        if accept(&self.peek().kind) {
            return true;
        }
        if *in_block {
            if self.check_newline() && accept(&self.peek_at(1).kind) {
                self.advance();
                return true;
            }
            return false;
        }
        if self.open_block_if(&accept) {
            *in_block = true;
            return true;
        }
        false
    }

    /// Close an indented block: an optional NEWLINE, then the DEDENT.
    fn close_block(&mut self, context: &str) -> ParseResult<()> {
        self.match_newline();
        if self.check(&TokenKind::Dedent) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(context, &[Expected::Newline, Expected::Dedent]))
        }
    }

    /// An expression, either inline or alone in an indented block on the following lines.
    fn body(&mut self) -> ParseResult<Spanned<Expr>> {
        if self.open_block_if(|kind| !kind.is_layout() && !matches!(kind, TokenKind::Eof)) {
            let expr = self.expression()?;
            self.close_block("after indented expression")?;
            Ok(expr)
        } else {
            self.expression()
        }
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Net INDENT/DEDENT depth of everything consumed so far.
    fn layout_level(&self) -> isize {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .fold(0, |level, token| match token.kind {
                TokenKind::Indent => level + 1,
                TokenKind::Dedent => level - 1,
                _ => level,
            })
    }

    /// Skip to the start of the next top-level statement.
    ///
    /// Tokens are discarded until a NEWLINE or DEDENT leaves the cursor back at indentation level zero with no
    /// further layout token pending.
    fn synchronize(&mut self) {
        let mut level = self.layout_level();
        while !self.is_at_end() {
            let kind = &self.advance().kind;
            match kind {
                TokenKind::Indent => level += 1,
                TokenKind::Dedent => level -= 1,
                _ => {}
            }
            if level <= 0
                && matches!(kind, TokenKind::Newline | TokenKind::Dedent)
                && !matches!(self.peek().kind, TokenKind::Indent | TokenKind::Dedent)
            {
                return;
            }
        }
    }
}
