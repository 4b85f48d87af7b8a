/// Expression parsing.
///
/// Layers, loosest first:
/// - pipeline: `seed |> stage` or indented stage lines (see `pipeline.rs`)
/// - binary operators by precedence climbing; each becomes an [`Application`] of the operator name
/// - application: a head followed by juxtaposed arguments
/// - postfix field access `a.b` (no whitespace around the dot)
/// - primary: literals, identifiers, brackets, `_`, and the constructs `let` / `if` / `match` / `try`
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse a full expression.
    fn expression(&mut self) -> ParseResult<Spanned<Expr>> {
        let seed = self.binary(0)?;
        self.pipeline_tail(seed)
    }

    fn binary(&mut self, min_prec: u8) -> ParseResult<Spanned<Expr>> {
        let first = self.application()?;
        self.infix_chain(first, min_prec)
    }

    /// Fold operators of precedence `min_prec` or tighter onto `left`. All operators are left-associative.
    fn infix_chain(&mut self, left: Spanned<Expr>, min_prec: u8) -> ParseResult<Spanned<Expr>> {
        self.restoring_depth(|p| p.fold_infix(left, min_prec))
    }

    /// Each fold nests `left` one level deeper and is charged against the nesting limit.
    fn fold_infix(&mut self, mut left: Spanned<Expr>, min_prec: u8) -> ParseResult<Spanned<Expr>> {
        while let Some(op) = self.peek().kind.infix_operator() {
            let prec = operators::precedence(op);
            if prec < min_prec {
                break;
            }
            self.deepen()?;
            let op_span = self.advance().span;
            let operand = self.application()?;
            let right = self.infix_chain(operand, prec + 1)?;

            let span = left.span.merge(right.span);
            let callee = Spanned::new(Expr::Identifier(operators::as_str(op).to_string()), op_span);
            left = Spanned::new(
                Expr::Application(Application {
                    callee: Box::new(callee),
                    args: vec![left, right],
                }),
                span,
            );
        }
        Ok(left)
    }

    /// A head followed by every argument that can be juxtaposed to it.
    ///
    /// Constructs take no arguments: they already extend as far right as possible.
    fn application(&mut self) -> ParseResult<Spanned<Expr>> {
        let construct = self.at_construct();
        let head = self.postfix()?;
        if construct {
            return Ok(head);
        }

        let mut args = Vec::new();
        while self.at_argument_start() {
            args.push(self.postfix()?);
        }

        match args.last() {
            None => Ok(head),
            Some(last) => {
                let span = head.span.merge(last.span);
                Ok(Spanned::new(
                    Expr::Application(Application {
                        callee: Box::new(head),
                        args,
                    }),
                    span,
                ))
            }
        }
    }

    /// Whether the current token can begin a juxtaposed argument.
    ///
    /// ## Notes
    /// - `name :` is a record key, not an argument.
    /// - `-` starts an argument only as a negative literal written `f -5`: whitespace before, none after.
    fn at_argument_start(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Ident(_) => !self.peek_at(1).kind.is_punctuation(PunctuationId::Colon),
            TokenKind::Number(_) | TokenKind::Str(_) => true,
            TokenKind::Keyword(id) => matches!(id, KeywordId::True | KeywordId::False | KeywordId::Nil),
            TokenKind::Punctuation(id) => matches!(
                id,
                PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::Underscore
            ),
            TokenKind::Operator(OperatorId::Minus) => {
                let minus = self.peek().span;
                self.negative_literal_ahead() && self.previous().is_some_and(|prev| prev.span.end < minus.start)
            }
            _ => false,
        }
    }

    /// `a.b.c`, where each dot touches the tokens on both sides.
    fn postfix(&mut self) -> ParseResult<Spanned<Expr>> {
        let expr = self.primary()?;
        self.restoring_depth(|p| p.field_accesses(expr))
    }

    fn field_accesses(&mut self, mut expr: Spanned<Expr>) -> ParseResult<Spanned<Expr>> {
        while self.at_field_access() {
            self.deepen()?;
            self.advance();
            let field = self.identifier("after `.`")?;
            let span = expr.span.merge(field.span);
            expr = Spanned::new(
                Expr::FieldAccess(FieldAccess {
                    target: Box::new(expr),
                    field,
                }),
                span,
            );
        }
        Ok(expr)
    }

    fn at_field_access(&self) -> bool {
        let dot = self.peek();
        let field = self.peek_at(1);
        dot.kind.is_punctuation(PunctuationId::Dot)
            && matches!(field.kind, TokenKind::Ident(_))
            && dot.span.end == field.span.start
            && self.previous().is_some_and(|prev| prev.span.end == dot.span.start)
    }

    fn primary(&mut self) -> ParseResult<Spanned<Expr>> {
        self.nested(|p| p.primary_inner())
    }

    fn primary_inner(&mut self) -> ParseResult<Spanned<Expr>> {
        let token = self.peek();
        let span = token.span;
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Spanned::new(Expr::Identifier(name.clone()), span))
            }
            TokenKind::Number(value) => {
                self.advance();
                Ok(Spanned::new(Expr::Number(*value), span))
            }
            TokenKind::Str(parts) => {
                self.advance();
                let segments = self.string_segments(parts)?;
                Ok(Spanned::new(Expr::Str(segments), span))
            }
            TokenKind::Operator(OperatorId::Minus) if self.negative_literal_ahead() => {
                let (value, span) = self.negative_number();
                Ok(Spanned::new(Expr::Number(value), span))
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Ok(Spanned::new(Expr::Bool(true), span))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Ok(Spanned::new(Expr::Bool(false), span))
            }
            TokenKind::Keyword(KeywordId::Nil) => {
                self.advance();
                Ok(Spanned::new(Expr::Nil, span))
            }
            TokenKind::Keyword(KeywordId::Let) => self.let_expr(),
            TokenKind::Keyword(KeywordId::If) => self.if_expr(),
            TokenKind::Keyword(KeywordId::Match) => self.match_expr(),
            TokenKind::Keyword(KeywordId::Try) => self.try_expr(),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.record(),
            TokenKind::Punctuation(PunctuationId::LBracket) => self.list_or_function(),
            TokenKind::Punctuation(PunctuationId::LParen) => self.parenthesized(),
            TokenKind::Punctuation(PunctuationId::Underscore) => self.wildcard(),
            _ => Err(self.unexpected("in expression", &[Expected::Expression])),
        }
    }

    /// Segments of a string literal; each interpolation is parsed from its own token list.
    fn string_segments(&mut self, parts: &'a [StringPart]) -> ParseResult<Vec<StringSegment>> {
        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                StringPart::Literal(text) => segments.push(StringSegment::Literal(text.clone())),
                StringPart::Interpolation { tokens, span } => {
                    let mut inner = Parser::new(tokens, self.options.clone());
                    inner.depth = self.depth;
                    let expr = match inner.interpolation() {
                        Ok(expr) => expr,
                        Err(err) if self.options.mode == ParseMode::BestEffort => {
                            self.errors.push(err);
                            Spanned::new(Expr::Error, *span)
                        }
                        Err(err) => return Err(err),
                    };
                    segments.push(StringSegment::Interpolation(Box::new(expr)));
                }
            }
        }
        Ok(segments)
    }

    /// The whole token list of an interpolation as one expression.
    fn interpolation(&mut self) -> ParseResult<Spanned<Expr>> {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(self.unexpected("in string interpolation", &[Expected::Punctuation(PunctuationId::RBrace)]));
        }
        Ok(expr)
    }

    // ========================================================================
    // Bracketed forms
    // ========================================================================

    /// `{key: value key: value}`; fields are separated by whitespace only.
    fn record(&mut self) -> ParseResult<Spanned<Expr>> {
        let open = self.advance().span;
        let mut fields = Vec::new();

        let expected = [Expected::Identifier, Expected::Punctuation(PunctuationId::RBrace)];
        while !self.check_punct(PunctuationId::RBrace) {
            if let Some(err) = self.unterminated("record literal", open, &expected) {
                return Err(err);
            }
            if self.check_punct(PunctuationId::Comma) {
                return Err(self.comma_error("record literal", "{a: 1 b: 2}", &expected));
            }
            if !self.check_ident() {
                return Err(self.unexpected("in record literal", &expected));
            }
            let key = self.identifier("in record literal")?;
            self.expect_punct(PunctuationId::Colon, "after record key")?;
            let value = self.expression()?;
            fields.push(RecordField { key, value });
        }

        let close = self.advance().span;
        Ok(Spanned::new(Expr::Record(fields), open.merge(close)))
    }

    /// `[a b c]`, or `[x y -> body]` when identifiers and `->` follow the bracket.
    fn list_or_function(&mut self) -> ParseResult<Spanned<Expr>> {
        if self.function_literal_ahead() {
            return self.function_literal();
        }

        let open = self.advance().span;
        if self.check_punct(PunctuationId::Arrow) {
            return Err(CompileError::syntax(
                "anonymous function needs at least one parameter",
                self.current_span(),
            )
            .with_expected(&[Expected::Identifier])
            .with_hint("write `[x -> ...]`"));
        }

        let items = self.stage_arguments()?;
        if !self.check_punct(PunctuationId::RBracket) {
            let expected = [Expected::Expression, Expected::Punctuation(PunctuationId::RBracket)];
            if let Some(err) = self.unterminated("list literal", open, &expected) {
                return Err(err);
            }
            if self.check_punct(PunctuationId::Comma) {
                return Err(self.comma_error("list literal", "[1 2 3]", &expected));
            }
            return Err(self.unexpected("in list literal", &expected));
        }

        let close = self.advance().span;
        Ok(Spanned::new(Expr::List(items), open.merge(close)))
    }

    fn function_literal_ahead(&self) -> bool {
        let mut offset = 1;
        while matches!(self.peek_at(offset).kind, TokenKind::Ident(_)) {
            offset += 1;
        }
        offset > 1 && self.peek_at(offset).kind.is_punctuation(PunctuationId::Arrow)
    }

    fn function_literal(&mut self) -> ParseResult<Spanned<Expr>> {
        let open = self.advance().span;
        let mut params = Vec::new();
        while self.check_ident() {
            params.push(self.identifier("in parameter list")?);
        }
        self.expect_punct(PunctuationId::Arrow, "after parameters")?;
        let body = self.expression()?;
        let closer = [Expected::Punctuation(PunctuationId::RBracket)];
        if let Some(err) = self.unterminated("anonymous function", open, &closer) {
            return Err(err);
        }
        let close = self.expect_punct(PunctuationId::RBracket, "after function body")?;
        Ok(Spanned::new(
            Expr::Function(FunctionDef {
                params,
                body: Box::new(body),
            }),
            open.merge(close),
        ))
    }

    /// `( expr )`; the node's span widens to cover the parentheses.
    fn parenthesized(&mut self) -> ParseResult<Spanned<Expr>> {
        let open = self.advance().span;
        let inner = self.expression()?;
        let closer = [Expected::Punctuation(PunctuationId::RParen)];
        if let Some(err) = self.unterminated("parenthesized expression", open, &closer) {
            return Err(err);
        }
        let close = self.expect_punct(PunctuationId::RParen, "in parenthesized expression")?;
        Ok(Spanned::new(inner.node, open.merge(close)))
    }

    /// `_` with an optional field path `_.a.b`.
    fn wildcard(&mut self) -> ParseResult<Spanned<Expr>> {
        let mut span = self.advance().span;
        let mut path = Vec::new();
        while self.at_field_access() {
            self.advance();
            let field = self.identifier("after `.`")?;
            span = span.merge(field.span);
            path.push(field.node);
        }
        Ok(Spanned::new(Expr::Wildcard(WildcardAccess { path }), span))
    }

    fn comma_error(&self, context: &str, example: &str, expected: &[Expected]) -> CompileError {
        CompileError::syntax(format!("unexpected `,` in {context}"), self.current_span())
            .with_expected(expected)
            .with_hint(format!("separate elements with whitespace: `{example}`"))
    }
}
