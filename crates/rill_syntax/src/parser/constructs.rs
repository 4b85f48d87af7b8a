/// `let`, `if`, `match` and `try`.
///
/// Each construct extends as far right as possible. Its clauses (`in`, `then` / `elif` / `else`, `|`, `catch`) may
/// stay on the opening line or move to indented continuation lines; once a construct has opened such a block, the
/// remaining clauses each start a line of it.
impl<'a> Parser<'a> {
    /// Whether the current token starts a construct.
    fn at_construct(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(KeywordId::Let | KeywordId::If | KeywordId::Match | KeywordId::Try)
        )
    }

    // ========================================================================
    // let
    // ========================================================================

    /// `let a = 1; b = 2 in body`, or bindings one per line in an indented block.
    ///
    /// `in` may follow the bindings on the same line, close the binding block as its last line, or start the line
    /// after it.
    fn let_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let start = self.advance().span;
        let mut bindings = Vec::new();
        let mut in_block = false;

        if self.open_block_if(|kind| matches!(kind, TokenKind::Ident(_))) {
            in_block = true;
            loop {
                bindings.push(self.binding()?);
                if self.match_punct(PunctuationId::Semicolon) {
                    continue;
                }
                self.match_newline();
                if self.check(&TokenKind::Dedent) {
                    self.advance();
                    in_block = false;
                    break;
                }
                // `in` as the last line of the binding block.
                if self.check_keyword(KeywordId::In) {
                    break;
                }
                if self.previous().is_some_and(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Dedent)) {
                    continue;
                }
                return Err(self.unexpected(
                    "in let bindings",
                    &[Expected::Newline, Expected::Punctuation(PunctuationId::Semicolon)],
                ));
            }
        } else {
            bindings.push(self.binding()?);
            while self.match_punct(PunctuationId::Semicolon) {
                bindings.push(self.binding()?);
            }
        }

        if !self.clause_ahead(&mut in_block, |kind| kind.is_keyword(KeywordId::In)) {
            return Err(self.unexpected(
                "in let expression",
                &[
                    Expected::Keyword(KeywordId::In),
                    Expected::Punctuation(PunctuationId::Semicolon),
                ],
            )
            .with_example(keywords::examples(KeywordId::Let)));
        }
        self.advance();
        let body = self.body()?;
        if in_block {
            self.close_block("after let body")?;
        }

        let span = start.merge(body.span);
        Ok(Spanned::new(
            Expr::Let(LetBinding {
                bindings,
                body: Box::new(body),
            }),
            span,
        ))
    }

    fn binding(&mut self) -> ParseResult<Binding> {
        if !self.at_definition() {
            return Err(self.unexpected("in let binding", &[Expected::Identifier]));
        }
        let (name, value) = self.definition()?;
        Ok(Binding { name, value })
    }

    // ========================================================================
    // if
    // ========================================================================

    /// `if c then a elif d then b else e`; `else` is mandatory.
    fn if_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let start = self.advance().span;
        let mut in_block = false;
        let mut branches = Vec::new();

        let condition = self.expression()?;
        self.expect_then(&mut in_block)?;
        let result = self.body()?;
        branches.push(IfBranch { condition, result });

        while self.clause_ahead(&mut in_block, |kind| kind.is_keyword(KeywordId::Elif)) {
            self.advance();
            let condition = self.expression()?;
            self.expect_then(&mut in_block)?;
            let result = self.body()?;
            branches.push(IfBranch { condition, result });
        }

        if !self.clause_ahead(&mut in_block, |kind| kind.is_keyword(KeywordId::Else)) {
            return Err(self
                .unexpected(
                    "in if expression",
                    &[Expected::Keyword(KeywordId::Elif), Expected::Keyword(KeywordId::Else)],
                )
                .with_note("every `if` needs an `else` branch")
                .with_example(keywords::examples(KeywordId::If)));
        }
        self.advance();
        let otherwise = self.body()?;
        if in_block {
            self.close_block("after if expression")?;
        }

        let span = start.merge(otherwise.span);
        Ok(Spanned::new(
            Expr::If(IfExpr {
                branches,
                otherwise: Box::new(otherwise),
            }),
            span,
        ))
    }

    fn expect_then(&mut self, in_block: &mut bool) -> ParseResult<()> {
        if self.clause_ahead(in_block, |kind| kind.is_keyword(KeywordId::Then)) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected("after if condition", &[Expected::Keyword(KeywordId::Then)]))
        }
    }

    // ========================================================================
    // match
    // ========================================================================

    /// `match x | pattern [when guard] -> result ...`
    fn match_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let start = self.advance().span;
        let scrutinee = self.expression()?;
        let mut in_block = false;
        let mut clauses = Vec::new();

        while self.clause_ahead(&mut in_block, |kind| kind.is_punctuation(PunctuationId::Bar)) {
            clauses.push(self.match_clause()?);
        }
        let Some(last) = clauses.last() else {
            return Err(self
                .unexpected("in match expression", &[Expected::Punctuation(PunctuationId::Bar)])
                .with_example(keywords::examples(KeywordId::Match)));
        };
        let span = start.merge(last.span);
        if in_block {
            self.close_block("after match clauses")?;
        }

        Ok(Spanned::new(
            Expr::Match(MatchExpr {
                scrutinee: Box::new(scrutinee),
                clauses,
            }),
            span,
        ))
    }

    fn match_clause(&mut self) -> ParseResult<Spanned<MatchClause>> {
        let bar = self.advance().span;
        let pattern = self.pattern()?;
        let guard = if self.match_keyword(KeywordId::When) {
            Some(self.expression()?)
        } else {
            None
        };
        if !self.check_punct(PunctuationId::Arrow) {
            let expected: &[Expected] = if guard.is_some() {
                &[Expected::Punctuation(PunctuationId::Arrow)]
            } else {
                &[
                    Expected::Keyword(KeywordId::When),
                    Expected::Punctuation(PunctuationId::Arrow),
                ]
            };
            return Err(self.unexpected("in match clause", expected));
        }
        self.advance();
        let result = self.body()?;

        let span = bar.merge(result.span);
        Ok(Spanned::new(
            MatchClause {
                pattern,
                guard,
                result,
            },
            span,
        ))
    }

    // ========================================================================
    // try
    // ========================================================================

    /// `try body catch [Tag] [binding] -> handler ...`
    fn try_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let start = self.advance().span;
        let body = self.body()?;
        let mut in_block = false;
        let mut catches = Vec::new();

        while self.clause_ahead(&mut in_block, |kind| kind.is_keyword(KeywordId::Catch)) {
            catches.push(self.catch_clause()?);
        }
        let Some(last) = catches.last() else {
            return Err(self
                .unexpected("in try expression", &[Expected::Keyword(KeywordId::Catch)])
                .with_example(keywords::examples(KeywordId::Try)));
        };
        let span = start.merge(last.span);
        if in_block {
            self.close_block("after catch clauses")?;
        }

        Ok(Spanned::new(
            Expr::TryCatch(TryCatch {
                body: Box::new(body),
                catches,
            }),
            span,
        ))
    }

    /// A capitalized name is an error tag, a lowercase one the binding.
    fn catch_clause(&mut self) -> ParseResult<Spanned<CatchClause>> {
        let keyword = self.advance().span;

        let error_tag = if self.at_capitalized_ident() {
            Some(self.identifier("in catch clause")?)
        } else {
            None
        };
        let binding = if self.check_ident() && !self.at_capitalized_ident() {
            Some(self.identifier("in catch clause")?)
        } else {
            None
        };

        if error_tag.is_none() && binding.is_none() {
            return Err(CompileError::syntax(
                "catch clause needs an error tag, a binding, or both",
                self.current_span(),
            )
            .with_expected(&[Expected::Identifier])
            .with_hint("write `catch error -> ...` to bind the error"));
        }
        if !self.check_punct(PunctuationId::Arrow) {
            let expected: &[Expected] = if binding.is_some() {
                &[Expected::Punctuation(PunctuationId::Arrow)]
            } else {
                &[Expected::Identifier, Expected::Punctuation(PunctuationId::Arrow)]
            };
            return Err(self.unexpected("in catch clause", expected));
        }
        self.advance();
        let handler = self.body()?;

        let span = keyword.merge(handler.span);
        Ok(Spanned::new(
            CatchClause {
                error_tag,
                binding,
                handler,
            },
            span,
        ))
    }
}
