/// Statement parsing.
///
/// A statement is either a definition (`name = value`, `name p1 p2 = body`) or a bare expression. A line that starts
/// with one or more identifiers followed by `=` is always a definition; anything else is an expression statement.
impl<'a> Parser<'a> {
    /// One statement plus its terminator.
    fn statement_line(&mut self) -> ParseResult<Spanned<Statement>> {
        let statement = self.statement()?;
        self.end_of_statement()?;
        Ok(statement)
    }

    fn statement(&mut self) -> ParseResult<Spanned<Statement>> {
        if self.at_definition() {
            let (name, value) = self.definition()?;
            let span = name.span.merge(value.span);
            return Ok(Spanned::new(Statement::Assignment(Assignment { name, value }), span));
        }
        let expr = self.expression()?;
        let span = expr.span;
        Ok(Spanned::new(Statement::Expr(expr), span))
    }

    /// `Ident+ =` ahead.
    fn at_definition(&self) -> bool {
        let mut offset = 0;
        while matches!(self.peek_at(offset).kind, TokenKind::Ident(_)) {
            offset += 1;
        }
        offset > 0 && self.peek_at(offset).kind.is_operator(OperatorId::Eq)
    }

    /// `name [params] = value`, shared by top-level definitions and `let` bindings.
    ///
    /// With parameters the value becomes a [`FunctionDef`] spanning the parameters and the body.
    fn definition(&mut self) -> ParseResult<(Spanned<Ident>, Spanned<Expr>)> {
        let name = self.identifier("at the start of a definition")?;
        let mut params = Vec::new();
        while self.check_ident() {
            params.push(self.identifier("in parameter list")?);
        }
        self.expect_op(OperatorId::Eq, "in definition")?;
        let body = self.body()?;

        let value = match params.first() {
            Some(first) => {
                let span = first.span.merge(body.span);
                Spanned::new(
                    Expr::Function(FunctionDef {
                        params,
                        body: Box::new(body),
                    }),
                    span,
                )
            }
            None => body,
        };
        Ok((name, value))
    }

    /// A statement ends at a NEWLINE, at end of input, or right after an indented block closed.
    fn end_of_statement(&mut self) -> ParseResult<()> {
        if self.match_newline() || self.is_at_end() || self.previous_is_dedent() {
            Ok(())
        } else {
            Err(self.unexpected("after statement", &[Expected::Newline, Expected::EndOfInput]))
        }
    }
}
