/// Identifier and literal helpers shared by the parser chunks.
impl<'a> Parser<'a> {
    /// Consume an identifier, or fail with `unexpected ... {context}`.
    fn identifier(&mut self, context: &str) -> ParseResult<Spanned<Ident>> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Spanned::new(name.clone(), token.span))
            }
            _ => Err(self.unexpected(context, &[Expected::Identifier])),
        }
    }

    /// An identifier starting with an uppercase letter (an error tag in `catch`).
    fn at_capitalized_ident(&self) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(name) if name.starts_with(|c: char| c.is_uppercase()))
    }

    /// `-` immediately followed by a number, with no whitespace in between.
    fn negative_literal_ahead(&self) -> bool {
        let minus = self.peek();
        let number = self.peek_at(1);
        minus.kind.is_operator(OperatorId::Minus)
            && matches!(number.kind, TokenKind::Number(_))
            && minus.span.end == number.span.start
    }

    /// Consume `-` and the number after it. Call only when [`Self::negative_literal_ahead`] holds.
    fn negative_number(&mut self) -> (f64, Span) {
        let minus = self.advance().span;
        let number = self.advance();
        let value = match number.kind {
            TokenKind::Number(value) => -value,
            _ => 0.0,
        };
        (value, minus.merge(number.span))
    }
}
