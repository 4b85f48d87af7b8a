/// Match patterns.
///
/// ```text
/// {status: "vip" age: a tag: _ name}   record: literal, rebinding, presence-only, shorthand
/// 42  -1  "text"  true  nil             literals
/// name                                  binding
/// _  otherwise                          catch-all
/// ```
impl<'a> Parser<'a> {
    fn pattern(&mut self) -> ParseResult<Spanned<Pattern>> {
        self.nested(|p| p.pattern_inner())
    }

    fn pattern_inner(&mut self) -> ParseResult<Spanned<Pattern>> {
        let token = self.peek();
        let span = token.span;
        match &token.kind {
            TokenKind::Punctuation(PunctuationId::LBrace) => self.record_pattern(),
            TokenKind::Punctuation(PunctuationId::Underscore) => {
                self.advance();
                Ok(Spanned::new(Pattern::Wildcard, span))
            }
            TokenKind::Keyword(KeywordId::Otherwise) => {
                self.advance();
                Ok(Spanned::new(Pattern::Otherwise, span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Spanned::new(Pattern::Binding(name.clone()), span))
            }
            _ => match self.literal_pattern()? {
                Some(literal) => Ok(Spanned::new(Pattern::Literal(literal.node), literal.span)),
                None => Err(self.unexpected("in pattern", &[Expected::Pattern])),
            },
        }
    }

    /// A literal in pattern position, or `None` if the current token does not start one.
    fn literal_pattern(&mut self) -> ParseResult<Option<Spanned<LiteralPattern>>> {
        let token = self.peek();
        let span = token.span;
        let literal = match &token.kind {
            TokenKind::Number(value) => LiteralPattern::Number(*value),
            TokenKind::Operator(OperatorId::Minus) if self.negative_literal_ahead() => {
                let (value, span) = self.negative_number();
                return Ok(Some(Spanned::new(LiteralPattern::Number(value), span)));
            }
            TokenKind::Str(parts) => {
                let mut text = String::new();
                for part in parts {
                    match part {
                        StringPart::Literal(literal) => text.push_str(literal),
                        StringPart::Interpolation { span, .. } => {
                            return Err(CompileError::syntax("string patterns cannot contain interpolation", *span)
                                .with_hint("bind the value and compare it in a `when` guard"));
                        }
                    }
                }
                LiteralPattern::Str(text)
            }
            TokenKind::Keyword(KeywordId::True) => LiteralPattern::Bool(true),
            TokenKind::Keyword(KeywordId::False) => LiteralPattern::Bool(false),
            TokenKind::Keyword(KeywordId::Nil) => LiteralPattern::Nil,
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(Spanned::new(literal, span)))
    }

    /// `{key key: binding ...}`; a key may appear once.
    fn record_pattern(&mut self) -> ParseResult<Spanned<Pattern>> {
        let open = self.advance().span;
        let mut fields: Vec<RecordPatternField> = Vec::new();
        let mut seen: HashMap<&'a str, Span> = HashMap::new();

        let expected = [Expected::Identifier, Expected::Punctuation(PunctuationId::RBrace)];
        while !self.check_punct(PunctuationId::RBrace) {
            if let Some(err) = self.unterminated("record pattern", open, &expected) {
                return Err(err);
            }
            if self.check_punct(PunctuationId::Comma) {
                return Err(self.comma_error("record pattern", "{name age: a}", &expected));
            }
            let TokenKind::Ident(spelling) = &self.peek().kind else {
                return Err(self.unexpected("in record pattern", &expected));
            };
            let key = self.identifier("in record pattern")?;
            if let Some(first) = seen.insert(spelling.as_str(), key.span) {
                return Err(
                    CompileError::syntax(format!("duplicate key `{}` in record pattern", key.node), key.span)
                        .with_expected(&expected)
                        .with_label(first, "first used here")
                        .with_note("each key may appear once in a record pattern"),
                );
            }

            let binding = if self.match_punct(PunctuationId::Colon) {
                self.field_binding()?
            } else {
                FieldBinding::Bind(key.node.clone())
            };
            fields.push(RecordPatternField { key, binding });
        }

        let close = self.advance().span;
        Ok(Spanned::new(Pattern::Record(fields), open.merge(close)))
    }

    /// What follows `key:` in a record pattern.
    fn field_binding(&mut self) -> ParseResult<FieldBinding> {
        if self.match_punct(PunctuationId::Underscore) {
            return Ok(FieldBinding::Ignore);
        }
        if let TokenKind::Ident(name) = &self.peek().kind {
            self.advance();
            return Ok(FieldBinding::Bind(name.clone()));
        }
        match self.literal_pattern()? {
            Some(literal) => Ok(FieldBinding::Literal(literal.node)),
            None => Err(self.unexpected(
                "in record pattern",
                &[
                    Expected::Identifier,
                    Expected::Punctuation(PunctuationId::Underscore),
                    Expected::Pattern,
                ],
            )),
        }
    }
}
