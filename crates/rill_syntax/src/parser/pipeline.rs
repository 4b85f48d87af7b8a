/// Pipeline parsing.
///
/// Stages follow the seed either on the same line after `|>`, or one per line in an indented block:
///
/// ```text
/// users
///   filter _.age > 18
///   map _.name
/// ```
///
/// Every parsed stage carries exactly one bare `_`: the one written in its arguments, or an implicit one inserted as
/// the first argument.
impl<'a> Parser<'a> {
    /// Attach any stages that follow `seed`.
    fn pipeline_tail(&mut self, seed: Spanned<Expr>) -> ParseResult<Spanned<Expr>> {
        self.restoring_depth(|p| p.stages_after(seed))
    }

    fn stages_after(&mut self, seed: Spanned<Expr>) -> ParseResult<Spanned<Expr>> {
        let mut stages = Vec::new();
        self.inline_stages(&mut stages)?;

        if self.open_block_if(|kind| matches!(kind, TokenKind::Ident(_))) {
            loop {
                self.push_stage(&mut stages)?;
                self.inline_stages(&mut stages)?;

                if self.match_newline() {
                    match self.peek().kind {
                        TokenKind::Dedent => {
                            self.advance();
                            break;
                        }
                        TokenKind::Indent => {
                            return Err(CompileError::syntax(
                                "pipeline stages must share one indentation",
                                self.current_span(),
                            )
                            .with_note("a stage line cannot be indented deeper than the stage before it"));
                        }
                        _ => continue,
                    }
                }
                if self.check(&TokenKind::Dedent) {
                    self.advance();
                    break;
                }
                return Err(self.unexpected(
                    "after pipeline stage",
                    &[Expected::Newline, Expected::Punctuation(PunctuationId::PipeArrow)],
                ));
            }
        }

        match stages.last() {
            None => Ok(seed),
            Some(last) => {
                let span = seed.span.merge(last.span);
                Ok(Spanned::new(
                    Expr::Pipeline(Pipeline {
                        seed: Box::new(seed),
                        stages,
                    }),
                    span,
                ))
            }
        }
    }

    fn inline_stages(&mut self, stages: &mut Vec<Spanned<Application>>) -> ParseResult<()> {
        while self.match_punct(PunctuationId::PipeArrow) {
            self.push_stage(stages)?;
        }
        Ok(())
    }

    /// Parse one stage onto `stages`.
    ///
    /// A resolved pipeline wraps the running value once per stage, so resolution charges each stage a nesting level.
    fn push_stage(&mut self, stages: &mut Vec<Spanned<Application>>) -> ParseResult<()> {
        if self.options.resolve_pipelines {
            self.deepen()?;
        }
        stages.push(self.stage()?);
        Ok(())
    }

    /// `head args...` with at most one bare `_`.
    fn stage(&mut self) -> ParseResult<Spanned<Application>> {
        if !self.check_ident() {
            return Err(self
                .unexpected("at the start of a pipeline stage", &[Expected::Identifier])
                .with_note("each stage starts with the name of the function it applies")
                .with_example(punctuation::examples(PunctuationId::PipeArrow)));
        }
        let head = self.postfix()?;
        let mut args = self.stage_arguments()?;

        let placeholders: Vec<Span> = args
            .iter()
            .filter(|arg| arg.node.is_placeholder())
            .map(|arg| arg.span)
            .collect();
        if let [first, second, ..] = placeholders.as_slice() {
            return Err(
                CompileError::syntax("a pipeline stage takes at most one `_` placeholder", *second)
                    .with_label(*first, "first placeholder here")
                    .with_example(punctuation::examples(PunctuationId::Underscore)),
            );
        }
        if placeholders.is_empty() {
            args.insert(0, Spanned::new(Expr::placeholder(), head.span));
        }

        let span = args.iter().fold(head.span, |span, arg| span.merge(arg.span));
        Ok(Spanned::new(
            Application {
                callee: Box::new(head),
                args,
            },
            span,
        ))
    }

    /// Juxtaposed arguments where an infix operator binds to the argument just before it.
    ///
    /// `filter _.age > 18` yields the single argument `_.age > 18`. List elements use the same grammar.
    fn stage_arguments(&mut self) -> ParseResult<Vec<Spanned<Expr>>> {
        let mut args = Vec::new();
        loop {
            if self.at_argument_start() {
                args.push(self.postfix()?);
                continue;
            }
            if self.peek().kind.infix_operator().is_some() {
                if let Some(last) = args.pop() {
                    args.push(self.infix_chain(last, 0)?);
                    continue;
                }
            }
            return Ok(args);
        }
    }
}
