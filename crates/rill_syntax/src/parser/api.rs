/// Grammar entry points accepted by [`parse_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Program,
    Expression,
    Match,
    TryCatch,
    Pattern,
}

/// The tree produced by [`parse_rule`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Program(Program),
    Expression(Spanned<Expr>),
    Pattern(Spanned<Pattern>),
}

impl<'a> Parser<'a> {
    /// Parse the whole stream as a single instance of `rule`.
    fn fragment(&mut self, rule: Rule) -> ParseResult<Fragment> {
        self.skip_newlines();
        let fragment = match rule {
            Rule::Program => {
                let program = self.program();
                return match self.errors.pop() {
                    Some(err) => Err(err),
                    None => Ok(Fragment::Program(program)),
                };
            }
            Rule::Expression => Fragment::Expression(self.expression()?),
            Rule::Match if self.check_keyword(KeywordId::Match) => Fragment::Expression(self.match_expr()?),
            Rule::TryCatch if self.check_keyword(KeywordId::Try) => Fragment::Expression(self.try_expr()?),
            Rule::Match => return Err(self.unexpected("at start of input", &[Expected::Keyword(KeywordId::Match)])),
            Rule::TryCatch => return Err(self.unexpected("at start of input", &[Expected::Keyword(KeywordId::Try)])),
            Rule::Pattern => Fragment::Pattern(self.pattern()?),
        };
        self.skip_newlines();
        if !self.is_at_end() {
            return Err(self.unexpected("after fragment", &[Expected::EndOfInput]));
        }
        Ok(fragment)
    }
}

/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing. It stops at the first syntax error.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `rill_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, Vec<CompileError>> {
    parse_with_options(tokens, &ParseOptions::default())
}

/// Parse with explicit [`ParseOptions`].
///
/// ## Errors
/// Returns every diagnostic raised: one in strict mode, all of them in best-effort mode. Use [`parse_best_effort`]
/// to also get the partial tree.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), mode = ?options.mode))]
pub fn parse_with_options(tokens: &[Token], options: &ParseOptions) -> Result<Program, Vec<CompileError>> {
    let (program, errors) = Parser::new(tokens, options.clone()).parse();
    if !errors.is_empty() {
        return Err(errors);
    }
    TreeBuilder::new(options.clone()).finish(program)
}

/// Parse as much as possible, returning the partial tree and every diagnostic.
///
/// Statements that failed to parse are kept as [`Statement::Error`]; a failed string interpolation becomes
/// [`Expr::Error`].
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_best_effort(tokens: &[Token], options: &ParseOptions) -> (Program, Vec<CompileError>) {
    let options = options.clone().mode(ParseMode::BestEffort);
    let (program, mut errors) = Parser::new(tokens, options.clone()).parse();
    let builder = TreeBuilder::new(options);
    errors.extend(builder.check(&program));
    (builder.desugar(program), errors)
}

/// Parse a token stream as one instance of `rule`.
///
/// ## Errors
/// Returns the first syntax error, or the tree-building errors of the fragment.
#[tracing::instrument(skip_all, fields(token_count = tokens.len(), rule = ?rule))]
pub fn parse_rule(tokens: &[Token], rule: Rule) -> Result<Fragment, Vec<CompileError>> {
    let options = ParseOptions::default();
    let mut parser = Parser::new(tokens, options.clone());
    let fragment = parser.fragment(rule).map_err(|err| vec![err])?;
    if !parser.errors.is_empty() {
        return Err(parser.errors);
    }

    let builder = TreeBuilder::new(options);
    match fragment {
        Fragment::Program(program) => builder.finish(program).map(Fragment::Program),
        Fragment::Expression(expr) => builder.finish_expr(expr).map(Fragment::Expression),
        Fragment::Pattern(pattern) => Ok(Fragment::Pattern(pattern)),
    }
}
