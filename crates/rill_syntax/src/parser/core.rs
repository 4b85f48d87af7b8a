/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the program loop, and the nesting guard shared by every recursive rule.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a single module while avoiding a
///   single “god file”.
type ParseResult<T> = Result<T, CompileError>;

/// Stand-in for an empty token stream.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span {
        start: 0,
        end: 0,
        line: 1,
        column: 1,
    },
};

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass. In [`ParseMode::Strict`] it stops at the first error; in
///   [`ParseMode::BestEffort`] it synchronizes at the next statement boundary and keeps going.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `rill_syntax::lexer`.
    /// - `options`: Recovery mode and nesting limit.
    pub fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            options,
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// Returns the tree together with every diagnostic raised. In strict mode the tree holds the statements parsed
    /// before the first error; in best-effort mode failed statements become [`Statement::Error`].
    pub fn parse(mut self) -> (Program, Vec<CompileError>) {
        let program = self.program();
        (program, self.errors)
    }

    fn program(&mut self) -> Program {
        let mut statements = Vec::new();

        self.skip_newlines();
        // Stray top-level DEDENT can only appear after recovery; ignore it at this level.
        self.skip_dedents();

        while !self.is_at_end() {
            let start = self.pos;
            match self.statement_line() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.depth = 0;
                    if self.options.mode == ParseMode::Strict {
                        self.errors.push(err);
                        break;
                    }
                    tracing::debug!(
                        line = err.span.line,
                        column = err.span.column,
                        message = %err.message,
                        "resynchronizing after syntax error"
                    );
                    self.errors.push(err);
                    self.synchronize();
                    let span = self.span_since(start);
                    statements.push(Spanned::new(Statement::Error, span));
                }
            }
            self.skip_newlines();
            self.skip_dedents();
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::default(),
        };
        Program { statements, span }
    }

    /// Run `rule` one nesting level deeper, failing once the configured limit is reached.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let depth = self.depth;
        self.deepen()?;
        let result = rule(self);
        self.depth = depth;
        result
    }

    /// Run `rule` and restore the nesting level it started at, however many levels it charged through [`deepen`].
    ///
    /// [`deepen`]: Parser::deepen
    fn restoring_depth<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let depth = self.depth;
        let result = rule(self);
        self.depth = depth;
        result
    }

    /// Charge one level of tree depth.
    ///
    /// Loops that wrap the node built so far (an operator fold, a field access, a resolved pipeline stage) call this
    /// once per wrap, so long flat chains count against the limit just like brackets do.
    fn deepen(&mut self) -> ParseResult<()> {
        if self.depth >= self.options.max_depth {
            return Err(CompileError::limit(
                format!("expression nesting exceeds the limit of {} levels", self.options.max_depth),
                self.peek().span,
            )
            .with_hint("split the expression into named definitions"));
        }
        self.depth += 1;
        Ok(())
    }
}
