//! Core formatting logic for Rill source code
//!
//! Walks the AST and emits canonical source text. Parsing the output must give back the same tree, so at every
//! position the formatter knows how far the parser would extend an expression written there bare, and wraps in
//! parentheses whatever would reach too far:
//!
//! - `let` / `if` / `match` / `try` run to the end of the enclosing expression; anywhere else they are wrapped.
//! - Pipelines run up to the next clause keyword or closer; as arguments or operands they are wrapped.
//! - Juxtaposed arguments are primaries; applications, binary expressions and negative numbers are wrapped.
//! - Stage arguments and list elements follow the stage grammar, where an infix operator takes the argument to its
//!   left. A trailing binary expression therefore stays bare when its left operand is a primary.

use rill_core::lang::keywords::{self, KeywordId};
use rill_core::lang::operators::{self, OperatorId};

use super::config::{FormatConfig, PipelineLayout};
use super::writer::FormatWriter;
use crate::frontend::ast::*;
use crate::frontend::lexer;

/// What may follow an expression at the place it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Nothing of an enclosing construct: statement values, bodies, last branches, bracketed contents.
    Tail,
    /// More of an enclosing construct: `then`, `|`, `->`, `catch`, `;`, `in`, the next record key.
    Clause,
    /// Left of `|>`.
    Seed,
    /// Operand of a binary operator.
    Operand,
    /// Juxtaposed argument or field-access target.
    Argument,
}

/// Formatter that transforms AST back to formatted source code
pub struct Formatter {
    writer: FormatWriter,
}

impl Formatter {
    /// Create a new formatter with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
        }
    }

    /// Format a program and return the formatted source
    pub fn format(mut self, program: &Program) -> String {
        self.format_program(program);
        self.writer.finish()
    }

    /// Format one expression on a single line, as it would appear inside parentheses.
    pub fn format_expression(mut self, expr: &Spanned<Expr>) -> String {
        self.expr(expr, Position::Tail);
        self.writer.finish()
    }

    // ========================================================================
    // Program
    // ========================================================================

    fn format_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.format_statement(&stmt.node);
            self.writer.newline();
        }
    }

    fn format_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Assignment(assign) => {
                self.writer.write(&assign.name.node);
                self.definition(&assign.value, Position::Tail);
            }
            Statement::Expr(expr) if starts_like_definition(&expr.node) => self.parenthesized(expr),
            Statement::Expr(expr) => self.statement_value(expr),
            Statement::Error => self.writer.write("<error>"),
        }
    }

    /// ` = value`, or ` p1 p2 = body` when the value is a function.
    fn definition(&mut self, value: &Spanned<Expr>, position: Position) {
        let value = match &value.node {
            Expr::Function(func) => {
                for param in &func.params {
                    self.writer.write(" ");
                    self.writer.write(&param.node);
                }
                func.body.as_ref()
            }
            _ => value,
        };
        self.writer.write(" = ");
        if position == Position::Tail {
            self.statement_value(value);
        } else {
            self.expr(value, position);
        }
    }

    /// The whole value of a statement: the only place a pipeline may spread over several lines.
    fn statement_value(&mut self, expr: &Spanned<Expr>) {
        let Expr::Pipeline(pipeline) = &expr.node else {
            self.expr(expr, Position::Tail);
            return;
        };
        match self.writer.config().pipeline_layout {
            PipelineLayout::Indented => self.pipeline_indented(pipeline),
            PipelineLayout::Inline => self.pipeline_inline(pipeline),
            PipelineLayout::Fit => {
                let inline = self.render(|f| f.pipeline_inline(pipeline));
                if self.writer.would_exceed_line_length(inline.chars().count()) {
                    self.pipeline_indented(pipeline);
                } else {
                    self.writer.write(&inline);
                }
            }
        }
    }

    /// Run `emit` against a scratch formatter with the same config.
    fn render(&self, emit: impl FnOnce(&mut Formatter)) -> String {
        let mut scratch = Formatter::new(self.writer.config().clone());
        emit(&mut scratch);
        scratch.writer.finish()
    }

    // ========================================================================
    // Pipelines
    // ========================================================================

    fn pipeline_inline(&mut self, pipeline: &Pipeline) {
        self.expr(&pipeline.seed, Position::Seed);
        for stage in &pipeline.stages {
            self.writer.write(" |> ");
            self.stage(&stage.node);
        }
    }

    fn pipeline_indented(&mut self, pipeline: &Pipeline) {
        self.expr(&pipeline.seed, Position::Seed);
        self.writer.indent();
        for stage in &pipeline.stages {
            self.writer.newline();
            self.stage(&stage.node);
        }
        self.writer.dedent();
    }

    /// A placeholder in first position is implied, so it is left out.
    fn stage(&mut self, stage: &Application) {
        self.expr(&stage.callee, Position::Argument);
        let args: Vec<&Spanned<Expr>> = stage
            .args
            .iter()
            .enumerate()
            .filter(|(i, arg)| !(*i == 0 && arg.node.is_placeholder()))
            .map(|(_, arg)| arg)
            .collect();
        if !args.is_empty() {
            self.writer.write(" ");
            self.items(&args);
        }
    }

    /// Stage arguments and list elements.
    fn items(&mut self, items: &[&Spanned<Expr>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.write(" ");
            }
            let last = i + 1 == items.len();
            match binary_parts(&item.node) {
                Some((op, left, right)) if last && is_primary(&left.node) => self.binary(op, left, right),
                _ => self.expr(item, Position::Argument),
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, expr: &Spanned<Expr>, position: Position) {
        if needs_parens(&expr.node, position) {
            self.parenthesized(expr);
        } else {
            self.bare(expr);
        }
    }

    fn parenthesized(&mut self, expr: &Spanned<Expr>) {
        self.writer.write("(");
        self.bare(expr);
        self.writer.write(")");
    }

    /// Write `expr` without outer parentheses. Constructs only get here in tail position.
    fn bare(&mut self, expr: &Spanned<Expr>) {
        match &expr.node {
            Expr::Identifier(name) => self.writer.write(name),
            Expr::Wildcard(access) => {
                self.writer.write("_");
                for field in &access.path {
                    self.writer.write(".");
                    self.writer.write(field);
                }
            }
            Expr::Number(value) => self.writer.write(&value.to_string()),
            Expr::Str(segments) => self.string(segments),
            Expr::Bool(true) => self.keyword(KeywordId::True),
            Expr::Bool(false) => self.keyword(KeywordId::False),
            Expr::Nil => self.keyword(KeywordId::Nil),
            Expr::Record(fields) => self.record(fields),
            Expr::List(items) => {
                self.writer.write("[");
                let items: Vec<&Spanned<Expr>> = items.iter().collect();
                self.items(&items);
                self.writer.write("]");
            }
            Expr::Function(func) => {
                self.writer.write("[");
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        self.writer.write(" ");
                    }
                    self.writer.write(&param.node);
                }
                self.writer.write(" -> ");
                self.expr(&func.body, Position::Tail);
                self.writer.write("]");
            }
            Expr::Application(app) => match binary_parts(&expr.node) {
                Some((op, left, right)) => self.binary(op, left, right),
                None => self.application(app),
            },
            Expr::FieldAccess(access) => {
                // `(_).x` must not collapse into the accessor `_.x`.
                if matches!(access.target.node, Expr::Wildcard(_)) {
                    self.parenthesized(&access.target);
                } else {
                    self.expr(&access.target, Position::Argument);
                }
                self.writer.write(".");
                self.writer.write(&access.field.node);
            }
            Expr::Pipeline(pipeline) => self.pipeline_inline(pipeline),
            Expr::Let(binding) => self.let_expr(binding),
            Expr::If(if_expr) => self.if_expr(if_expr),
            Expr::Match(m) => self.match_expr(m),
            Expr::TryCatch(t) => self.try_expr(t),
            Expr::Error => self.writer.write("<error>"),
        }
    }

    fn application(&mut self, app: &Application) {
        self.expr(&app.callee, Position::Argument);
        for arg in &app.args {
            self.writer.write(" ");
            self.expr(arg, Position::Argument);
        }
    }

    fn binary(&mut self, op: OperatorId, left: &Spanned<Expr>, right: &Spanned<Expr>) {
        let prec = operators::precedence(op);
        self.operand(left, prec, false);
        self.writer.write(" ");
        self.writer.write(operators::as_str(op));
        self.writer.write(" ");
        self.operand(right, prec, true);
    }

    /// Operators are left-associative: an equal-precedence operand needs parentheses only on the right.
    fn operand(&mut self, operand: &Spanned<Expr>, parent_prec: u8, right_side: bool) {
        match binary_parts(&operand.node) {
            Some((op, left, right)) => {
                let prec = operators::precedence(op);
                if prec < parent_prec || (right_side && prec == parent_prec) {
                    self.parenthesized(operand);
                } else {
                    self.binary(op, left, right);
                }
            }
            None => self.expr(operand, Position::Operand),
        }
    }

    fn string(&mut self, segments: &[StringSegment]) {
        self.writer.write("\"");
        for segment in segments {
            match segment {
                StringSegment::Literal(text) => self.writer.write(&lexer::escape(text)),
                StringSegment::Interpolation(expr) => {
                    self.writer.write("{");
                    self.expr(expr, Position::Tail);
                    self.writer.write("}");
                }
            }
        }
        self.writer.write("\"");
    }

    fn record(&mut self, fields: &[RecordField]) {
        self.writer.write("{");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write(" ");
            }
            self.writer.write(&field.key.node);
            self.writer.write(": ");
            self.expr(&field.value, Position::Clause);
        }
        self.writer.write("}");
    }

    // ========================================================================
    // Constructs
    // ========================================================================

    fn let_expr(&mut self, binding: &LetBinding) {
        self.keyword(KeywordId::Let);
        self.writer.write(" ");
        for (i, b) in binding.bindings.iter().enumerate() {
            if i > 0 {
                self.writer.write("; ");
            }
            self.writer.write(&b.name.node);
            self.definition(&b.value, Position::Clause);
        }
        self.writer.write(" ");
        self.keyword(KeywordId::In);
        self.writer.write(" ");
        self.expr(&binding.body, Position::Tail);
    }

    fn if_expr(&mut self, if_expr: &IfExpr) {
        for (i, branch) in if_expr.branches.iter().enumerate() {
            if i > 0 {
                self.writer.write(" ");
                self.keyword(KeywordId::Elif);
            } else {
                self.keyword(KeywordId::If);
            }
            self.writer.write(" ");
            self.expr(&branch.condition, Position::Clause);
            self.writer.write(" ");
            self.keyword(KeywordId::Then);
            self.writer.write(" ");
            self.expr(&branch.result, Position::Clause);
        }
        self.writer.write(" ");
        self.keyword(KeywordId::Else);
        self.writer.write(" ");
        self.expr(&if_expr.otherwise, Position::Tail);
    }

    fn match_expr(&mut self, m: &MatchExpr) {
        self.keyword(KeywordId::Match);
        self.writer.write(" ");
        self.expr(&m.scrutinee, Position::Clause);
        let last = m.clauses.len().saturating_sub(1);
        for (i, clause) in m.clauses.iter().enumerate() {
            let clause = &clause.node;
            self.writer.write(" | ");
            self.pattern(&clause.pattern.node);
            if let Some(guard) = &clause.guard {
                self.writer.write(" ");
                self.keyword(KeywordId::When);
                self.writer.write(" ");
                self.expr(guard, Position::Clause);
            }
            self.writer.write(" -> ");
            self.expr(&clause.result, if i == last { Position::Tail } else { Position::Clause });
        }
    }

    fn try_expr(&mut self, t: &TryCatch) {
        self.keyword(KeywordId::Try);
        self.writer.write(" ");
        self.expr(&t.body, Position::Clause);
        let last = t.catches.len().saturating_sub(1);
        for (i, catch) in t.catches.iter().enumerate() {
            let catch = &catch.node;
            self.writer.write(" ");
            self.keyword(KeywordId::Catch);
            for name in [&catch.error_tag, &catch.binding].into_iter().flatten() {
                self.writer.write(" ");
                self.writer.write(&name.node);
            }
            self.writer.write(" -> ");
            self.expr(&catch.handler, if i == last { Position::Tail } else { Position::Clause });
        }
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Wildcard => self.writer.write("_"),
            Pattern::Otherwise => self.keyword(KeywordId::Otherwise),
            Pattern::Binding(name) => self.writer.write(name),
            Pattern::Literal(lit) => self.literal_pattern(lit),
            Pattern::Record(fields) => {
                self.writer.write("{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.writer.write(" ");
                    }
                    self.writer.write(&field.key.node);
                    match &field.binding {
                        FieldBinding::Bind(name) if *name == field.key.node => {}
                        FieldBinding::Bind(name) => {
                            self.writer.write(": ");
                            self.writer.write(name);
                        }
                        FieldBinding::Literal(lit) => {
                            self.writer.write(": ");
                            self.literal_pattern(lit);
                        }
                        FieldBinding::Ignore => self.writer.write(": _"),
                    }
                }
                self.writer.write("}");
            }
        }
    }

    fn literal_pattern(&mut self, lit: &LiteralPattern) {
        match lit {
            LiteralPattern::Number(value) => self.writer.write(&value.to_string()),
            LiteralPattern::Str(text) => {
                self.writer.write("\"");
                self.writer.write(&lexer::escape(text));
                self.writer.write("\"");
            }
            LiteralPattern::Bool(true) => self.keyword(KeywordId::True),
            LiteralPattern::Bool(false) => self.keyword(KeywordId::False),
            LiteralPattern::Nil => self.keyword(KeywordId::Nil),
        }
    }

    fn keyword(&mut self, id: KeywordId) {
        self.writer.write(keywords::as_str(id));
    }
}

// ============================================================================
// Position rules
// ============================================================================

fn needs_parens(expr: &Expr, position: Position) -> bool {
    match expr {
        _ if expr.is_construct() => position != Position::Tail,
        Expr::Pipeline(_) => !matches!(position, Position::Tail | Position::Clause),
        Expr::Application(_) if binary_parts(expr).is_some() => {
            matches!(position, Position::Operand | Position::Argument)
        }
        Expr::Application(_) => position == Position::Argument,
        Expr::Number(value) => value.is_sign_negative() && matches!(position, Position::Operand | Position::Argument),
        _ => false,
    }
}

/// Whether `expr` is written without parentheses in argument position.
fn is_primary(expr: &Expr) -> bool {
    !needs_parens(expr, Position::Argument)
}

fn binary_parts(expr: &Expr) -> Option<(OperatorId, &Spanned<Expr>, &Spanned<Expr>)> {
    let Expr::Application(app) = expr else {
        return None;
    };
    match (app.operator(), app.args.as_slice()) {
        (Some(op), [left, right]) => Some((op, left, right)),
        _ => None,
    }
}

/// Whether `expr`, written bare at the start of a statement, would open with `name ... =` and read back as a
/// definition.
fn starts_like_definition(expr: &Expr) -> bool {
    if let Expr::Pipeline(pipeline) = expr {
        return starts_like_definition(&pipeline.seed.node);
    }
    let Some((op, left, _)) = binary_parts(expr) else {
        return false;
    };
    if op == OperatorId::Eq && is_name_run(&left.node) {
        return true;
    }
    match binary_parts(&left.node) {
        Some((inner, _, _)) if operators::precedence(inner) >= operators::precedence(op) => {
            starts_like_definition(&left.node)
        }
        _ => false,
    }
}

/// `name` or `name name ...`: what the parser takes for the head of a definition.
fn is_name_run(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(_) => true,
        Expr::Application(app) if app.operator().is_none() => {
            matches!(app.callee.node, Expr::Identifier(_))
                && app.args.iter().all(|arg| matches!(arg.node, Expr::Identifier(_)))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{lexer, parser, sexp};

    fn parse(source: &str) -> Program {
        let tokens = lexer::lex(source).expect("lex");
        parser::parse(&tokens).expect("parse")
    }

    fn fmt(source: &str) -> String {
        Formatter::new(FormatConfig::default()).format(&parse(source))
    }

    fn assert_round_trip(source: &str) {
        let formatted = fmt(source);
        assert_eq!(
            sexp::program(&parse(&formatted)),
            sexp::program(&parse(source)),
            "formatted as:\n{formatted}"
        );
    }

    fn span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    fn ident(name: &str) -> Spanned<Expr> {
        Spanned::new(Expr::Identifier(name.to_string()), span())
    }

    fn binary(op: &str, left: Spanned<Expr>, right: Spanned<Expr>) -> Spanned<Expr> {
        Spanned::new(
            Expr::Application(Application {
                callee: Box::new(ident(op)),
                args: vec![left, right],
            }),
            span(),
        )
    }

    #[test]
    fn test_indented_pipeline_layout() {
        let source = "adults = users |> filter _.age > 18 |> map _.name\n";
        assert_eq!(fmt(source), "adults = users\n  filter _.age > 18\n  map _.name\n");
    }

    #[test]
    fn test_inline_pipeline_layout() {
        let config = FormatConfig::new().with_pipeline_layout(PipelineLayout::Inline);
        let program = parse("users\n  filter _.active\n  count\n");
        assert_eq!(Formatter::new(config).format(&program), "users |> filter _.active |> count\n");
    }

    #[test]
    fn test_fit_layout_uses_line_length() {
        let program = parse("xs |> map double |> sum\n");
        let wide = FormatConfig::new().with_pipeline_layout(PipelineLayout::Fit);
        assert_eq!(Formatter::new(wide).format(&program), "xs |> map double |> sum\n");

        let narrow = FormatConfig::new()
            .with_pipeline_layout(PipelineLayout::Fit)
            .with_line_length(10);
        assert_eq!(Formatter::new(narrow).format(&program), "xs\n  map double\n  sum\n");
    }

    #[test]
    fn test_explicit_placeholder_keeps_its_position() {
        assert_eq!(fmt("xs |> fold 0 _ add\n"), "xs\n  fold 0 _ add\n");
        assert_round_trip("xs |> fold 0 _ add\n");
    }

    #[test]
    fn test_nested_pipeline_is_inline_and_wrapped_as_argument() {
        assert_eq!(fmt("f (xs |> sum) 1\n"), "f (xs |> sum) 1\n");
    }

    #[test]
    fn test_function_definition_uses_parameter_form() {
        assert_eq!(fmt("square x = x * x\n"), "square x = x * x\n");
        assert_eq!(fmt("square = [x -> x * x]\n"), "square x = x * x\n");
    }

    #[test]
    fn test_precedence_parentheses() {
        assert_eq!(fmt("(a + b) * c\n"), "(a + b) * c\n");
        assert_eq!(fmt("a - (b - c)\n"), "a - (b - c)\n");
        assert_eq!(fmt("((a - b)) - c\n"), "a - b - c\n");
        assert_eq!(fmt("a * b + c\n"), "a * b + c\n");
    }

    #[test]
    fn test_negative_numbers_are_wrapped_outside_tail_position() {
        assert_eq!(fmt("x = -5\n"), "x = -5\n");
        assert_eq!(fmt("f -5\n"), "f (-5)\n");
        assert_eq!(fmt("a - (-1)\n"), "a - (-1)\n");
    }

    #[test]
    fn test_constructs_are_wrapped_outside_tail_position() {
        assert_eq!(
            fmt("x = if a then b else c\n"),
            "x = if a then b else c\n"
        );
        assert_eq!(
            fmt("x = f (if a then b else c)\n"),
            "x = f (if a then b else c)\n"
        );
        assert_eq!(
            fmt("x = if a then (match y | 1 -> b | _ -> c) else d\n"),
            "x = if a then (match y | 1 -> b | _ -> c) else d\n"
        );
        assert_round_trip("x = if a then (match y | 1 -> b | _ -> c) else d\n");
    }

    #[test]
    fn test_let_uses_semicolons() {
        let source = "area = let\n  w = 2\n  h = 3\nin w * h\n";
        assert_eq!(fmt(source), "area = let w = 2; h = 3 in w * h\n");
        assert_round_trip(source);
    }

    #[test]
    fn test_try_catch_forms() {
        let source = "cfg = try load \"cfg\"\n  catch NotFound -> {}\n  catch error -> nil\n";
        assert_eq!(fmt(source), "cfg = try load \"cfg\" catch NotFound -> {} catch error -> nil\n");
        assert_round_trip(source);
        assert_round_trip("x = try (try a catch e -> b) catch Oops -> c\n");
    }

    #[test]
    fn test_record_pattern_shorthand() {
        let source = "f u = match u | {name age: a status: \"vip\" tag: _} -> a | otherwise -> 0\n";
        assert_eq!(fmt(source), source);
    }

    #[test]
    fn test_strings_are_escaped() {
        let source = "s = \"a\\tb \\{x\\} \\\"q\\\" {name}!\"\n";
        assert_eq!(fmt(source), source);
        assert_round_trip(source);
    }

    #[test]
    fn test_field_access_on_parenthesized_placeholder() {
        assert_round_trip("xs |> map (_).name\n");
        assert_round_trip("xs |> map _.name\n");
    }

    #[test]
    fn test_equality_statement_is_not_read_as_definition() {
        let program = Program {
            statements: vec![Spanned::new(
                Statement::Expr(binary("=", ident("a"), ident("b"))),
                span(),
            )],
            span: span(),
        };
        let formatted = Formatter::new(FormatConfig::default()).format(&program);
        assert_eq!(formatted, "(a = b)\n");
        assert_eq!(sexp::program(&parse(&formatted)), "(= a b)");
    }

    #[test]
    fn test_format_expression_single_line() {
        let expr = binary("and", ident("a"), binary("or", ident("b"), ident("c")));
        assert_eq!(
            Formatter::new(FormatConfig::default()).format_expression(&expr),
            "a and (b or c)"
        );
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(fmt(""), "");
        assert_eq!(fmt("# only a comment\n"), "");
    }
}
