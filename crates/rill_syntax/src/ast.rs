//! Abstract Syntax Tree definitions for Rill
//!
//! Every node is wrapped in [`Spanned`] so diagnostics and tooling can point back into the source. The tree is a
//! plain owned value: each child is exclusively owned through `Box` / `Vec`, nothing is shared and nothing refers
//! back to the source text.

use rill_core::lang::operators::{self, OperatorId};

/// Source location span.
///
/// `start` / `end` are byte offsets (end exclusive); `line` / `column` are the 1-based position of `start`, with the
/// column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Combine two spans: the earlier start position and the later end.
    pub fn merge(self, other: Span) -> Span {
        let first = if other.start < self.start { other } else { self };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A program is a sequence of top-level statements.
///
/// ## Notes
/// - The span of an empty (or whitespace/comment-only) program is empty. Every other node has a non-empty span.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name = value` or `name p1 p2 = body` (the latter holds a [`FunctionDef`] value).
    Assignment(Assignment),
    Expr(Spanned<Expr>),
    /// Placeholder left by best-effort parsing where a statement failed.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Spanned<Ident>,
    pub value: Spanned<Expr>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Ident),
    /// `_` or `_.a.b`.
    Wildcard(WildcardAccess),
    Number(f64),
    Str(Vec<StringSegment>),
    Bool(bool),
    Nil,
    Record(Vec<RecordField>),
    List(Vec<Spanned<Expr>>),
    Function(FunctionDef),
    /// Juxtaposed application; binary operators also land here with a synthetic operator callee.
    Application(Application),
    FieldAccess(FieldAccess),
    Pipeline(Pipeline),
    Let(LetBinding),
    If(IfExpr),
    Match(MatchExpr),
    TryCatch(TryCatch),
    /// Placeholder left by best-effort parsing where a sub-expression failed.
    Error,
}

/// Field-path accessor rooted at `_`. An empty path is the bare placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardAccess {
    pub path: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringSegment {
    Literal(String),
    Interpolation(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub key: Spanned<Ident>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<Spanned<Ident>>,
    pub body: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub callee: Box<Spanned<Expr>>,
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub target: Box<Spanned<Expr>>,
    pub field: Spanned<Ident>,
}

/// `seed |> stage |> stage`, or one stage per indented line.
///
/// Each stage holds exactly one bare `_` argument marking where the value flowing in is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub seed: Box<Spanned<Expr>>,
    pub stages: Vec<Spanned<Application>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub bindings: Vec<Binding>,
    pub body: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: Spanned<Ident>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    /// The `if` branch followed by every `elif`, in source order.
    pub branches: Vec<IfBranch>,
    pub otherwise: Box<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Spanned<Expr>,
    pub result: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpr {
    pub scrutinee: Box<Spanned<Expr>>,
    pub clauses: Vec<Spanned<MatchClause>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    pub pattern: Spanned<Pattern>,
    pub guard: Option<Spanned<Expr>>,
    pub result: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryCatch {
    pub body: Box<Spanned<Expr>>,
    pub catches: Vec<Spanned<CatchClause>>,
}

/// `catch [Tag] [binding] -> handler`; at least one of tag or binding is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub error_tag: Option<Spanned<Ident>>,
    pub binding: Option<Spanned<Ident>>,
    pub handler: Spanned<Expr>,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Record(Vec<RecordPatternField>),
    Literal(LiteralPattern),
    Binding(Ident),
    /// `_ ->`
    Wildcard,
    /// `otherwise ->`
    Otherwise,
}

impl Pattern {
    /// `_` and `otherwise` are two spellings of the same catch-all.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Pattern::Wildcard | Pattern::Otherwise)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPatternField {
    pub key: Spanned<Ident>,
    pub binding: FieldBinding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldBinding {
    /// `{name}` or `{age: a}`
    Bind(Ident),
    /// `{status: "vip"}`
    Literal(LiteralPattern),
    /// `{tag: _}`: the field must be present, its value is ignored.
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralPattern {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

// ============================================================================
// Helpers
// ============================================================================

impl Expr {
    /// The bare `_` placeholder.
    pub fn placeholder() -> Self {
        Expr::Wildcard(WildcardAccess { path: Vec::new() })
    }

    /// Whether this is a bare `_` (no field path).
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Expr::Wildcard(w) if w.path.is_empty())
    }

    /// `let`, `if`, `match` and `try` extend as far right as possible.
    pub fn is_construct(&self) -> bool {
        matches!(self, Expr::Let(_) | Expr::If(_) | Expr::Match(_) | Expr::TryCatch(_))
    }

    /// Visit each direct child expression in source order.
    pub fn for_each_child<'a>(&'a self, f: &mut impl FnMut(&'a Spanned<Expr>)) {
        match self {
            Expr::Identifier(_)
            | Expr::Wildcard(_)
            | Expr::Number(_)
            | Expr::Bool(_)
            | Expr::Nil
            | Expr::Error => {}
            Expr::Str(segments) => {
                for segment in segments {
                    if let StringSegment::Interpolation(expr) = segment {
                        f(expr);
                    }
                }
            }
            Expr::Record(fields) => fields.iter().for_each(|field| f(&field.value)),
            Expr::List(items) => items.iter().for_each(f),
            Expr::Function(func) => f(&func.body),
            Expr::Application(app) => app.for_each_child(f),
            Expr::FieldAccess(access) => f(&access.target),
            Expr::Pipeline(pipeline) => {
                f(&pipeline.seed);
                for stage in &pipeline.stages {
                    stage.node.for_each_child(f);
                }
            }
            Expr::Let(binding) => {
                binding.bindings.iter().for_each(|b| f(&b.value));
                f(&binding.body);
            }
            Expr::If(if_expr) => {
                for branch in &if_expr.branches {
                    f(&branch.condition);
                    f(&branch.result);
                }
                f(&if_expr.otherwise);
            }
            Expr::Match(m) => {
                f(&m.scrutinee);
                for clause in &m.clauses {
                    if let Some(guard) = &clause.node.guard {
                        f(guard);
                    }
                    f(&clause.node.result);
                }
            }
            Expr::TryCatch(t) => {
                f(&t.body);
                t.catches.iter().for_each(|c| f(&c.node.handler));
            }
        }
    }
}

impl Application {
    /// The operator this application stands for, if it was built from a binary expression.
    pub fn operator(&self) -> Option<OperatorId> {
        match &self.callee.node {
            Expr::Identifier(name) if self.args.len() == 2 => operators::from_str(name),
            _ => None,
        }
    }

    fn for_each_child<'a>(&'a self, f: &mut impl FnMut(&'a Spanned<Expr>)) {
        f(&self.callee);
        self.args.iter().for_each(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_takes_earlier_position() {
        let a = Span::new(10, 14, 2, 3);
        let b = Span::new(2, 5, 1, 3);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(2, 14, 1, 3));
        assert_eq!(merged.len(), 12);
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn test_catch_all_spellings_are_equivalent() {
        assert!(Pattern::Wildcard.is_catch_all());
        assert!(Pattern::Otherwise.is_catch_all());
        assert!(!Pattern::Binding("x".to_string()).is_catch_all());
    }

    #[test]
    fn test_operator_callee_is_recognized() {
        let span = Span::new(0, 1, 1, 1);
        let app = Application {
            callee: Box::new(Spanned::new(Expr::Identifier("+".to_string()), span)),
            args: vec![Spanned::new(Expr::Number(1.0), span), Spanned::new(Expr::Number(2.0), span)],
        };
        assert_eq!(app.operator(), Some(OperatorId::Plus));

        let call = Application {
            callee: Box::new(Spanned::new(Expr::Identifier("sum".to_string()), span)),
            args: vec![Spanned::new(Expr::Number(1.0), span), Spanned::new(Expr::Number(2.0), span)],
        };
        assert_eq!(call.operator(), None);
    }
}
