//! Pipeline resolution.
//!
//! Rewrites `seed |> stage1 |> stage2` into nested applications: the value flowing into a stage replaces the stage's
//! bare `_`. Thus `a |> f _ x |> g y` (the second stage's `_` being implicit) becomes `g (f a x) y`.
//!
//! Resolution is optional; the parser keeps [`Pipeline`] nodes unless
//! [`ParseOptions::resolve_pipelines`](crate::options::ParseOptions::resolve_pipelines) is set.

use crate::ast::*;

/// Lower one pipeline into nested applications. Sub-expressions are resolved as well.
pub fn resolve(pipeline: Pipeline) -> Spanned<Expr> {
    let Pipeline { seed, stages } = pipeline;
    let mut value = resolve_expr(*seed);

    for stage in stages {
        let Application { callee, args } = stage.node;
        let mut incoming = Some(value);
        let mut args: Vec<Spanned<Expr>> = args
            .into_iter()
            .map(|arg| {
                if arg.node.is_placeholder() {
                    if let Some(value) = incoming.take() {
                        return value;
                    }
                }
                resolve_expr(arg)
            })
            .collect();
        // Hand-built stages may lack the placeholder; the value then goes first.
        if let Some(value) = incoming {
            args.insert(0, value);
        }

        let span = args.iter().fold(stage.span.merge(callee.span), |span, arg| span.merge(arg.span));
        value = Spanned::new(
            Expr::Application(Application {
                callee: Box::new(resolve_expr(*callee)),
                args,
            }),
            span,
        );
    }
    value
}

/// Resolve every pipeline in a program.
pub fn resolve_program(program: Program) -> Program {
    let statements = program
        .statements
        .into_iter()
        .map(|statement| {
            let node = match statement.node {
                Statement::Assignment(Assignment { name, value }) => Statement::Assignment(Assignment {
                    name,
                    value: resolve_expr(value),
                }),
                Statement::Expr(expr) => Statement::Expr(resolve_expr(expr)),
                Statement::Error => Statement::Error,
            };
            Spanned::new(node, statement.span)
        })
        .collect();
    Program {
        statements,
        span: program.span,
    }
}

/// Resolve every pipeline inside `expr`.
pub fn resolve_expr(expr: Spanned<Expr>) -> Spanned<Expr> {
    let span = expr.span;
    let node = match expr.node {
        Expr::Pipeline(pipeline) => return resolve(pipeline),
        Expr::Str(segments) => Expr::Str(
            segments
                .into_iter()
                .map(|segment| match segment {
                    StringSegment::Interpolation(inner) => {
                        StringSegment::Interpolation(Box::new(resolve_expr(*inner)))
                    }
                    literal => literal,
                })
                .collect(),
        ),
        Expr::Record(fields) => Expr::Record(
            fields
                .into_iter()
                .map(|field| RecordField {
                    key: field.key,
                    value: resolve_expr(field.value),
                })
                .collect(),
        ),
        Expr::List(items) => Expr::List(items.into_iter().map(resolve_expr).collect()),
        Expr::Function(func) => Expr::Function(FunctionDef {
            params: func.params,
            body: Box::new(resolve_expr(*func.body)),
        }),
        Expr::Application(app) => Expr::Application(Application {
            callee: Box::new(resolve_expr(*app.callee)),
            args: app.args.into_iter().map(resolve_expr).collect(),
        }),
        Expr::FieldAccess(access) => Expr::FieldAccess(FieldAccess {
            target: Box::new(resolve_expr(*access.target)),
            field: access.field,
        }),
        Expr::Let(binding) => Expr::Let(LetBinding {
            bindings: binding
                .bindings
                .into_iter()
                .map(|b| Binding {
                    name: b.name,
                    value: resolve_expr(b.value),
                })
                .collect(),
            body: Box::new(resolve_expr(*binding.body)),
        }),
        Expr::If(if_expr) => Expr::If(IfExpr {
            branches: if_expr
                .branches
                .into_iter()
                .map(|branch| IfBranch {
                    condition: resolve_expr(branch.condition),
                    result: resolve_expr(branch.result),
                })
                .collect(),
            otherwise: Box::new(resolve_expr(*if_expr.otherwise)),
        }),
        Expr::Match(m) => Expr::Match(MatchExpr {
            scrutinee: Box::new(resolve_expr(*m.scrutinee)),
            clauses: m
                .clauses
                .into_iter()
                .map(|clause| {
                    let MatchClause { pattern, guard, result } = clause.node;
                    Spanned::new(
                        MatchClause {
                            pattern,
                            guard: guard.map(resolve_expr),
                            result: resolve_expr(result),
                        },
                        clause.span,
                    )
                })
                .collect(),
        }),
        Expr::TryCatch(t) => Expr::TryCatch(TryCatch {
            body: Box::new(resolve_expr(*t.body)),
            catches: t
                .catches
                .into_iter()
                .map(|catch| {
                    let CatchClause {
                        error_tag,
                        binding,
                        handler,
                    } = catch.node;
                    Spanned::new(
                        CatchClause {
                            error_tag,
                            binding,
                            handler: resolve_expr(handler),
                        },
                        catch.span,
                    )
                })
                .collect(),
        }),
        leaf @ (Expr::Identifier(_)
        | Expr::Wildcard(_)
        | Expr::Number(_)
        | Expr::Bool(_)
        | Expr::Nil
        | Expr::Error) => leaf,
    };
    Spanned::new(node, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser, sexp};

    fn resolved(source: &str) -> String {
        let tokens = lexer::lex(source).unwrap();
        let program = parser::parse(&tokens).unwrap();
        sexp::program(&resolve_program(program))
    }

    fn plain(source: &str) -> String {
        let tokens = lexer::lex(source).unwrap();
        sexp::program(&parser::parse(&tokens).unwrap())
    }

    #[test]
    fn test_value_fills_implicit_first_argument() {
        assert_eq!(resolved("a |> f x |> g y\n"), "(g (f a x) y)");
        assert_eq!(resolved("a |> f x |> g y\n"), plain("g (f a x) y\n"));
    }

    #[test]
    fn test_value_fills_explicit_placeholder() {
        assert_eq!(resolved("xs |> fold 0 _ add\n"), "(fold 0 xs add)");
    }

    #[test]
    fn test_field_paths_on_wildcard_are_kept() {
        assert_eq!(resolved("users |> filter _.age > 18\n"), "(filter users (> _.age 18))");
    }

    #[test]
    fn test_indented_pipeline_resolves_like_inline() {
        let indented = resolved("users\n  filter active\n  map _.name\n  count\n");
        let inline = resolved("users |> filter active |> map _.name |> count\n");
        assert_eq!(indented, inline);
        assert_eq!(inline, "(count (map (filter users active) _.name))");
    }

    #[test]
    fn test_nested_pipelines_resolve() {
        assert_eq!(
            resolved("total = orders |> map [o -> o.items |> sum]\n"),
            "(= total (map orders (fn (o) (sum (. o items)))))"
        );
    }

    #[test]
    fn test_spans_cover_the_whole_pipeline() {
        let tokens = lexer::lex("xs |> f 1 |> g\n").unwrap();
        let program = resolve_program(parser::parse(&tokens).unwrap());
        let Statement::Expr(expr) = &program.statements[0].node else {
            panic!("expected expression statement");
        };
        assert_eq!((expr.span.start, expr.span.end), (0, 14));
    }
}
