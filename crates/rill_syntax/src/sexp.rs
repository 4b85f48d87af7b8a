//! S-expression dump of the AST.
//!
//! A compact, span-free rendering used to compare trees structurally in tests and tooling. Two trees that differ
//! only in spans dump to the same text.
//!
//! ```text
//! add 5 (multiply 2 3)        =>  (add 5 (multiply 2 3))
//! x = if a then 1 else 2      =>  (= x (if (a 1) (else 2)))
//! users |> filter _.active    =>  (pipe users (filter _ _.active))
//! ```

use std::fmt::Write;

use crate::ast::*;
use crate::lexer::escape;

/// Dump every statement, one per line.
pub fn program(program: &Program) -> String {
    program
        .statements
        .iter()
        .map(|statement| self::statement(&statement.node))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn statement(statement: &Statement) -> String {
    match statement {
        Statement::Assignment(assignment) => {
            format!("(= {} {})", assignment.name.node, expr(&assignment.value.node))
        }
        Statement::Expr(e) => expr(&e.node),
        Statement::Error => "<error>".to_string(),
    }
}

pub fn expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

pub fn pattern(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Record(fields) => {
            let mut out = String::from("(record-pattern");
            for field in fields {
                let binding = match &field.binding {
                    FieldBinding::Bind(name) => name.clone(),
                    FieldBinding::Literal(literal) => self::literal(literal),
                    FieldBinding::Ignore => "_".to_string(),
                };
                let _ = write!(out, " ({} {binding})", field.key.node);
            }
            out.push(')');
            out
        }
        Pattern::Literal(literal) => self::literal(literal),
        Pattern::Binding(name) => name.clone(),
        Pattern::Wildcard => "_".to_string(),
        Pattern::Otherwise => "otherwise".to_string(),
    }
}

fn literal(literal: &LiteralPattern) -> String {
    match literal {
        LiteralPattern::Number(value) => value.to_string(),
        LiteralPattern::Str(text) => format!("\"{}\"", escape(text)),
        LiteralPattern::Bool(value) => value.to_string(),
        LiteralPattern::Nil => "nil".to_string(),
    }
}

fn write_list<'a>(out: &mut String, head: &str, items: impl IntoIterator<Item = &'a Spanned<Expr>>) {
    out.push('(');
    out.push_str(head);
    for item in items {
        out.push(' ');
        write_expr(out, &item.node);
    }
    out.push(')');
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Identifier(name) => out.push_str(name),
        Expr::Wildcard(access) => {
            out.push('_');
            for field in &access.path {
                out.push('.');
                out.push_str(field);
            }
        }
        Expr::Number(value) => {
            let _ = write!(out, "{value}");
        }
        Expr::Str(segments) => match segments.as_slice() {
            [] => out.push_str("\"\""),
            [StringSegment::Literal(text)] => {
                let _ = write!(out, "\"{}\"", escape(text));
            }
            _ => {
                out.push_str("(string");
                for segment in segments {
                    out.push(' ');
                    match segment {
                        StringSegment::Literal(text) => {
                            let _ = write!(out, "\"{}\"", escape(text));
                        }
                        StringSegment::Interpolation(inner) => write_expr(out, &inner.node),
                    }
                }
                out.push(')');
            }
        },
        Expr::Bool(value) => {
            let _ = write!(out, "{value}");
        }
        Expr::Nil => out.push_str("nil"),
        Expr::Record(fields) => {
            out.push_str("(record");
            for field in fields {
                let _ = write!(out, " ({} ", field.key.node);
                write_expr(out, &field.value.node);
                out.push(')');
            }
            out.push(')');
        }
        Expr::List(items) => write_list(out, "list", items),
        Expr::Function(func) => {
            let params: Vec<&str> = func.params.iter().map(|p| p.node.as_str()).collect();
            let _ = write!(out, "(fn ({}) ", params.join(" "));
            write_expr(out, &func.body.node);
            out.push(')');
        }
        Expr::Application(app) => write_application(out, app),
        Expr::FieldAccess(access) => {
            out.push_str("(. ");
            write_expr(out, &access.target.node);
            let _ = write!(out, " {})", access.field.node);
        }
        Expr::Pipeline(pipeline) => {
            out.push_str("(pipe ");
            write_expr(out, &pipeline.seed.node);
            for stage in &pipeline.stages {
                out.push(' ');
                write_application(out, &stage.node);
            }
            out.push(')');
        }
        Expr::Let(binding) => {
            out.push_str("(let (");
            for (i, b) in binding.bindings.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "({} ", b.name.node);
                write_expr(out, &b.value.node);
                out.push(')');
            }
            out.push_str(") ");
            write_expr(out, &binding.body.node);
            out.push(')');
        }
        Expr::If(if_expr) => {
            out.push_str("(if");
            for branch in &if_expr.branches {
                out.push_str(" (");
                write_expr(out, &branch.condition.node);
                out.push(' ');
                write_expr(out, &branch.result.node);
                out.push(')');
            }
            out.push_str(" (else ");
            write_expr(out, &if_expr.otherwise.node);
            out.push_str("))");
        }
        Expr::Match(m) => {
            out.push_str("(match ");
            write_expr(out, &m.scrutinee.node);
            for clause in &m.clauses {
                let _ = write!(out, " (-> {}", pattern(&clause.node.pattern.node));
                if let Some(guard) = &clause.node.guard {
                    out.push_str(" (when ");
                    write_expr(out, &guard.node);
                    out.push(')');
                }
                out.push(' ');
                write_expr(out, &clause.node.result.node);
                out.push(')');
            }
            out.push(')');
        }
        Expr::TryCatch(t) => {
            out.push_str("(try ");
            write_expr(out, &t.body.node);
            for catch in &t.catches {
                out.push_str(" (catch");
                if let Some(tag) = &catch.node.error_tag {
                    let _ = write!(out, " (tag {})", tag.node);
                }
                if let Some(binding) = &catch.node.binding {
                    let _ = write!(out, " (bind {})", binding.node);
                }
                out.push(' ');
                write_expr(out, &catch.node.handler.node);
                out.push(')');
            }
            out.push(')');
        }
        Expr::Error => out.push_str("<error>"),
    }
}

fn write_application(out: &mut String, app: &Application) {
    out.push('(');
    write_expr(out, &app.callee.node);
    for arg in &app.args {
        out.push(' ');
        write_expr(out, &arg.node);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn dump(source: &str) -> String {
        let tokens = lexer::lex(source).unwrap();
        program(&parser::parse(&tokens).unwrap())
    }

    #[test]
    fn test_dump_ignores_spans() {
        assert_eq!(dump("add   5 (multiply 2 3)\n"), dump("add 5 (multiply\n  2 3)\n"));
    }

    #[test]
    fn test_dump_literals() {
        assert_eq!(dump("f 1.5 \"a\\\"b\" true nil\n"), "(f 1.5 \"a\\\"b\" true nil)");
        assert_eq!(dump("\"hi {name}!\"\n"), "(string \"hi \" name \"!\")");
        assert_eq!(dump("\"\"\n"), "\"\"");
    }

    #[test]
    fn test_dump_statements_one_per_line() {
        assert_eq!(dump("x = 1\ny = x\n"), "(= x 1)\n(= y x)");
    }

    #[test]
    fn test_dump_program_snapshot() {
        let source = "adults =\n  users\n    filter _.age > 18\n    map [u -> \"{u.name}!\"]\n\nreport = try load adults catch NotFound -> [] catch e -> fail e\n";
        insta::assert_snapshot!(dump(source), @r#"
        (= adults (pipe users (filter _ (> _.age 18)) (map _ (fn (u) (string (. u name) "!")))))
        (= report (try (load adults) (catch (tag NotFound) (list)) (catch (bind e) (fail e))))
        "#);
    }

    #[test]
    fn test_dump_patterns() {
        assert_eq!(
            dump("match r | {status: \"vip\" age: a tag: _ name} -> name | otherwise -> nil\n"),
            "(match r (-> (record-pattern (status \"vip\") (age a) (tag _) (name name)) name) (-> otherwise nil))"
        );
    }
}
