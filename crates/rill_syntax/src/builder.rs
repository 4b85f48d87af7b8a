//! Post-parse tree building.
//!
//! The parser checks everything that is local to one rule. [`TreeBuilder`] runs afterwards over the complete tree to
//! catch what needs a whole node at once, and optionally lowers pipelines into nested applications.

use std::collections::HashMap;

use crate::ast::{Expr, Program, Spanned, Statement};
use crate::diagnostics::{CompileError, Expected};
use crate::options::ParseOptions;
use crate::pipeline;
use rill_core::lang::punctuation::PunctuationId;

/// Validates a parsed tree and applies the lowering requested in [`ParseOptions`].
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: ParseOptions,
}

impl TreeBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Check and lower a program.
    ///
    /// ## Errors
    /// Returns every tree-level error, e.g. a record literal that repeats a key.
    pub fn finish(&self, program: Program) -> Result<Program, Vec<CompileError>> {
        let errors = self.check(&program);
        if errors.is_empty() {
            Ok(self.desugar(program))
        } else {
            Err(errors)
        }
    }

    /// [`TreeBuilder::finish`] for a single expression.
    pub fn finish_expr(&self, expr: Spanned<Expr>) -> Result<Spanned<Expr>, Vec<CompileError>> {
        let mut errors = Vec::new();
        check_expr(&expr, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        if self.options.resolve_pipelines {
            Ok(pipeline::resolve_expr(expr))
        } else {
            Ok(expr)
        }
    }

    /// Collect tree-level errors without changing the tree.
    pub fn check(&self, program: &Program) -> Vec<CompileError> {
        let mut errors = Vec::new();
        for statement in &program.statements {
            match &statement.node {
                Statement::Assignment(assignment) => check_expr(&assignment.value, &mut errors),
                Statement::Expr(expr) => check_expr(expr, &mut errors),
                Statement::Error => {}
            }
        }
        errors
    }

    /// Apply the configured lowering.
    pub fn desugar(&self, program: Program) -> Program {
        if self.options.resolve_pipelines {
            tracing::debug!(statements = program.statements.len(), "resolving pipelines");
            pipeline::resolve_program(program)
        } else {
            program
        }
    }
}

fn check_expr(expr: &Spanned<Expr>, errors: &mut Vec<CompileError>) {
    if let Expr::Record(fields) = &expr.node {
        let mut seen: HashMap<&str, _> = HashMap::new();
        for field in fields {
            if let Some(first) = seen.insert(field.key.node.as_str(), field.key.span) {
                errors.push(
                    CompileError::syntax(format!("duplicate key `{}` in record literal", field.key.node), field.key.span)
                        .with_expected(&[Expected::Identifier, Expected::Punctuation(PunctuationId::RBrace)])
                        .with_label(first, "first defined here")
                        .with_note("each key may appear once in a record literal"),
                );
            }
        }
    }
    expr.node.for_each_child(&mut |child| check_expr(child, errors));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::{lexer, parser};

    fn raw(source: &str) -> Program {
        let tokens = lexer::lex(source).unwrap();
        let (program, errors) = parser::Parser::new(&tokens, ParseOptions::default()).parse();
        assert!(errors.is_empty(), "{errors:?}");
        program
    }

    #[test]
    fn test_duplicate_record_key_is_reported_once_at_second_key() {
        let program = raw("r = {a: 1 b: 2 a: 3}\n");
        let errors = TreeBuilder::default().check(&program);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Syntax);
        assert!(errors[0].message.contains("duplicate key `a`"));
        assert_eq!(errors[0].span.column, 16);
        assert_eq!(errors[0].labels[0].0.column, 6);
    }

    #[test]
    fn test_duplicate_keys_found_in_nested_positions() {
        let program = raw("f [x -> {k: 1 k: 2}] \"{ {y: 1 y: 2} }\"\n");
        let errors = TreeBuilder::default().check(&program);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_finish_keeps_pipelines_by_default() {
        let program = raw("xs |> f\n");
        let finished = TreeBuilder::default().finish(program.clone()).unwrap();
        assert_eq!(finished, program);
    }

    #[test]
    fn test_finish_resolves_pipelines_when_asked() {
        let program = raw("xs |> f 1\n");
        let builder = TreeBuilder::new(ParseOptions::default().resolve_pipelines(true));
        let finished = builder.finish(program).unwrap();
        let Statement::Expr(expr) = &finished.statements[0].node else {
            panic!("expected expression statement");
        };
        assert!(matches!(expr.node, Expr::Application(_)));
    }
}
