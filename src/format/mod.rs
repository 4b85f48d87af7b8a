//! Rill Code Formatter
//!
//! Prints a parsed program back as canonical source:
//! - 2-space indentation
//! - a pipeline that forms a whole statement value gets one stage per indented line
//! - one statement per line, records and lists separated by single spaces, `let` bindings joined with `;`
//!
//! Comments are not part of the tree and do not survive formatting.

mod config;
mod formatter;
mod writer;

pub use config::{FormatConfig, PipelineLayout};
pub use formatter::Formatter;

use crate::frontend::diagnostics::CompileError;
use crate::frontend::{lexer, parser};

/// Format Rill source code with default settings
pub fn format_source(source: &str) -> Result<String, String> {
    format_source_with_config(source, FormatConfig::default())
}

/// Format Rill source code with custom configuration
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn format_source_with_config(source: &str, config: FormatConfig) -> Result<String, String> {
    let tokens = lexer::lex(source).map_err(|e| format!("Lexer error: {}", join(&e)))?;
    let ast = parser::parse(&tokens).map_err(|e| format!("Parser error: {}", join(&e)))?;

    let formatter = Formatter::new(config);
    Ok(formatter.format(&ast))
}

fn join(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}:{}: {e}", e.span.line, e.span.column))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, String> {
    let formatted = format_source(source)?;
    Ok(source == formatted)
}

/// Get the diff between original and formatted source
pub fn format_diff(source: &str) -> Result<Option<String>, String> {
    let formatted = format_source(source)?;

    if source == formatted {
        return Ok(None);
    }

    // Simple line-by-line diff
    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();

    let max_lines = original_lines.len().max(formatted_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied();
        let fmt = formatted_lines.get(i).copied();

        if orig != fmt {
            if let Some(orig) = orig {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if let Some(fmt) = fmt {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }

    Ok(Some(diff))
}
