//! Shared metadata types for the `rill_core::lang` registries.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Syntax rules are enforced by the lexer/parser; the parser quotes registry examples in its hints.

/// A short, valid snippet showing a vocabulary item in use.
///
/// The parser attaches the snippet as a hint when a construct is left incomplete, so every example must parse on
/// its own.
///
/// ## Examples
/// ```rust
/// use rill_core::lang::registry::Example;
///
/// let ex = Example {
///     code: "users |> count",
///     note: Some("Single-stage pipeline."),
/// };
/// assert!(ex.code.contains("|>"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
