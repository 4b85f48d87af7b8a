//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the lexer/parser: delimiters,
//! separators, the pipeline and clause markers, and the `_` placeholder.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//! - `,` is listed so the lexer can produce a token the parser rejects with a precise message. Rill separates record
//!   fields and list elements with whitespace.
//!
//! ## Examples
//! ```rust
//! use rill_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("|>"), Some(PunctuationId::PipeArrow));
//! assert_eq!(punctuation::as_str(PunctuationId::Arrow), "->");
//! ```

use super::registry::Example;

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `:` and `;`.
    Separator,
    /// Field access.
    Access,
    /// `->` between parameters/patterns and bodies.
    Arrow,
    /// Pipeline and clause markers (`|>`, `|`).
    Flow,
    /// The `_` placeholder / accessor root.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access
    Dot,

    // Arrows
    Arrow,

    // Flow
    PipeArrow,
    Bar,

    // Markers
    Underscore,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub examples: &'static [Example],
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    // Access
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    // Arrows
    info(PunctuationId::Arrow, "->", PunctuationCategory::Arrow),
    // Flow
    PunctuationInfo {
        examples: &[Example {
            code: "orders |> filter _.paid |> sum",
            note: Some("Each stage receives the previous result as its first argument."),
        }],
        ..info(PunctuationId::PipeArrow, "|>", PunctuationCategory::Flow)
    },
    info(PunctuationId::Bar, "|", PunctuationCategory::Flow),
    // Markers
    PunctuationInfo {
        examples: &[Example {
            code: "xs |> fold 0 _ add",
            note: Some("The incoming value replaces the stage's one `_`, or goes first when there is none."),
        }],
        ..info(PunctuationId::Underscore, "_", PunctuationCategory::Marker)
    },
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Usage examples, quoted by the parser in pipeline diagnostics.
pub fn examples(id: PunctuationId) -> &'static [Example] {
    info_for(id).examples
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// The closing delimiter that pairs with `open`, if `open` is an opening delimiter.
pub fn closing_for(open: PunctuationId) -> Option<PunctuationId> {
    match open {
        PunctuationId::LParen => Some(PunctuationId::RParen),
        PunctuationId::LBracket => Some(PunctuationId::RBracket),
        PunctuationId::LBrace => Some(PunctuationId::RBrace),
        _ => None,
    }
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        examples: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_char_spellings_resolve() {
        assert_eq!(from_str("->"), Some(PunctuationId::Arrow));
        assert_eq!(from_str("|>"), Some(PunctuationId::PipeArrow));
        assert_eq!(from_str("|"), Some(PunctuationId::Bar));
        assert_eq!(from_str("::"), None);
    }

    #[test]
    fn test_delimiters_pair_up() {
        for p in PUNCTUATION.iter().filter(|p| p.category == PunctuationCategory::Delimiter) {
            if let Some(close) = closing_for(p.id) {
                assert_eq!(category(close), PunctuationCategory::Delimiter);
                assert_ne!(as_str(close), p.canonical);
            }
        }
        assert_eq!(closing_for(PunctuationId::Colon), None);
    }
}
