//! Reserved keyword vocabulary for Rill.
//!
//! A stable identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! categories and examples.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `and` / `or` are reserved words that are also word operators. Use [`crate::lang::operators`] when you need
//!   precedence.
//!
//! ## Examples
//! ```rust
//! use rill_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("otherwise"), Some(KeywordId::Otherwise));
//! assert_eq!(keywords::as_str(KeywordId::Catch), "catch");
//! assert_eq!(keywords::from_str("Match"), None);
//! ```

use super::registry::Example;

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Literals
    True,
    False,
    Nil,

    // Bindings
    Let,
    In,

    // Conditionals
    If,
    Then,
    Elif,
    Else,

    // Pattern matching
    Match,
    When,
    Otherwise,

    // Error recovery
    Try,
    Catch,

    // Word operators
    And,
    Or,
}

/// Broad grouping used by docs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Literal,
    Binding,
    ControlFlow,
    Pattern,
    ErrorHandling,
    Operator,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal),
    with_examples(
        KeywordId::Let,
        "let",
        KeywordCategory::Binding,
        &[Example {
            code: "let base = 10; rate = 2 in base * rate",
            note: Some("Bindings are evaluated left to right."),
        }],
    ),
    info(KeywordId::In, "in", KeywordCategory::Binding),
    with_examples(
        KeywordId::If,
        "if",
        KeywordCategory::ControlFlow,
        &[Example {
            code: "if n > 0 then \"pos\" elif n < 0 then \"neg\" else \"zero\"",
            note: None,
        }],
    ),
    info(KeywordId::Then, "then", KeywordCategory::ControlFlow),
    info(KeywordId::Elif, "elif", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    with_examples(
        KeywordId::Match,
        "match",
        KeywordCategory::Pattern,
        &[Example {
            code: "match user | {status: \"vip\"} -> 1 | otherwise -> 0",
            note: Some("First matching clause wins."),
        }],
    ),
    info(KeywordId::When, "when", KeywordCategory::Pattern),
    info(KeywordId::Otherwise, "otherwise", KeywordCategory::Pattern),
    with_examples(
        KeywordId::Try,
        "try",
        KeywordCategory::ErrorHandling,
        &[Example {
            code: "try read-file \"x\" catch error -> \"Failed\"",
            note: None,
        }],
    ),
    info(KeywordId::Catch, "catch", KeywordCategory::ErrorHandling),
    info(KeywordId::And, "and", KeywordCategory::Operator),
    info(KeywordId::Or, "or", KeywordCategory::Operator),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Usage examples, quoted by the parser when the construct is left incomplete.
pub fn examples(id: KeywordId) -> &'static [Example] {
    info_for(id).examples
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    with_examples(id, canonical, category, &[])
}

const fn with_examples(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    examples: &'static [Example],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_round_trips_through_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "spelling {:?}", k.canonical);
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in KEYWORDS {
            assert!(seen.insert(k.canonical), "duplicate keyword spelling {:?}", k.canonical);
        }
    }

    #[test]
    fn test_word_operators_are_operator_keywords() {
        assert_eq!(category(KeywordId::And), KeywordCategory::Operator);
        assert_eq!(category(KeywordId::Or), KeywordCategory::Operator);
    }
}
