//! Operator vocabulary.
//!
//! This module defines the canonical binary operator set (symbol operators like `+` and word operators like `and`)
//! along with the precedence and associativity the parser climbs over.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `=` is equality inside expressions. At statement level the parser treats `name ... =` as a definition before
//!   any expression is parsed, so the same spelling never needs two entries.
//! - Word-operator spellings also appear in the keyword registry ([`crate::lang::keywords`]); use this module when
//!   you need operator semantics like precedence.
//! - Juxtaposed application and postfix field access bind tighter than every entry here. They have no spelling and
//!   are therefore not part of the table.
//!
//! ## Examples
//! ```rust
//! use rill_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::info_for(OperatorId::Plus).precedence, 40);
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Word operators
    And,
    Or,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter. The absolute scale is an implementation detail,
///   but must be consistent across the parser and the formatter.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub is_keyword_spelling: bool,
}

/// Precedence of `or`, the loosest binary operator.
pub const PREC_OR: u8 = 10;
/// Precedence of `and`.
pub const PREC_AND: u8 = 20;
/// Precedence shared by all comparisons.
pub const PREC_COMPARISON: u8 = 30;
/// Precedence of `+` and `-`.
pub const PREC_ADDITIVE: u8 = 40;
/// Precedence of `*`, `/` and `%`.
pub const PREC_MULTIPLICATIVE: u8 = 50;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", PREC_ADDITIVE, false),
    op(OperatorId::Minus, "-", PREC_ADDITIVE, false),
    op(OperatorId::Star, "*", PREC_MULTIPLICATIVE, false),
    op(OperatorId::Slash, "/", PREC_MULTIPLICATIVE, false),
    op(OperatorId::Percent, "%", PREC_MULTIPLICATIVE, false),
    // Comparison
    op(OperatorId::Eq, "=", PREC_COMPARISON, false),
    op(OperatorId::NotEq, "!=", PREC_COMPARISON, false),
    op(OperatorId::Lt, "<", PREC_COMPARISON, false),
    op(OperatorId::LtEq, "<=", PREC_COMPARISON, false),
    op(OperatorId::Gt, ">", PREC_COMPARISON, false),
    op(OperatorId::GtEq, ">=", PREC_COMPARISON, false),
    // Word operators (keyword spellings)
    op(OperatorId::And, "and", PREC_AND, true),
    op(OperatorId::Or, "or", PREC_OR, true),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling, which is also the name of the synthetic callee a binary expression applies.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Binding power of `id`; higher binds tighter.
pub fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == spelling).map(|o| o.id)
}

/// Whether `name` is the spelling of a binary operator, and so names the synthetic callee of a binary expression.
pub fn is_operator_name(name: &str) -> bool {
    from_str(name).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, canonical: &'static str, precedence: u8, is_keyword_spelling: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        precedence,
        associativity: Associativity::Left,
        is_keyword_spelling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ladder_is_ordered() {
        assert!(precedence(OperatorId::Or) < precedence(OperatorId::And));
        assert!(precedence(OperatorId::And) < precedence(OperatorId::Lt));
        assert!(precedence(OperatorId::Lt) < precedence(OperatorId::Minus));
        assert!(precedence(OperatorId::Minus) < precedence(OperatorId::Percent));
    }

    #[test]
    fn test_all_comparisons_share_one_level() {
        for id in [
            OperatorId::Eq,
            OperatorId::NotEq,
            OperatorId::Lt,
            OperatorId::LtEq,
            OperatorId::Gt,
            OperatorId::GtEq,
        ] {
            assert_eq!(precedence(id), PREC_COMPARISON, "{id:?}");
        }
    }

    #[test]
    fn test_every_operator_is_left_associative() {
        assert!(OPERATORS.iter().all(|o| o.associativity == Associativity::Left));
    }

    #[test]
    fn test_word_operators_are_marked() {
        assert!(info_for(OperatorId::And).is_keyword_spelling);
        assert!(info_for(OperatorId::Or).is_keyword_spelling);
        assert!(!info_for(OperatorId::Plus).is_keyword_spelling);
        assert!(is_operator_name("or"));
        assert!(!is_operator_name("filter"));
    }
}
