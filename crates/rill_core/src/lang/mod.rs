//! Rill language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators and punctuation.
//!
//! The design goal is to avoid stringly-typed checks scattered across the front end. Callers work with **stable
//! IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings/metadata via registry tables.
//!
//! ## Examples
//! ```rust
//! use rill_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("match"), Some(KeywordId::Match));
//! assert_eq!(keywords::as_str(KeywordId::Match), "match");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
