//! Canonical language vocabulary for Rill.
//!
//! This crate is intentionally small and dependency-free. It holds the registries that the lexer, parser and
//! formatter consult for spellings and operator metadata, so that no stage matches vocabulary by raw string.
//!
//! ## Notes
//!
//! - No IO, no global state, no AST types.
//! - The lexer/parser (`rill_syntax`) remain the source of truth for syntactic legality.

pub mod lang;
