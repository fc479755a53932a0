//! SPS grammar checker
//!
//! This module validates a token stream against the SPS grammar and keeps the
//! symbol table of declared variables:
//! - [`parse`]: the [`Parser`] session, its errors and shared helpers
//! - `declarations`: program header and `VAR` section
//! - `statements`: statement forms and loop bodies
//! - `expressions`: arithmetic expressions
//!
//! # Accepted language
//!
//! A program declares `INTEGER` variables, then runs assignments, `READ`,
//! `WRITE` and `FOR` loops over them. Every name must be declared before use
//! and at most once.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead. Nothing is
//! built; the parser either accepts the program or stops at the first error.

mod declarations;
mod expressions;
pub mod parse;
mod statements;

pub use parse::{IdentMode, ParseError, ParseErrorKind, ParseOutcome, Parser, SymbolTable};
