//! Line-buffered scanner
//!
//! This module turns source lines into classified tokens on demand:
//! - [`line`]: line source and the scan cursor over the current line
//! - [`classify`]: stopper, identifier and integer predicates, case folding
//! - [`builder`]: raw lexeme extraction and comment skipping
//! - [`reserved`]: the reserved-word table and its definition listings
//! - [`lexer`]: [`Scanner`], which ties the pieces together
//! - [`token`]: token categories and the annotated [`ScanToken`]
//!
//! # Language
//!
//! Input is case-insensitive: every line is folded to upper case as it is
//! read. Comments are written `(* ... *)` and may span lines. Lexemes are at
//! most [`MAX_TOKEN_LEN`](crate::config::MAX_TOKEN_LEN) characters long.

pub mod builder;
pub mod classify;
pub mod lexer;
pub mod line;
pub mod reserved;
pub mod token;

pub use lexer::Scanner;
pub use line::{Line, LineReader, LineSource};
pub use reserved::ReservedWords;
pub use token::{Lexeme, ScanError, ScanToken, TokenKind};
