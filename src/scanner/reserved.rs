//! Reserved-word vocabulary
//!
//! Keywords and operators are looked up through a [`HashTable`] keyed by the
//! case-folded lexeme. The table is normally built from
//! [`BUILTIN`], but any listing in the same `NAME CODE` format can
//! be loaded with [`ReservedWords::from_definitions`].

use std::fs;
use std::io;
use std::path::Path;

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MAX_TOKEN_LEN;
use crate::table::{Entry, HashTable, Insertion};

use super::token::TokenKind;

/// Built-in vocabulary, in listing order
pub const BUILTIN: [(&str, TokenKind); 22] = [
    ("PROGRAM", TokenKind::Program),
    ("VAR", TokenKind::Var),
    ("BEGIN", TokenKind::Begin),
    ("END", TokenKind::End),
    ("END.", TokenKind::EndDot),
    ("INTEGER", TokenKind::Integer),
    ("FOR", TokenKind::For),
    ("READ", TokenKind::Read),
    ("WRITE", TokenKind::Write),
    ("TO", TokenKind::To),
    ("DO", TokenKind::Do),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (":=", TokenKind::ColonEquals),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("DIV", TokenKind::Div),
    ("/", TokenKind::Div),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
];

/// Problems loading a reserved-word listing
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("line {line}: expected `NAME CODE`, found {text:?}")]
    Malformed { line: usize, text: String },

    #[error("line {line}: {code} is not a reserved token code")]
    UnknownCode { line: usize, code: String },

    #[error("line {line}: {name:?} is longer than the token length limit")]
    NameTooLong { line: usize, name: String },

    #[error("line {line}: {name:?} is defined twice")]
    Duplicate { line: usize, name: String },

    #[error("line {line}: reserved-word table is full")]
    TableFull { line: usize },

    #[error("could not read token definitions: {0}")]
    Io(#[from] io::Error),
}

/// The reserved-word table
#[derive(Debug, Clone)]
pub struct ReservedWords {
    table: HashTable<TokenKind>,
}

impl ReservedWords {
    /// Table holding the [`BUILTIN`] vocabulary.
    pub fn builtin() -> Self {
        let mut table = HashTable::new();
        for (name, kind) in BUILTIN {
            let inserted = table.insert(name, kind);
            debug_assert!(matches!(inserted, Insertion::Inserted(_)));
        }
        ReservedWords { table }
    }

    /// Parse a `NAME CODE` listing, one pair per line.
    pub fn from_definitions(text: &str) -> Result<Self, DefinitionError> {
        let mut table = HashTable::new();
        let mut seen = FxHashSet::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let mut fields = raw.split_whitespace();
            let (name, code) = match (fields.next(), fields.next(), fields.next()) {
                (None, _, _) => continue,
                (Some(name), Some(code), None) => (name, code),
                _ => {
                    return Err(DefinitionError::Malformed {
                        line,
                        text: raw.to_string(),
                    })
                }
            };

            let name = name.to_ascii_uppercase();
            if name.chars().count() > MAX_TOKEN_LEN {
                return Err(DefinitionError::NameTooLong { line, name });
            }

            let kind = code
                .parse::<u8>()
                .ok()
                .and_then(TokenKind::from_reserved_code)
                .ok_or_else(|| DefinitionError::UnknownCode {
                    line,
                    code: code.to_string(),
                })?;

            match table.insert(&name, kind) {
                Insertion::Inserted(slot) => debug!(%name, ?kind, slot, "reserved word"),
                Insertion::Duplicate(_) => return Err(DefinitionError::Duplicate { line, name }),
                Insertion::Full => return Err(DefinitionError::TableFull { line }),
            }
            seen.insert(kind);
        }

        for kind in TokenKind::RESERVED {
            if !seen.contains(&kind) {
                warn!("token definitions never mention {}", kind);
            }
        }

        Ok(ReservedWords { table })
    }

    /// Load a listing from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let text = fs::read_to_string(path)?;
        Self::from_definitions(&text)
    }

    /// Stored entry for a case-folded lexeme.
    pub fn get(&self, lexeme: &str) -> Option<&Entry<TokenKind>> {
        self.table.get(lexeme)
    }

    pub fn table(&self) -> &HashTable<TokenKind> {
        &self.table
    }

    /// The table as a `NAME CODE` listing, in slot order.
    pub fn to_definitions(&self) -> String {
        let mut listing = String::new();
        for (_, entry) in self.table.entries() {
            listing.push_str(&format!("{} {}\n", entry.key, entry.value.code()));
        }
        listing
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::builtin()
    }
}
