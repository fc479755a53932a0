//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the entry points that run a
//! whole parse.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: program header, variable declarations, identifier lists
//! - `statements`: assignment, `READ`, `WRITE`, `FOR` and loop bodies
//! - `expressions`: expressions, terms and factors
//!
//! # Lookahead
//!
//! The parser never pushes a token back. Every rule that succeeds leaves
//! [`Parser::current`] holding the first token after what it recognized, so
//! the caller can decide on it without another scanner call.
//!
//! # Failure
//!
//! The first error is reported through the [`Diagnostics`] sink at the point
//! where it is detected and then propagated unchanged with `?`. There is no
//! recovery; [`Parser::run`] drains the rest of the input so every line still
//! gets echoed.

use std::fmt;

use tracing::debug;

use crate::report::{failure_message, Diagnostics, Transcript};
use crate::scanner::line::{LineReader, LineSource};
use crate::scanner::token::{ScanError, ScanToken, TokenKind};
use crate::scanner::{ReservedWords, Scanner};
use crate::table::{HashTable, Insertion};

/// Declared variables, each stored with the [`TokenKind::Identifier`] category
pub type SymbolTable = HashTable<TokenKind>;

/// What an identifier list does with each name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentMode {
    /// Insert into the symbol table; redeclaration is an error
    Declare,
    /// Look up in the symbol table; unknown names are an error
    Reference,
}

/// Category of the first error found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token flagged by the scanner reached a rule that needed it
    Lexical(ScanError),
    AlreadyDeclared,
    UndeclaredIdentifier,
    TableFull,
    /// A rule found a different token than the one it expected
    UnexpectedToken,
    /// Input ended before the program did
    EndOfInput,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The failing rule's own message
    pub message: String,
    /// Token under the cursor when the rule failed
    pub token: ScanToken,
    pub line: usize,
}

impl ParseError {
    /// Message as shown to the user.
    pub fn display_message(&self) -> String {
        failure_message(&self.message, &self.token)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}: {} (current token: '{}')",
            self.line,
            self.display_message(),
            self.token.name()
        )
    }
}

impl std::error::Error for ParseError {}

/// Everything left over after [`Parser::run`]
#[derive(Debug)]
pub struct ParseOutcome<D> {
    pub result: Result<(), ParseError>,
    pub program_name: Option<String>,
    pub symbols: SymbolTable,
    pub diagnostics: D,
    /// Number of lines read, drained ones included
    pub lines: usize,
}

impl<D> ParseOutcome<D> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.result.as_ref().err()
    }
}

/// Recursive descent parser and the state of one parse session
pub struct Parser<S, D> {
    pub(crate) scanner: Scanner<S>,
    pub(crate) symbols: SymbolTable,
    /// The token under consideration; holds an end-of-input token before the
    /// first scanner call
    pub(crate) current: ScanToken,
    pub(crate) diagnostics: D,
    pub(crate) program_name: Option<String>,
}

impl<'a> Parser<LineReader<&'a [u8]>, Transcript> {
    /// Parser over in-memory text recording into a [`Transcript`].
    pub fn from_source(source: &'a str) -> Self {
        Parser::new(Scanner::from_source(source), Transcript::new())
    }
}

impl<S: LineSource, D: Diagnostics> Parser<S, D> {
    pub fn new(scanner: Scanner<S>, diagnostics: D) -> Self {
        Parser {
            scanner,
            symbols: SymbolTable::new(),
            current: ScanToken::end_of_input(),
            diagnostics,
            program_name: None,
        }
    }

    /// Parser reading `source` with a custom vocabulary.
    pub fn with_reserved(source: S, reserved: ReservedWords, diagnostics: D) -> Self {
        Parser::new(Scanner::new(source, reserved), diagnostics)
    }

    /// Parse a whole program, drain the input on failure, and hand back the
    /// session's results.
    pub fn run(mut self) -> ParseOutcome<D> {
        let result = self.parse_program();
        if let Err(err) = &result {
            debug!(kind = ?err.kind, line = err.line, "parse failed, draining input");
            self.scanner.drain(&mut self.diagnostics);
        }

        ParseOutcome {
            result,
            program_name: self.program_name,
            symbols: self.symbols,
            diagnostics: self.diagnostics,
            lines: self.scanner.line_number(),
        }
    }

    pub fn current(&self) -> &ScanToken {
        &self.current
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    // ===== Helper methods =====

    /// Replace the current token with the next one from the scanner.
    pub(crate) fn advance(&mut self) {
        self.current = self.scanner.next_token(&mut self.diagnostics);
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind())
    }

    /// Report `message` at the current token and build the matching error.
    pub(crate) fn fail(&mut self, kind: ParseErrorKind, message: &str) -> ParseError {
        self.diagnostics.report(message, &self.current);
        ParseError {
            kind,
            message: message.to_string(),
            token: self.current.clone(),
            line: self.scanner.line_number(),
        }
    }

    /// Failure for a token the rule did not expect.
    ///
    /// A token carrying a scanner flag fails with that flag instead.
    pub(crate) fn unexpected(&mut self, message: &str) -> ParseError {
        let kind = match self.current.error {
            Some(ScanError::EndOfInput) => ParseErrorKind::EndOfInput,
            Some(err) => ParseErrorKind::Lexical(err),
            None => ParseErrorKind::UnexpectedToken,
        };
        self.fail(kind, message)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            Ok(())
        } else {
            Err(self.unexpected(message))
        }
    }

    /// Require a clean identifier at the cursor.
    pub(crate) fn expect_identifier(&mut self, message: &str) -> Result<(), ParseError> {
        self.expect(TokenKind::Identifier, message)?;
        self.expect_clean("Invalid identifier format")
    }

    /// Require the current token to carry no scanner flag.
    pub(crate) fn expect_clean(&mut self, message: &str) -> Result<(), ParseError> {
        match self.current.error {
            None => Ok(()),
            Some(ScanError::EndOfInput) => Err(self.fail(ParseErrorKind::EndOfInput, message)),
            Some(err) => Err(self.fail(ParseErrorKind::Lexical(err), message)),
        }
    }

    /// Declare or resolve the identifier at the cursor.
    pub(crate) fn bind_identifier(&mut self, mode: IdentMode) -> Result<(), ParseError> {
        let name = self.current.name().to_string();
        match mode {
            IdentMode::Declare => match self.symbols.insert(&name, TokenKind::Identifier) {
                Insertion::Inserted(slot) => {
                    debug!(%name, slot, "declared");
                    Ok(())
                }
                Insertion::Duplicate(_) => Err(self.fail(
                    ParseErrorKind::AlreadyDeclared,
                    "Identifier already in symbol table",
                )),
                Insertion::Full => Err(self.fail(ParseErrorKind::TableFull, "Symbol table full!")),
            },
            IdentMode::Reference => {
                if self.symbols.contains(&name) {
                    Ok(())
                } else {
                    Err(self.fail(
                        ParseErrorKind::UndeclaredIdentifier,
                        "Identifier not declared",
                    ))
                }
            }
        }
    }
}
