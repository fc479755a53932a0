//! Statement parsing implementation
//!
//! This module handles everything between `BEGIN` and `END.`:
//!
//! - Assignment: `A := expression`
//! - Input and output: `READ(A, B)`, `WRITE(A)`
//! - Counted loops: `FOR I := 1 TO 10 DO body`
//!
//! # Grammar
//!
//! ```text
//! statements ::= statement { ";" statement }
//! statement  ::= assign | read | write | for
//! assign     ::= identifier ":=" expression
//! read       ::= "READ" "(" identifiers ")"
//! write      ::= "WRITE" "(" identifiers ")"
//! for        ::= "FOR" identifier ":=" expression "TO" expression "DO" body
//! body       ::= statement | "BEGIN" statements "END"
//! ```
//!
//! Every identifier used here must already be declared.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{IdentMode, ParseError, Parser};
use crate::report::Diagnostics;
use crate::scanner::line::LineSource;
use crate::scanner::token::TokenKind;

/// Tokens that can open a statement
const STATEMENT_START: [TokenKind; 4] = [
    TokenKind::Identifier,
    TokenKind::Read,
    TokenKind::Write,
    TokenKind::For,
];

impl<S: LineSource, D: Diagnostics> Parser<S, D> {
    /// Parse statements separated by `;`
    pub(crate) fn parse_statement_list(&mut self) -> Result<(), ParseError> {
        self.parse_statement()?;
        while self.check(TokenKind::Semicolon) {
            self.parse_statement()?;
        }
        Ok(())
    }

    /// Fetch a token and parse the statement it opens
    fn parse_statement(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.parse_statement_at_current()
    }

    /// Parse the statement opened by the token already under the cursor
    fn parse_statement_at_current(&mut self) -> Result<(), ParseError> {
        match self.current.kind() {
            TokenKind::Identifier => self.parse_assignment(),
            TokenKind::Read | TokenKind::Write => self.parse_io_statement(),
            TokenKind::For => self.parse_for(),
            _ => Err(self.unexpected("Expected statement")),
        }
    }

    fn parse_assignment(&mut self) -> Result<(), ParseError> {
        self.expect_identifier("Expected variable name")?;
        self.bind_identifier(IdentMode::Reference)?;

        self.advance();
        self.expect(TokenKind::ColonEquals, "Expected :=")?;
        self.parse_expression()
    }

    /// Parse `READ(...)` or `WRITE(...)`; both take a list of declared names
    fn parse_io_statement(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.expect(TokenKind::LeftParen, "Expected (")?;
        self.parse_identifier_list(IdentMode::Reference)?;
        self.expect(TokenKind::RightParen, "Expected )")?;
        self.advance();
        Ok(())
    }

    fn parse_for(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.expect_identifier("Expected index variable")?;
        self.bind_identifier(IdentMode::Reference)?;

        self.advance();
        self.expect(TokenKind::ColonEquals, "Expected :=")?;
        self.parse_expression()?;
        self.expect(TokenKind::To, "Expected TO")?;
        self.parse_expression()?;
        self.expect(TokenKind::Do, "Expected DO")?;
        self.parse_body()
    }

    /// Parse a loop body: one statement, or a `BEGIN ... END` block
    fn parse_body(&mut self) -> Result<(), ParseError> {
        self.advance();
        if self.check(TokenKind::Begin) {
            self.parse_statement_list()?;
            self.expect(TokenKind::End, "Expected END")?;
            self.advance();
            Ok(())
        } else if self.check_any(&STATEMENT_START) {
            // the statement's first token is already here
            self.parse_statement_at_current()
        } else {
            Err(self.unexpected("Expected statement or BEGIN"))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseErrorKind, Parser};
    use crate::scanner::token::{ScanError, TokenKind};

    const HEADER: &str = "PROGRAM P VAR A, B, I : INTEGER BEGIN ";

    fn parse_body(body: &str) -> Result<(), ParseErrorKind> {
        let source = format!("{HEADER}{body} END.");
        Parser::from_source(&source)
            .parse_program()
            .map_err(|err| err.kind)
    }

    #[test]
    fn test_statement_forms() {
        assert_eq!(parse_body("A := 1"), Ok(()));
        assert_eq!(parse_body("READ(A, B); WRITE(A)"), Ok(()));
        assert_eq!(parse_body("FOR I := 1 TO 10 DO A := A + I"), Ok(()));
        assert_eq!(
            parse_body("FOR I := 1 TO B DO BEGIN READ(A); WRITE(A, I) END"),
            Ok(())
        );
    }

    #[test]
    fn test_single_statement_body_is_followed_by_more() {
        assert_eq!(
            parse_body("FOR I := 1 TO 2 DO READ(A); WRITE(A)"),
            Ok(())
        );
    }

    #[test]
    fn test_nested_loops() {
        assert_eq!(
            parse_body("FOR I := 1 TO 2 DO FOR A := I TO 3 DO BEGIN B := A * I END; WRITE(B)"),
            Ok(())
        );
    }

    #[test]
    fn test_undeclared_targets() {
        assert_eq!(parse_body("C := 1"), Err(ParseErrorKind::UndeclaredIdentifier));
        assert_eq!(parse_body("WRITE(C)"), Err(ParseErrorKind::UndeclaredIdentifier));
        assert_eq!(
            parse_body("FOR C := 1 TO 2 DO A := 1"),
            Err(ParseErrorKind::UndeclaredIdentifier)
        );
    }

    #[test]
    fn test_malformed_statements() {
        assert_eq!(parse_body("A + 1"), Err(ParseErrorKind::UnexpectedToken));
        assert_eq!(parse_body("WRITE A"), Err(ParseErrorKind::UnexpectedToken));
        assert_eq!(parse_body("READ(A"), Err(ParseErrorKind::UnexpectedToken));
        assert_eq!(
            parse_body("FOR I := 1 DO A := 1"),
            Err(ParseErrorKind::UnexpectedToken)
        );
        assert_eq!(
            parse_body("FOR I := 1 TO 2 DO BEGIN A := 1"),
            Err(ParseErrorKind::UnexpectedToken)
        );
        assert_eq!(parse_body("BEGIN A := 1 END"), Err(ParseErrorKind::UnexpectedToken));
    }

    #[test]
    fn test_flagged_assignment_target() {
        assert_eq!(
            parse_body("ABCDEFGHIJ := 1"),
            Err(ParseErrorKind::Lexical(ScanError::TokenTooLong))
        );
    }

    #[test]
    fn test_missing_end_dot() {
        let mut parser = Parser::from_source("PROGRAM P VAR A : INTEGER BEGIN A := 1");
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EndOfInput);
        assert_eq!(err.token.kind(), TokenKind::EndOfInput);
    }
}
