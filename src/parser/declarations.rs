//! Declaration parsing implementation
//!
//! This module handles the program header and the `VAR` section:
//!
//! - Program header: `PROGRAM name`
//! - Variable declarations: `A, B : INTEGER`
//! - Identifier lists, in both declaring and referencing mode
//!
//! # Grammar
//!
//! ```text
//! program      ::= "PROGRAM" header "VAR" declarations "BEGIN" statements "END."
//! header       ::= identifier
//! declarations ::= declaration { ";" declaration }
//! declaration  ::= identifier_list ":" type
//! type         ::= "INTEGER"
//! identifiers  ::= identifier { "," identifier }
//! ```
//!
//! The program name is checked but never entered into the symbol table, so
//! the table holds exactly the declared variables.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use tracing::debug;

use crate::parser::parse::{IdentMode, ParseError, Parser};
use crate::report::Diagnostics;
use crate::scanner::line::LineSource;
use crate::scanner::token::TokenKind;

impl<S: LineSource, D: Diagnostics> Parser<S, D> {
    /// Parse a complete program, starting from an unread input.
    pub fn parse_program(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.expect(TokenKind::Program, "Expected PROGRAM")?;
        self.parse_header()?;

        self.advance();
        self.expect(TokenKind::Var, "Expected VAR")?;
        self.parse_declarations()?;

        self.expect(TokenKind::Begin, "Expected BEGIN")?;
        self.parse_statement_list()?;
        self.expect(TokenKind::EndDot, "Expected END.")?;

        debug!(
            program = self.program_name.as_deref().unwrap_or_default(),
            symbols = self.symbols.len(),
            "program accepted"
        );
        Ok(())
    }

    /// Parse the program name after `PROGRAM`
    fn parse_header(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.expect_identifier("Expected program name")?;
        self.program_name = Some(self.current.name().to_string());
        Ok(())
    }

    /// Parse declarations separated by `;`
    ///
    /// Leaves the token after the last type name under the cursor.
    fn parse_declarations(&mut self) -> Result<(), ParseError> {
        self.parse_declaration()?;
        while self.check(TokenKind::Semicolon) {
            self.parse_declaration()?;
        }
        Ok(())
    }

    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        self.parse_identifier_list(IdentMode::Declare)?;
        self.expect(TokenKind::Colon, "Expected :")?;
        self.parse_type()
    }

    fn parse_type(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.expect(TokenKind::Integer, "Expected INTEGER")?;
        self.advance();
        Ok(())
    }

    /// Parse one or more comma-separated identifiers.
    ///
    /// Each name is declared or resolved according to `mode`. A comma must be
    /// followed by another identifier.
    pub(crate) fn parse_identifier_list(&mut self, mode: IdentMode) -> Result<(), ParseError> {
        self.advance();
        self.expect_identifier("Expected variable name")?;
        self.bind_identifier(mode)?;
        self.advance();

        while self.check(TokenKind::Comma) {
            self.advance();
            self.expect_identifier("Expected variable name")?;
            self.bind_identifier(mode)?;
            self.advance();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseErrorKind, Parser};
    use crate::report::Transcript;
    use crate::scanner::token::{ScanError, TokenKind};
    use crate::scanner::LineReader;

    type TestParser<'a> = Parser<LineReader<&'a [u8]>, Transcript>;

    fn parse(source: &str) -> Result<TestParser<'_>, ParseErrorKind> {
        let mut parser = Parser::from_source(source);
        match parser.parse_program() {
            Ok(()) => Ok(parser),
            Err(err) => Err(err.kind),
        }
    }

    #[test]
    fn test_declares_every_variable() {
        let parser = parse("PROGRAM P VAR A, B : INTEGER; C : INTEGER BEGIN A := 1 END.")
            .expect("program should parse");
        let names: Vec<&str> = parser.symbols().entries().map(|(_, e)| e.key.as_str()).collect();
        assert_eq!(names.len(), 3);
        for name in ["A", "B", "C"] {
            assert!(names.contains(&name));
            assert_eq!(
                parser.symbols().get(name).map(|e| e.value),
                Some(TokenKind::Identifier)
            );
        }
        assert_eq!(parser.program_name(), Some("P"));
    }

    #[test]
    fn test_program_name_is_not_a_symbol() {
        let parser = parse("PROGRAM P VAR A : INTEGER BEGIN A := 1 END.").expect("parses");
        assert!(!parser.symbols().contains("P"));
    }

    #[test]
    fn test_redeclaration() {
        assert_eq!(
            parse("PROGRAM P VAR A, A : INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::AlreadyDeclared)
        );
    }

    #[test]
    fn test_missing_pieces() {
        assert_eq!(
            parse("P VAR A : INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::UnexpectedToken)
        );
        assert_eq!(
            parse("PROGRAM P A : INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::UnexpectedToken)
        );
        assert_eq!(
            parse("PROGRAM P VAR A INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::UnexpectedToken)
        );
        assert_eq!(
            parse("PROGRAM P VAR A : REAL BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::UnexpectedToken)
        );
    }

    #[test]
    fn test_trailing_comma_in_list() {
        assert_eq!(
            parse("PROGRAM P VAR A, : INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::UnexpectedToken)
        );
    }

    #[test]
    fn test_flagged_program_name() {
        assert_eq!(
            parse("PROGRAM P.Q VAR A : INTEGER BEGIN A := 1 END.").err(),
            Some(ParseErrorKind::Lexical(ScanError::InvalidIdentifier))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").err(), Some(ParseErrorKind::EndOfInput));
    }
}
