//! Expression parsing implementation
//!
//! Expressions are integer arithmetic over declared variables and literals.
//! Nothing is evaluated; the parser only checks shape and that every name
//! used is declared.
//!
//! # Grammar
//!
//! ```text
//! expression ::= term { ("+" | "-") term }
//! term       ::= factor { ("*" | "DIV") factor }
//! factor     ::= identifier | integer | "(" expression ")"
//!              | ("+" | "-") (identifier | integer)
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{IdentMode, ParseError, Parser};
use crate::report::Diagnostics;
use crate::scanner::line::LineSource;
use crate::scanner::token::TokenKind;

const ADDITIVE: [TokenKind; 2] = [TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: [TokenKind; 2] = [TokenKind::Star, TokenKind::Div];

impl<S: LineSource, D: Diagnostics> Parser<S, D> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<(), ParseError> {
        self.parse_term()?;
        while self.check_any(&ADDITIVE) {
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> Result<(), ParseError> {
        self.parse_factor()?;
        while self.check_any(&MULTIPLICATIVE) {
            self.parse_factor()?;
        }
        Ok(())
    }

    fn parse_factor(&mut self) -> Result<(), ParseError> {
        self.advance();
        match self.current.kind() {
            TokenKind::Identifier | TokenKind::IntLiteral => self.parse_operand(),
            TokenKind::LeftParen => {
                self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected )")?;
                self.advance();
                Ok(())
            }
            TokenKind::Plus | TokenKind::Minus => {
                // a sign applies to a single operand only
                self.advance();
                if self.check_any(&[TokenKind::Identifier, TokenKind::IntLiteral]) {
                    self.parse_operand()
                } else {
                    Err(self.unexpected("Expected identifier or integer"))
                }
            }
            _ => Err(self.unexpected("Expected identifier, literal, or expression")),
        }
    }

    /// Accept the variable or literal under the cursor
    fn parse_operand(&mut self) -> Result<(), ParseError> {
        if self.check(TokenKind::Identifier) {
            self.expect_identifier("Expected variable name")?;
            self.bind_identifier(IdentMode::Reference)?;
        } else {
            self.expect_clean("Invalid integer literal")?;
        }
        self.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{ParseErrorKind, Parser};
    use crate::scanner::token::ScanError;

    fn parse_assignment(expression: &str) -> Result<(), ParseErrorKind> {
        let source = format!("PROGRAM P VAR A, B : INTEGER BEGIN A := {expression} END.");
        Parser::from_source(&source)
            .parse_program()
            .map_err(|err| err.kind)
    }

    #[test]
    fn test_arithmetic() {
        for expression in [
            "1",
            "B",
            "A + B - 3",
            "A * B DIV 2",
            "A / 2",
            "(A + 1) * (B - 2)",
            "((B))",
            "-1 + +B",
            "A * -B",
        ] {
            assert_eq!(parse_assignment(expression), Ok(()), "{expression}");
        }
    }

    #[test]
    fn test_bad_operands() {
        assert_eq!(parse_assignment("C + 1"), Err(ParseErrorKind::UndeclaredIdentifier));
        assert_eq!(
            parse_assignment("1 + 2X"),
            Err(ParseErrorKind::Lexical(ScanError::InvalidInteger))
        );
        assert_eq!(parse_assignment("A +"), Err(ParseErrorKind::UnexpectedToken));
        assert_eq!(parse_assignment("- (A)"), Err(ParseErrorKind::UnexpectedToken));
        assert_eq!(parse_assignment("(A + 1"), Err(ParseErrorKind::UnexpectedToken));
    }
}
