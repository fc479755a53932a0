//! Token categories and the annotated token handed to the grammar

use std::fmt;
use thiserror::Error;

/// Every terminal category the grammar distinguishes.
///
/// Reserved words and operators carry the numeric codes used by reserved-word
/// definition listings; [`TokenKind::Identifier`] and
/// [`TokenKind::IntLiteral`] are assigned by the scanner to user tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Program,
    Var,
    Begin,
    End,
    EndDot,
    Integer,
    For,
    Read,
    Write,
    To,
    Do,
    Semicolon,
    Colon,
    Comma,
    ColonEquals,
    Plus,
    Minus,
    Star,
    Div,
    LeftParen,
    RightParen,
    Identifier,
    IntLiteral,

    // No more input
    EndOfInput,
}

impl TokenKind {
    /// Categories that can appear in a reserved-word listing.
    pub const RESERVED: [TokenKind; 21] = [
        TokenKind::Program,
        TokenKind::Var,
        TokenKind::Begin,
        TokenKind::End,
        TokenKind::EndDot,
        TokenKind::Integer,
        TokenKind::For,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::To,
        TokenKind::Do,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::ColonEquals,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Div,
        TokenKind::LeftParen,
        TokenKind::RightParen,
    ];

    /// Numeric category code.
    pub fn code(self) -> u8 {
        match self {
            TokenKind::EndOfInput => 0,
            TokenKind::Program => 1,
            TokenKind::Var => 2,
            TokenKind::Begin => 3,
            TokenKind::End => 4,
            TokenKind::EndDot => 5,
            TokenKind::Integer => 6,
            TokenKind::For => 7,
            TokenKind::Read => 8,
            TokenKind::Write => 9,
            TokenKind::To => 10,
            TokenKind::Do => 11,
            TokenKind::Semicolon => 12,
            TokenKind::Colon => 13,
            TokenKind::Comma => 14,
            TokenKind::ColonEquals => 15,
            TokenKind::Plus => 16,
            TokenKind::Minus => 17,
            TokenKind::Star => 18,
            TokenKind::Div => 19,
            TokenKind::LeftParen => 20,
            TokenKind::RightParen => 21,
            TokenKind::Identifier => 22,
            TokenKind::IntLiteral => 23,
        }
    }

    /// Inverse of [`TokenKind::code`] for reserved categories only.
    pub fn from_reserved_code(code: u8) -> Option<TokenKind> {
        TokenKind::RESERVED.into_iter().find(|kind| kind.code() == code)
    }

    pub fn is_reserved(self) -> bool {
        !matches!(
            self,
            TokenKind::Identifier | TokenKind::IntLiteral | TokenKind::EndOfInput
        )
    }
}

impl From<TokenKind> for u8 {
    fn from(kind: TokenKind) -> u8 {
        kind.code()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Program => write!(f, "'PROGRAM'"),
            TokenKind::Var => write!(f, "'VAR'"),
            TokenKind::Begin => write!(f, "'BEGIN'"),
            TokenKind::End => write!(f, "'END'"),
            TokenKind::EndDot => write!(f, "'END.'"),
            TokenKind::Integer => write!(f, "'INTEGER'"),
            TokenKind::For => write!(f, "'FOR'"),
            TokenKind::Read => write!(f, "'READ'"),
            TokenKind::Write => write!(f, "'WRITE'"),
            TokenKind::To => write!(f, "'TO'"),
            TokenKind::Do => write!(f, "'DO'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::ColonEquals => write!(f, "':='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Div => write!(f, "'DIV'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::IntLiteral => write!(f, "integer literal"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Raw token text together with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub name: String,
    pub kind: TokenKind,
}

impl Lexeme {
    pub fn new(name: impl Into<String>, kind: TokenKind) -> Self {
        Lexeme {
            name: name.into(),
            kind,
        }
    }
}

/// Lexical problems attached to a token at classification time.
///
/// These never stop the scanner; they ride along on the returned
/// [`ScanToken`] until the grammar decides what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Token too long.")]
    TokenTooLong,
    #[error("Invalid identifier.")]
    InvalidIdentifier,
    #[error("Invalid integer.")]
    InvalidInteger,
    #[error("Unexpected end of input.")]
    EndOfInput,
}

impl ScanError {
    /// Numeric error code; `0` is reserved for "no error".
    pub fn code(self) -> i8 {
        match self {
            ScanError::EndOfInput => -1,
            ScanError::TokenTooLong => 1,
            ScanError::InvalidIdentifier => 2,
            ScanError::InvalidInteger => 3,
        }
    }
}

/// One scanner result: a lexeme plus an optional lexical error.
///
/// The grammar must look at [`ScanToken::error`] before trusting the lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanToken {
    pub lexeme: Lexeme,
    pub error: Option<ScanError>,
}

impl ScanToken {
    pub fn new(lexeme: Lexeme) -> Self {
        ScanToken {
            lexeme,
            error: None,
        }
    }

    pub fn with_error(lexeme: Lexeme, error: ScanError) -> Self {
        ScanToken {
            lexeme,
            error: Some(error),
        }
    }

    pub fn end_of_input() -> Self {
        ScanToken::with_error(Lexeme::new("", TokenKind::EndOfInput), ScanError::EndOfInput)
    }

    pub fn kind(&self) -> TokenKind {
        self.lexeme.kind
    }

    pub fn name(&self) -> &str {
        &self.lexeme.name
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.lexeme.kind == kind
    }

    pub fn is_end_of_input(&self) -> bool {
        self.error == Some(ScanError::EndOfInput)
    }

    /// Numeric error code, `0` when the token is clean.
    pub fn error_code(&self) -> i8 {
        self.error.map_or(0, ScanError::code)
    }

    /// The token's own diagnostic message, if any.
    pub fn message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

impl fmt::Display for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme.name),
            TokenKind::IntLiteral => write!(f, "integer literal {}", self.lexeme.name),
            kind => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MESSAGE_LEN;

    #[test]
    fn test_reserved_codes_round_trip() {
        for kind in TokenKind::RESERVED {
            assert_eq!(TokenKind::from_reserved_code(kind.code()), Some(kind));
            assert!(kind.is_reserved());
        }
        assert_eq!(TokenKind::from_reserved_code(22), None);
        assert_eq!(TokenKind::from_reserved_code(0), None);
    }

    #[test]
    fn test_messages_fit_bound() {
        for error in [
            ScanError::TokenTooLong,
            ScanError::InvalidIdentifier,
            ScanError::InvalidInteger,
            ScanError::EndOfInput,
        ] {
            assert!(error.to_string().len() <= MAX_MESSAGE_LEN);
        }
    }

    #[test]
    fn test_error_code() {
        let clean = ScanToken::new(Lexeme::new("X", TokenKind::Identifier));
        assert_eq!(clean.error_code(), 0);
        assert_eq!(clean.message(), None);
        assert_eq!(ScanToken::end_of_input().error_code(), -1);
        assert!(ScanToken::end_of_input().is_end_of_input());
    }
}
