//! Lexeme extraction from the current line
//!
//! [`build_token`] pulls the raw text of the next token off a [`Line`]
//! without classifying it. Classification against the reserved-word table
//! happens one level up, in the scanner.
//!
//! # Rules
//!
//! After skipping whitespace, the first character decides:
//!
//! - `(*` opens a comment; both characters are consumed and no lexeme is built
//! - `:=` is taken whole as one lexeme
//! - a digit hands over to [`build_integer`]
//! - any other stopper is a one-character lexeme
//!
//! Anything else accumulates until the next stopper (left unconsumed), the
//! end of the line, or [`MAX_TOKEN_LEN`] is exceeded.

use crate::config::MAX_TOKEN_LEN;

use super::classify::is_stopper;
use super::line::Line;

pub const COMMENT_OPEN: [char; 2] = ['(', '*'];
pub const COMMENT_CLOSE: [char; 2] = ['*', ')'];

/// How [`build_token`] finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A plain lexeme, possibly empty when the line ran out
    Ordinary,
    /// A digit-led lexeme; `truncated` when it hit the length bound before a
    /// stopper
    Integer { truncated: bool },
    /// A comment opener was consumed
    CommentOpen,
    /// The lexeme overflowed the length bound; the cursor sits on the first
    /// character that did not fit
    TooLong,
}

/// Build the next lexeme from `line`.
pub fn build_token(line: &mut Line) -> (String, BuildOutcome) {
    let mut lexeme = String::new();
    line.skip_whitespace();

    let Some(first) = line.peek() else {
        return (lexeme, BuildOutcome::Ordinary);
    };

    if first == COMMENT_OPEN[0] && line.peek_at(1) == Some(COMMENT_OPEN[1]) {
        line.advance_by(2);
        return (lexeme, BuildOutcome::CommentOpen);
    }

    if first == ':' && line.peek_at(1) == Some('=') {
        line.advance_by(2);
        lexeme.push_str(":=");
        return (lexeme, BuildOutcome::Ordinary);
    }

    if first.is_ascii_digit() {
        let truncated = build_integer(line, &mut lexeme);
        return (lexeme, BuildOutcome::Integer { truncated });
    }

    if is_stopper(first) {
        line.advance();
        lexeme.push(first);
        return (lexeme, BuildOutcome::Ordinary);
    }

    let mut length = 0;
    while let Some(ch) = line.peek() {
        if is_stopper(ch) {
            break;
        }
        if length == MAX_TOKEN_LEN {
            return (lexeme, BuildOutcome::TooLong);
        }
        lexeme.push(ch);
        length += 1;
        line.advance();
    }

    (lexeme, BuildOutcome::Ordinary)
}

/// Copy a digit-led lexeme into `lexeme`.
///
/// Non-digit characters are copied as well; the scanner validates the result.
/// Stops at a stopper, the end of the line, or the length bound. Returns
/// whether characters were left over past the bound.
pub fn build_integer(line: &mut Line, lexeme: &mut String) -> bool {
    let mut length = 0;
    while let Some(ch) = line.peek() {
        if is_stopper(ch) {
            return false;
        }
        if length == MAX_TOKEN_LEN {
            return true;
        }
        lexeme.push(ch);
        length += 1;
        line.advance();
    }
    false
}

/// Skip to just past the comment closer on the current line.
///
/// Returns `false` when the closer is not on this line; the caller refills
/// and tries again.
pub fn skip_comment(line: &mut Line) -> bool {
    line.skip_past(COMMENT_CLOSE)
}
