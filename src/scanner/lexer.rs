//! Token assembly
//!
//! [`Scanner::next_token`] is the only way the grammar gets tokens. Each call
//! refills the line when needed, builds one lexeme, skips comments across as
//! many lines as it takes, and classifies what it built:
//!
//! - a lexeme found in the reserved-word table becomes that table's entry
//! - a digit-led lexeme becomes an integer literal, flagged when malformed
//! - anything else becomes an identifier, flagged when malformed or too long
//!
//! Flags never stop the scanner. The token is returned with its error
//! attached and the grammar decides what to do.

use tracing::trace;

use crate::report::Diagnostics;

use super::builder::{self, build_token, BuildOutcome};
use super::classify::{is_identifier, is_integer};
use super::line::{Line, LineReader, LineSource};
use super::reserved::ReservedWords;
use super::token::{Lexeme, ScanError, ScanToken, TokenKind};

/// Pull-based tokenizer over a [`LineSource`]
pub struct Scanner<S> {
    source: S,
    line: Line,
    reserved: ReservedWords,
}

impl<'a> Scanner<LineReader<&'a [u8]>> {
    /// Scanner over in-memory text with the built-in vocabulary.
    pub fn from_source(source: &'a str) -> Self {
        Scanner::new(LineReader::from_source(source), ReservedWords::builtin())
    }
}

impl<S: LineSource> Scanner<S> {
    pub fn new(source: S, reserved: ReservedWords) -> Self {
        Scanner {
            source,
            line: Line::new(),
            reserved,
        }
    }

    /// Produce exactly one token.
    ///
    /// Returns a token flagged [`ScanError::EndOfInput`] once the input is
    /// used up, including when it runs out inside a comment.
    pub fn next_token<D: Diagnostics + ?Sized>(&mut self, diagnostics: &mut D) -> ScanToken {
        loop {
            if self.line.is_exhausted() {
                if self.line.at_end() {
                    trace!("end of input");
                    return ScanToken::end_of_input();
                }
                self.line.refill(&mut self.source, diagnostics);
                continue;
            }

            let (lexeme, outcome) = build_token(&mut self.line);
            let token = match outcome {
                BuildOutcome::CommentOpen => {
                    if self.skip_comment(diagnostics) {
                        continue;
                    }
                    trace!("input ended inside a comment");
                    return ScanToken::end_of_input();
                }
                BuildOutcome::Ordinary if lexeme.is_empty() => continue,
                BuildOutcome::Integer { truncated } => self.classify_integer(lexeme, truncated),
                BuildOutcome::Ordinary => self.classify_word(lexeme, false),
                BuildOutcome::TooLong => self.classify_word(lexeme, true),
            };

            trace!(
                line = self.line.line_number(),
                name = %token.lexeme.name,
                code = token.kind().code(),
                error = token.error_code(),
                "token"
            );
            return token;
        }
    }

    /// Skip a comment whose opener was just consumed.
    ///
    /// Returns `false` if the input ended before the closer; the rest of the
    /// input is consumed in that case.
    fn skip_comment<D: Diagnostics + ?Sized>(&mut self, diagnostics: &mut D) -> bool {
        loop {
            if builder::skip_comment(&mut self.line) {
                return true;
            }
            if self.line.at_end() {
                self.line.skip_to_end();
                return false;
            }
            self.line.refill(&mut self.source, diagnostics);
        }
    }

    fn classify_integer(&mut self, lexeme: String, truncated: bool) -> ScanToken {
        let error = if truncated {
            self.line.skip_to_stopper();
            Some(ScanError::TokenTooLong)
        } else if !is_integer(&lexeme) {
            Some(ScanError::InvalidInteger)
        } else {
            None
        };
        ScanToken {
            lexeme: Lexeme::new(lexeme, TokenKind::IntLiteral),
            error,
        }
    }

    fn classify_word(&mut self, lexeme: String, too_long: bool) -> ScanToken {
        // an overlong word whose first characters spell a reserved word is
        // that reserved word; the overflow is left for the next call
        if let Some(entry) = self.reserved.get(&lexeme) {
            return ScanToken::new(Lexeme::new(entry.key.clone(), entry.value));
        }

        let mut error = None;
        if !is_identifier(&lexeme) {
            error = Some(ScanError::InvalidIdentifier);
        }
        if too_long {
            // resynchronize on the next stopper
            self.line.skip_to_stopper();
            error = Some(ScanError::TokenTooLong);
        }
        ScanToken {
            lexeme: Lexeme::new(lexeme, TokenKind::Identifier),
            error,
        }
    }

    /// Read and echo every remaining line without scanning it.
    pub fn drain<D: Diagnostics + ?Sized>(&mut self, diagnostics: &mut D) {
        while !self.line.at_end() {
            self.line.refill(&mut self.source, diagnostics);
        }
        self.line.skip_to_end();
    }

    /// Every remaining token up to, not including, end of input.
    pub fn tokens<D: Diagnostics + ?Sized>(&mut self, diagnostics: &mut D) -> Vec<ScanToken> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token(diagnostics);
            if token.is_end_of_input() {
                return tokens;
            }
            tokens.push(token);
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn line_number(&self) -> usize {
        self.line.line_number()
    }

    pub fn reserved(&self) -> &ReservedWords {
        &self.reserved
    }
}
