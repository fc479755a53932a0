//! Diagnostic stream
//!
//! Everything the user sees about a parse goes through a [`Diagnostics`]
//! sink: the echo of each ingested line and the failure block for the first
//! error. Two sinks are provided:
//!
//! - [`Console`] writes the report straight to a terminal, optionally styled
//!   with crossterm
//! - [`Transcript`] records events for tests and for the report viewer
//!
//! The end-of-run banner and the slot-by-slot table dump are rendered by
//! [`TableDump`] and [`Console::banner`].

use std::fmt;
use std::io::{self, Write};

use crossterm::style::Stylize;
use tracing::warn;

use crate::scanner::token::ScanToken;
use crate::table::HashTable;

/// Sink for echoed lines and rule failures.
///
/// Implementations never fail; the grammar alone decides when to stop.
pub trait Diagnostics {
    /// A freshly read line, before case folding, with its 1-based number.
    fn echo_line(&mut self, number: usize, raw: &str);

    /// A rule failure at `token`.
    fn report(&mut self, message: &str, token: &ScanToken);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn echo_line(&mut self, number: usize, raw: &str) {
        (**self).echo_line(number, raw)
    }

    fn report(&mut self, message: &str, token: &ScanToken) {
        (**self).report(message, token)
    }
}

/// Message shown for a failure: the token's own message wins over the
/// rule's.
pub fn failure_message(message: &str, token: &ScanToken) -> String {
    token.message().unwrap_or_else(|| message.to_string())
}

/// Recorded diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line { number: usize, text: String },
    Failure { message: String, token: ScanToken },
}

/// [`Diagnostics`] sink that keeps everything in memory
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub events: Vec<Event>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Echoed lines as `(number, raw text)`.
    pub fn echoed_lines(&self) -> Vec<(usize, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Line { number, text } => Some((*number, text.clone())),
                Event::Failure { .. } => None,
            })
            .collect()
    }

    /// Reported failures as `(message, token name)`.
    pub fn failures(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Failure { message, token } => {
                    Some((message.clone(), token.name().to_string()))
                }
                Event::Line { .. } => None,
            })
            .collect()
    }

    /// Number of the last line echoed before the first failure.
    pub fn failure_line(&self) -> Option<usize> {
        let mut last_line = None;
        for event in &self.events {
            match event {
                Event::Line { number, .. } => last_line = Some(*number),
                Event::Failure { .. } => return last_line,
            }
        }
        None
    }

    /// Feed every recorded event, in order, to another sink.
    pub fn replay<D: Diagnostics + ?Sized>(&self, sink: &mut D) {
        for event in &self.events {
            match event {
                Event::Line { number, text } => sink.echo_line(*number, text),
                Event::Failure { message, token } => sink.report(message, token),
            }
        }
    }
}

impl Diagnostics for Transcript {
    fn echo_line(&mut self, number: usize, raw: &str) {
        self.events.push(Event::Line {
            number,
            text: raw.to_string(),
        });
    }

    fn report(&mut self, message: &str, token: &ScanToken) {
        self.events.push(Event::Failure {
            message: failure_message(message, token),
            token: token.clone(),
        });
    }
}

/// [`Diagnostics`] sink that prints the report as it happens
pub struct Console<W: Write> {
    out: W,
    color: bool,
    write_failed: bool,
}

impl Console<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Console::new(io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Console {
            out,
            color,
            write_failed: false,
        }
    }

    /// Whether any write to the output has failed.
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    /// Keep going after a failed write; only the first one is logged.
    fn check(&mut self, written: io::Result<()>) {
        if let Err(err) = written {
            if !self.write_failed {
                warn!("could not write report: {}", err);
            }
            self.write_failed = true;
        }
    }

    /// Final success/failure line.
    pub fn banner(&mut self, success: bool) {
        let text = if success {
            "Parse successful!"
        } else {
            "Parse failure!"
        };
        let written = if !self.color {
            writeln!(self.out, "\n\n{}", text)
        } else if success {
            writeln!(self.out, "\n\n{}", text.green().bold())
        } else {
            writeln!(self.out, "\n\n{}", text.red().bold())
        };
        self.check(written);
    }

    /// Slot-by-slot dump of `table` under `title`.
    pub fn dump<V: Copy + Into<u8>, const N: usize>(&mut self, title: &str, table: &HashTable<V, N>) {
        let written = if self.color {
            writeln!(self.out, "\n{}", format!("{}:", title).bold())
        } else {
            writeln!(self.out, "\n{}:", title)
        };
        self.check(written);
        let written = write!(self.out, "{}", TableDump(table));
        self.check(written);
        let flushed = self.out.flush();
        self.check(flushed);
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Diagnostics for Console<W> {
    fn echo_line(&mut self, number: usize, raw: &str) {
        let written = if self.color {
            writeln!(self.out, "\n{}\t: {}", number.to_string().dark_grey(), raw)
        } else {
            writeln!(self.out, "\n{}\t: {}", number, raw)
        };
        self.check(written);
    }

    fn report(&mut self, message: &str, token: &ScanToken) {
        let message = failure_message(message, token);
        let rule = "----------";
        let written = if self.color {
            writeln!(
                self.out,
                "\n{}\n{} {}\n{} {}\n{}",
                rule.red(),
                "(!) FAIL:".red().bold(),
                message,
                "(!) CURRENT TOKEN:".red().bold(),
                token.name(),
                rule.red()
            )
        } else {
            writeln!(
                self.out,
                "\n{}\n(!) FAIL: {}\n(!) CURRENT TOKEN: {}\n{}",
                rule,
                message,
                token.name(),
                rule
            )
        };
        self.check(written);
    }
}

/// [`fmt::Display`] adapter printing every slot of a table
pub struct TableDump<'a, V, const N: usize>(pub &'a HashTable<V, N>);

impl<V: Copy + Into<u8>, const N: usize> fmt::Display for TableDump<'_, V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tHash\tName\tType")?;
        writeln!(f, "\t----\t-----\t------------")?;
        for (index, slot) in self.0.slots() {
            match slot {
                Some(entry) => {
                    let code: u8 = entry.value.into();
                    writeln!(f, "\t{}\t{}\t{}", index, entry.key, code)?
                }
                None => writeln!(f, "\t{}", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::token::{Lexeme, ScanError, TokenKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_message_takes_precedence() {
        let clean = ScanToken::new(Lexeme::new("X", TokenKind::Identifier));
        let flagged = ScanToken::with_error(
            Lexeme::new("2X", TokenKind::IntLiteral),
            ScanError::InvalidInteger,
        );
        assert_eq!(failure_message("Expected :=", &clean), "Expected :=");
        assert_eq!(failure_message("Expected :=", &flagged), "Invalid integer.");
    }

    #[test]
    fn test_console_plain_output() {
        let mut console = Console::new(Vec::new(), false);
        console.echo_line(1, "program p");
        console.report(
            "Expected VAR",
            &ScanToken::new(Lexeme::new("BEGIN", TokenKind::Begin)),
        );
        console.banner(false);
        assert!(!console.write_failed());
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "\n1\t: program p\n\n----------\n(!) FAIL: Expected VAR\n(!) CURRENT TOKEN: BEGIN\n----------\n\n\nParse failure!\n"
        );
    }

    #[test]
    fn test_dump_lists_every_slot() {
        let mut table: HashTable<TokenKind, 3> = HashTable::new();
        table.insert("A", TokenKind::Identifier);
        let dump = TableDump(&table).to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 5);
        // "A" hashes to (65 + 7 * 32) % 3 = 1
        assert_eq!(lines[2], "\t0");
        assert_eq!(lines[3], "\t1\tA\t22");
        assert_eq!(lines[4], "\t2");
    }

    #[test]
    fn test_transcript_failure_line() {
        let mut transcript = Transcript::new();
        transcript.echo_line(1, "a");
        transcript.echo_line(2, "b");
        transcript.report("Expected END.", &ScanToken::end_of_input());
        transcript.echo_line(3, "c");
        assert_eq!(transcript.failure_line(), Some(2));
        assert_eq!(
            transcript.failures(),
            vec![("Unexpected end of input.".to_string(), String::new())]
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_recorded_not_raised() {
        let mut console = Console::new(ClosedPipe, false);
        assert!(!console.write_failed());

        console.echo_line(1, "program p");
        console.report("Expected VAR", &ScanToken::end_of_input());
        console.banner(false);
        assert!(console.write_failed());
    }

    #[test]
    fn test_replay_matches_direct_output() {
        let token = ScanToken::new(Lexeme::new("C", TokenKind::Identifier));

        let mut direct = Console::new(Vec::new(), false);
        direct.echo_line(1, "write(c)");
        direct.report("Identifier not declared", &token);

        let mut transcript = Transcript::new();
        transcript.echo_line(1, "write(c)");
        transcript.report("Identifier not declared", &token);
        let mut replayed = Console::new(Vec::new(), false);
        transcript.replay(&mut replayed);

        assert_eq!(direct.into_inner(), replayed.into_inner());
    }
}
