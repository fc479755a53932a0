//! Line-buffered input
//!
//! The scanner never sees the whole source at once. A [`LineSource`] hands
//! out one bounded line at a time and [`Line`] holds the current one together
//! with the scan cursor. Every cursor movement goes through a named method so
//! the cursor can never leave `0..=len`.

use std::io::{self, BufRead};

use tracing::{trace, warn};

use crate::config::MAX_LINE_LEN;
use crate::report::Diagnostics;

use super::classify::{fold_case, is_stopper};

/// Supplier of input lines, terminators already stripped
pub trait LineSource {
    /// Next line, at most [`MAX_LINE_LEN`] characters, or `None` when the
    /// input is used up.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Whether a following call to [`LineSource::next_line`] would return
    /// `None`.
    fn is_exhausted(&mut self) -> io::Result<bool>;
}

/// [`LineSource`] over any buffered reader.
///
/// Physical lines longer than the line bound are handed out in consecutive
/// chunks, each of which counts as a line of its own.
pub struct LineReader<R> {
    reader: R,
    pending: Option<String>,
    max_len: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            reader,
            pending: None,
            max_len: MAX_LINE_LEN,
        }
    }
}

impl<'a> LineReader<&'a [u8]> {
    /// Convenience constructor for in-memory source text.
    pub fn from_source(source: &'a str) -> Self {
        LineReader::new(source.as_bytes())
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut text = match self.pending.take() {
            Some(rest) => rest,
            None => {
                let mut bytes = Vec::new();
                if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                    return Ok(None);
                }
                if bytes.ends_with(b"\n") {
                    bytes.pop();
                    if bytes.ends_with(b"\r") {
                        bytes.pop();
                    }
                }
                // bytes that are not UTF-8 become U+FFFD and fail classification
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };

        if let Some((split, _)) = text.char_indices().nth(self.max_len) {
            self.pending = Some(text.split_off(split));
        }
        Ok(Some(text))
    }

    fn is_exhausted(&mut self) -> io::Result<bool> {
        if self.pending.is_some() {
            return Ok(false);
        }
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

/// The current input line and the scan cursor into it
#[derive(Debug, Clone, Default)]
pub struct Line {
    text: Vec<char>,
    scan_index: usize,
    line_number: usize,
    at_end: bool,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with the next input line.
    ///
    /// The raw line is echoed to `diagnostics` before it is case-folded. Once
    /// the input is exhausted this is a no-op.
    pub fn refill<S, D>(&mut self, source: &mut S, diagnostics: &mut D)
    where
        S: LineSource + ?Sized,
        D: Diagnostics + ?Sized,
    {
        if self.at_end {
            return;
        }

        self.text.clear();
        self.scan_index = 0;

        let raw = match source.next_line() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.at_end = true;
                return;
            }
            Err(err) => {
                warn!("line source failed, treating as end of input: {}", err);
                self.at_end = true;
                return;
            }
        };

        self.line_number += 1;
        diagnostics.echo_line(self.line_number, &raw);
        trace!(line = self.line_number, text = %raw, "refill");

        self.text = raw.chars().collect();
        debug_assert!(self.text.len() <= MAX_LINE_LEN);
        fold_case(&mut self.text);

        self.at_end = match source.is_exhausted() {
            Ok(exhausted) => exhausted,
            Err(err) => {
                warn!("line source failed, treating as end of input: {}", err);
                true
            }
        };
    }

    /// Character under the cursor.
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Character `offset` places past the cursor.
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.scan_index + offset).copied()
    }

    /// Consume and return the character under the cursor.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.scan_index += 1;
        Some(ch)
    }

    /// Move the cursor forward by up to `count` characters.
    pub fn advance_by(&mut self, count: usize) {
        self.scan_index = (self.scan_index + count).min(self.text.len());
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
            self.scan_index += 1;
        }
    }

    /// Move the cursor onto the next stopper, or to the end of the line.
    pub fn skip_to_stopper(&mut self) {
        while self.peek().is_some_and(|ch| !is_stopper(ch)) {
            self.scan_index += 1;
        }
    }

    /// Consume the rest of the line.
    pub fn skip_to_end(&mut self) {
        self.scan_index = self.text.len();
    }

    /// Look for `closer` from the cursor onward and step past it.
    ///
    /// Returns `false`, leaving the cursor where it was, if the closer is not
    /// on this line.
    pub fn skip_past(&mut self, closer: [char; 2]) -> bool {
        let rest = &self.text[self.scan_index..];
        match rest.windows(2).position(|pair| pair == closer) {
            Some(offset) => {
                self.scan_index += offset + 2;
                true
            }
            None => false,
        }
    }

    /// Cursor has consumed everything on this line.
    pub fn is_exhausted(&self) -> bool {
        self.scan_index >= self.text.len()
    }

    /// No more lines will arrive.
    pub fn at_end(&self) -> bool {
        self.at_end
    }

    pub fn position(&self) -> usize {
        self.scan_index
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Transcript;

    fn line_from(source: &str) -> Line {
        let mut reader = LineReader::from_source(source);
        let mut line = Line::new();
        line.refill(&mut reader, &mut Transcript::new());
        line
    }

    #[test]
    fn test_refill_folds_and_echoes() {
        let mut reader = LineReader::from_source("program demo\nvar x\n");
        let mut transcript = Transcript::new();
        let mut line = Line::new();

        line.refill(&mut reader, &mut transcript);
        assert_eq!(line.text(), "PROGRAM DEMO");
        assert_eq!(line.line_number(), 1);
        assert!(!line.at_end());

        line.refill(&mut reader, &mut transcript);
        assert_eq!(line.text(), "VAR X");
        assert!(line.at_end());

        assert_eq!(
            transcript.echoed_lines(),
            vec![(1, "program demo".to_string()), (2, "var x".to_string())]
        );
    }

    #[test]
    fn test_refill_after_end_is_noop() {
        let mut reader = LineReader::from_source("only");
        let mut transcript = Transcript::new();
        let mut line = Line::new();
        line.refill(&mut reader, &mut transcript);
        assert!(line.at_end());

        line.advance_by(2);
        line.refill(&mut reader, &mut transcript);
        assert_eq!(line.text(), "ONLY");
        assert_eq!(line.position(), 2);
        assert_eq!(line.line_number(), 1);
    }

    #[test]
    fn test_long_lines_are_split() {
        let long = "A".repeat(MAX_LINE_LEN + 5);
        let mut reader = LineReader::from_source(&long);
        assert_eq!(reader.next_line().unwrap().map(|l| l.len()), Some(MAX_LINE_LEN));
        assert!(!reader.is_exhausted().unwrap());
        assert_eq!(reader.next_line().unwrap().map(|l| l.len()), Some(5));
        assert!(reader.is_exhausted().unwrap());
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_non_utf8_bytes_do_not_end_input() {
        let bytes = b"(* caf\xE9 *)\nVAR A\n";
        let mut reader = LineReader::new(&bytes[..]);
        let mut transcript = Transcript::new();
        let mut line = Line::new();

        line.refill(&mut reader, &mut transcript);
        assert_eq!(line.text(), "(* CAF\u{FFFD} *)");
        assert!(!line.at_end());

        line.refill(&mut reader, &mut transcript);
        assert_eq!(line.text(), "VAR A");
        assert_eq!(line.line_number(), 2);
        assert_eq!(transcript.echoed_lines()[0], (1, "(* caf\u{FFFD} *)".to_string()));
    }

    #[test]
    fn test_crlf_is_stripped() {
        let line = line_from("a := 1\r\n");
        assert_eq!(line.text(), "A := 1");
    }

    #[test]
    fn test_cursor_operations_stay_in_bounds() {
        let mut line = line_from("  AB  ");
        line.skip_whitespace();
        assert_eq!(line.position(), 2);
        assert_eq!(line.advance(), Some('A'));
        line.advance_by(100);
        assert_eq!(line.position(), line.len());
        assert!(line.is_exhausted());
        assert_eq!(line.advance(), None);
    }

    #[test]
    fn test_skip_to_stopper() {
        let mut line = line_from("ABCDEF;X");
        line.skip_to_stopper();
        assert_eq!(line.peek(), Some(';'));

        let mut line = line_from("ABCDEF");
        line.skip_to_stopper();
        assert!(line.is_exhausted());
    }

    #[test]
    fn test_skip_past_closer() {
        let mut line = line_from("NOTE *) X");
        assert!(line.skip_past(['*', ')']));
        assert_eq!(line.peek(), Some(' '));

        let mut line = line_from("STILL IN COMMENT");
        assert!(!line.skip_past(['*', ')']));
        assert_eq!(line.position(), 0);
    }
}
