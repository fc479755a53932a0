//! Main TUI application state and logic

use crate::parser::{ParseOutcome, SymbolTable};
use crate::report::Transcript;
use crate::scanner::ReservedWords;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::panes::{render_source_pane, render_status_bar, render_symbols_pane, SourceRenderData};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Symbols,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Symbols,
            FocusedPane::Symbols => FocusedPane::Source,
        }
    }
}

/// The first failure of the parse being shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub line: usize,
    pub message: String,
    pub token: String,
}

/// The main application state
pub struct App {
    /// Echoed source lines as `(number, raw text)`
    pub lines: Vec<(usize, String)>,

    pub failure: Option<Failure>,

    pub symbols: SymbolTable,

    /// Vocabulary used for highlighting
    pub reserved: ReservedWords,

    pub program_name: Option<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub symbols_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a viewer over a finished parse
    pub fn new(outcome: &ParseOutcome<Transcript>, reserved: ReservedWords) -> Self {
        let failure = outcome.error().map(|err| Failure {
            line: err.line,
            message: err.display_message(),
            token: err.token.name().to_string(),
        });

        // start with the failing line a few rows from the top
        let source_scroll = failure
            .as_ref()
            .map_or(0, |failure| failure.line.saturating_sub(5));

        App {
            lines: outcome.diagnostics.echoed_lines(),
            failure,
            symbols: outcome.symbols.clone(),
            reserved,
            program_name: outcome.program_name.clone(),
            focused_pane: FocusedPane::Source,
            source_scroll,
            symbols_scroll: 0,
            should_quit: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Text for the status bar
    pub fn status_message(&self) -> String {
        match (&self.failure, &self.program_name) {
            (Some(failure), _) => format!(
                "line {}: {} (at '{}')",
                failure.line, failure.message, failure.token
            ),
            (None, Some(name)) => format!(
                "{}: {} variable(s) declared",
                name,
                self.symbols.len()
            ),
            (None, None) => "Parse successful".to_string(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        let source = SourceRenderData {
            lines: &self.lines,
            failure_line: self.failure.as_ref().map(|failure| failure.line),
            reserved: &self.reserved,
            symbols: &self.symbols,
        };
        render_source_pane(
            frame,
            columns[0],
            &source,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_symbols_pane(
            frame,
            columns[1],
            &self.symbols,
            self.focused_pane == FocusedPane::Symbols,
            &mut self.symbols_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            self.is_success(),
            &self.status_message(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                // clamped against the pane height on the next render
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Symbols => &mut self.symbols_scroll,
        }
    }
}
