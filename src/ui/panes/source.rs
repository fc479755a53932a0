//! Source pane rendering with keyword highlighting
//!
//! This module renders the echoed source lines of a parse, with line numbers
//! and the line the parse failed on marked.
//!
//! # Highlighting
//!
//! Words are looked up, case-insensitively, in the reserved-word table and the
//! symbol table of the run being shown. Comments are tracked across lines so
//! a `(* ... *)` block spanning several lines is greyed out as a whole.

use crate::scanner::builder::{COMMENT_CLOSE, COMMENT_OPEN};
use crate::scanner::{ReservedWords, TokenKind};
use crate::table::HashTable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data the source pane draws from
pub struct SourceRenderData<'a> {
    pub lines: &'a [(usize, String)],
    pub failure_line: Option<usize>,
    pub reserved: &'a ReservedWords,
    pub symbols: &'a HashTable<TokenKind>,
}

/// Split one source line into styled spans.
///
/// `in_comment` carries comment state from the previous line and is updated
/// for the next one.
pub fn highlight_source_line(
    line: &str,
    in_comment: &mut bool,
    reserved: &ReservedWords,
    symbols: &HashTable<TokenKind>,
) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let opens = c == COMMENT_OPEN[0] && chars.get(i + 1) == Some(&COMMENT_OPEN[1]);
        if *in_comment || opens {
            // the closer is searched for after the opener, never overlapping it
            let search_from = if opens && !*in_comment { i + 2 } else { i };
            let close = chars[search_from..]
                .windows(2)
                .position(|pair| pair == COMMENT_CLOSE)
                .map(|offset| search_from + offset + 2);
            let end = close.unwrap_or(chars.len());
            *in_comment = close.is_none();
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            i = end;
            continue;
        }

        if c.is_ascii_alphanumeric() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            spans.push(Span::styled(word.clone(), word_style(&word, reserved, symbols)));
            continue;
        }

        spans.push(Span::styled(c.to_string(), Style::default().fg(DEFAULT_THEME.fg)));
        i += 1;
    }

    Line::from(spans)
}

fn word_style(word: &str, reserved: &ReservedWords, symbols: &HashTable<TokenKind>) -> Style {
    let folded = word.to_ascii_uppercase();
    if reserved.get(&folded).is_some() {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if folded.starts_with(|ch: char| ch.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if symbols.contains(&folded) {
        Style::default().fg(DEFAULT_THEME.identifier)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData<'_>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = data.lines.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    // comment state has to be carried through the lines scrolled past
    let mut in_comment = false;
    let mut visible_lines = Vec::with_capacity(visible_height);
    for (idx, (number, text)) in data.lines.iter().enumerate() {
        let content = highlight_source_line(text, &mut in_comment, data.reserved, data.symbols);
        if idx < *scroll {
            continue;
        }
        if visible_lines.len() == visible_height {
            break;
        }

        let is_failure = data.failure_line == Some(*number);
        let number_style = if is_failure {
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![
            Span::styled(if is_failure { "▶" } else { " " }, number_style),
            Span::styled(format!("{:4} ", number), number_style),
        ];
        if is_failure {
            let marked = Style::default().bg(DEFAULT_THEME.current_line_bg);
            spans.extend(
                content
                    .spans
                    .into_iter()
                    .map(|span| span.patch_style(marked)),
            );
        } else {
            spans.extend(content.spans);
        }
        visible_lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
