//! Symbol table pane rendering
//!
//! Shows every slot of the table, in index order, the same way the console
//! dump does: empty slots show only their index.

use crate::table::HashTable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the symbol table pane
pub fn render_symbols_pane<V: Copy + Into<u8>, const N: usize>(
    frame: &mut Frame,
    area: Rect,
    table: &HashTable<V, N>,
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
        .title(format!(" Symbols ({}/{}) ", table.len(), table.capacity()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let header = Line::from(Span::styled(
        format!("{:>5}  {:<10}{:>5}", "Hash", "Name", "Type"),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ));

    // borders (2) and the header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    *scroll = (*scroll).min(N.saturating_sub(visible_height));

    let mut lines = vec![header];
    lines.extend(
        table
            .slots()
            .skip(*scroll)
            .take(visible_height)
            .map(|(index, slot)| match slot {
                Some(entry) => Line::from(vec![
                    Span::styled(
                        format!("{:>5}  ", index),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                    Span::styled(
                        format!("{:<10}", entry.key),
                        Style::default().fg(DEFAULT_THEME.identifier),
                    ),
                    Span::styled(
                        format!("{:>5}", Into::<u8>::into(entry.value)),
                        Style::default().fg(DEFAULT_THEME.number),
                    ),
                ]),
                None => Line::from(Span::styled(
                    format!("{:>5}", index),
                    Style::default().fg(DEFAULT_THEME.comment),
                )),
            }),
    );

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
