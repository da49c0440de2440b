// League settings form: one row per field, text buffers edited in place,
// committed as a whole on save.
//
// Coercion and validation live in the form model; this widget only draws
// buffers, the cursor, and the current error.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::tui::form::FIELD_ORDER;
use crate::tui::ViewState;

/// Render the league settings page into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // god mode banner
            Constraint::Min(3),    // field list
            Constraint::Length(1), // error / dirty line
        ])
        .split(area);

    render_banner(frame, chunks[0], state);
    render_fields(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);
}

fn render_banner(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = if state.flags.god_mode {
        Line::from(Span::styled(
            " God Mode enabled. Edits apply to the league directly.",
            Style::default().fg(Color::Magenta),
        ))
    } else {
        Line::from(Span::styled(
            " God Mode disabled. Press g to enable and unlock editing.",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_fields(frame: &mut Frame, area: Rect, state: &ViewState) {
    let items: Vec<ListItem> = FIELD_ORDER
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let buffer = state.form.buffer_at(i);
            let value = if field.is_bool() {
                let checked = buffer == "true";
                format!("[{}]", if checked { "x" } else { " " })
            } else if state.form.editing && i == state.form.cursor {
                format!("{buffer}\u{2588}")
            } else {
                buffer.to_string()
            };

            let mut style = if state.flags.god_mode {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if i == state.form.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            ListItem::new(Line::from(Span::styled(
                format!(" {:<34} {}", field.label(), value),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("League Settings"),
    );
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = if let Some(err) = &state.form.error {
        Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        ))
    } else if state.form.dirty {
        Line::from(Span::styled(
            " Unsaved changes. s:Save r:Revert",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
