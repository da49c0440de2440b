// Status bar: connection state, season, team, active page.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::ConnectionStatus;
use crate::tui::ViewState;

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (conn_str, conn_color) = match state.connection_status {
        ConnectionStatus::Connected => ("Connected", Color::Green),
        ConnectionStatus::Disconnected => ("Disconnected", Color::Red),
    };

    let mut spans = vec![
        Span::styled(format!(" {conn_str}"), Style::default().fg(conn_color)),
        Span::raw(" | "),
        Span::raw(format!("Season {}", state.flags.season)),
    ];
    if !state.flags.abbrev.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::raw(state.flags.abbrev.clone()));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::raw(state.page.title()));
    if state.flags.god_mode {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "GOD MODE",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
