// Navigation sidebar: the capability-filtered menu tree.
//
// Headers are section labels; links navigate to console pages or name
// external league paths. God-mode items render in the god-mode color.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::tui::menu::{visible_entries, MenuTarget, VisibleEntry};
use crate::tui::ViewState;

/// Render the sidebar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let entries = visible_entries(&state.flags);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format_entry(entry, state, i))
        .collect();

    let border_style = if state.sidebar_focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Menu"),
    );
    frame.render_widget(list, area);
}

fn format_entry<'a>(entry: &VisibleEntry, state: &ViewState, index: usize) -> ListItem<'a> {
    match entry {
        VisibleEntry::Header(label) => ListItem::new(Line::from(Span::styled(
            (*label).to_string(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD | Modifier::DIM),
        ))),
        VisibleEntry::Link {
            label,
            target,
            god_mode,
        } => {
            let active = matches!(target, MenuTarget::Page(p) if *p == state.page);
            let mut style = if *god_mode {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::White)
            };
            if active {
                style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
            }
            if state.sidebar_focus && state.sidebar_cursor == index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(Span::styled(format!("  {label}"), style)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_does_not_panic_outside_league() {
        let backend = ratatui::backend::TestBackend::new(24, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_god_mode() {
        let backend = ratatui::backend::TestBackend::new(24, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.flags.lid = Some(1);
        state.flags.god_mode = true;
        state.sidebar_focus = true;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
