// Help bar: keyboard shortcut hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::menu::Page;
use crate::tui::ViewState;

/// Pick the hint line for the current page and mode.
pub fn hint_text(state: &ViewState) -> &'static str {
    if state.sidebar_focus {
        return " Up/Down:Move | Enter:Open | Esc:Back";
    }
    match state.page {
        Page::Depth => {
            if state.depth.drag().is_some() {
                " Up/Down:Move Row | Enter:Drop | Esc:Cancel"
            } else {
                " Enter:Grab | Left/Right:Position | a:Auto Sort | A:Auto Sort All | Tab:Menu | b:Sidebar | q:Quit"
            }
        }
        Page::Settings => {
            if state.form.editing {
                " Type to edit | Enter:Done | Backspace:Delete"
            } else {
                " Up/Down:Field | Enter:Edit | s:Save | r:Revert | g:God Mode | Tab:Menu | q:Quit"
            }
        }
        Page::Playoffs => " Tab:Menu | b:Sidebar | q:Quit",
    }
}

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
