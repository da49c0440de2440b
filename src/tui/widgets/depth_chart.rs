// Depth chart table: position tab strip, starter/bench split, and the
// grabbed-row highlight during a reorder gesture.
//
// The widget renders whatever order `DepthState::resolve` hands it; all
// reconciliation decisions happen in the core, none here. No position
// legality or other business validation either -- the engine owns that.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs};
use ratatui::Frame;

use crate::depth::order::ALL_POSITION_GROUPS;
use crate::protocol::PlayerRecord;
use crate::tui::menu::league_url;
use crate::tui::ViewState;

/// Render the depth chart page into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // position tabs
            Constraint::Length(1), // related links
            Constraint::Min(3),    // table
        ])
        .split(area);

    render_tabs(frame, chunks[0], state);
    render_links(frame, chunks[1], state);
    render_table(frame, chunks[2], state);
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &ViewState) {
    let titles: Vec<Line> = ALL_POSITION_GROUPS
        .iter()
        .map(|g| Line::from(g.label()))
        .collect();
    let selected = ALL_POSITION_GROUPS
        .iter()
        .position(|g| *g == state.depth.active_group())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ");
    frame.render_widget(tabs, area);
}

fn render_links(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = match state.flags.lid {
        Some(lid) => format!(
            " More: {} | {} | {} | {} | {}",
            league_url(lid, &["roster"]),
            league_url(lid, &["team_finances"]),
            league_url(lid, &["game_log"]),
            league_url(lid, &["team_history"]),
            league_url(lid, &["transactions"]),
        ),
        None => String::new(),
    };
    let paragraph = Paragraph::new(text).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &ViewState) {
    let pos = state.depth.active_group();
    let players = state.depth.resolve();
    let stats: Vec<String> = state.depth.active_stats().to_vec();
    let num_starters = pos.num_starters();
    let grabbed = state.depth.drag().map(|d| d.to);

    let title = format!("Depth Chart - {}", pos.label());

    if players.is_empty() {
        let paragraph = Paragraph::new("  No depth chart data yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut header_cells = vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Age"),
        Cell::from("Ovr"),
        Cell::from("Pot"),
    ];
    for stat in &stats {
        header_cells.push(Cell::from(stat.clone()));
    }
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let starter = pos.is_starter(i);
            let mut style = if starter {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if Some(i) == grabbed {
                style = Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD);
            } else if grabbed.is_none() && i == state.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            // Mark the starter/bench boundary under the last starter.
            if i + 1 == num_starters {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            let marker = if starter { "●" } else { " " };
            let mut cells = vec![
                Cell::from(marker),
                Cell::from(format_player_name(p)),
                Cell::from(p.pos.clone()),
                Cell::from(p.age.to_string()),
                Cell::from(p.ovr.to_string()),
                Cell::from(p.pot.to_string()),
            ];
            for stat in &stats {
                cells.push(Cell::from(format_stat(p.stats.get(stat).copied())));
            }
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(2),
        Constraint::Min(22),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ];
    widths.extend(stats.iter().map(|_| Constraint::Length(8)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// Name column text: name, skill tags, injury note, watch mark.
pub fn format_player_name(p: &PlayerRecord) -> String {
    let mut out = p.name.clone();
    if !p.skills.is_empty() {
        out.push_str(&format!(" {}", p.skills.join(",")));
    }
    if !p.injury.is_empty() {
        out.push_str(&format!(" ({})", p.injury));
    }
    if p.watch {
        out.push_str(" *");
    }
    out
}

/// Stat cell text: whole numbers bare, fractional to one decimal, missing
/// as a dash.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
