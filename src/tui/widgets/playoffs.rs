// Playoff bracket: one section per round, one line per series.
//
// Multi-game rounds show series wins; single-game rounds show points once
// both scores exist. A series with no away team is a bye.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::protocol::{PlayoffSeries, SeriesTeam};
use crate::tui::ViewState;

/// Render the playoffs page into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(view) = &state.playoffs else {
        let paragraph = Paragraph::new("  No playoff data yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Playoffs"));
        frame.render_widget(paragraph, area);
        return;
    };

    let num_rounds = view.series.len();
    let mut items: Vec<ListItem> = Vec::new();
    for (round, series_list) in view.series.iter().enumerate() {
        let name = round_name(round, num_rounds);
        items.push(ListItem::new(Line::from(Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
        ))));
        for series in series_list {
            items.push(ListItem::new(format_series(
                series,
                view.num_games_to_win,
                &state.flags.abbrev,
            )));
        }
        items.push(ListItem::new(Line::from("")));
    }

    let title = format!("Playoffs - Season {}", view.season);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn round_name(round: usize, num_rounds: usize) -> String {
    if round + 1 == num_rounds {
        "Finals".to_string()
    } else {
        format!("Round {}", round + 1)
    }
}

/// One bracket line for a series. A bye shows the home team alone.
pub fn format_series(
    series: &PlayoffSeries,
    num_games_to_win: u32,
    user_abbrev: &str,
) -> Line<'static> {
    let Some(away) = &series.away else {
        let mut spans = vec![Span::raw("  ")];
        spans.push(team_span(&series.home, true, user_abbrev));
        spans.push(Span::styled(
            "  (bye)",
            Style::default().fg(Color::DarkGray),
        ));
        return Line::from(spans);
    };

    let home_won = series.home.won.unwrap_or(0) >= num_games_to_win;
    let away_won = away.won.unwrap_or(0) >= num_games_to_win;

    let mut spans = vec![Span::raw("  ")];
    spans.push(team_span(&series.home, home_won, user_abbrev));
    spans.push(score_span(&series.home, num_games_to_win, away));
    spans.push(Span::raw("  vs  "));
    spans.push(team_span(away, away_won, user_abbrev));
    spans.push(score_span(away, num_games_to_win, &series.home));
    Line::from(spans)
}

fn team_span(team: &SeriesTeam, winner: bool, user_abbrev: &str) -> Span<'static> {
    let mut style = Style::default();
    if winner {
        style = style.add_modifier(Modifier::BOLD);
    }
    if !user_abbrev.is_empty() && team.abbrev == user_abbrev {
        style = style.fg(Color::Cyan);
    }
    Span::styled(format!("({}) {} {}", team.seed, team.region, team.abbrev), style)
}

fn score_span(team: &SeriesTeam, num_games_to_win: u32, other: &SeriesTeam) -> Span<'static> {
    if num_games_to_win > 1 {
        match team.won {
            Some(won) => Span::raw(format!(" {won}")),
            None => Span::raw(" 0"),
        }
    } else {
        // Single game: only meaningful once both sides have a score.
        match (team.pts, other.pts) {
            (Some(pts), Some(_)) => Span::raw(format!(" {pts}")),
            _ => Span::raw(""),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
