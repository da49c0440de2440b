// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The orchestrator pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.
//
// The depth chart's pending override and drag session live here and only
// here: one view instance owns them, nothing else reads or writes them.

pub mod form;
pub mod input;
pub mod layout;
pub mod menu;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::depth::reconcile::DepthState;
use crate::protocol::{
    ConnectionStatus, LeagueSettings, PlayoffSeries, StatusFlags, UiUpdate, UserCommand,
};

use form::SettingsForm;
use layout::build_layout;
use menu::Page;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Latest playoff bracket push.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayoffsView {
    pub season: u32,
    pub num_games_to_win: u32,
    pub series: Vec<Vec<PlayoffSeries>>,
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the orchestrator.
/// `render_frame` reads this struct to draw the console.
pub struct ViewState {
    /// Which page the main panel shows.
    pub page: Page,
    /// Depth chart core state (authoritative orders, override, gesture).
    pub depth: DepthState,
    /// Row cursor in the depth table.
    pub cursor: usize,
    /// Settings form buffers and edit bookkeeping.
    pub form: SettingsForm,
    /// Latest authoritative settings, kept for form revert.
    pub settings: LeagueSettings,
    /// Latest playoff bracket, if any has arrived.
    pub playoffs: Option<PlayoffsView>,
    /// Read-only shared flags from the engine.
    pub flags: StatusFlags,
    pub connection_status: ConnectionStatus,
    /// Sidebar visibility. Seeded from the engine's flag pushes, toggled
    /// locally; the next Status push wins, like everything authoritative.
    pub sidebar_open: bool,
    /// Whether keyboard focus is on the sidebar menu.
    pub sidebar_focus: bool,
    pub sidebar_cursor: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            page: Page::Depth,
            depth: DepthState::new(),
            cursor: 0,
            form: SettingsForm::default(),
            settings: LeagueSettings::default(),
            playoffs: None,
            flags: StatusFlags::default(),
            connection_status: ConnectionStatus::Disconnected,
            sidebar_open: true,
            sidebar_focus: false,
            sidebar_cursor: 0,
        }
    }
}

impl ViewState {
    /// Clamp the depth cursor to the rendered list.
    fn clamp_cursor(&mut self) {
        let len = self.depth.resolve().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::DepthSnapshot { pos, players, stats } => {
            state.depth.apply_snapshot(pos, players, stats);
            state.clamp_cursor();
        }
        UiUpdate::SettingsSnapshot(settings) => {
            state.form.refresh(&settings);
            state.settings = *settings;
        }
        UiUpdate::PlayoffsSnapshot {
            season,
            num_games_to_win,
            series,
        } => {
            state.playoffs = Some(PlayoffsView {
                season,
                num_games_to_win,
                series,
            });
        }
        UiUpdate::Status(flags) => {
            state.sidebar_open = flags.sidebar_open;
            state.flags = flags;
        }
        UiUpdate::ConnectionStatus(status) => {
            state.connection_status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete console frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.sidebar_open);

    widgets::status_bar::render(frame, layout.status_bar, state);
    if let Some(sidebar_area) = layout.sidebar {
        widgets::sidebar::render(frame, sidebar_area, state);
    }
    match state.page {
        Page::Depth => widgets::depth_chart::render(frame, layout.main, state),
        Page::Settings => widgets::settings::render(frame, layout.main, state),
        Page::Playoffs => widgets::playoffs::render(frame, layout.main, state),
    }
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default panic output so the message
    // is readable.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no handling; the next
                        // render tick redraws against the current area.
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::order::PositionGroup;
    use crate::protocol::PlayerRecord;

    fn player(pid: u32) -> PlayerRecord {
        PlayerRecord {
            pid,
            name: format!("Player {pid}"),
            pos: "WR".to_string(),
            age: 25,
            ovr: 60,
            pot: 65,
            stats: Default::default(),
            injury: String::new(),
            skills: vec![],
            watch: false,
        }
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.page, Page::Depth);
        assert_eq!(state.cursor, 0);
        assert!(state.playoffs.is_none());
        assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
        assert!(state.sidebar_open);
        assert!(!state.sidebar_focus);
        assert!(!state.form.dirty);
    }

    #[test]
    fn depth_snapshot_clamps_cursor() {
        let mut state = ViewState::default();
        state.depth.switch_tab(PositionGroup::WR);
        apply_ui_update(
            &mut state,
            UiUpdate::DepthSnapshot {
                pos: PositionGroup::WR,
                players: (1..=5).map(player).collect(),
                stats: vec![],
            },
        );
        state.cursor = 4;

        apply_ui_update(
            &mut state,
            UiUpdate::DepthSnapshot {
                pos: PositionGroup::WR,
                players: (1..=2).map(player).collect(),
                stats: vec![],
            },
        );
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn settings_push_refreshes_clean_form() {
        let mut state = ViewState::default();
        let mut settings = LeagueSettings::default();
        settings.num_games = 18;
        apply_ui_update(&mut state, UiUpdate::SettingsSnapshot(Box::new(settings.clone())));
        assert_eq!(state.settings.num_games, 18);
        assert_eq!(state.form.buffer(form::FieldId::NumGames), "18");
    }

    #[test]
    fn settings_push_leaves_dirty_form_alone() {
        let mut state = ViewState::default();
        state.form.activate(); // SalaryCap, enters edit mode
        state.form.push_char('5');
        let dirty_buffer = state.form.buffer(form::FieldId::SalaryCap).to_string();

        let mut settings = LeagueSettings::default();
        settings.salary_cap = 1;
        apply_ui_update(&mut state, UiUpdate::SettingsSnapshot(Box::new(settings)));
        assert_eq!(state.form.buffer(form::FieldId::SalaryCap), dirty_buffer);
        // The authoritative copy still advances for a later revert.
        assert_eq!(state.settings.salary_cap, 1);
    }

    #[test]
    fn status_push_drives_sidebar_and_flags() {
        let mut state = ViewState::default();
        state.sidebar_open = false;
        let flags = StatusFlags {
            lid: Some(3),
            season: 2026,
            abbrev: "CIN".into(),
            num_teams: 32,
            god_mode: true,
            sidebar_open: true,
        };
        apply_ui_update(&mut state, UiUpdate::Status(flags.clone()));
        assert!(state.sidebar_open);
        assert_eq!(state.flags, flags);
    }

    #[test]
    fn playoffs_push_stored() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::PlayoffsSnapshot {
                season: 2026,
                num_games_to_win: 1,
                series: vec![],
            },
        );
        let playoffs = state.playoffs.unwrap();
        assert_eq!(playoffs.season, 2026);
        assert_eq!(playoffs.num_games_to_win, 1);
    }

    #[test]
    fn connection_status_applied() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::ConnectionStatus(ConnectionStatus::Connected),
        );
        assert_eq!(state.connection_status, ConnectionStatus::Connected);
    }
}
