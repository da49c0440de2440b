// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// orchestrator, or into local ViewState mutations (page switching, cursor
// movement, the reorder gesture, form editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::depth::reconcile::DropOutcome;
use crate::protocol::UserCommand;

use super::menu::{self, MenuTarget, Page, VisibleEntry};
use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the orchestrator (reorder, auto-sort, settings submit, quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.sidebar_focus {
        return handle_sidebar(key_event, view_state);
    }

    match view_state.page {
        Page::Depth => handle_depth_page(key_event, view_state),
        Page::Settings => handle_settings_page(key_event, view_state),
        Page::Playoffs => handle_common(key_event, view_state),
    }
}

/// Keys available on every page outside edit/gesture modes.
fn handle_common(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('b') => {
            view_state.sidebar_open = !view_state.sidebar_open;
            if !view_state.sidebar_open {
                view_state.sidebar_focus = false;
            }
            None
        }
        KeyCode::Tab => {
            if view_state.sidebar_open {
                view_state.sidebar_focus = true;
                view_state.sidebar_cursor = first_link_index(view_state).unwrap_or(0);
            }
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Depth page
// ---------------------------------------------------------------------------

fn handle_depth_page(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // A grabbed row captures movement keys until dropped or cancelled.
    if view_state.depth.drag().is_some() {
        return handle_gesture(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.cursor = view_state.cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = view_state.depth.resolve().len();
            if view_state.cursor + 1 < len {
                view_state.cursor += 1;
            }
            None
        }
        KeyCode::Left | KeyCode::Char('[') => {
            let prev = view_state.depth.active_group().prev();
            view_state.depth.switch_tab(prev);
            view_state.cursor = 0;
            None
        }
        KeyCode::Right | KeyCode::Char(']') => {
            let next = view_state.depth.active_group().next();
            view_state.depth.switch_tab(next);
            view_state.cursor = 0;
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            view_state.depth.gesture_start(view_state.cursor);
            None
        }
        KeyCode::Char('a') => Some(UserCommand::AutoSortDepth {
            pos: view_state.depth.active_group(),
        }),
        KeyCode::Char('A') => Some(UserCommand::AutoSortDepthAll),
        _ => handle_common(key_event, view_state),
    }
}

/// Handle keys while a row is grabbed.
///
/// Movement adjusts the live preview only; the drop commits the override
/// and yields the reorder command; Esc abandons the gesture.
fn handle_gesture(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.depth.gesture_up();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.depth.gesture_down();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(drag) = view_state.depth.drag() {
                view_state.cursor = drag.to;
            }
            match view_state.depth.gesture_end() {
                DropOutcome::Reorder { pos, pids } => {
                    Some(UserCommand::ReorderDepth { pos, pids })
                }
                DropOutcome::Unchanged => None,
            }
        }
        KeyCode::Esc => {
            view_state.depth.gesture_cancel();
            None
        }
        _ => None, // Block everything else mid-gesture
    }
}

// ---------------------------------------------------------------------------
// Settings page
// ---------------------------------------------------------------------------

fn handle_settings_page(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if view_state.form.editing {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc => {
                view_state.form.stop_editing();
            }
            KeyCode::Backspace => {
                view_state.form.pop_char();
            }
            KeyCode::Char(c) => {
                view_state.form.push_char(c);
            }
            _ => {}
        }
        return None;
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.form.cursor_up();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.form.cursor_down();
            None
        }
        KeyCode::Enter => {
            view_state.form.activate();
            None
        }
        KeyCode::Char('s') => {
            match view_state.form.submit(view_state.flags.num_teams) {
                Ok(settings) => Some(UserCommand::UpdateSettings(Box::new(settings))),
                Err(_) => None, // error stays on the form for display
            }
        }
        KeyCode::Char('r') => {
            let settings = view_state.settings.clone();
            view_state.form.revert(&settings);
            None
        }
        KeyCode::Char('g') => Some(UserCommand::ToggleGodMode {
            enabled: !view_state.flags.god_mode,
        }),
        _ => handle_common(key_event, view_state),
    }
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

fn handle_sidebar(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let entries = menu::visible_entries(&view_state.flags);
    match key_event.code {
        KeyCode::Esc | KeyCode::Tab => {
            view_state.sidebar_focus = false;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.sidebar_cursor =
                step_link(&entries, view_state.sidebar_cursor, Direction::Up);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.sidebar_cursor =
                step_link(&entries, view_state.sidebar_cursor, Direction::Down);
            None
        }
        KeyCode::Enter => {
            if let Some(VisibleEntry::Link {
                target: MenuTarget::Page(page),
                ..
            }) = entries.get(view_state.sidebar_cursor)
            {
                view_state.page = *page;
                view_state.sidebar_focus = false;
            }
            None
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

enum Direction {
    Up,
    Down,
}

/// Move the sidebar cursor to the adjacent link entry, skipping headers.
fn step_link(entries: &[VisibleEntry], cursor: usize, dir: Direction) -> usize {
    let mut i = cursor;
    loop {
        let next = match dir {
            Direction::Up => i.checked_sub(1),
            Direction::Down => {
                if i + 1 < entries.len() {
                    Some(i + 1)
                } else {
                    None
                }
            }
        };
        let Some(n) = next else {
            return cursor;
        };
        i = n;
        if matches!(entries.get(i), Some(VisibleEntry::Link { .. })) {
            return i;
        }
    }
}

fn first_link_index(view_state: &ViewState) -> Option<usize> {
    menu::visible_entries(&view_state.flags)
        .iter()
        .position(|e| matches!(e, VisibleEntry::Link { .. }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::order::PositionGroup;
    use crate::protocol::{PlayerRecord, UiUpdate};
    use crate::tui::apply_ui_update;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

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

    fn depth_state(pids: &[u32]) -> ViewState {
        let mut state = ViewState::default();
        state.depth.switch_tab(PositionGroup::WR);
        apply_ui_update(
            &mut state,
            UiUpdate::DepthSnapshot {
                pos: PositionGroup::WR,
                players: pids.iter().map(|p| player(*p)).collect(),
                stats: vec![],
            },
        );
        state
    }

    #[test]
    fn grab_move_drop_emits_reorder() {
        let mut state = depth_state(&[1, 2, 3, 4]);
        state.cursor = 2;

        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(state.depth.drag().is_some());
        assert_eq!(handle_key(key(KeyCode::Up), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Up), &mut state), None);

        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::ReorderDepth {
                pos: PositionGroup::WR,
                pids: vec![3, 1, 2, 4],
            })
        );
        assert_eq!(state.cursor, 0);
        assert!(state.depth.drag().is_none());
    }

    #[test]
    fn drop_without_move_emits_nothing() {
        let mut state = depth_state(&[1, 2, 3]);
        state.cursor = 1;
        handle_key(key(KeyCode::Enter), &mut state);
        let cmd = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(cmd, None);
        assert!(!state.depth.has_override());
    }

    #[test]
    fn esc_cancels_gesture() {
        let mut state = depth_state(&[1, 2, 3]);
        handle_key(key(KeyCode::Enter), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(state.depth.drag().is_none());
        assert!(!state.depth.has_override());
    }

    #[test]
    fn quit_blocked_mid_gesture() {
        let mut state = depth_state(&[1, 2, 3]);
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        // Ctrl+C still works as the escape hatch.
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn tab_keys_switch_position_group() {
        let mut state = depth_state(&[1, 2]);
        state.cursor = 1;
        handle_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.depth.active_group(), PositionGroup::TE);
        assert_eq!(state.cursor, 0);
        handle_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.depth.active_group(), PositionGroup::WR);
    }

    #[test]
    fn auto_sort_keys_dispatch() {
        let mut state = depth_state(&[1, 2]);
        assert_eq!(
            handle_key(key(KeyCode::Char('a')), &mut state),
            Some(UserCommand::AutoSortDepth {
                pos: PositionGroup::WR
            })
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('A')), &mut state),
            Some(UserCommand::AutoSortDepthAll)
        );
    }

    #[test]
    fn settings_submit_emits_update() {
        let mut state = ViewState::default();
        state.page = Page::Settings;
        let cmd = handle_key(key(KeyCode::Char('s')), &mut state);
        match cmd {
            Some(UserCommand::UpdateSettings(settings)) => {
                assert_eq!(*settings, state.settings);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn settings_edit_mode_captures_chars() {
        let mut state = ViewState::default();
        state.page = Page::Settings;
        handle_key(key(KeyCode::Enter), &mut state); // edit SalaryCap
        assert!(state.form.editing);
        // 'q' is text now, not quit; 's' is text, not submit.
        assert_eq!(handle_key(key(KeyCode::Char('s')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        handle_key(key(KeyCode::Enter), &mut state);
        assert!(!state.form.editing);
        assert!(state.form.buffer_at(0).ends_with("sq"));
    }

    #[test]
    fn god_mode_key_toggles() {
        let mut state = ViewState::default();
        state.page = Page::Settings;
        assert_eq!(
            handle_key(key(KeyCode::Char('g')), &mut state),
            Some(UserCommand::ToggleGodMode { enabled: true })
        );
    }

    #[test]
    fn sidebar_navigation_switches_page() {
        let mut state = ViewState::default();
        state.flags.lid = Some(1);
        handle_key(key(KeyCode::Tab), &mut state);
        assert!(state.sidebar_focus);

        // First link is Depth Chart; step down to Roster (external, Enter
        // does nothing), then verify Enter on a Page link navigates.
        let entries = menu::visible_entries(&state.flags);
        let settings_idx = entries
            .iter()
            .position(|e| matches!(e, VisibleEntry::Link { label: "League Settings", .. }))
            .unwrap();
        while state.sidebar_cursor < settings_idx {
            handle_key(key(KeyCode::Down), &mut state);
        }
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.page, Page::Settings);
        assert!(!state.sidebar_focus);
    }

    #[test]
    fn sidebar_toggle_key() {
        let mut state = ViewState::default();
        assert!(state.sidebar_open);
        handle_key(key(KeyCode::Char('b')), &mut state);
        assert!(!state.sidebar_open);
        handle_key(key(KeyCode::Char('b')), &mut state);
        assert!(state.sidebar_open);
    }

    #[test]
    fn release_events_ignored() {
        let mut state = depth_state(&[1, 2]);
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key(release, &mut state), None);
    }
}
