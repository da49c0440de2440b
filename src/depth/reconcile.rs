// Depth chart state: authoritative order, optimistic override, and the
// reducer that keeps the two reconciled.
//
// The displayed order per position group moves through exactly two states:
//
//   AUTHORITATIVE --(drag end)--> OVERRIDDEN --(any snapshot for the
//   group, whatever its content)--> AUTHORITATIVE
//
// There is no conflict or error state. The engine's data always wins,
// eventually; the override only bridges the window between dispatching a
// reorder command and the next authoritative push. No correlation between
// the dispatched command and the push is attempted.

use std::collections::HashMap;

use tracing::debug;

use crate::depth::drag::DragSession;
use crate::depth::order::{array_move, PlayerId, PositionGroup};
use crate::protocol::PlayerRecord;

/// Authoritative snapshot for one position group.
#[derive(Debug, Clone, Default)]
pub struct GroupSnapshot {
    pub players: Vec<PlayerRecord>,
    /// Stat column names for this group's table, in display order.
    pub stats: Vec<String>,
}

/// Outcome of dropping a grabbed row.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The order changed: the override is installed and this command
    /// payload should be dispatched to the engine.
    Reorder {
        pos: PositionGroup,
        pids: Vec<PlayerId>,
    },
    /// The row came back to where it started. Nothing to show, nothing
    /// to dispatch.
    Unchanged,
}

/// Depth chart view state for all position groups, with the optimistic
/// override bound to the active group only.
#[derive(Debug, Default)]
pub struct DepthState {
    groups: HashMap<PositionGroup, GroupSnapshot>,
    active: Option<PositionGroup>,
    /// The client's guessed order after a drag, shown until any fresh
    /// snapshot for the active group arrives. Stores ids only, never
    /// player copies, so ratings and stats always come from the latest
    /// snapshot even while the order is guessed.
    override_pids: Option<Vec<PlayerId>>,
    drag: Option<DragSession>,
}

impl DepthState {
    pub fn new() -> DepthState {
        DepthState::default()
    }

    /// The currently selected position group, defaulting to QB before the
    /// first explicit selection.
    pub fn active_group(&self) -> PositionGroup {
        self.active.unwrap_or(PositionGroup::QB)
    }

    pub fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn has_override(&self) -> bool {
        self.override_pids.is_some()
    }

    /// Stat column names for the active group.
    pub fn active_stats(&self) -> &[String] {
        self.groups
            .get(&self.active_group())
            .map(|g| g.stats.as_slice())
            .unwrap_or(&[])
    }

    // -- reducer transitions ------------------------------------------------

    /// A fresh authoritative snapshot arrived for `pos`.
    ///
    /// When `pos` is the active group this unconditionally discards the
    /// override, even if the snapshot's order matches the guess: arrival of
    /// authoritative data is the only correctness signal the client has.
    /// An in-flight gesture survives (the user keeps their grab; the rows
    /// under it refresh).
    pub fn apply_snapshot(
        &mut self,
        pos: PositionGroup,
        players: Vec<PlayerRecord>,
        stats: Vec<String>,
    ) {
        if pos == self.active_group() && self.override_pids.take().is_some() {
            debug!(pos = pos.label(), "authoritative snapshot cleared pending override");
        }
        self.groups.insert(pos, GroupSnapshot { players, stats });
        // Re-clamp a live gesture against the new list length.
        if self.drag.is_some() {
            let len = self.resolve_base().len();
            if let Some(drag) = &mut self.drag {
                if len == 0 || drag.from >= len {
                    self.drag = None;
                } else if drag.to >= len {
                    drag.to = len - 1;
                }
            }
        }
    }

    /// Select a different position group tab. Pure navigation: any override
    /// and any in-flight gesture belong to the previous group and are
    /// discarded.
    pub fn switch_tab(&mut self, pos: PositionGroup) {
        if pos != self.active_group() {
            self.override_pids = None;
            self.drag = None;
        }
        self.active = Some(pos);
    }

    /// Grab the row at `index` in the displayed order. No dispatch, no
    /// order mutation; presentation only until the drop.
    pub fn gesture_start(&mut self, index: usize) {
        if index < self.resolve_base().len() {
            self.drag = Some(DragSession::grab(index));
        }
    }

    /// Move the grabbed row one slot up in the live preview.
    pub fn gesture_up(&mut self) {
        if let Some(drag) = &mut self.drag {
            drag.move_up();
        }
    }

    /// Move the grabbed row one slot down in the live preview.
    pub fn gesture_down(&mut self) {
        let len = self.resolve_base().len();
        if let Some(drag) = &mut self.drag {
            drag.move_down(len);
        }
    }

    /// Abandon the gesture without any dispatch or override.
    pub fn gesture_cancel(&mut self) {
        self.drag = None;
    }

    /// Drop the grabbed row: `GestureEnded { from, to }`.
    ///
    /// Computes the new order by single-element relocation of the displayed
    /// order, installs it as the override, and hands back the command
    /// payload for asynchronous fire-and-forget dispatch. A drop onto the
    /// original slot changes nothing and dispatches nothing.
    pub fn gesture_end(&mut self) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Unchanged;
        };
        if drag.is_noop() {
            return DropOutcome::Unchanged;
        }
        let base: Vec<PlayerId> = self.resolve_base().iter().map(|p| p.pid).collect();
        let pids = array_move(&base, drag.from, drag.to);
        if pids == base {
            return DropOutcome::Unchanged;
        }
        self.override_pids = Some(pids.clone());
        DropOutcome::Reorder {
            pos: self.active_group(),
            pids,
        }
    }

    // -- resolution ---------------------------------------------------------

    /// The order to render for the active group, before any live gesture
    /// preview: the override when one is pending and still resolvable,
    /// otherwise the authoritative order.
    ///
    /// Each override id is looked up against the authoritative player set,
    /// so everything but the order itself always reflects the latest
    /// snapshot. If any id has gone missing (player traded away while the
    /// guess was pending) the whole override is stale: fall back to the
    /// authoritative order rather than render a hole.
    pub fn resolve_base(&self) -> Vec<&PlayerRecord> {
        let Some(group) = self.groups.get(&self.active_group()) else {
            return Vec::new();
        };
        if let Some(pids) = &self.override_pids {
            let looked_up: Option<Vec<&PlayerRecord>> = pids
                .iter()
                .map(|pid| group.players.iter().find(|p| p.pid == *pid))
                .collect();
            match looked_up {
                Some(players) => return players,
                None => {
                    debug!(
                        pos = self.active_group().label(),
                        "pending override references departed player, using authoritative order"
                    );
                }
            }
        }
        group.players.iter().collect()
    }

    /// The order to render, including the live gesture preview: while a row
    /// is grabbed, it is shown relocated to its candidate slot. Nothing is
    /// dispatched per preview frame; only the drop commits.
    pub fn resolve(&self) -> Vec<&PlayerRecord> {
        let base = self.resolve_base();
        match self.drag {
            Some(drag) => array_move(&base, drag.from, drag.to),
            None => base,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
