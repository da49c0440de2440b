// Navigation menu: the static item tree, capability filtering, and the
// league URL helper used for display links.

use crate::protocol::StatusFlags;

/// Pages the console can show in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Depth,
    Settings,
    Playoffs,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Depth => "Depth Chart",
            Page::Settings => "League Settings",
            Page::Playoffs => "Playoffs",
        }
    }
}

/// Where a menu link leads: an in-console page, or an external path shown
/// for reference only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Page(Page),
    External(&'static str),
}

/// One entry in the static menu tree.
#[derive(Debug, Clone, Copy)]
pub enum MenuItem {
    Header {
        label: &'static str,
        children: &'static [MenuItem],
    },
    Link {
        label: &'static str,
        target: MenuTarget,
        /// Shown only inside a league.
        league: bool,
        /// Shown only outside a league.
        non_league: bool,
        /// Shown only when god mode is enabled.
        god_mode: bool,
    },
}

const fn league_link(label: &'static str, target: MenuTarget) -> MenuItem {
    MenuItem::Link {
        label,
        target,
        league: true,
        non_league: false,
        god_mode: false,
    }
}

/// The full menu tree. Filtering happens at render time against the
/// current status flags.
pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem::Link {
        label: "Leagues",
        target: MenuTarget::External("/"),
        league: false,
        non_league: true,
        god_mode: false,
    },
    MenuItem::Header {
        label: "Team",
        children: &[
            league_link("Depth Chart", MenuTarget::Page(Page::Depth)),
            league_link("Roster", MenuTarget::External("/roster")),
            league_link("Finances", MenuTarget::External("/team_finances")),
            league_link("Game Log", MenuTarget::External("/game_log")),
            league_link("History", MenuTarget::External("/team_history")),
            league_link("Transactions", MenuTarget::External("/transactions")),
        ],
    },
    MenuItem::Header {
        label: "League",
        children: &[
            league_link("Playoffs", MenuTarget::Page(Page::Playoffs)),
            league_link("Standings", MenuTarget::External("/standings")),
        ],
    },
    MenuItem::Header {
        label: "Tools",
        children: &[
            league_link("League Settings", MenuTarget::Page(Page::Settings)),
            MenuItem::Link {
                label: "Multi Team Mode",
                target: MenuTarget::External("/multi_team_mode"),
                league: true,
                non_league: false,
                god_mode: true,
            },
        ],
    },
];

/// A flattened, filtered rendering of the menu: headers followed by their
/// visible links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleEntry {
    Header(&'static str),
    Link {
        label: &'static str,
        target: MenuTarget,
        god_mode: bool,
    },
}

/// Flatten the menu tree according to the capability rules:
/// league-only items need a league id, non-league items need its absence,
/// god-mode items need the flag, and a header with no visible children
/// disappears.
pub fn visible_entries(flags: &StatusFlags) -> Vec<VisibleEntry> {
    let mut out = Vec::new();
    for item in MENU_ITEMS {
        flatten(item, flags, &mut out);
    }
    out
}

fn flatten(item: &MenuItem, flags: &StatusFlags, out: &mut Vec<VisibleEntry>) {
    match item {
        MenuItem::Link {
            label,
            target,
            league,
            non_league,
            god_mode,
        } => {
            if *league && flags.lid.is_none() {
                return;
            }
            if *non_league && flags.lid.is_some() {
                return;
            }
            if *god_mode && !flags.god_mode {
                return;
            }
            out.push(VisibleEntry::Link {
                label,
                target: *target,
                god_mode: *god_mode,
            });
        }
        MenuItem::Header { label, children } => {
            let mut child_entries = Vec::new();
            for child in *children {
                flatten(child, flags, &mut child_entries);
            }
            if child_entries.is_empty() {
                return;
            }
            out.push(VisibleEntry::Header(label));
            out.extend(child_entries);
        }
    }
}

/// Build a league-scoped path string: `/l/{lid}/{parts...}`.
pub fn league_url(lid: u32, parts: &[&str]) -> String {
    let mut url = format!("/l/{lid}");
    for part in parts {
        url.push('/');
        url.push_str(part);
    }
    url
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(lid: Option<u32>, god_mode: bool) -> StatusFlags {
        StatusFlags {
            lid,
            god_mode,
            ..StatusFlags::default()
        }
    }

    fn links(entries: &[VisibleEntry]) -> Vec<&'static str> {
        entries
            .iter()
            .filter_map(|e| match e {
                VisibleEntry::Link { label, .. } => Some(*label),
                VisibleEntry::Header(_) => None,
            })
            .collect()
    }

    #[test]
    fn no_league_shows_only_non_league_items() {
        let entries = visible_entries(&flags(None, false));
        assert_eq!(links(&entries), vec!["Leagues"]);
        // No headers survive without visible children.
        assert!(!entries
            .iter()
            .any(|e| matches!(e, VisibleEntry::Header(_))));
    }

    #[test]
    fn league_hides_non_league_items() {
        let entries = visible_entries(&flags(Some(1), false));
        let labels = links(&entries);
        assert!(!labels.contains(&"Leagues"));
        assert!(labels.contains(&"Depth Chart"));
        assert!(labels.contains(&"League Settings"));
    }

    #[test]
    fn god_mode_items_hidden_without_flag() {
        let without = visible_entries(&flags(Some(1), false));
        assert!(!links(&without).contains(&"Multi Team Mode"));

        let with = visible_entries(&flags(Some(1), true));
        assert!(links(&with).contains(&"Multi Team Mode"));
    }

    #[test]
    fn headers_precede_their_children() {
        let entries = visible_entries(&flags(Some(1), false));
        let team_header = entries
            .iter()
            .position(|e| *e == VisibleEntry::Header("Team"))
            .unwrap();
        assert!(matches!(
            entries[team_header + 1],
            VisibleEntry::Link {
                label: "Depth Chart",
                ..
            }
        ));
    }

    #[test]
    fn league_url_joins_parts() {
        assert_eq!(league_url(5, &[]), "/l/5");
        assert_eq!(league_url(5, &["depth", "WR"]), "/l/5/depth/WR");
        assert_eq!(league_url(12, &["roster"]), "/l/12/roster");
    }
}
