// Message types shared between the engine channel, the app orchestrator,
// and the TUI.
//
// Wire messages (EngineMessage / EngineCommand) are JSON with a
// SCREAMING_SNAKE `type` tag. Channel messages (UiUpdate / UserCommand)
// never leave the process.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::depth::order::{PlayerId, PositionGroup};

// ---------------------------------------------------------------------------
// Player snapshot
// ---------------------------------------------------------------------------

/// Read-only snapshot of a player as pushed by the engine.
///
/// The console never mutates a player; it only renders the latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub pid: PlayerId,
    pub name: String,
    /// Listed position abbreviation (may differ from the depth group,
    /// e.g. an RB returning kicks in the KR group).
    pub pos: String,
    pub age: u8,
    pub ovr: u8,
    pub pot: u8,
    /// stat name -> value, keyed by the snapshot's `stats` column list.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
    /// Injury annotation, e.g. "Q: sprained ankle". Empty when healthy.
    #[serde(default)]
    pub injury: String,
    /// Skill tags shown after the name (e.g. ["Pa", "Po"]).
    #[serde(default)]
    pub skills: Vec<String>,
    /// Whether the user has flagged this player on their watch list.
    #[serde(default)]
    pub watch: bool,
}

// ---------------------------------------------------------------------------
// League settings
// ---------------------------------------------------------------------------

/// League-wide tunable parameters, as pushed by the engine and as edited by
/// the settings form. Monetary amounts are in thousands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    pub salary_cap: u32,
    pub min_payroll: u32,
    pub luxury_payroll: u32,
    pub luxury_tax: f64,
    pub min_contract: u32,
    pub max_contract: u32,
    pub min_roster_size: u32,
    pub max_roster_size: u32,
    pub num_games: u32,
    pub quarter_length: f64,
    pub injury_rate: f64,
    pub tragic_death_rate: f64,
    pub num_playoff_byes: u32,
    pub num_seasons_future_draft_picks: u32,
    /// Games needed to win each playoff round, first round first.
    pub num_games_playoff_series: Vec<u32>,
    pub disable_injuries: bool,
    pub ai_trades: bool,
    pub hard_cap: bool,
    pub players_refuse_to_negotiate: bool,
    pub budget: bool,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        LeagueSettings {
            salary_cap: 90_000,
            min_payroll: 60_000,
            luxury_payroll: 100_000,
            luxury_tax: 1.5,
            min_contract: 500,
            max_contract: 30_000,
            min_roster_size: 40,
            max_roster_size: 55,
            num_games: 16,
            quarter_length: 15.0,
            injury_rate: 1.0,
            tragic_death_rate: 1.0,
            num_playoff_byes: 4,
            num_seasons_future_draft_picks: 4,
            num_games_playoff_series: vec![1, 1, 1, 1],
            disable_injuries: false,
            ai_trades: true,
            hard_cap: false,
            players_refuse_to_negotiate: true,
            budget: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Playoff bracket
// ---------------------------------------------------------------------------

/// One side of a playoff series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTeam {
    pub tid: u32,
    pub seed: u32,
    pub abbrev: String,
    pub region: String,
    #[serde(default)]
    pub won: Option<u32>,
    #[serde(default)]
    pub pts: Option<f64>,
}

/// A playoff matchup. `away` is absent for a bye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSeries {
    pub home: SeriesTeam,
    #[serde(default)]
    pub away: Option<SeriesTeam>,
}

// ---------------------------------------------------------------------------
// Status flags
// ---------------------------------------------------------------------------

/// Read-only shared flags pushed by the engine. Consumers treat them as
/// an injected snapshot, never ambient mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFlags {
    /// League id, when a league is open.
    pub lid: Option<u32>,
    pub season: u32,
    /// The user's team abbreviation.
    pub abbrev: String,
    pub num_teams: u32,
    pub god_mode: bool,
    pub sidebar_open: bool,
}

impl Default for StatusFlags {
    fn default() -> Self {
        StatusFlags {
            lid: None,
            season: 0,
            abbrev: String::new(),
            num_teams: 32,
            god_mode: false,
            sidebar_open: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound wire messages
// ---------------------------------------------------------------------------

/// Messages the engine pushes to the console.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum EngineMessage {
    /// Authoritative depth chart for one position group.
    #[serde(rename = "DEPTH_SNAPSHOT")]
    DepthSnapshot {
        pos: PositionGroup,
        players: Vec<PlayerRecord>,
        /// Stat column names to display for this group, in order.
        #[serde(default)]
        stats: Vec<String>,
    },

    /// Authoritative league settings.
    #[serde(rename = "SETTINGS_SNAPSHOT")]
    SettingsSnapshot { settings: LeagueSettings },

    /// Playoff bracket, outer vec is rounds, inner vec the round's series.
    #[serde(rename = "PLAYOFFS_SNAPSHOT")]
    PlayoffsSnapshot {
        season: u32,
        num_games_to_win: u32,
        series: Vec<Vec<PlayoffSeries>>,
    },

    /// Shared status flags (league id, season, god mode, sidebar).
    #[serde(rename = "STATUS")]
    Status { flags: StatusFlags },

    /// Result of a previously dispatched command. Logged, never rendered:
    /// the display only ever follows authoritative snapshots.
    #[serde(rename = "COMMAND_ACK")]
    CommandAck {
        command: String,
        ok: bool,
        #[serde(default)]
        error: Option<String>,
    },

    /// Keep-alive from the engine.
    #[serde(rename = "ENGINE_HEARTBEAT")]
    Heartbeat,
}

// ---------------------------------------------------------------------------
// Outbound wire messages
// ---------------------------------------------------------------------------

/// Commands the console sends to the engine. All fire-and-forget: the only
/// observable effect is a later authoritative snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    #[serde(rename = "REORDER_DEPTH")]
    ReorderDepth {
        pos: PositionGroup,
        pids: Vec<PlayerId>,
    },

    #[serde(rename = "AUTO_SORT_DEPTH")]
    AutoSortDepth { pos: PositionGroup },

    #[serde(rename = "AUTO_SORT_DEPTH_ALL")]
    AutoSortDepthAll,

    #[serde(rename = "UPDATE_SETTINGS")]
    UpdateSettings { settings: LeagueSettings },

    #[serde(rename = "TOGGLE_GOD_MODE")]
    ToggleGodMode { enabled: bool },
}

// ---------------------------------------------------------------------------
// App -> TUI updates
// ---------------------------------------------------------------------------

/// Connection state of the engine channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// Updates pushed from the orchestrator to the TUI render loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    DepthSnapshot {
        pos: PositionGroup,
        players: Vec<PlayerRecord>,
        stats: Vec<String>,
    },
    SettingsSnapshot(Box<LeagueSettings>),
    PlayoffsSnapshot {
        season: u32,
        num_games_to_win: u32,
        series: Vec<Vec<PlayoffSeries>>,
    },
    Status(StatusFlags),
    ConnectionStatus(ConnectionStatus),
}

// ---------------------------------------------------------------------------
// TUI -> App commands
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Drag-end result: dispatch the guessed order for this group.
    ReorderDepth {
        pos: PositionGroup,
        pids: Vec<PlayerId>,
    },
    /// Let the engine sort one group. No optimistic guess.
    AutoSortDepth { pos: PositionGroup },
    /// Let the engine sort every group. No optimistic guess.
    AutoSortDepthAll,
    /// Submit the settings form.
    UpdateSettings(Box<LeagueSettings>),
    ToggleGodMode { enabled: bool },
    Quit,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_snapshot_parses() {
        let json = r#"{
            "type": "DEPTH_SNAPSHOT",
            "pos": "WR",
            "players": [
                {"pid": 7, "name": "A. Receiver", "pos": "WR",
                 "age": 25, "ovr": 70, "pot": 75,
                 "stats": {"recYds": 1011.0}, "skills": ["Pa"]}
            ],
            "stats": ["recYds"]
        }"#;
        let msg: EngineMessage = serde_json::from_str(json).unwrap();
        match msg {
            EngineMessage::DepthSnapshot { pos, players, stats } => {
                assert_eq!(pos, PositionGroup::WR);
                assert_eq!(players.len(), 1);
                assert_eq!(players[0].pid, 7);
                assert_eq!(players[0].stats["recYds"], 1011.0);
                assert!(!players[0].watch);
                assert_eq!(stats, vec!["recYds"]);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn command_ack_parses_without_error_field() {
        let json = r#"{"type": "COMMAND_ACK", "command": "REORDER_DEPTH", "ok": true}"#;
        let msg: EngineMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            EngineMessage::CommandAck {
                command: "REORDER_DEPTH".into(),
                ok: true,
                error: None,
            }
        );
    }

    #[test]
    fn reorder_command_serializes_with_tag() {
        let cmd = EngineCommand::ReorderDepth {
            pos: PositionGroup::QB,
            pids: vec![3, 1, 2],
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "REORDER_DEPTH");
        assert_eq!(json["pos"], "QB");
        assert_eq!(json["pids"], serde_json::json!([3, 1, 2]));
    }

    #[test]
    fn auto_sort_all_serializes_with_tag_only() {
        let cmd = EngineCommand::AutoSortDepthAll;
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "AUTO_SORT_DEPTH_ALL");
    }

    #[test]
    fn playoffs_snapshot_parses_bye() {
        let json = r#"{
            "type": "PLAYOFFS_SNAPSHOT",
            "season": 2026,
            "num_games_to_win": 1,
            "series": [[
                {"home": {"tid": 4, "seed": 1, "abbrev": "CIN", "region": "Cincinnati"}}
            ]]
        }"#;
        let msg: EngineMessage = serde_json::from_str(json).unwrap();
        match msg {
            EngineMessage::PlayoffsSnapshot { series, .. } => {
                assert!(series[0][0].away.is_none());
                assert_eq!(series[0][0].home.seed, 1);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn settings_default_playoff_rounds_fit_league() {
        let s = LeagueSettings::default();
        assert_eq!(s.num_games_playoff_series.len(), 4);
    }
}
