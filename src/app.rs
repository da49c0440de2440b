// Application orchestrator: owns the authoritative-state mirror, parses
// engine messages, fans updates out to the TUI, and dispatches user
// commands to the engine.
//
// Single event loop, strictly one event at a time: engine events, user
// commands, and a connection staleness check are multiplexed with
// `tokio::select!`. The loop never blocks on a dispatched command; the
// next authoritative push is the only place an effect is observed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{CommandSink, EngineEvent};
use crate::protocol::{
    ConnectionStatus, EngineCommand, EngineMessage, LeagueSettings, StatusFlags, UiUpdate,
    UserCommand,
};

/// How long without any engine frame before the connection is considered
/// stale.
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(15);

/// How often the staleness check runs.
pub const HEARTBEAT_CHECK_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Orchestrator-side state. The TUI keeps its own mirror (`ViewState`);
/// this struct holds what the loop itself needs: connection tracking, the
/// latest settings/flags for command construction, and the command sink.
pub struct AppState {
    pub connection_status: ConnectionStatus,
    pub last_engine_message_time: Option<Instant>,
    pub settings: LeagueSettings,
    pub flags: StatusFlags,
    sink: Arc<dyn CommandSink>,
}

impl AppState {
    pub fn new(sink: Arc<dyn CommandSink>) -> AppState {
        AppState {
            connection_status: ConnectionStatus::Disconnected,
            last_engine_message_time: None,
            settings: LeagueSettings::default(),
            flags: StatusFlags::default(),
            sink,
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator event loop.
///
/// Listens on two channels plus a staleness interval:
/// 1. Engine events from the channel task
/// 2. User commands from the TUI
///
/// Pushes `UiUpdate`s through `ui_tx` for the TUI render loop. Returns when
/// either channel closes or the user quits.
pub async fn run(
    mut engine_rx: mpsc::Receiver<EngineEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("orchestrator event loop started");

    let mut heartbeat_interval = tokio::time::interval(HEARTBEAT_CHECK_INTERVAL);
    // The first tick completes immediately; consume it so the first real
    // check happens after one full interval.
    heartbeat_interval.tick().await;

    loop {
        tokio::select! {
            // --- Engine events ---
            engine_event = engine_rx.recv() => {
                match engine_event {
                    Some(EngineEvent::Connected { addr }) => {
                        info!("engine connected from {addr}");
                        state.connection_status = ConnectionStatus::Connected;
                        state.last_engine_message_time = Some(Instant::now());
                        let _ = ui_tx
                            .send(UiUpdate::ConnectionStatus(ConnectionStatus::Connected))
                            .await;
                    }
                    Some(EngineEvent::Disconnected) => {
                        info!("engine disconnected");
                        state.connection_status = ConnectionStatus::Disconnected;
                        state.last_engine_message_time = None;
                        let _ = ui_tx
                            .send(UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected))
                            .await;
                    }
                    Some(EngineEvent::Message(json_str)) => {
                        // A frame after a stale timeout means the engine is
                        // back; only restore when a Connected event had been
                        // seen (last_engine_message_time is Some).
                        if state.connection_status == ConnectionStatus::Disconnected
                            && state.last_engine_message_time.is_some()
                        {
                            info!("engine connection restored after stale timeout");
                            state.connection_status = ConnectionStatus::Connected;
                            let _ = ui_tx
                                .send(UiUpdate::ConnectionStatus(ConnectionStatus::Connected))
                                .await;
                        }
                        if state.last_engine_message_time.is_some() {
                            state.last_engine_message_time = Some(Instant::now());
                        }
                        handle_engine_message(&mut state, &json_str, &ui_tx).await;
                    }
                    None => {
                        info!("engine channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Staleness check ---
            _ = heartbeat_interval.tick() => {
                if state.connection_status == ConnectionStatus::Connected {
                    if let Some(last_time) = state.last_engine_message_time {
                        let elapsed = last_time.elapsed();
                        if elapsed > HEARTBEAT_TIMEOUT {
                            warn!("no engine frame for {elapsed:?}, marking connection stale");
                            state.connection_status = ConnectionStatus::Disconnected;
                            let _ = ui_tx
                                .send(UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected))
                                .await;
                        }
                    }
                }
            }
        }
    }

    info!("orchestrator event loop exiting");
    Ok(())
}

/// Handle an incoming engine message (raw JSON).
async fn handle_engine_message(state: &mut AppState, json_str: &str, ui_tx: &mpsc::Sender<UiUpdate>) {
    let msg: EngineMessage = match serde_json::from_str(json_str) {
        Ok(m) => m,
        Err(e) => {
            warn!("failed to parse engine message: {e}");
            return;
        }
    };

    match msg {
        EngineMessage::DepthSnapshot { pos, players, stats } => {
            debug!(
                pos = pos.label(),
                players = players.len(),
                "depth snapshot received"
            );
            let _ = ui_tx
                .send(UiUpdate::DepthSnapshot { pos, players, stats })
                .await;
        }
        EngineMessage::SettingsSnapshot { settings } => {
            state.settings = settings.clone();
            let _ = ui_tx
                .send(UiUpdate::SettingsSnapshot(Box::new(settings)))
                .await;
        }
        EngineMessage::PlayoffsSnapshot {
            season,
            num_games_to_win,
            series,
        } => {
            let _ = ui_tx
                .send(UiUpdate::PlayoffsSnapshot {
                    season,
                    num_games_to_win,
                    series,
                })
                .await;
        }
        EngineMessage::Status { flags } => {
            state.flags = flags.clone();
            let _ = ui_tx.send(UiUpdate::Status(flags)).await;
        }
        EngineMessage::CommandAck { command, ok, error } => {
            // Acks are never rendered: the display follows authoritative
            // snapshots only.
            if ok {
                debug!("engine acked {command}");
            } else {
                warn!(
                    "engine rejected {command}: {}",
                    error.as_deref().unwrap_or("no reason given")
                );
            }
        }
        EngineMessage::Heartbeat => {
            // Timestamp tracking already happened in the event loop.
        }
    }
}

/// Handle a user command from the TUI: serialize and dispatch to the
/// engine, fire-and-forget. Dispatch failures are logged, never retried;
/// the display stays optimistic until the next authoritative push.
async fn handle_user_command(state: &mut AppState, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
    let engine_cmd = match cmd {
        UserCommand::ReorderDepth { pos, pids } => EngineCommand::ReorderDepth { pos, pids },
        UserCommand::AutoSortDepth { pos } => EngineCommand::AutoSortDepth { pos },
        UserCommand::AutoSortDepthAll => EngineCommand::AutoSortDepthAll,
        UserCommand::UpdateSettings(settings) => {
            state.settings = *settings.clone();
            EngineCommand::UpdateSettings {
                settings: *settings,
            }
        }
        UserCommand::ToggleGodMode { enabled } => {
            // Reflect the flip immediately; the engine will confirm with a
            // STATUS push.
            state.flags.god_mode = enabled;
            let _ = ui_tx.send(UiUpdate::Status(state.flags.clone())).await;
            EngineCommand::ToggleGodMode { enabled }
        }
        UserCommand::Quit => return,
    };

    if let Err(e) = state.sink.dispatch(engine_cmd).await {
        warn!("command dispatch failed: {e}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
