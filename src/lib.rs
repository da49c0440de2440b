// Sideline: a terminal console for a football franchise sim engine.
//
// The engine pushes authoritative state over a local WebSocket; the
// console renders it, lets the user reorder depth charts and edit league
// settings, and sends commands back. Three tasks, connected by channels:
//
//   engine (WebSocket)  -> app (orchestrator) -> tui (terminal)
//   tui -> app -> engine
//
// Module overview:
// - `depth`: roster ordering, keyboard reorder gesture, optimistic
//   reconciliation against engine snapshots
// - `protocol`: wire messages and internal channel types
// - `engine`: WebSocket endpoint the engine connects to
// - `app`: orchestrator event loop and command dispatch
// - `tui`: terminal UI (pages, widgets, input)
// - `config`: file-based configuration

pub mod app;
pub mod config;
pub mod depth;
pub mod engine;
pub mod protocol;
pub mod tui;
