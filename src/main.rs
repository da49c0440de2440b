// Sideline entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Create mpsc channels
// 4. Spawn engine WebSocket task
// 5. Spawn orchestrator task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use sideline::app;
use sideline::config;
use sideline::engine;
use sideline::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 2. Load config first so tracing can use its filter directive.
    let config = config::load_config().context("failed to load configuration")?;

    init_tracing(&config.log_filter)?;
    info!("sideline starting up");
    info!(
        "config loaded: engine_port={}, reconnect_secs={}",
        config.engine_port, config.reconnect_secs
    );

    // 3. Create mpsc channels
    let (engine_tx, engine_rx) = mpsc::channel(256);
    let (outbound_tx, outbound_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let state = app::AppState::new(Arc::new(engine::QueueSink::new(outbound_tx)));

    // 4. Spawn engine WebSocket task
    let engine_port = config.engine_port;
    let reconnect_secs = config.reconnect_secs;
    let engine_handle = tokio::spawn(async move {
        if let Err(e) = engine::run(engine_port, reconnect_secs, engine_tx, outbound_rx).await {
            error!("engine endpoint error: {}", e);
        }
    });

    // 5. Spawn orchestrator task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(engine_rx, cmd_rx, ui_tx, state).await {
            error!("orchestrator error: {}", e);
        }
    });

    info!(
        "ready; waiting for engine on 127.0.0.1:{}",
        engine_port
    );

    // 6. The TUI consumes ui_rx and sends commands through cmd_tx.
    // It blocks until the user presses 'q' or Ctrl+C.
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: wait for the orchestrator to drain (with timeout).
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    // Abort the engine endpoint (it loops forever).
    engine_handle.abort();

    info!("sideline shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("sideline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
