// WebSocket channel to the simulation engine.
//
// The console hosts the endpoint; the engine process connects to it,
// pushes authoritative snapshots as JSON text frames, and receives
// fire-and-forget command frames back over the same socket.

use async_trait::async_trait;
use futures_util::stream::Stream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::protocol::EngineCommand;

/// Events emitted by the engine channel to the application layer.
#[derive(Debug, PartialEq)]
pub enum EngineEvent {
    /// The engine has connected.
    Connected { addr: String },
    /// The engine has disconnected.
    Disconnected,
    /// A text message was received from the engine (raw JSON string).
    Message(String),
}

// ---------------------------------------------------------------------------
// Command sink
// ---------------------------------------------------------------------------

/// Outbound command seam. The orchestrator dispatches through this trait so
/// tests can substitute a recording sink for the real socket queue.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Queue a command for delivery to the engine. Fire-and-forget: the
    /// caller never waits for, or learns of, the engine's ack.
    async fn dispatch(&self, cmd: EngineCommand) -> anyhow::Result<()>;
}

/// Serializes commands and hands them to the channel task's outbound queue.
pub struct QueueSink {
    tx: mpsc::Sender<String>,
}

impl QueueSink {
    pub fn new(tx: mpsc::Sender<String>) -> QueueSink {
        QueueSink { tx }
    }
}

#[async_trait]
impl CommandSink for QueueSink {
    async fn dispatch(&self, cmd: EngineCommand) -> anyhow::Result<()> {
        let json = serde_json::to_string(&cmd)?;
        debug!("dispatching engine command: {json}");
        self.tx
            .send(json)
            .await
            .map_err(|_| anyhow::anyhow!("engine channel task has shut down"))
    }
}

// ---------------------------------------------------------------------------
// Channel task
// ---------------------------------------------------------------------------

/// Run the engine channel on the given port.
///
/// Binds a TCP listener on `127.0.0.1:{port}`, retrying every
/// `reconnect_secs` while the port is taken, and accepts one engine
/// connection at a time. Inbound text frames are forwarded through `tx`;
/// queued outbound commands from `cmd_rx` are written to the socket.
/// Commands queued while no engine is connected are dropped with a warning;
/// a later authoritative push is the only consistency mechanism anyway.
pub async fn run(
    port: u16,
    reconnect_secs: u64,
    tx: mpsc::Sender<EngineEvent>,
    mut cmd_rx: mpsc::Receiver<String>,
) -> anyhow::Result<()> {
    let listener = loop {
        match TcpListener::bind(format!("127.0.0.1:{port}")).await {
            Ok(listener) => break listener,
            Err(e) => {
                warn!("failed to bind 127.0.0.1:{port}: {e}, retrying in {reconnect_secs}s");
                tokio::time::sleep(std::time::Duration::from_secs(reconnect_secs)).await;
            }
        }
    };
    let local_addr = listener.local_addr()?;
    info!("engine channel listening on {local_addr}");

    loop {
        let (stream, addr) = tokio::select! {
            accepted = listener.accept() => accepted?,
            // Drain commands queued while nothing is connected.
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(json) => {
                        warn!("engine not connected, dropping command: {json}");
                        continue;
                    }
                    None => return Ok(()),
                }
            }
        };
        let addr_str = addr.to_string();
        info!("accepted TCP connection from {addr_str}");

        let ws_stream = match tokio_tungstenite::accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                warn!("WebSocket handshake failed for {addr_str}: {e}");
                continue;
            }
        };

        if tx
            .send(EngineEvent::Connected {
                addr: addr_str.clone(),
            })
            .await
            .is_err()
        {
            break;
        }

        let (mut write, read) = ws_stream.split();
        let mut read = read.fuse();

        // Pump this connection until either side goes away.
        let session_result = loop {
            tokio::select! {
                frame = read.next() => {
                    match pump_frame(frame, &tx, &addr_str).await {
                        PumpStep::Continue => {}
                        PumpStep::ConnectionDone => break Ok(()),
                        PumpStep::ChannelClosed => break Err(()),
                    }
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(json) => {
                            if let Err(e) = write.send(Message::Text(json.into())).await {
                                warn!("failed to send command to engine: {e}");
                                break Ok(());
                            }
                        }
                        None => break Err(()),
                    }
                }
            }
        };

        if tx.send(EngineEvent::Disconnected).await.is_err() || session_result.is_err() {
            break;
        }
    }

    Ok(())
}

enum PumpStep {
    Continue,
    ConnectionDone,
    ChannelClosed,
}

async fn pump_frame(
    frame: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>,
    tx: &mpsc::Sender<EngineEvent>,
    addr: &str,
) -> PumpStep {
    match frame {
        Some(Ok(Message::Text(text))) => {
            if tx
                .send(EngineEvent::Message(text.to_string()))
                .await
                .is_err()
            {
                PumpStep::ChannelClosed
            } else {
                PumpStep::Continue
            }
        }
        Some(Ok(Message::Close(_))) => {
            info!("engine {addr} sent close frame");
            PumpStep::ConnectionDone
        }
        Some(Err(e)) => {
            warn!("WebSocket error from {addr}: {e}");
            PumpStep::ConnectionDone
        }
        Some(Ok(_)) => {
            // Ignore Binary, Ping, Pong, Frame variants.
            PumpStep::Continue
        }
        None => PumpStep::ConnectionDone,
    }
}

/// Process raw WebSocket [`Message`] items from any [`Stream`], forwarding
/// text payloads through `tx`. Pure logic, no I/O; the primary unit-test
/// target for the inbound half.
pub async fn process_message_stream<St>(
    mut stream: St,
    tx: &mpsc::Sender<EngineEvent>,
    addr: &str,
) -> Result<(), ()>
where
    St: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(msg_result) = stream.next().await {
        match pump_frame(Some(msg_result), tx, addr).await {
            PumpStep::Continue => {}
            PumpStep::ConnectionDone => break,
            PumpStep::ChannelClosed => return Err(()),
        }
    }
    Ok(())
}
