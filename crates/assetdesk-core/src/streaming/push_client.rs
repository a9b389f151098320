use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::models::{validate_snapshot, NotificationRecord};

use super::protocol::{ClientFrame, ServerFrame};

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Client side of the notification push channel.
///
/// Maintains one live connection per running instance. On connect it joins
/// the channel for the configured user, then forwards every validated
/// snapshot to the engine. Delivery is at-most-once per push and missed
/// pushes are harmless: the next snapshot is full state, not a delta, which
/// makes the channel self-healing after any dropped message.
///
/// Constructed and owned by the caller; dropping the outbound sender ends
/// the connection and the task.
pub struct PushChannelClient {
    server_addr: String,
    user_id: String,
}

impl PushChannelClient {
    pub fn new(server_addr: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            user_id: user_id.into(),
        }
    }

    /// Run the connection loop.
    ///
    /// Validated snapshots go out through `snapshot_tx`; best-effort frames
    /// from the engine (mark-as-read) come in on `outbound_rx` and are
    /// written to the live connection, or dropped while disconnected.
    /// Returns when the engine side hangs up or when `outbound_rx` closes.
    pub async fn run(
        self,
        mut outbound_rx: mpsc::UnboundedReceiver<ClientFrame>,
        snapshot_tx: mpsc::Sender<Vec<NotificationRecord>>,
    ) {
        loop {
            let stream = match TcpStream::connect(&self.server_addr).await {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::warn!("push channel connect to {} failed: {err}", self.server_addr);
                    // Drain queued outbound frames while waiting so the
                    // channel cannot back up; they are best-effort anyway.
                    tokio::select! {
                        _ = tokio::time::sleep(RECONNECT_DELAY) => continue,
                        frame = outbound_rx.recv() => match frame {
                            Some(_) => continue,
                            None => return,
                        },
                    }
                }
            };

            tracing::info!("push channel connected to {}", self.server_addr);
            match self
                .drive_connection(stream, &mut outbound_rx, &snapshot_tx)
                .await
            {
                ConnectionEnd::EngineGone => return,
                ConnectionEnd::Disconnected => {
                    tracing::info!("push channel disconnected, reconnecting");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }

    async fn drive_connection(
        &self,
        stream: TcpStream,
        outbound_rx: &mut mpsc::UnboundedReceiver<ClientFrame>,
        snapshot_tx: &mpsc::Sender<Vec<NotificationRecord>>,
    ) -> ConnectionEnd {
        let (read_half, mut write_half) = tokio::io::split(stream);
        let mut lines = BufReader::new(read_half).lines();

        let join = ClientFrame::Join {
            user_id: self.user_id.clone(),
        };
        if write_frame(&mut write_half, &join).await.is_err() {
            return ConnectionEnd::Disconnected;
        }

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        // EOF or read error: treat both as a disconnect
                        Ok(None) | Err(_) => return ConnectionEnd::Disconnected,
                    };
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<ServerFrame>(&line) {
                        Ok(ServerFrame::NewNotification { records }) => {
                            let validated = validate_snapshot(records, Utc::now());
                            if snapshot_tx.send(validated).await.is_err() {
                                return ConnectionEnd::EngineGone;
                            }
                        }
                        Err(err) => {
                            tracing::debug!("skipping unparsable push frame: {err}");
                        }
                    }
                }
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else {
                        return ConnectionEnd::EngineGone;
                    };
                    if write_frame(&mut write_half, &frame).await.is_err() {
                        return ConnectionEnd::Disconnected;
                    }
                }
            }
        }
    }
}

enum ConnectionEnd {
    /// The engine dropped its end; shut down for good.
    EngineGone,
    /// The server went away; reconnect and wait for the next full snapshot.
    Disconnected,
}

async fn write_frame(
    write_half: &mut WriteHalf<TcpStream>,
    frame: &ClientFrame,
) -> std::io::Result<()> {
    let mut line = serde_json::to_string(frame).map_err(std::io::Error::other)?;
    line.push('\n');
    write_half.write_all(line.as_bytes()).await
}
