use anyhow::Result;
use tokio::sync::{mpsc, watch};

use crate::config::CoreConfig;
use crate::events::EngineEvent;
use crate::models::NotificationRecord;
use crate::store::{unread_count, NotificationCache, NotificationStore};
use crate::streaming::{ClientFrame, PushChannelClient};

#[derive(Debug)]
pub enum EngineCommand {
    MarkOneRead { id: String },
    MarkAllRead,
    Shutdown,
}

/// Cloneable handle for driving the engine from elsewhere in the app.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn mark_one_read(&self, id: impl Into<String>) {
        let _ = self.command_tx.send(EngineCommand::MarkOneRead { id: id.into() });
    }

    pub fn mark_all_read(&self) {
        let _ = self.command_tx.send(EngineCommand::MarkAllRead);
    }

    pub fn shutdown(&self) {
        let _ = self.command_tx.send(EngineCommand::Shutdown);
    }
}

/// The notification synchronization engine.
///
/// Owns the canonical list for the lifetime of the running instance and
/// serializes every mutation (cache load, push snapshots, read mutations)
/// on one cooperative task, so nothing ever contends for the list. The push
/// channel client is constructed and owned here rather than living as a
/// module-scope singleton; shutting the engine down tears the connection
/// down with it.
pub struct SyncEngine {
    user_id: String,
    server_addr: String,
    store: NotificationStore,
    cache: NotificationCache,
    state_tx: watch::Sender<Vec<NotificationRecord>>,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<EngineEvent>>,
    command_tx: mpsc::UnboundedSender<EngineCommand>,
    command_rx: Option<mpsc::UnboundedReceiver<EngineCommand>>,
    outbound_tx: mpsc::UnboundedSender<ClientFrame>,
    outbound_rx: Option<mpsc::UnboundedReceiver<ClientFrame>>,
}

impl SyncEngine {
    pub fn new(config: CoreConfig, user_id: impl Into<String>) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let cache = NotificationCache::new(&config.data_dir, &config.cache_key);
        let (state_tx, _) = watch::channel(Vec::new());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        Ok(Self {
            user_id: user_id.into(),
            server_addr: config.server_addr,
            store: NotificationStore::new(config.retention_cap),
            cache,
            state_tx,
            event_tx,
            event_rx: Some(event_rx),
            command_tx,
            command_rx: Some(command_rx),
            outbound_tx,
            outbound_rx: Some(outbound_rx),
        })
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Watch the canonical list. The receiver always holds the latest
    /// published state and never blocks the engine.
    pub fn subscribe(&self) -> watch::Receiver<Vec<NotificationRecord>> {
        self.state_tx.subscribe()
    }

    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<EngineEvent>> {
        self.event_rx.take()
    }

    /// Run until shutdown: bootstrap from the durable cache, connect the push
    /// channel, then serialize snapshots and read mutations on this task.
    pub async fn run(mut self) {
        self.bootstrap().await;

        let (Some(outbound_rx), Some(mut command_rx)) =
            (self.outbound_rx.take(), self.command_rx.take())
        else {
            return;
        };
        let (snapshot_tx, mut snapshot_rx) = mpsc::channel(8);
        let client = PushChannelClient::new(self.server_addr.clone(), self.user_id.clone());
        let client_task = tokio::spawn(client.run(outbound_rx, snapshot_tx));

        loop {
            tokio::select! {
                snapshot = snapshot_rx.recv() => match snapshot {
                    Some(records) => self.apply_snapshot(&records).await,
                    None => break,
                },
                command = command_rx.recv() => match command {
                    Some(EngineCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command).await,
                },
            }
        }

        // Dropping the snapshot receiver and our outbound sender ends the
        // client's connection loop
        drop(snapshot_rx);
        drop(self);
        let _ = client_task.await;
    }

    /// One-time startup merge of whatever the durable cache holds.
    async fn bootstrap(&mut self) {
        let cached = self.cache.load().await;
        if cached.is_empty() {
            return;
        }
        tracing::info!("loaded {} cached notifications", cached.len());
        self.store.apply_snapshot(&cached);
        self.publish();
        self.emit_snapshot_applied();
    }

    async fn apply_snapshot(&mut self, incoming: &[NotificationRecord]) {
        self.store.apply_snapshot(incoming);
        self.publish();
        self.cache.save(self.store.records()).await;
        self.emit_snapshot_applied();
    }

    async fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::MarkOneRead { id } => {
                // Unknown id: no-op by design, callers cannot rely on an
                // error to detect "already read" or "not found"
                if self.store.mark_one_read(&id) {
                    self.finish_read_mutation().await;
                }
            }
            EngineCommand::MarkAllRead => {
                self.store.mark_all_read();
                self.finish_read_mutation().await;
            }
            EngineCommand::Shutdown => {}
        }
    }

    /// Re-persist the full list and signal the server, best-effort.
    async fn finish_read_mutation(&mut self) {
        self.publish();
        self.cache.save(self.store.records()).await;
        let _ = self.outbound_tx.send(ClientFrame::MarkAsRead {
            user_id: self.user_id.clone(),
        });
        let _ = self.event_tx.send(EngineEvent::ReadStateChanged {
            unread: unread_count(self.store.records()),
        });
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.store.records().to_vec());
    }

    fn emit_snapshot_applied(&self) {
        let _ = self.event_tx.send(EngineEvent::SnapshotApplied {
            total: self.store.len(),
            unread: unread_count(self.store.records()),
        });
    }
}
