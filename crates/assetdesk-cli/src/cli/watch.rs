use anyhow::Result;
use assetdesk_core::{CoreConfig, EngineEvent, SyncEngine};

use super::commands::render_record;

/// How many notifications to echo after each snapshot.
const SNAPSHOT_PREVIEW: usize = 10;

/// Run the live engine until ctrl-c: join the user's channel, stream
/// snapshots, and echo every reconciliation.
pub async fn run_watch(config: CoreConfig, user: &str) -> Result<()> {
    let mut engine = SyncEngine::new(config, user)?;
    let handle = engine.handle();
    let state = engine.subscribe();
    let Some(mut events) = engine.take_events() else {
        anyhow::bail!("engine event stream already taken");
    };

    let engine_task = tokio::spawn(engine.run());
    eprintln!("watching notifications for {user} (ctrl-c to quit)");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                handle.shutdown();
                break;
            }
            event = events.recv() => match event {
                Some(EngineEvent::SnapshotApplied { total, unread }) => {
                    println!("-- {total} notifications, {unread} unread --");
                    for record in state.borrow().iter().take(SNAPSHOT_PREVIEW) {
                        println!("{}", render_record(record));
                    }
                }
                Some(EngineEvent::ReadStateChanged { unread }) => {
                    println!("-- read state changed, {unread} unread --");
                }
                None => break,
            },
        }
    }

    let _ = engine_task.await;
    Ok(())
}
