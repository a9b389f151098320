//! Offline commands operating on the durable cache directly.
//!
//! Read mutations made here skip the best-effort server signal (there is no
//! live connection); the next `watch` session reconciles against the server
//! snapshot, and the OR-merge rule keeps the local read state.

use anyhow::Result;
use assetdesk_core::store::{
    filter_unread, partition_by_today, unread_count, NotificationCache, NotificationStore,
};
use assetdesk_core::{CoreConfig, NotificationRecord};
use chrono::Local;

use super::routes::destination;

fn cache(config: &CoreConfig) -> NotificationCache {
    NotificationCache::new(&config.data_dir, &config.cache_key)
}

pub fn render_record(record: &NotificationRecord) -> String {
    let marker = if record.read { ' ' } else { '*' };
    let when = record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    let mut line = format!(
        "{marker} {when} [{}] {}",
        record.kind.as_tag(),
        record.display_text()
    );
    if let Some(sender) = &record.sender_name {
        line.push_str(&format!(" (from {sender})"));
    }
    line.push_str(&format!(" -> {}", destination(record)));
    line
}

/// List cached notifications, grouped into today/older.
pub async fn list(config: &CoreConfig, unread_only: bool, pretty: bool) -> Result<()> {
    let records = cache(config).load().await;

    if unread_only {
        let unread = filter_unread(&records);
        if pretty {
            println!("{}", serde_json::to_string_pretty(&unread)?);
        } else {
            for record in unread {
                println!("{}", render_record(record));
            }
        }
        return Ok(());
    }

    if pretty {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let (today, older) = partition_by_today(&records, Local::now());
    if !today.is_empty() {
        println!("Today");
        for record in today {
            println!("  {}", render_record(record));
        }
    }
    if !older.is_empty() {
        println!("Earlier");
        for record in older {
            println!("  {}", render_record(record));
        }
    }
    Ok(())
}

/// Print the unread count.
pub async fn unread(config: &CoreConfig) -> Result<()> {
    let records = cache(config).load().await;
    println!("{}", unread_count(&records));
    Ok(())
}

/// Mark one cached notification as read. An unknown id is a no-op.
pub async fn mark_read(config: &CoreConfig, id: &str) -> Result<()> {
    let cache = cache(config);
    let mut store = NotificationStore::new(config.retention_cap);
    store.apply_snapshot(&cache.load().await);

    if store.mark_one_read(id) {
        cache.save(store.records()).await;
        println!("marked {id} read");
    } else {
        println!("no notification with id {id}");
    }
    Ok(())
}

/// Mark every cached notification as read.
pub async fn mark_all_read(config: &CoreConfig) -> Result<()> {
    let cache = cache(config);
    let mut store = NotificationStore::new(config.retention_cap);
    store.apply_snapshot(&cache.load().await);

    store.mark_all_read();
    cache.save(store.records()).await;
    println!("marked {} notifications read", store.len());
    Ok(())
}

/// Print the destination route for a cached notification.
pub async fn route(config: &CoreConfig, id: &str) -> Result<()> {
    let records = cache(config).load().await;
    match records.iter().find(|r| r.id.as_deref() == Some(id)) {
        Some(record) => println!("{}", destination(record)),
        None => println!("no notification with id {id}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_core::models::RawNotification;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_record() {
        let record = RawNotification {
            id: Some("n-1".into()),
            kind: Some("ticket_assigned".into()),
            message: Some("Ticket assigned to you".into()),
            sender_name: Some("IT Desk".into()),
            timestamp: Some(Utc.timestamp_opt(1_750_000_000, 0).unwrap()),
            request_id: Some("REQ-3".into()),
            ..Default::default()
        }
        .validate(Utc.timestamp_opt(0, 0).unwrap())
        .unwrap();

        let line = render_record(&record);
        assert!(line.starts_with('*'));
        assert!(line.contains("[ticket_assigned]"));
        assert!(line.contains("Ticket assigned to you"));
        assert!(line.contains("(from IT Desk)"));
        assert!(line.ends_with("-> request-details/REQ-3"));
    }
}
