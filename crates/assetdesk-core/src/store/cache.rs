//! Durable cache for the canonical notification list.
//!
//! One JSON file per namespace key under the data directory, surviving
//! restarts. Both operations are best-effort: the in-memory list stays
//! authoritative for the running session, so `save` failures are logged and
//! swallowed, and a corrupted slot is reset to empty rather than surfaced.

use std::path::{Path, PathBuf};

use crate::models::NotificationRecord;

#[derive(Debug, thiserror::Error)]
enum CacheError {
    #[error("failed to write cache file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize cache payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed persistence slot for one user's notification list.
pub struct NotificationCache {
    path: PathBuf,
}

impl NotificationCache {
    /// The namespace key is an explicit configuration value, not a literal
    /// scattered across call sites; it becomes the file name.
    pub fn new(data_dir: &Path, namespace: &str) -> Self {
        Self {
            path: data_dir.join(format!("{namespace}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted list.
    ///
    /// Missing file (first run) yields an empty list. Unparsable content
    /// yields an empty list AND clears the corrupted slot; nothing is raised
    /// upward.
    pub async fn load(&self) -> Vec<NotificationRecord> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!("notification cache unreadable at {:?}: {err}", self.path);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    "notification cache corrupted at {:?} ({err}), resetting",
                    self.path
                );
                self.clear().await;
                Vec::new()
            }
        }
    }

    /// Persist the full canonical list, fire-and-forget.
    pub async fn save(&self, records: &[NotificationRecord]) {
        if let Err(err) = self.try_save(records).await {
            tracing::warn!("notification cache save failed at {:?}: {err}", self.path);
        }
    }

    /// Delete the slot. Ignores errors (e.g. file already absent).
    pub async fn clear(&self) {
        let _ = tokio::fs::remove_file(&self.path).await;
    }

    // Write-to-temp-then-rename so an interrupted write can never leave a
    // half-written slot behind.
    async fn try_save(&self, records: &[NotificationRecord]) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string(records)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, contents).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNotification;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn record(id: &str, secs: i64) -> NotificationRecord {
        RawNotification {
            id: Some(id.into()),
            kind: Some("ticket".into()),
            message: Some("cached".into()),
            timestamp: Some(Utc.timestamp_opt(secs, 0).unwrap()),
            ..Default::default()
        }
        .validate(Utc.timestamp_opt(0, 0).unwrap())
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let cache = NotificationCache::new(dir.path(), "notifications");
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let cache = NotificationCache::new(dir.path(), "notifications");

        let records = vec![record("1", 100), record("2", 200)];
        cache.save(&records).await;

        assert_eq!(cache.load().await, records);
    }

    #[tokio::test]
    async fn test_corrupted_slot_resets_to_empty() {
        let dir = tempdir().unwrap();
        let cache = NotificationCache::new(dir.path(), "notifications");

        tokio::fs::write(cache.path(), "not json {{{")
            .await
            .unwrap();

        assert!(cache.load().await.is_empty());
        // The corrupted slot was cleared, not left to fail again
        assert!(!cache.path().exists());
    }

    #[tokio::test]
    async fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let cache = NotificationCache::new(&nested, "notifications");

        cache.save(&[record("1", 1)]).await;
        assert_eq!(cache.load().await.len(), 1);
    }
}
