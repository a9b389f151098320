use std::collections::HashMap;

use crate::models::{IdentityKey, NotificationRecord};

/// Merge the canonical list with an incoming snapshot (a fresh push or the
/// initial cache load) into one deduplicated, sorted list.
///
/// For a key already present, the existing record is kept as-is except that
/// `read` becomes `existing.read || incoming.read`: read-state can only
/// advance, never regress, so a local "mark as read" survives a server
/// snapshot that has not caught up yet. Unseen keys are appended. The union
/// is stably sorted by timestamp descending.
///
/// Idempotent: merging the same snapshot twice equals merging it once.
pub fn merge(
    current: &[NotificationRecord],
    incoming: &[NotificationRecord],
) -> Vec<NotificationRecord> {
    let mut merged: Vec<NotificationRecord> = current.to_vec();
    let mut index: HashMap<IdentityKey, usize> = HashMap::with_capacity(merged.len());
    for (pos, record) in merged.iter().enumerate() {
        index.entry(record.identity_key()).or_insert(pos);
    }

    for record in incoming {
        match index.get(&record.identity_key()) {
            Some(&pos) => {
                merged[pos].read = merged[pos].read || record.read;
            }
            None => {
                index.insert(record.identity_key(), merged.len());
                merged.push(record.clone());
            }
        }
    }

    // sort_by is stable: equal timestamps keep their relative order
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged
}

/// Owner of the canonical notification list.
///
/// The list is exclusively held here for the lifetime of the running
/// instance; all mutation goes through [`apply_snapshot`](Self::apply_snapshot)
/// (reconciliation) and the read-state methods.
pub struct NotificationStore {
    records: Vec<NotificationRecord>,
    /// Newest-first cap on the canonical list so a long session cannot grow
    /// unbounded. Zero disables the cap.
    retention_cap: usize,
}

impl NotificationStore {
    pub fn new(retention_cap: usize) -> Self {
        Self {
            records: Vec::new(),
            retention_cap,
        }
    }

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reconcile an incoming snapshot into the canonical list.
    pub fn apply_snapshot(&mut self, incoming: &[NotificationRecord]) {
        self.records = merge(&self.records, incoming);
        if self.retention_cap > 0 && self.records.len() > self.retention_cap {
            // List is sorted newest-first, so truncation keeps the newest
            self.records.truncate(self.retention_cap);
        }
    }

    /// Mark the record with the given id as read.
    ///
    /// Returns true if the record was found (callers re-persist and signal
    /// the server only then). An unknown id is a no-op, not an error.
    pub fn mark_one_read(&mut self, id: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id.as_deref() == Some(id)) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every record as read. Returns true if anything changed.
    pub fn mark_all_read(&mut self) -> bool {
        let mut changed = false;
        for record in &mut self.records {
            changed |= !record.read;
            record.read = true;
        }
        changed
    }
}
