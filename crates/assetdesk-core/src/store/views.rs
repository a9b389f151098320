//! Read-only views over the canonical list. Stateless, recomputed on demand;
//! none of these mutate their input.

use chrono::{DateTime, Local};

use crate::models::NotificationRecord;

pub fn unread_count(records: &[NotificationRecord]) -> usize {
    records.iter().filter(|r| !r.read).count()
}

pub fn filter_unread(records: &[NotificationRecord]) -> Vec<&NotificationRecord> {
    records.iter().filter(|r| !r.read).collect()
}

/// Split into (today, older) by calendar day in the evaluator's local clock.
pub fn partition_by_today<'a>(
    records: &'a [NotificationRecord],
    now: DateTime<Local>,
) -> (Vec<&'a NotificationRecord>, Vec<&'a NotificationRecord>) {
    let today = now.date_naive();
    records
        .iter()
        .partition(|r| r.timestamp.with_timezone(&Local).date_naive() == today)
}
