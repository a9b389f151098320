use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of notification tags emitted by the dashboard backend.
///
/// Tags the backend may add in the future are mapped to `Generic` at the
/// validation boundary instead of being dropped, so a newer server cannot
/// silence its own notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Generic,
    Ticket,
    TicketAssigned,
    TicketStatus,
    TicketCompleted,
    TicketReassigned,
    QuotationSubmitted,
}

impl NotificationKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "generic" => Some(NotificationKind::Generic),
            "ticket" => Some(NotificationKind::Ticket),
            "ticket_assigned" => Some(NotificationKind::TicketAssigned),
            "ticket_status" => Some(NotificationKind::TicketStatus),
            "ticket_completed" => Some(NotificationKind::TicketCompleted),
            "ticket_reassigned" => Some(NotificationKind::TicketReassigned),
            "quotation_submitted" => Some(NotificationKind::QuotationSubmitted),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            NotificationKind::Generic => "generic",
            NotificationKind::Ticket => "ticket",
            NotificationKind::TicketAssigned => "ticket_assigned",
            NotificationKind::TicketStatus => "ticket_status",
            NotificationKind::TicketCompleted => "ticket_completed",
            NotificationKind::TicketReassigned => "ticket_reassigned",
            NotificationKind::QuotationSubmitted => "quotation_submitted",
        }
    }

    /// True for the ticket lifecycle kinds that navigate to a request detail page.
    pub fn is_ticket_update(&self) -> bool {
        matches!(
            self,
            NotificationKind::TicketAssigned
                | NotificationKind::TicketStatus
                | NotificationKind::TicketCompleted
                | NotificationKind::TicketReassigned
        )
    }
}

/// One event delivered to a user, as held in the canonical list and in the
/// durable cache. Field names match the backend's camelCase wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Stable identifier. Absent for some server-originated records; identity
    /// then falls back to (message, timestamp, kind).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    /// Routing hint consumed outside the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Dedup key deciding whether two records represent the same event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Id(String),
    Composite {
        message: Option<String>,
        timestamp: DateTime<Utc>,
        kind: NotificationKind,
    },
}

impl NotificationRecord {
    pub fn identity_key(&self) -> IdentityKey {
        match &self.id {
            Some(id) => IdentityKey::Id(id.clone()),
            None => IdentityKey::Composite {
                message: self.message.clone(),
                timestamp: self.timestamp,
                kind: self.kind,
            },
        }
    }

    /// Best display text: `message` first, then `item`, then the kind tag.
    pub fn display_text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.item.as_deref())
            .unwrap_or_else(|| self.kind.as_tag())
    }
}

/// Wire shape of an incoming record: every field optional, unknown fields
/// ignored. The backend enforces no schema, so nothing here is trusted until
/// `validate` has run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotification {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub action: Option<String>,
    pub item: Option<String>,
    pub sender_name: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub read: Option<bool>,
    pub navigation_path: Option<String>,
    pub request_id: Option<String>,
}

impl RawNotification {
    /// Promote a raw record to a canonical one.
    ///
    /// Returns `None` for malformed records (no type, no message and no
    /// timestamp at all). A missing timestamp is filled from `now`; an
    /// existing timestamp is never overwritten. Unrecognized type tags map
    /// to `generic`.
    pub fn validate(self, now: DateTime<Utc>) -> Option<NotificationRecord> {
        if self.kind.is_none() && self.message.is_none() && self.timestamp.is_none() {
            return None;
        }

        let kind = self
            .kind
            .as_deref()
            .map(|tag| NotificationKind::from_tag(tag).unwrap_or(NotificationKind::Generic))
            .unwrap_or(NotificationKind::Generic);

        Some(NotificationRecord {
            id: self.id,
            kind,
            message: self.message,
            action: self.action,
            item: self.item,
            sender_name: self.sender_name,
            status: self.status,
            timestamp: self.timestamp.unwrap_or(now),
            read: self.read.unwrap_or(false),
            navigation_path: self.navigation_path,
            request_id: self.request_id,
        })
    }
}

/// Validate a whole snapshot of untyped records.
///
/// Records that fail to deserialize or fail `validate` are dropped with a
/// debug log; the rest of the snapshot is processed normally.
pub fn validate_snapshot(values: Vec<serde_json::Value>, now: DateTime<Utc>) -> Vec<NotificationRecord> {
    values
        .into_iter()
        .filter_map(|value| {
            let raw: RawNotification = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!("dropping undecodable notification record: {err}");
                    return None;
                }
            };
            let record = raw.validate(now);
            if record.is_none() {
                tracing::debug!("dropping malformed notification record (no type/message/timestamp)");
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_identity_key_prefers_id() {
        let record = RawNotification {
            id: Some("n-1".into()),
            kind: Some("ticket".into()),
            message: Some("Ticket updated".into()),
            timestamp: Some(at(100)),
            ..Default::default()
        }
        .validate(at(0))
        .unwrap();

        assert_eq!(record.identity_key(), IdentityKey::Id("n-1".into()));
    }

    #[test]
    fn test_identity_key_composite_without_id() {
        let record = RawNotification {
            kind: Some("ticket_status".into()),
            message: Some("Ticket updated".into()),
            timestamp: Some(at(300)),
            ..Default::default()
        }
        .validate(at(0))
        .unwrap();

        assert_eq!(
            record.identity_key(),
            IdentityKey::Composite {
                message: Some("Ticket updated".into()),
                timestamp: at(300),
                kind: NotificationKind::TicketStatus,
            }
        );
    }

    #[test]
    fn test_validate_fills_missing_timestamp_from_clock() {
        let record = RawNotification {
            message: Some("hello".into()),
            ..Default::default()
        }
        .validate(at(42))
        .unwrap();

        assert_eq!(record.timestamp, at(42));
        assert!(!record.read);
    }

    #[test]
    fn test_validate_never_overwrites_timestamp() {
        let record = RawNotification {
            message: Some("hello".into()),
            timestamp: Some(at(7)),
            ..Default::default()
        }
        .validate(at(42))
        .unwrap();

        assert_eq!(record.timestamp, at(7));
    }

    #[test]
    fn test_validate_drops_fully_malformed_record() {
        let raw = RawNotification {
            sender_name: Some("IT Desk".into()),
            ..Default::default()
        };
        assert!(raw.validate(at(0)).is_none());
    }

    #[test]
    fn test_unknown_kind_maps_to_generic() {
        let record = RawNotification {
            kind: Some("device_retired".into()),
            message: Some("Laptop retired".into()),
            timestamp: Some(at(1)),
            ..Default::default()
        }
        .validate(at(0))
        .unwrap();

        assert_eq!(record.kind, NotificationKind::Generic);
    }

    #[test]
    fn test_snapshot_validation_drops_only_bad_records() {
        let values = vec![
            json!({"id": "a", "type": "ticket_assigned", "message": "Assigned", "timestamp": "2026-08-01T10:00:00Z"}),
            json!({"senderName": "nobody"}),
            json!("not even an object"),
            json!({"message": "no timestamp, still fine"}),
        ];

        let records = validate_snapshot(values, at(50));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("a"));
        assert_eq!(records[1].timestamp, at(50));
    }

    #[test]
    fn test_wire_round_trip_is_camel_case() {
        let record = RawNotification {
            id: Some("n-9".into()),
            kind: Some("quotation_submitted".into()),
            message: Some("Quotation ready".into()),
            sender_name: Some("Procurement".into()),
            timestamp: Some(at(10)),
            request_id: Some("REQ-7".into()),
            ..Default::default()
        }
        .validate(at(0))
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "quotation_submitted");
        assert_eq!(value["senderName"], "Procurement");
        assert_eq!(value["requestId"], "REQ-7");
        assert!(value.get("navigationPath").is_none());

        let back: NotificationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
