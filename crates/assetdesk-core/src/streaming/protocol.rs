//! Wire frames for the notification push channel.
//!
//! The transport is newline-delimited JSON; each line is one frame tagged by
//! `type`. Snapshots carry untyped records on purpose: the backend enforces
//! no schema, so each record is validated individually at this boundary
//! rather than letting one bad record poison the whole frame.

use serde::{Deserialize, Serialize};

/// Client → server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Associate the connection with a user's notification channel.
    #[serde(rename_all = "camelCase")]
    Join { user_id: String },
    /// Best-effort read-state signal; no payload contract beyond identity.
    #[serde(rename_all = "camelCase")]
    MarkAsRead { user_id: String },
}

/// Server → client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    /// Full snapshot of the user's current notifications, never a delta.
    NewNotification { records: Vec<serde_json::Value> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_frame_encoding() {
        let frame = ClientFrame::Join {
            user_id: "u-42".into(),
        };
        let encoded = serde_json::to_value(&frame).unwrap();
        assert_eq!(encoded, json!({"type": "join", "userId": "u-42"}));
    }

    #[test]
    fn test_mark_as_read_frame_encoding() {
        let frame = ClientFrame::MarkAsRead {
            user_id: "u-42".into(),
        };
        let encoded = serde_json::to_value(&frame).unwrap();
        assert_eq!(encoded, json!({"type": "markAsRead", "userId": "u-42"}));
    }

    #[test]
    fn test_snapshot_frame_decoding() {
        let line = r#"{"type":"newNotification","records":[{"id":"1"},{"message":"m"}]}"#;
        let frame: ServerFrame = serde_json::from_str(line).unwrap();
        let ServerFrame::NewNotification { records } = frame;
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_unknown_frame_type_is_an_error() {
        let line = r#"{"type":"ping"}"#;
        assert!(serde_json::from_str::<ServerFrame>(line).is_err());
    }
}
