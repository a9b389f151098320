//! Navigation mapping: notification kind to dashboard destination route.
//!
//! The sync engine itself carries routing hints but never navigates; the
//! type-to-route table lives here with the caller.

use assetdesk_core::{NotificationKind, NotificationRecord};

pub const QUOTATIONS_ROUTE: &str = "quotations-list";
pub const NOTIFICATIONS_ROUTE: &str = "notifications-list";

/// Resolve the destination route for a notification.
///
/// An explicit `navigationPath` always wins. Ticket lifecycle kinds go to
/// the request detail page when a request id is present; everything else
/// falls back to the notifications list.
pub fn destination(record: &NotificationRecord) -> String {
    if let Some(path) = &record.navigation_path {
        return path.clone();
    }

    if record.kind.is_ticket_update() {
        if let Some(request_id) = &record.request_id {
            return format!("request-details/{request_id}");
        }
    }

    match record.kind {
        NotificationKind::QuotationSubmitted => QUOTATIONS_ROUTE.to_string(),
        _ => NOTIFICATIONS_ROUTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_core::models::RawNotification;
    use chrono::{TimeZone, Utc};

    fn record(kind: &str, request_id: Option<&str>, path: Option<&str>) -> NotificationRecord {
        RawNotification {
            kind: Some(kind.into()),
            message: Some("route me".into()),
            timestamp: Some(Utc.timestamp_opt(0, 0).unwrap()),
            request_id: request_id.map(String::from),
            navigation_path: path.map(String::from),
            ..Default::default()
        }
        .validate(Utc.timestamp_opt(0, 0).unwrap())
        .unwrap()
    }

    #[test]
    fn test_ticket_kinds_route_to_request_details() {
        for kind in [
            "ticket_assigned",
            "ticket_status",
            "ticket_completed",
            "ticket_reassigned",
        ] {
            let r = record(kind, Some("REQ-12"), None);
            assert_eq!(destination(&r), "request-details/REQ-12");
        }
    }

    #[test]
    fn test_quotation_routes_to_quotations_list() {
        let r = record("quotation_submitted", None, None);
        assert_eq!(destination(&r), QUOTATIONS_ROUTE);
    }

    #[test]
    fn test_explicit_navigation_path_wins() {
        let r = record("ticket_assigned", Some("REQ-12"), Some("devices/laptop-7"));
        assert_eq!(destination(&r), "devices/laptop-7");
    }

    #[test]
    fn test_ticket_update_without_request_id_falls_back() {
        let r = record("ticket_status", None, None);
        assert_eq!(destination(&r), NOTIFICATIONS_ROUTE);
    }

    #[test]
    fn test_generic_routes_to_notifications_list() {
        let r = record("generic", None, None);
        assert_eq!(destination(&r), NOTIFICATIONS_ROUTE);
    }
}
