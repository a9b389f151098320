pub mod notification;

pub use notification::{
    validate_snapshot, IdentityKey, NotificationKind, NotificationRecord, RawNotification,
};
