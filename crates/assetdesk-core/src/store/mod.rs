pub mod cache;
pub mod notification_store;
pub mod views;

pub use cache::NotificationCache;
pub use notification_store::{merge, NotificationStore};
pub use views::{filter_unread, partition_by_today, unread_count};
