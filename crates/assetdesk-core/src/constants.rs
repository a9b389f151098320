//! Application-wide constants
//!
//! Centralized location for magic strings and configuration values
//! that are used across multiple modules.

/// Default address of the backend notification push channel.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:7340";

/// Default storage namespace for the durable notification cache.
pub const NOTIFICATION_CACHE_KEY: &str = "notifications";

/// Default cap on the canonical notification list (newest kept).
pub const DEFAULT_RETENTION_CAP: usize = 500;
