pub mod config;
pub mod constants;
pub mod events;
pub mod models;
pub mod runtime;
pub mod store;
pub mod streaming;

// Re-export the primary surface at crate root for convenience
pub use config::CoreConfig;
pub use events::EngineEvent;
pub use models::{NotificationKind, NotificationRecord};
pub use runtime::{EngineHandle, SyncEngine};
