pub mod commands;
pub mod routes;
pub mod watch;

pub use commands::{list, mark_all_read, mark_read, route, unread};
pub use routes::destination;
pub use watch::run_watch;
