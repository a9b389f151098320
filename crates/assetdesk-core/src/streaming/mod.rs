pub mod protocol;
pub mod push_client;

pub use protocol::{ClientFrame, ServerFrame};
pub use push_client::PushChannelClient;
