use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_RETENTION_CAP, DEFAULT_SERVER_ADDR, NOTIFICATION_CACHE_KEY};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Address of the dashboard backend's notification push channel.
    pub server_addr: String,
    /// Storage namespace for the durable notification cache.
    pub cache_key: String,
    /// Cap on the canonical list (newest kept). Zero disables the cap.
    pub retention_cap: usize,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            cache_key: NOTIFICATION_CACHE_KEY.to_string(),
            retention_cap: DEFAULT_RETENTION_CAP,
        }
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("assetdesk")
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}
