use crate::app::keys::KeyConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// Volume to restore on unmute when none was remembered
    pub default_volume: u8,
    pub volume_step: u8,
    pub seek_step_ms: u64,
    pub keys: KeyConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            poll_interval_ms: 1000,
            request_timeout_ms: 5000,
            default_volume: 50,
            volume_step: 5,
            seek_step_ms: 5000,
            keys: KeyConfig::default(),
        }
    }
}

impl UserConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(100))
    }
}
