use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Automatically saved session state
/// stored in `state.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersistentState {
    /// Device chosen in the devices popup, preselected next launch
    pub last_device_id: Option<String>,
    /// Volume before muting, restored on unmute
    pub unmute_volume: Option<u8>,
}

impl PersistentState {
    pub fn save_to(&self, path: &Path) {
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(path, content) {
                    warn!(path = %path.display(), "failed to save state: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize state: {}", e),
        }
    }
}
