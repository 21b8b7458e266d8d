use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::UserConfig;

const APP_DIR: &str = "spotuify";

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        // Ensure it exists
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        dir
    }

    pub fn get_cache_dir() -> PathBuf {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR);
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn get_theme_path() -> PathBuf {
        Self::get_config_dir().join("theme.toml")
    }

    pub fn get_token_path() -> PathBuf {
        Self::get_cache_dir().join("token.json")
    }

    /// Load both files from the standard config directory
    pub fn load() -> (UserConfig, PersistentState) {
        Self::load_from(&Self::get_config_dir())
    }

    /// Load both files from `dir`. A missing config.toml is written with defaults.
    pub fn load_from(dir: &Path) -> (UserConfig, PersistentState) {
        let config_path = dir.join("config.toml");
        let state_path = dir.join("state.toml");

        let user_config = if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                    warn!(path = %config_path.display(), "invalid config, using defaults: {}", e);
                    UserConfig::default()
                }),
                Err(e) => {
                    warn!(path = %config_path.display(), "unreadable config: {}", e);
                    UserConfig::default()
                }
            }
        } else {
            let c = UserConfig::default();
            match Self::generate_config() {
                Ok(content) => {
                    if fs::write(&config_path, content).is_ok() {
                        info!(path = %config_path.display(), "wrote default config");
                    }
                }
                Err(e) => warn!("could not render default config: {}", e),
            }
            c
        };

        let state = fs::read_to_string(&state_path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();

        (user_config, state)
    }

    /// Default config.toml contents, for `--generate-config`.
    pub fn generate_config() -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(&UserConfig::default())?)
    }
}
