use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    /// Accent: progress, active tab, selection
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(18, 18, 18),
            surface: Color::Rgb(40, 40, 40),
            overlay: Color::Rgb(179, 179, 179),
            text: Color::Rgb(255, 255, 255),
            green: Color::Rgb(29, 185, 84),
            red: Color::Rgb(233, 20, 41),
            yellow: Color::Rgb(255, 165, 0),
            blue: Color::Rgb(80, 155, 245),
            magenta: Color::Rgb(200, 120, 220),
            cyan: Color::Rgb(30, 215, 96),
        }
    }
}

// Helper for serialization/deserialization
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn load_current_theme() -> Theme {
    load_theme(&crate::app::config::AppConfig::get_theme_path())
}

/// Read `[theme]` from `path`, writing the default palette there if the file is missing.
pub fn load_theme(path: &Path) -> Theme {
    if !path.exists() {
        let wrapper = ThemeFile {
            theme: Theme::default(),
        };
        if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
            let _ = fs::write(path, toml_str);
        }
        return wrapper.theme;
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<ThemeFile>(&content) {
            Ok(wrapper) => wrapper.theme,
            Err(e) => {
                warn!(path = %path.display(), "invalid theme, using default: {}", e);
                Theme::default()
            }
        },
        Err(_) => Theme::default(),
    }
}
