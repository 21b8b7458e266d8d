use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Key bindings as written in the `[keys]` table of config.toml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub toggle_help: String,
    pub search: String,
    pub search_alt: String,
    pub show_devices: String,

    // Playback
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub volume_up: String,
    pub volume_down: String,
    pub mute: String,
    pub seek_forward: String,
    pub seek_backward: String,
    pub shuffle: String,
    pub repeat: String,

    // Views
    pub view_library: String,
    pub view_home: String,

    // Navigation
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub tab_next: String,
    pub tab_prev: String,
    pub select: String,
    pub back: String,
    pub close: String,

    // Library
    pub add_to_queue: String,
    pub save_track: String,
    pub remove_track: String,
    pub filter: String,
    pub refresh: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            toggle_help: "?".to_string(),
            search: "s".to_string(),
            search_alt: "/".to_string(),
            show_devices: "d".to_string(),

            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            mute: "m".to_string(),
            seek_forward: "Right".to_string(),
            seek_backward: "Left".to_string(),
            shuffle: "z".to_string(),
            repeat: "r".to_string(),

            view_library: "l".to_string(),
            view_home: "h".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            tab_next: "Tab".to_string(),
            tab_prev: "BackTab".to_string(),
            select: "Enter".to_string(),
            back: "Backspace".to_string(),
            close: "Esc".to_string(),

            add_to_queue: "a".to_string(),
            save_track: "L".to_string(),
            remove_track: "U".to_string(),
            filter: "f".to_string(),
            refresh: "R".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => match s.chars().next() {
                Some(ch) if ch.is_uppercase() => {
                    event.code == KeyCode::Char(ch)
                        || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                            && event.modifiers.contains(KeyModifiers::SHIFT))
                }
                Some(ch) => {
                    // '+' and '?' arrive with SHIFT set; shifted letters do not match
                    let shifted_letter =
                        ch.is_alphabetic() && event.modifiers.contains(KeyModifiers::SHIFT);
                    event.code == KeyCode::Char(ch)
                        && !shifted_letter
                        && !event.modifiers.contains(KeyModifiers::CONTROL)
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Either of two bindings.
    pub fn matches_any(&self, event: KeyEvent, a: &str, b: &str) -> bool {
        self.matches(event, a) || self.matches(event, b)
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }
}
