use crate::player::DeviceInfo;
use std::time::Instant;

/// Which panels are on screen 🎛️
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Now-playing card only
    #[default]
    Home,
    /// Now-playing card plus the library panel, which takes navigation keys
    Library,
}

/// What the input popup is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Search,
    Filter,
}

/// Generic Input Popup State 📝
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub title: String,
    pub value: String,
}

impl InputState {
    pub fn new(mode: InputMode, title: &str, initial_value: &str) -> Self {
        Self {
            mode,
            title: title.to_string(),
            value: initial_value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Devices popup 🔈
#[derive(Debug, Clone, Default)]
pub struct DevicePicker {
    pub devices: Vec<DeviceInfo>,
    pub selected: usize,
    pub loading: bool,
}

impl DevicePicker {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    /// Fill the list, preselecting `preferred` (else the active device).
    pub fn set_devices(&mut self, devices: Vec<DeviceInfo>, preferred: Option<&str>) {
        self.selected = preferred
            .and_then(|id| devices.iter().position(|d| d.id == id))
            .or_else(|| devices.iter().position(|d| d.is_active))
            .unwrap_or(0);
        self.devices = devices;
        self.loading = false;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.devices.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_device(&self) -> Option<&DeviceInfo> {
        self.devices.get(self.selected)
    }
}
