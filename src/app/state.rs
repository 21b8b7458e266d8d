use super::config::{AppConfig, PersistentState, UserConfig};
use super::keys::KeyConfig;
use crate::player::{Command, CommandField, DeviceInfo, ErrorKind, PlaybackSnapshot};
use crate::sync::{Dispatcher, SyncEvent};
use crate::ui::theme::Theme;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod library;
mod ui;

pub use library::{LibraryPage, LibraryState, LibraryTab, LoadTicket};
pub use ui::{DevicePicker, InputMode, InputState, Toast, ViewMode};

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,

    /// What the now-playing card shows: polled state plus pending optimistic changes
    pub playback: PlaybackSnapshot,
    /// Last poll failure, cleared by the next successful poll
    pub sync_error: Option<ErrorKind>,
    /// Commands are refused until a device is picked
    pub device_blocked: bool,
    /// Controls the account is not allowed to use
    pub disabled: Vec<CommandField>,
    /// User finished `spotuify auth` in another shell; reload the token and resume polling
    pub reauth_requested: bool,

    pub view_mode: ViewMode,
    pub library: LibraryState,

    /// UI State
    pub show_help: bool,
    pub devices: Option<DevicePicker>,
    pub input_state: Option<InputState>,
    pub toast: Option<Toast>,

    pub volume_step: u8,
    pub seek_step_ms: u64,
    pub default_volume: u8,
    pub state: PersistentState,
    pub state_path: PathBuf,
}

impl App {
    pub fn new(config: &UserConfig, state: PersistentState, theme: Theme) -> Self {
        Self {
            theme,
            keys: config.keys.clone(),
            is_running: true,
            playback: PlaybackSnapshot::default(),
            sync_error: None,
            device_blocked: false,
            disabled: Vec::new(),
            reauth_requested: false,
            view_mode: ViewMode::default(),
            library: LibraryState::default(),
            show_help: false,
            devices: None,
            input_state: None,
            toast: None,
            volume_step: config.volume_step,
            seek_step_ms: config.seek_step_ms,
            default_volume: config.default_volume,
            state,
            state_path: AppConfig::get_state_path(),
        }
    }

    /// Pull what the view shows from the sync core.
    pub fn sync_from(&mut self, dispatcher: &Dispatcher) {
        self.playback = dispatcher.display();
        self.device_blocked = dispatcher.is_device_blocked();
        self.disabled = CommandField::ALL
            .into_iter()
            .filter(|field| dispatcher.is_disabled(*field))
            .collect();
    }

    pub fn is_disabled(&self, field: CommandField) -> bool {
        self.disabled.contains(&field)
    }

    pub fn save_state(&self) {
        self.state.save_to(&self.state_path);
    }

    pub fn get_current_position_ms(&self) -> u64 {
        self.playback.position_at(Instant::now())
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(2500);

        if let Some(ref mut current) = self.toast {
            // Keep start_time so rapid updates don't replay the entrance animation
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }

    pub fn on_sync_event(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::Snapshot(_) => {
                if self.sync_error.take() == Some(ErrorKind::AuthExpired) {
                    self.show_toast("🔓 Reconnected to Spotify");
                }
            }
            SyncEvent::Error(kind) => {
                let first = self.sync_error != Some(*kind);
                self.sync_error = Some(*kind);
                if first && *kind == ErrorKind::AuthExpired {
                    self.show_toast("🔒 Session expired: run `spotuify auth`, then press R");
                }
            }
            SyncEvent::CommandFailed { command, kind } => {
                let message = match kind {
                    ErrorKind::NoActiveDevice => {
                        "No active device, press d to pick one".to_string()
                    }
                    ErrorKind::PremiumRequired => format!("{} needs Spotify Premium", command),
                    _ => format!("✗ {} failed: {}", command, kind),
                };
                self.show_toast(&message);
            }
        }
    }

    pub fn on_devices_loaded(&mut self, devices: Vec<DeviceInfo>) {
        if let Some(picker) = self.devices.as_mut() {
            picker.set_devices(devices, self.state.last_device_id.as_deref());
        }
    }

    pub fn on_library_failed(&mut self, kind: ErrorKind) {
        self.library.loading = false;
        if let Some(picker) = self.devices.as_mut() {
            picker.loading = false;
        }
        self.show_toast(&format!("✗ Library: {}", kind));
    }

    /// Explain a command the dispatcher refused to send.
    pub fn on_rejected(&mut self, kind: ErrorKind) {
        // PremiumRequired was already reported when the field got disabled
        if kind == ErrorKind::NoActiveDevice {
            self.show_toast("No active device, press d to pick one");
        }
    }

    pub fn play_pause_command(&self) -> Command {
        if self.playback.is_playing {
            Command::Pause
        } else {
            Command::Play
        }
    }

    pub fn volume_command(&self, up: bool) -> Option<Command> {
        let current = self.playback.volume?;
        let target = if up {
            current.saturating_add(self.volume_step).min(100)
        } else {
            current.saturating_sub(self.volume_step)
        };
        (target != current).then_some(Command::SetVolume(target))
    }

    /// Mute remembers the volume it replaced; unmute restores it.
    pub fn mute_command(&mut self) -> Option<Command> {
        let current = self.playback.volume?;
        if current > 0 {
            self.state.unmute_volume = Some(current);
            Some(Command::SetVolume(0))
        } else {
            let restore = self.state.unmute_volume.take().unwrap_or(self.default_volume);
            Some(Command::SetVolume(restore.min(100)))
        }
    }

    pub fn seek_command(&self, forward: bool) -> Option<Command> {
        self.playback.track.as_ref()?;
        let pos = self.get_current_position_ms();
        let target = if forward {
            match self.playback.duration_ms() {
                0 => pos.saturating_add(self.seek_step_ms),
                d => pos.saturating_add(self.seek_step_ms).min(d),
            }
        } else {
            pos.saturating_sub(self.seek_step_ms)
        };
        Some(Command::SeekTo(target))
    }

    pub fn shuffle_command(&self) -> Command {
        Command::SetShuffle(!self.playback.shuffle)
    }

    pub fn repeat_command(&self) -> Command {
        Command::SetRepeat(self.playback.repeat.next())
    }

    /// Device to target for library playback
    pub fn target_device(&self) -> Option<String> {
        self.playback
            .device_id()
            .map(str::to_string)
            .or_else(|| self.state.last_device_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RepeatMode;

    fn app() -> App {
        let mut app =
            App::new(&UserConfig::default(), PersistentState::default(), Theme::default());
        app.state_path =
            std::env::temp_dir().join(format!("spotuify-state-{}.toml", std::process::id()));
        app.playback.volume = Some(50);
        app
    }

    #[test]
    fn test_volume_steps_clamp() {
        let mut app = app();
        assert_eq!(app.volume_command(true), Some(Command::SetVolume(55)));
        app.playback.volume = Some(98);
        assert_eq!(app.volume_command(true), Some(Command::SetVolume(100)));
        app.playback.volume = Some(100);
        assert_eq!(app.volume_command(true), None);
        app.playback.volume = None;
        assert_eq!(app.volume_command(false), None);
    }

    #[test]
    fn test_mute_and_unmute_restore() {
        let mut app = app();
        assert_eq!(app.mute_command(), Some(Command::SetVolume(0)));
        app.playback.volume = Some(0);
        assert_eq!(app.mute_command(), Some(Command::SetVolume(50)));
        // nothing remembered: fall back to the configured default
        assert_eq!(app.mute_command(), Some(Command::SetVolume(app.default_volume)));
    }

    #[test]
    fn test_repeat_and_shuffle_toggle_from_display() {
        let mut app = app();
        app.playback.repeat = RepeatMode::Track;
        assert_eq!(app.repeat_command(), Command::SetRepeat(RepeatMode::Off));
        assert_eq!(app.shuffle_command(), Command::SetShuffle(true));
    }

    #[test]
    fn test_error_indicator_clears_on_snapshot() {
        let mut app = app();
        app.on_sync_event(&SyncEvent::Error(ErrorKind::RateLimited));
        assert_eq!(app.sync_error, Some(ErrorKind::RateLimited));
        app.on_sync_event(&SyncEvent::Snapshot(std::sync::Arc::new(PlaybackSnapshot::default())));
        assert_eq!(app.sync_error, None);
    }

    #[test]
    fn test_devices_preselect_last_used() {
        let mut app = app();
        app.state.last_device_id = Some("b".into());
        app.devices = Some(DevicePicker::loading());
        let device = |id: &str, active| DeviceInfo {
            id: id.into(),
            name: id.to_uppercase(),
            kind: "Computer".into(),
            is_active: active,
            supports_volume: true,
            volume: None,
        };
        app.on_devices_loaded(vec![device("a", true), device("b", false)]);
        let picker = app.devices.as_ref().unwrap();
        assert!(!picker.loading);
        assert_eq!(picker.selected_device().map(|d| d.id.as_str()), Some("b"));
    }

    #[test]
    fn test_command_failure_toasts() {
        let mut app = app();
        app.on_sync_event(&SyncEvent::CommandFailed {
            command: Command::SetVolume(80),
            kind: ErrorKind::TransientNetwork,
        });
        assert!(app.toast.as_ref().unwrap().message.contains("volume 80%"));
    }
}
