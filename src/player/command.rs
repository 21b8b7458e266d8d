use super::snapshot::{PlaybackSnapshot, RepeatMode};
use std::fmt;

/// A user intent forwarded to the remote player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    SkipNext,
    SkipPrevious,
    SeekTo(u64),
    SetVolume(u8),
    SetShuffle(bool),
    SetRepeat(RepeatMode),
    SelectDevice(String),
}

/// The piece of playback state a command targets.
///
/// At most one command per field is in flight; a newer one supersedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandField {
    Playback,
    Track,
    Position,
    Volume,
    Shuffle,
    Repeat,
    Device,
}

impl CommandField {
    pub const ALL: [CommandField; 7] = [
        CommandField::Playback,
        CommandField::Track,
        CommandField::Position,
        CommandField::Volume,
        CommandField::Shuffle,
        CommandField::Repeat,
        CommandField::Device,
    ];
}

impl Command {
    pub fn field(&self) -> CommandField {
        match self {
            Command::Play | Command::Pause => CommandField::Playback,
            Command::SkipNext | Command::SkipPrevious => CommandField::Track,
            Command::SeekTo(_) => CommandField::Position,
            Command::SetVolume(_) => CommandField::Volume,
            Command::SetShuffle(_) => CommandField::Shuffle,
            Command::SetRepeat(_) => CommandField::Repeat,
            Command::SelectDevice(_) => CommandField::Device,
        }
    }

    /// Apply the expected effect of this command to a display copy.
    pub fn apply_to(&self, snapshot: &mut PlaybackSnapshot) {
        match self {
            Command::Play => snapshot.is_playing = true,
            Command::Pause => snapshot.is_playing = false,
            Command::SkipNext | Command::SkipPrevious => snapshot.position_ms = 0,
            Command::SeekTo(pos) => {
                let duration = snapshot.duration_ms();
                snapshot.position_ms = if duration > 0 { (*pos).min(duration) } else { *pos };
            }
            Command::SetVolume(v) => snapshot.volume = Some((*v).min(100)),
            Command::SetShuffle(on) => snapshot.shuffle = *on,
            Command::SetRepeat(mode) => snapshot.repeat = *mode,
            Command::SelectDevice(id) => match snapshot.device.as_mut() {
                Some(device) if device.id == *id => {}
                Some(device) => {
                    device.id = id.clone();
                    device.name.clear();
                }
                None => {
                    snapshot.device = Some(super::snapshot::DeviceInfo {
                        id: id.clone(),
                        name: String::new(),
                        kind: String::new(),
                        is_active: true,
                        supports_volume: true,
                        volume: snapshot.volume,
                    })
                }
            },
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play => write!(f, "play"),
            Command::Pause => write!(f, "pause"),
            Command::SkipNext => write!(f, "next track"),
            Command::SkipPrevious => write!(f, "previous track"),
            Command::SeekTo(ms) => {
                write!(f, "seek to {}", crate::ui::utils::format_duration(Some(*ms)))
            }
            Command::SetVolume(v) => write!(f, "volume {}%", v),
            Command::SetShuffle(on) => write!(f, "shuffle {}", if *on { "on" } else { "off" }),
            Command::SetRepeat(mode) => write!(f, "repeat {}", mode.as_api_str()),
            Command::SelectDevice(_) => write!(f, "select device"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::snapshot::TrackInfo;
    use std::time::Instant;

    fn with_track(duration_ms: u64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track: Some(TrackInfo {
                id: None,
                uri: "spotify:local:x".into(),
                name: "x".into(),
                artists: vec![],
                album: String::new(),
                artwork_url: None,
                duration_ms,
            }),
            position_ms: 42_000,
            volume: Some(50),
            ..PlaybackSnapshot::idle(Instant::now())
        }
    }

    #[test]
    fn test_fields() {
        assert_eq!(Command::Play.field(), Command::Pause.field());
        assert_eq!(Command::SeekTo(1).field(), CommandField::Position);
        assert_eq!(Command::SelectDevice("d".into()).field(), CommandField::Device);
        assert_ne!(Command::SetVolume(1).field(), Command::SetShuffle(true).field());
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut s = with_track(60_000);
        Command::SeekTo(90_000).apply_to(&mut s);
        assert_eq!(s.position_ms, 60_000);
    }

    #[test]
    fn test_skip_resets_position() {
        let mut s = with_track(60_000);
        Command::SkipNext.apply_to(&mut s);
        assert_eq!(s.position_ms, 0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut s = with_track(60_000);
        Command::SetVolume(150).apply_to(&mut s);
        assert_eq!(s.volume, Some(100));
    }

    #[test]
    fn test_select_device_on_idle_snapshot() {
        let mut s = PlaybackSnapshot::idle(Instant::now());
        Command::SelectDevice("abc".into()).apply_to(&mut s);
        assert_eq!(s.device_id(), Some("abc"));
    }
}
