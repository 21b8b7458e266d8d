use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Spotify repeat state. Cycles Off → Context → Track → Off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatMode {
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }

    /// Value used by the `state` query parameter of `/me/player/repeat`
    pub fn as_api_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Context => "context",
            RepeatMode::Track => "track",
        }
    }

    pub fn from_api_str(s: &str) -> Self {
        match s {
            "context" => RepeatMode::Context,
            "track" => RepeatMode::Track,
            _ => RepeatMode::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub kind: String, // "Computer", "Smartphone", "Speaker", ...
    pub is_active: bool,
    pub supports_volume: bool,
    pub volume: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: Option<String>, // local files have no id
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub artwork_url: Option<String>,
    pub duration_ms: u64,
}

impl TrackInfo {
    pub fn artist_line(&self) -> String {
        crate::ui::utils::format_artist_names(&self.artists)
    }
}

/// Complete playback state at one instant.
///
/// Snapshots are never mutated once published; the poller replaces the
/// canonical value wholesale and the dispatcher derives display copies from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub device: Option<DeviceInfo>,
    pub track: Option<TrackInfo>,
    pub position_ms: u64,
    pub is_playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Current volume (0-100), absent when the device does not report one
    pub volume: Option<u8>,
    pub context_uri: Option<String>,
    /// When the read that produced this snapshot was issued
    pub captured_at: Instant,
}

impl PlaybackSnapshot {
    /// Nothing playing and no active device (HTTP 204 from the player endpoint)
    pub fn idle(captured_at: Instant) -> Self {
        Self {
            device: None,
            track: None,
            position_ms: 0,
            is_playing: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            volume: None,
            context_uri: None,
            captured_at,
        }
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device.as_ref().map(|d| d.id.as_str())
    }

    pub fn duration_ms(&self) -> u64 {
        self.track.as_ref().map(|t| t.duration_ms).unwrap_or(0)
    }

    /// Position extrapolated from the capture instant while playing.
    pub fn position_at(&self, now: Instant) -> u64 {
        if !self.is_playing {
            return self.position_ms;
        }
        let elapsed = now.saturating_duration_since(self.captured_at).as_millis() as u64;
        let pos = self.position_ms.saturating_add(elapsed);
        match self.duration_ms() {
            0 => pos,
            d => pos.min(d),
        }
    }

    /// Move the reference instant of a display copy, carrying the position along.
    pub fn rebase(&mut self, at: Instant) {
        self.position_ms = self.position_at(at);
        self.captured_at = at;
    }
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self::idle(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn playing(position_ms: u64, duration_ms: u64, at: Instant) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track: Some(TrackInfo {
                id: Some("t1".into()),
                uri: "spotify:track:t1".into(),
                name: "A".into(),
                artists: vec!["X".into()],
                album: "Al".into(),
                artwork_url: None,
                duration_ms,
            }),
            position_ms,
            is_playing: true,
            ..PlaybackSnapshot::idle(at)
        }
    }

    #[test]
    fn test_repeat_cycle() {
        assert_eq!(RepeatMode::Off.next(), RepeatMode::Context);
        assert_eq!(RepeatMode::Context.next(), RepeatMode::Track);
        assert_eq!(RepeatMode::Track.next(), RepeatMode::Off);
        assert_eq!(RepeatMode::from_api_str("bogus"), RepeatMode::Off);
    }

    #[test]
    fn test_position_interpolates_while_playing() {
        let t0 = Instant::now();
        let s = playing(10_000, 200_000, t0);
        assert_eq!(s.position_at(t0 + Duration::from_millis(1_500)), 11_500);
    }

    #[test]
    fn test_position_clamped_to_duration() {
        let t0 = Instant::now();
        let s = playing(199_000, 200_000, t0);
        assert_eq!(s.position_at(t0 + Duration::from_secs(10)), 200_000);
    }

    #[test]
    fn test_position_frozen_when_paused() {
        let t0 = Instant::now();
        let mut s = playing(5_000, 200_000, t0);
        s.is_playing = false;
        assert_eq!(s.position_at(t0 + Duration::from_secs(3)), 5_000);
    }
}
