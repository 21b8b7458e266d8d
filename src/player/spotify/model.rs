//! Wire types for the subset of the Spotify Web API we consume.

use crate::player::library::{ItemKind, LibraryItem};
use crate::player::snapshot::{DeviceInfo, PlaybackSnapshot, RepeatMode, TrackInfo};
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Deserialize)]
pub struct CurrentPlayback {
    pub device: Option<Device>,
    #[serde(default)]
    pub repeat_state: String,
    #[serde(default)]
    pub shuffle_state: bool,
    pub context: Option<Context>,
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<Track>,
}

#[derive(Debug, Deserialize)]
pub struct Context {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub volume_percent: Option<u8>,
    #[serde(default = "default_true")]
    pub supports_volume: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct Devices {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    /// Only present on full artist objects
    #[serde(default)]
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    #[serde(default)]
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub images: Vec<Image>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Show {
    pub name: String,
}

/// A track, or an episode (episodes carry `show` instead of `artists`/`album`).
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
    pub show: Option<Show>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackCount {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub owner: Owner,
    pub tracks: Option<TrackCount>,
}

#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct SavedTrack {
    pub track: Track,
}

#[derive(Debug, Deserialize)]
pub struct SavedAlbum {
    pub album: Album,
}

/// `/me/following?type=artist` wraps its cursor page in an `artists` object.
#[derive(Debug, Deserialize)]
pub struct FollowedArtists {
    pub artists: Paging<Artist>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistTrack {
    pub track: Option<Track>,
}

#[derive(Debug, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
}

#[derive(Debug, Deserialize)]
pub struct Queue {
    #[serde(default)]
    pub queue: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct TopTracks {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub albums: Option<Paging<Album>>,
    pub artists: Option<Paging<Artist>>,
    pub playlists: Option<Paging<Option<Playlist>>>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorObject,
}

#[derive(Debug, Deserialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub message: String,
    pub reason: Option<String>,
}

impl Device {
    pub fn into_info(self) -> Option<DeviceInfo> {
        Some(DeviceInfo {
            id: self.id?,
            name: self.name,
            kind: self.kind,
            is_active: self.is_active,
            supports_volume: self.supports_volume,
            volume: self.volume_percent,
        })
    }
}

impl Track {
    fn artist_names(&self) -> Vec<String> {
        match &self.show {
            Some(show) if self.artists.is_empty() => vec![show.name.clone()],
            _ => self.artists.iter().map(|a| a.name.clone()).collect(),
        }
    }

    fn images(&self) -> &[Image] {
        match &self.album {
            Some(album) => &album.images,
            None => &self.images,
        }
    }

    pub fn into_track_info(self) -> TrackInfo {
        let artists = self.artist_names();
        let urls: Vec<&str> = self.images().iter().map(|i| i.url.as_str()).collect();
        let artwork_url = crate::ui::utils::album_art_url(&urls, crate::ui::utils::ArtSize::Medium);
        let album = match (&self.album, &self.show) {
            (Some(album), _) => album.name.clone(),
            (None, Some(_)) => "Podcast".to_string(),
            (None, None) => String::new(),
        };
        TrackInfo {
            id: self.id,
            uri: self.uri,
            name: self.name,
            artists,
            album,
            artwork_url,
            duration_ms: self.duration_ms,
        }
    }

    pub fn into_item(self, context_uri: Option<&str>) -> LibraryItem {
        let subtitle = crate::ui::utils::format_artist_names(&self.artist_names());
        LibraryItem {
            kind: ItemKind::Track,
            id: self.id,
            uri: self.uri,
            name: self.name,
            subtitle,
            duration_ms: Some(self.duration_ms),
            context_uri: context_uri.map(str::to_string),
        }
    }
}

impl Album {
    fn year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.get(..4))
    }

    pub fn into_item(self) -> LibraryItem {
        let names: Vec<String> = self.artists.iter().map(|a| a.name.clone()).collect();
        let artists = crate::ui::utils::format_artist_names(&names);
        let subtitle = match self.year() {
            Some(year) => format!("{} • {}", artists, year),
            None => artists,
        };
        LibraryItem {
            kind: ItemKind::Album,
            id: self.id,
            uri: self.uri,
            name: self.name,
            subtitle,
            duration_ms: None,
            context_uri: None,
        }
    }
}

impl Artist {
    pub fn into_item(self) -> LibraryItem {
        LibraryItem {
            kind: ItemKind::Artist,
            id: self.id,
            uri: self.uri,
            name: self.name,
            subtitle: match self.followers {
                Some(f) => format!("{} followers", crate::ui::utils::format_play_count(f.total)),
                None => "Artist".to_string(),
            },
            duration_ms: None,
            context_uri: None,
        }
    }
}

impl Playlist {
    pub fn into_item(self) -> LibraryItem {
        let owner = self.owner.display_name.unwrap_or(self.owner.id);
        let subtitle = match self.tracks {
            Some(count) => format!("{} • {} tracks", owner, count.total),
            None => owner,
        };
        LibraryItem {
            kind: ItemKind::Playlist,
            id: Some(self.id),
            uri: self.uri,
            name: self.name,
            subtitle,
            duration_ms: None,
            context_uri: None,
        }
    }
}

impl CurrentPlayback {
    pub fn into_snapshot(self, captured_at: Instant) -> PlaybackSnapshot {
        let device = self.device.and_then(Device::into_info);
        let volume = device.as_ref().and_then(|d| d.volume);
        PlaybackSnapshot {
            device,
            track: self.item.map(Track::into_track_info),
            position_ms: self.progress_ms.unwrap_or(0),
            is_playing: self.is_playing,
            shuffle: self.shuffle_state,
            repeat: RepeatMode::from_api_str(&self.repeat_state),
            volume,
            context_uri: self.context.map(|c| c.uri),
            captured_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_JSON: &str = r#"{
        "device": {"id": "dev1", "is_active": true, "name": "Desk", "type": "Computer", "volume_percent": 64, "supports_volume": true},
        "repeat_state": "context",
        "shuffle_state": true,
        "context": {"uri": "spotify:playlist:abc"},
        "progress_ms": 45000,
        "is_playing": true,
        "item": {
            "id": "t1", "uri": "spotify:track:t1", "name": "Song",
            "artists": [{"id": "a1", "name": "One"}, {"id": "a2", "name": "Two"}],
            "album": {"id": "al", "name": "Record", "images": [{"url": "big"}, {"url": "mid"}, {"url": "small"}]},
            "duration_ms": 210000
        }
    }"#;

    #[test]
    fn test_current_playback_to_snapshot() {
        let now = Instant::now();
        let parsed: CurrentPlayback = serde_json::from_str(PLAYER_JSON).unwrap();
        let snap = parsed.into_snapshot(now);

        assert_eq!(snap.device_id(), Some("dev1"));
        assert_eq!(snap.volume, Some(64));
        assert_eq!(snap.repeat, RepeatMode::Context);
        assert!(snap.shuffle && snap.is_playing);
        assert_eq!(snap.position_ms, 45_000);
        assert_eq!(snap.context_uri.as_deref(), Some("spotify:playlist:abc"));
        let track = snap.track.unwrap();
        assert_eq!(track.artists, vec!["One", "Two"]);
        assert_eq!(track.artwork_url.as_deref(), Some("mid"));
        assert_eq!(track.duration_ms, 210_000);
        assert_eq!(snap.captured_at, now);
    }

    #[test]
    fn test_episode_uses_show_name() {
        let json = r#"{"id": "e", "uri": "spotify:episode:e", "name": "Ep",
                       "show": {"name": "Podcast Show"}, "images": [{"url": "cover"}], "duration_ms": 1}"#;
        let t: Track = serde_json::from_str(json).unwrap();
        let info = t.into_track_info();
        assert_eq!(info.artists, vec!["Podcast Show"]);
        assert_eq!(info.album, "Podcast");
        assert_eq!(info.artwork_url.as_deref(), Some("cover"));
    }

    #[test]
    fn test_device_without_id_is_dropped() {
        let d: Device = serde_json::from_str(r#"{"id": null, "name": "Restricted"}"#).unwrap();
        assert!(d.into_info().is_none());
    }

    #[test]
    fn test_playlist_subtitle() {
        let p: Playlist = serde_json::from_str(
            r#"{"id": "p", "uri": "spotify:playlist:p", "name": "Mix",
                "owner": {"display_name": "me", "id": "u"}, "tracks": {"total": 12}}"#,
        )
        .unwrap();
        assert_eq!(p.into_item().subtitle, "me • 12 tracks");
    }

    #[test]
    fn test_artist_subtitle_shows_followers() {
        let a: Artist = serde_json::from_str(
            r#"{"id": "a", "uri": "spotify:artist:a", "name": "Floyd", "followers": {"total": 2300000}}"#,
        )
        .unwrap();
        assert_eq!(a.into_item().subtitle, "2.3M followers");
        let bare: Artist = serde_json::from_str(r#"{"id": "b", "name": "Simplified"}"#).unwrap();
        assert_eq!(bare.into_item().subtitle, "Artist");
    }

    #[test]
    fn test_saved_album_subtitle_has_year() {
        let page: Paging<SavedAlbum> = serde_json::from_str(
            r#"{"items": [{"added_at": "2024-01-01T00:00:00Z", "album": {
                "id": "dsotm", "uri": "spotify:album:dsotm", "name": "The Dark Side of the Moon",
                "artists": [{"name": "Pink Floyd"}], "release_date": "1973-03-01"}}]}"#,
        )
        .unwrap();
        let item = page.items.into_iter().next().unwrap().album.into_item();
        assert_eq!(item.kind, ItemKind::Album);
        assert_eq!(item.subtitle, "Pink Floyd • 1973");
    }

    #[test]
    fn test_followed_artists_page() {
        let followed: FollowedArtists = serde_json::from_str(
            r#"{"artists": {"items": [{"id": "pf", "uri": "spotify:artist:pf",
                "name": "Pink Floyd", "followers": {"total": 1500}}],
                "cursors": {"after": null}}}"#,
        )
        .unwrap();
        let items: Vec<LibraryItem> =
            followed.artists.items.into_iter().map(Artist::into_item).collect();
        assert_eq!(items[0].kind, ItemKind::Artist);
        assert_eq!(items[0].subtitle, "1.5K followers");
    }
}
