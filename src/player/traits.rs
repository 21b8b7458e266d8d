use super::command::Command;
use super::error::RemoteError;
use super::library::{LibraryItem, PlayTarget, SearchResults};
use super::snapshot::{DeviceInfo, PlaybackSnapshot};
use async_trait::async_trait;

/// Remote player: the source of truth for playback state.
#[async_trait]
pub trait PlaybackService: Send + Sync {
    async fn read(&self) -> Result<PlaybackSnapshot, RemoteError>;
    async fn command(&self, command: &Command) -> Result<(), RemoteError>;
}

/// Bearer credential handed to every Web API request.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// Supplies a valid token on demand, or `RemoteError::AuthExpired`.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<BearerToken, RemoteError>;
}

/// Browsing and queueing operations used by the library panel.
///
/// None of these touch the canonical playback snapshot.
#[async_trait]
pub trait LibraryService: Send + Sync {
    async fn devices(&self) -> Result<Vec<DeviceInfo>, RemoteError>;
    async fn playlists(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn album_tracks(&self, album_id: &str) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn saved_tracks(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn saved_albums(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn followed_artists(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn recently_played(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn queue(&self) -> Result<Vec<LibraryItem>, RemoteError>;
    async fn search(&self, query: &str, limit: usize) -> Result<SearchResults, RemoteError>;

    async fn play(&self, target: &PlayTarget, device_id: Option<&str>) -> Result<(), RemoteError>;
    async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<(), RemoteError>;
    async fn save_track(&self, track_id: &str) -> Result<(), RemoteError>;
    async fn remove_saved_track(&self, track_id: &str) -> Result<(), RemoteError>;
}
