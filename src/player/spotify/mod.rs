//! Spotify Web API client.
//!
//! Talks HTTPS/JSON directly through `reqwest`. Every failure is classified
//! into a [`RemoteError`] here, so nothing above this module ever sees a raw
//! HTTP status or transport error.

pub mod auth;
pub mod model;

use crate::player::command::Command;
use crate::player::error::RemoteError;
use crate::player::library::{LibraryItem, PlayTarget, SearchResults};
use crate::player::snapshot::{DeviceInfo, PlaybackSnapshot};
use crate::player::traits::{LibraryService, PlaybackService, TokenProvider};
use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const API_BASE: &str = "https://api.spotify.com/v1";

pub struct SpotifyClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(tokens: Arc<dyn TokenProvider>, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("spotuify/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            tokens,
            base_url: API_BASE.to_string(),
        })
    }

    /// Send one request. `Ok(None)` means 204 No Content.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Option<reqwest::Response>, RemoteError> {
        let token = self.tokens.token().await?;
        let url = format!("{}{}", self.base_url, path);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(&token.0)
            .query(query);
        req = match body {
            Some(body) => req.json(&body),
            // Spotify answers 411 to body-less PUT/POST without a length
            None if method != Method::GET => req.header(header::CONTENT_LENGTH, "0"),
            None => req,
        };

        let resp = req.send().await?;
        let status = resp.status();
        debug!(%method, path, %status, "spotify request");

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if status.is_success() {
            return Ok(Some(resp));
        }

        let retry_after = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = resp.text().await.unwrap_or_default();
        let err = classify(status, retry_after.as_deref(), &text, path.starts_with("/me/player"));
        warn!(path, %status, error = %err, "spotify request failed");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, RemoteError> {
        match self.send(Method::GET, path, query, None).await? {
            Some(resp) => {
                let bytes = resp.bytes().await?;
                // Some player endpoints answer 200 with an empty body instead of 204
                if bytes.is_empty() {
                    return Ok(None);
                }
                serde_json::from_slice(&bytes)
                    .map(Some)
                    .map_err(|e| RemoteError::Api {
                        status: 200,
                        message: format!("malformed response: {}", e),
                    })
            }
            None => Ok(None),
        }
    }

    async fn paged_tracks<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: usize,
        to_track: impl Fn(T) -> Option<model::Track>,
        context_uri: Option<&str>,
    ) -> Result<Vec<LibraryItem>, RemoteError> {
        let page: Option<model::Paging<T>> =
            self.get_json(path, &[("limit", limit.to_string())]).await?;
        Ok(page
            .map(|p| p.items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(to_track)
            .map(|t| t.into_item(context_uri))
            .collect())
    }
}

/// Map a non-success HTTP response onto the error taxonomy.
pub(crate) fn classify(
    status: StatusCode,
    retry_after: Option<&str>,
    body: &str,
    player_endpoint: bool,
) -> RemoteError {
    let (message, reason) = match serde_json::from_str::<model::ErrorBody>(body) {
        Ok(b) => (b.error.message, b.error.reason),
        Err(_) => (body.to_string(), None),
    };

    match (status, reason.as_deref()) {
        (StatusCode::UNAUTHORIZED, _) => RemoteError::AuthExpired,
        (StatusCode::TOO_MANY_REQUESTS, _) => RemoteError::RateLimited {
            retry_after: retry_after
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
        },
        (_, Some("NO_ACTIVE_DEVICE")) => RemoteError::NoActiveDevice,
        (_, Some("PREMIUM_REQUIRED")) => RemoteError::PremiumRequired,
        (StatusCode::NOT_FOUND, _) if player_endpoint => RemoteError::NoActiveDevice,
        (StatusCode::FORBIDDEN, _) if message.to_lowercase().contains("premium") => {
            RemoteError::PremiumRequired
        }
        _ => RemoteError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl PlaybackService for SpotifyClient {
    async fn read(&self) -> Result<PlaybackSnapshot, RemoteError> {
        let captured_at = Instant::now();
        let current: Option<model::CurrentPlayback> = self
            .get_json("/me/player", &[("additional_types", "track,episode".to_string())])
            .await?;
        Ok(match current {
            Some(c) => c.into_snapshot(captured_at),
            None => PlaybackSnapshot::idle(captured_at),
        })
    }

    async fn command(&self, command: &Command) -> Result<(), RemoteError> {
        match command {
            Command::Play => self.send(Method::PUT, "/me/player/play", &[], None).await?,
            Command::Pause => self.send(Method::PUT, "/me/player/pause", &[], None).await?,
            Command::SkipNext => self.send(Method::POST, "/me/player/next", &[], None).await?,
            Command::SkipPrevious => {
                self.send(Method::POST, "/me/player/previous", &[], None)
                    .await?
            }
            Command::SeekTo(ms) => {
                self.send(Method::PUT, "/me/player/seek", &[("position_ms", ms.to_string())], None)
                    .await?
            }
            Command::SetVolume(v) => {
                let v = (*v).min(100);
                let query = [("volume_percent", v.to_string())];
                self.send(Method::PUT, "/me/player/volume", &query, None)
                    .await?
            }
            Command::SetShuffle(on) => {
                self.send(Method::PUT, "/me/player/shuffle", &[("state", on.to_string())], None)
                    .await?
            }
            Command::SetRepeat(mode) => {
                self.send(
                    Method::PUT,
                    "/me/player/repeat",
                    &[("state", mode.as_api_str().to_string())],
                    None,
                )
                .await?
            }
            Command::SelectDevice(id) => {
                let body = json!({ "device_ids": [id], "play": false });
                self.send(Method::PUT, "/me/player", &[], Some(body)).await?
            }
        };
        Ok(())
    }
}

fn device_query(device_id: Option<&str>) -> Vec<(&'static str, String)> {
    device_id
        .map(|id| vec![("device_id", id.to_string())])
        .unwrap_or_default()
}

#[async_trait]
impl LibraryService for SpotifyClient {
    async fn devices(&self) -> Result<Vec<DeviceInfo>, RemoteError> {
        let devices: Option<model::Devices> = self.get_json("/me/player/devices", &[]).await?;
        Ok(devices
            .map(|d| d.devices)
            .unwrap_or_default()
            .into_iter()
            .filter_map(model::Device::into_info)
            .collect())
    }

    async fn playlists(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        let page: Option<model::Paging<model::Playlist>> =
            self.get_json("/me/playlists", &[("limit", "50".to_string())]).await?;
        Ok(page
            .map(|p| p.items)
            .unwrap_or_default()
            .into_iter()
            .map(model::Playlist::into_item)
            .collect())
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        let context = format!("spotify:playlist:{}", playlist_id);
        self.paged_tracks(
            &format!("/playlists/{}/tracks", playlist_id),
            100,
            |t: model::PlaylistTrack| t.track,
            Some(&context),
        )
        .await
    }

    async fn album_tracks(&self, album_id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        let context = format!("spotify:album:{}", album_id);
        self.paged_tracks(&format!("/albums/{}/tracks", album_id), 50, Some, Some(&context))
            .await
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        let top: Option<model::TopTracks> = self
            .get_json(&format!("/artists/{}/top-tracks", artist_id), &[])
            .await?;
        Ok(top
            .map(|t| t.tracks)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into_item(None))
            .collect())
    }

    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        let page: Option<model::Paging<model::Album>> = self
            .get_json(
                &format!("/artists/{}/albums", artist_id),
                &[
                    ("include_groups", "album,single".to_string()),
                    ("limit", "50".to_string()),
                ],
            )
            .await?;
        Ok(page
            .map(|p| p.items)
            .unwrap_or_default()
            .into_iter()
            .map(model::Album::into_item)
            .collect())
    }

    async fn saved_tracks(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        self.paged_tracks("/me/tracks", 50, |s: model::SavedTrack| Some(s.track), None)
            .await
    }

    async fn saved_albums(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        let page: Option<model::Paging<model::SavedAlbum>> =
            self.get_json("/me/albums", &[("limit", "50".to_string())]).await?;
        Ok(page
            .map(|p| p.items)
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.album.into_item())
            .collect())
    }

    async fn followed_artists(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        let followed: Option<model::FollowedArtists> = self
            .get_json(
                "/me/following",
                &[("type", "artist".to_string()), ("limit", "50".to_string())],
            )
            .await?;
        Ok(followed
            .map(|f| f.artists.items)
            .unwrap_or_default()
            .into_iter()
            .map(model::Artist::into_item)
            .collect())
    }

    async fn recently_played(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        self.paged_tracks(
            "/me/player/recently-played",
            50,
            |h: model::PlayHistory| Some(h.track),
            None,
        )
        .await
    }

    async fn queue(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        let queue: Option<model::Queue> = self.get_json("/me/player/queue", &[]).await?;
        Ok(queue
            .map(|q| q.queue)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into_item(None))
            .collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResults, RemoteError> {
        let resp: Option<model::SearchResponse> = self
            .get_json(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track,album,artist,playlist".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        let Some(resp) = resp else {
            return Ok(SearchResults::default());
        };
        Ok(SearchResults {
            tracks: resp
                .tracks
                .map(|p| p.items.into_iter().map(|t| t.into_item(None)).collect())
                .unwrap_or_default(),
            albums: resp
                .albums
                .map(|p| p.items.into_iter().map(model::Album::into_item).collect())
                .unwrap_or_default(),
            artists: resp
                .artists
                .map(|p| p.items.into_iter().map(model::Artist::into_item).collect())
                .unwrap_or_default(),
            playlists: resp
                .playlists
                .map(|p| p.items.into_iter().flatten().map(model::Playlist::into_item).collect())
                .unwrap_or_default(),
        })
    }

    async fn play(&self, target: &PlayTarget, device_id: Option<&str>) -> Result<(), RemoteError> {
        self.send(Method::PUT, "/me/player/play", &device_query(device_id), Some(target.body()))
            .await?;
        Ok(())
    }

    async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<(), RemoteError> {
        let mut query = vec![("uri", uri.to_string())];
        query.extend(device_query(device_id));
        self.send(Method::POST, "/me/player/queue", &query, None).await?;
        Ok(())
    }

    async fn save_track(&self, track_id: &str) -> Result<(), RemoteError> {
        self.send(Method::PUT, "/me/tracks", &[("ids", track_id.to_string())], None)
            .await?;
        Ok(())
    }

    async fn remove_saved_track(&self, track_id: &str) -> Result<(), RemoteError> {
        self.send(Method::DELETE, "/me/tracks", &[("ids", track_id.to_string())], None)
            .await?;
        Ok(())
    }
}
