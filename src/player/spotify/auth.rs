use crate::player::error::RemoteError;
use crate::player::traits::{BearerToken, TokenProvider};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Refresh this many seconds before the access token actually expires
const EXPIRY_MARGIN_SECS: u64 = 60;

pub const SCOPES: &[&str] = &[
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-library-read",
    "user-library-modify",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-read-recently-played",
];

/// Token as persisted in the cache file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    /// Unix seconds
    pub expires_at: u64,
}

impl CachedToken {
    pub fn is_expiring(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub cache_path: PathBuf,
    /// Deadline for one token request; the token lock is held that long at most
    pub timeout: Duration,
}

/// Authorization-code credentials backed by a token cache file.
pub struct OAuthTokens {
    http: reqwest::Client,
    settings: OAuthSettings,
    token_url: String,
    current: Mutex<Option<CachedToken>>,
}

impl OAuthTokens {
    pub fn new(settings: OAuthSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("spotuify/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .context("building auth http client")?;
        let current = load_cache(&settings.cache_path);
        Ok(Self {
            http,
            settings,
            token_url: TOKEN_URL.to_string(),
            current: Mutex::new(current),
        })
    }

    pub async fn has_token(&self) -> bool {
        self.current.lock().await.is_some()
    }

    /// Pick up a token written by `spotuify auth` from another process.
    pub async fn reload(&self) -> bool {
        let fresh = load_cache(&self.settings.cache_path);
        let found = fresh.is_some();
        *self.current.lock().await = fresh;
        found
    }

    pub fn authorize_url(&self) -> Result<Url> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("scope", &SCOPES.join(" ")),
            ],
        )
        .context("building authorize url")
    }

    /// Exchange the code from the redirected URL for a token and cache it.
    pub async fn exchange_code(&self, code: &str) -> Result<()> {
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("token exchange failed ({}): {}", status, body));
        }
        let token: TokenResponse = resp.json().await?;
        let cached = to_cached(token, None);
        save_cache(&self.settings.cache_path, &cached)?;
        *self.current.lock().await = Some(cached);
        info!("authorization complete");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<CachedToken, RemoteError> {
        let resp = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await?;

        let status = resp.status();
        if status.is_client_error() {
            // invalid_grant: the refresh token was revoked
            warn!(%status, "token refresh rejected");
            return Err(RemoteError::AuthExpired);
        }
        if !status.is_success() {
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: "token refresh failed".to_string(),
            });
        }
        let token: TokenResponse = resp.json().await?;
        // Spotify may omit the refresh token on refresh; keep the old one
        Ok(to_cached(token, Some(refresh_token)))
    }
}

#[async_trait]
impl TokenProvider for OAuthTokens {
    async fn token(&self) -> Result<BearerToken, RemoteError> {
        let mut current = self.current.lock().await;
        let cached = current.as_ref().ok_or(RemoteError::AuthExpired)?;
        if !cached.is_expiring(unix_now()) {
            return Ok(BearerToken(cached.access_token.clone()));
        }

        let refresh_token = cached.refresh_token.clone().ok_or(RemoteError::AuthExpired)?;
        let fresh = self.refresh(&refresh_token).await?;
        if let Err(e) = save_cache(&self.settings.cache_path, &fresh) {
            warn!("failed to persist refreshed token: {:#}", e);
        }
        let bearer = BearerToken(fresh.access_token.clone());
        *current = Some(fresh);
        Ok(bearer)
    }
}

fn to_cached(token: TokenResponse, previous_refresh: Option<&str>) -> CachedToken {
    CachedToken {
        access_token: token.access_token,
        refresh_token: token
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string)),
        scope: token.scope,
        expires_at: unix_now() + token.expires_in,
    }
}

pub fn load_cache(path: &Path) -> Option<CachedToken> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!(path = %path.display(), "ignoring unreadable token cache: {}", e);
            None
        }
    }
}

pub fn save_cache(path: &Path, token: &CachedToken) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(token)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Remove the cached token. Missing file is not an error.
pub fn logout(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Pull the `code` parameter out of the URL the browser was redirected to.
pub fn code_from_redirect(input: &str) -> Result<String> {
    let url = Url::parse(input.trim()).context("not a URL")?;
    if let Some((_, err)) = url.query_pairs().find(|(k, _)| k == "error") {
        return Err(anyhow!("authorization denied: {}", err));
    }
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| anyhow!("no code parameter in {}", input.trim()))
}
