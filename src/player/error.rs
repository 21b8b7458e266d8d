use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// What the view needs to know about a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Retry on the next tick; show a subtle indicator only
    TransientNetwork,
    /// Prompt for re-authorization; polling halts until resolved
    AuthExpired,
    /// Nothing to control; do not retry automatically
    NoActiveDevice,
    /// Spotify Premium is needed for this command
    PremiumRequired,
    /// Back off the poll interval for a while
    RateLimited,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::TransientNetwork => "network error",
            ErrorKind::AuthExpired => "authorization expired",
            ErrorKind::NoActiveDevice => "no active device",
            ErrorKind::PremiumRequired => "Spotify Premium required",
            ErrorKind::RateLimited => "rate limited",
        };
        f.write_str(s)
    }
}

/// Failure of a call against the Spotify Web API, already classified.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("authorization expired")]
    AuthExpired,
    #[error("no active device")]
    NoActiveDevice,
    #[error("premium required")]
    PremiumRequired,
    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },
    #[error("unexpected response {status}: {message}")]
    Api { status: u16, message: String },
}

impl RemoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemoteError::Network(_) | RemoteError::Timeout(_) | RemoteError::Api { .. } => {
                ErrorKind::TransientNetwork
            }
            RemoteError::AuthExpired => ErrorKind::AuthExpired,
            RemoteError::NoActiveDevice => ErrorKind::NoActiveDevice,
            RemoteError::PremiumRequired => ErrorKind::PremiumRequired,
            RemoteError::RateLimited { .. } => ErrorKind::RateLimited,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RemoteError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout(Duration::ZERO)
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}
