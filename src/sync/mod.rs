//! Playback-state synchronization: the poller keeps the canonical snapshot
//! fresh, the dispatcher forwards user commands with optimistic updates.

pub mod dispatcher;
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;

use crate::player::{Command, ErrorKind, PlaybackSnapshot, RemoteError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use dispatcher::{Dispatcher, DispatcherConfig};
pub use poller::{Poller, PollerConfig, PollerHandle};

/// What the view hears from the sync core.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A poll succeeded and replaced the canonical snapshot
    Snapshot(Arc<PlaybackSnapshot>),
    /// A poll failed; the previous snapshot stays in place
    Error(ErrorKind),
    /// A dispatched command was rejected by the remote player
    CommandFailed { command: Command, kind: ErrorKind },
}

/// Run a remote call, turning an elapsed deadline into a timeout error.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout(limit)),
    }
}
