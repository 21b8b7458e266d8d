use crate::player::{
    Command, DeviceInfo, PlaybackService, PlaybackSnapshot, RemoteError, TrackInfo,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// In-memory player that answers from queued results.
///
/// Exhausted queues answer reads with a network error and commands with `Ok`.
#[derive(Default)]
pub struct ScriptedService {
    reads: Mutex<VecDeque<Result<PlaybackSnapshot, RemoteError>>>,
    replies: Mutex<VecDeque<Result<(), RemoteError>>>,
    commands: Mutex<Vec<Command>>,
    read_count: AtomicUsize,
    stall_reads: AtomicBool,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_read(&self, result: Result<PlaybackSnapshot, RemoteError>) {
        self.reads.lock().unwrap().push_back(result);
    }

    pub fn push_reply(&self, result: Result<(), RemoteError>) {
        self.replies.lock().unwrap().push_back(result);
    }

    /// Reads never complete
    pub fn stall_reads(&self) {
        self.stall_reads.store(true, Ordering::SeqCst);
    }

    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaybackService for ScriptedService {
    async fn read(&self) -> Result<PlaybackSnapshot, RemoteError> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.stall_reads.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let next = self.reads.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(RemoteError::Network("script exhausted".into())))
    }

    async fn command(&self, command: &Command) -> Result<(), RemoteError> {
        self.commands.lock().unwrap().push(command.clone());
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }
}

pub fn snapshot(track: &str, volume: u8) -> PlaybackSnapshot {
    PlaybackSnapshot {
        device: Some(DeviceInfo {
            id: "desk".into(),
            name: "Desk".into(),
            kind: "Computer".into(),
            is_active: true,
            supports_volume: true,
            volume: Some(volume),
        }),
        track: Some(TrackInfo {
            id: Some(track.to_lowercase()),
            uri: format!("spotify:track:{}", track.to_lowercase()),
            name: track.to_string(),
            artists: vec!["Artist".into()],
            album: "Album".into(),
            artwork_url: None,
            duration_ms: 180_000,
        }),
        position_ms: 30_000,
        is_playing: true,
        volume: Some(volume),
        ..PlaybackSnapshot::idle(Instant::now())
    }
}

/// Let spawned tasks on the current-thread runtime run to their next await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
