use super::{bounded, SyncEvent};
use crate::player::{ErrorKind, PlaybackService, PlaybackSnapshot};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Backoff never stretches the interval past this multiple of the default.
const MAX_BACKOFF_FACTOR: u32 = 8;

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            timeout: Duration::from_millis(5000),
        }
    }
}

/// Owns the canonical playback snapshot and refreshes it from the remote player.
pub struct Poller {
    service: Arc<dyn PlaybackService>,
    config: PollerConfig,
    canonical: watch::Sender<Arc<PlaybackSnapshot>>,
    events: mpsc::Sender<SyncEvent>,
    current_interval: Duration,
    rate_limit_streak: u32,
}

impl Poller {
    pub fn new(
        service: Arc<dyn PlaybackService>,
        config: PollerConfig,
        events: mpsc::Sender<SyncEvent>,
    ) -> Self {
        let (canonical, _) = watch::channel(Arc::new(PlaybackSnapshot::default()));
        Self {
            service,
            config,
            canonical,
            events,
            current_interval: config.interval,
            rate_limit_streak: 0,
        }
    }

    /// Readers of the canonical snapshot (the dispatcher, the view).
    pub fn subscribe(&self) -> watch::Receiver<Arc<PlaybackSnapshot>> {
        self.canonical.subscribe()
    }

    /// Delay before the next tick, stretched while rate limited.
    pub fn interval(&self) -> Duration {
        self.current_interval
    }

    /// One poll. Failures are reported as an event and never replace the snapshot.
    pub async fn tick(&mut self) -> Result<Arc<PlaybackSnapshot>, ErrorKind> {
        match bounded(self.config.timeout, self.service.read()).await {
            Ok(snapshot) => {
                if self.rate_limit_streak > 0 {
                    info!("rate limit cleared, restoring poll interval");
                }
                self.rate_limit_streak = 0;
                self.current_interval = self.config.interval;

                let snapshot = Arc::new(snapshot);
                self.canonical.send_replace(snapshot.clone());
                debug!(
                    playing = snapshot.is_playing,
                    position_ms = snapshot.position_ms,
                    "poll ok"
                );
                self.emit(SyncEvent::Snapshot(snapshot.clone())).await;
                Ok(snapshot)
            }
            Err(e) => {
                let kind = e.kind();
                if kind == ErrorKind::RateLimited {
                    self.back_off(e.retry_after());
                }
                warn!(%kind, "poll failed: {}", e);
                self.emit(SyncEvent::Error(kind)).await;
                Err(kind)
            }
        }
    }

    fn back_off(&mut self, retry_after: Option<Duration>) {
        self.rate_limit_streak = self.rate_limit_streak.saturating_add(1);
        let cap = self.config.interval * MAX_BACKOFF_FACTOR;
        let factor = 1u32
            .checked_shl(self.rate_limit_streak)
            .unwrap_or(MAX_BACKOFF_FACTOR)
            .min(MAX_BACKOFF_FACTOR);
        let doubled = self.config.interval * factor;
        let wanted = retry_after.map_or(doubled, |r| r.max(doubled));
        self.current_interval = wanted.min(cap);
        info!(interval_ms = self.current_interval.as_millis() as u64, "backing off");
    }

    async fn emit(&self, event: SyncEvent) {
        if self.events.send(event).await.is_err() {
            debug!("sync event receiver dropped");
        }
    }

    /// Start the serialized poll loop on the runtime.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let resume = Arc::new(ResumeSignal::default());
        let task = tokio::spawn(self.run(shutdown_rx, resume.clone()));
        PollerHandle {
            shutdown,
            resume,
            task,
        }
    }

    async fn run(mut self, mut shutdown: watch::Receiver<bool>, resume: Arc<ResumeSignal>) {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            "poller started"
        );
        loop {
            let outcome = tokio::select! {
                _ = shutdown.changed() => break,
                outcome = self.tick() => outcome,
            };

            if outcome == Err(ErrorKind::AuthExpired) {
                info!("authorization expired, polling halted");
                resume.halted.store(true, Ordering::SeqCst);
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = resume.notify.notified() => {
                        info!("polling resumed");
                        continue;
                    }
                }
            }

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.current_interval) => {}
            }
        }
        info!("poller stopped");
    }
}

/// Wakes a loop parked on an expired authorization. Only a parked loop gets a permit.
#[derive(Default)]
struct ResumeSignal {
    halted: AtomicBool,
    notify: Notify,
}

/// Control over a running poll loop. Dropping it stops the loop.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    resume: Arc<ResumeSignal>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Restart polling after it halted on an expired authorization.
    pub fn resume(&self) {
        if self.resume.halted.swap(false, Ordering::SeqCst) {
            self.resume.notify.notify_one();
        }
    }

    pub async fn stop(self) {
        self.shutdown.send_replace(true);
        if let Err(e) = self.task.await {
            warn!("poller task ended abnormally: {}", e);
        }
    }
}
