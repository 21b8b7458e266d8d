use super::{bounded, SyncEvent};
use crate::player::{
    Command, CommandField, ErrorKind, PlaybackService, PlaybackSnapshot, RemoteError,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    /// Deadline for one remote command
    pub timeout: Duration,
    /// Volume shown for a device that does not report one
    pub default_volume: u8,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            default_volume: 50,
        }
    }
}

/// Forwards user commands to the remote player and keeps the optimistic view.
///
/// The display is the canonical snapshot with the pending overlay applied on
/// top; the overlay holds at most one command per [`CommandField`].
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

struct Shared {
    service: Arc<dyn PlaybackService>,
    canonical: watch::Receiver<Arc<PlaybackSnapshot>>,
    events: mpsc::Sender<SyncEvent>,
    config: DispatcherConfig,
    state: Mutex<DispatchState>,
}

#[derive(Default)]
struct DispatchState {
    overlay: HashMap<CommandField, Pending>,
    next_generation: u64,
    /// Set when a command reported no active device
    blocked_since: Option<Instant>,
    disabled: HashSet<CommandField>,
}

struct Pending {
    command: Command,
    generation: u64,
    issued_at: Instant,
    acked_at: Option<Instant>,
    task: Option<AbortHandle>,
}

impl Pending {
    /// A poll issued after the acknowledgement has confirmed or overwritten us.
    fn settled_by(&self, snapshot: &PlaybackSnapshot) -> bool {
        self.acked_at.is_some_and(|at| snapshot.captured_at >= at)
    }
}

impl DispatchState {
    fn refresh_block(&mut self, canonical: &PlaybackSnapshot) {
        if let Some(since) = self.blocked_since {
            let active = canonical.device.as_ref().is_some_and(|d| d.is_active);
            if active && canonical.captured_at >= since {
                info!("active device reported, commands unblocked");
                self.blocked_since = None;
            }
        }
    }
}

impl Dispatcher {
    pub fn new(
        service: Arc<dyn PlaybackService>,
        canonical: watch::Receiver<Arc<PlaybackSnapshot>>,
        events: mpsc::Sender<SyncEvent>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                service,
                canonical,
                events,
                config,
                state: Mutex::new(DispatchState::default()),
            }),
        }
    }

    /// Apply `command` optimistically and send it in the background.
    ///
    /// Rejected up front with `NoActiveDevice` while no device is selected, or
    /// with `PremiumRequired` for fields the account cannot control.
    pub fn dispatch(&self, command: Command) -> Result<(), ErrorKind> {
        let field = command.field();
        let canonical = self.canonical();
        let mut state = self.shared.lock();

        if state.disabled.contains(&field) {
            return Err(ErrorKind::PremiumRequired);
        }
        state.refresh_block(&canonical);
        if state.blocked_since.is_some() && !matches!(command, Command::SelectDevice(_)) {
            debug!(%command, "rejected, no active device");
            return Err(ErrorKind::NoActiveDevice);
        }

        state.next_generation += 1;
        let generation = state.next_generation;
        if let Some(previous) = state.overlay.remove(&field) {
            if let Some(task) = previous.task {
                task.abort();
            }
            debug!(superseded = %previous.command, by = %command, "command superseded");
        }

        let shared = self.shared.clone();
        let sent = command.clone();
        let task = tokio::spawn(async move {
            let result = bounded(shared.config.timeout, shared.service.command(&sent)).await;
            if let Some(event) = shared.finish(field, generation, sent, result) {
                if shared.events.send(event).await.is_err() {
                    debug!("sync event receiver dropped");
                }
            }
        });

        debug!(%command, generation, "dispatched");
        state.overlay.insert(
            field,
            Pending {
                command,
                generation,
                issued_at: Instant::now(),
                acked_at: None,
                task: Some(task.abort_handle()),
            },
        );
        Ok(())
    }

    /// Latest polled snapshot, without optimistic changes.
    pub fn canonical(&self) -> Arc<PlaybackSnapshot> {
        self.shared.canonical.borrow().clone()
    }

    /// What the view should render: the canonical snapshot plus pending guesses.
    pub fn display(&self) -> PlaybackSnapshot {
        let canonical = self.canonical();
        let mut state = self.shared.lock();
        state.overlay.retain(|_, pending| !pending.settled_by(&canonical));

        let mut pending: Vec<&Pending> = state.overlay.values().collect();
        pending.sort_by_key(|p| p.generation);

        let mut display = (*canonical).clone();
        for p in pending {
            if matches!(
                p.command.field(),
                CommandField::Playback | CommandField::Track | CommandField::Position
            ) {
                display.rebase(p.issued_at);
            }
            p.command.apply_to(&mut display);
        }
        if display.volume.is_none() && display.device.as_ref().is_some_and(|d| d.supports_volume) {
            display.volume = Some(self.shared.config.default_volume);
        }
        display
    }

    pub fn is_device_blocked(&self) -> bool {
        let canonical = self.canonical();
        let mut state = self.shared.lock();
        state.refresh_block(&canonical);
        state.blocked_since.is_some()
    }

    pub fn is_disabled(&self, field: CommandField) -> bool {
        self.shared.lock().disabled.contains(&field)
    }

    /// A command for `field` has been sent and not yet answered.
    #[cfg(test)]
    pub(crate) fn in_flight(&self, field: CommandField) -> bool {
        self.shared
            .lock()
            .overlay
            .get(&field)
            .is_some_and(|p| p.acked_at.is_none())
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, DispatchState> {
        // A poisoned lock only means a panicking holder; the state itself is plain data.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the outcome of a remote call. Returns the event to emit, if any.
    fn finish(
        &self,
        field: CommandField,
        generation: u64,
        command: Command,
        result: Result<(), RemoteError>,
    ) -> Option<SyncEvent> {
        let mut state = self.lock();
        let current = state.overlay.get(&field).map(|p| p.generation);
        if current != Some(generation) {
            debug!(%command, generation, "stale result discarded");
            return None;
        }

        match result {
            Ok(()) => {
                if let Some(pending) = state.overlay.get_mut(&field) {
                    pending.acked_at = Some(Instant::now());
                    pending.task = None;
                }
                let selected = matches!(command, Command::SelectDevice(_));
                if selected && state.blocked_since.take().is_some() {
                    info!("device selected, commands unblocked");
                }
                debug!(%command, "acknowledged");
                None
            }
            Err(e) => {
                state.overlay.remove(&field);
                let kind = e.kind();
                warn!(%command, %kind, "command failed: {}", e);
                match kind {
                    ErrorKind::NoActiveDevice => {
                        state.blocked_since = Some(Instant::now());
                    }
                    ErrorKind::PremiumRequired => {
                        if !state.disabled.insert(field) {
                            return None;
                        }
                    }
                    _ => {}
                }
                Some(SyncEvent::CommandFailed { command, kind })
            }
        }
    }
}
