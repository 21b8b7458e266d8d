use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use spotuify::app::config::{PersistentState, UserConfig};
use spotuify::app::events::AppEvent;
use spotuify::app::inputs::{handle_event, Context};
use spotuify::app::{App, LibraryTab, ViewMode};
use spotuify::player::{
    Command, CommandField, DeviceInfo, ErrorKind, ItemKind, LibraryItem, LibraryService, PlayTarget,
    PlaybackService, PlaybackSnapshot, RemoteError, SearchResults, TrackInfo,
};
use spotuify::sync::{Dispatcher, DispatcherConfig, SyncEvent};
use spotuify::ui::Theme;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};

fn device(id: &str, active: bool) -> DeviceInfo {
    DeviceInfo {
        id: id.to_string(),
        name: id.to_uppercase(),
        kind: "Speaker".to_string(),
        is_active: active,
        supports_volume: true,
        volume: Some(50),
    }
}

fn track_item(name: &str) -> LibraryItem {
    LibraryItem {
        kind: ItemKind::Track,
        id: Some(name.to_lowercase()),
        uri: format!("spotify:track:{}", name.to_lowercase()),
        name: name.to_string(),
        subtitle: "Artist".to_string(),
        duration_ms: Some(200_000),
        context_uri: None,
    }
}

fn container(kind: ItemKind, name: &str, uri_kind: &str) -> LibraryItem {
    let id = name.to_lowercase().replace(' ', "-");
    LibraryItem {
        kind,
        uri: format!("spotify:{}:{}", uri_kind, id),
        id: Some(id),
        name: name.to_string(),
        subtitle: String::new(),
        duration_ms: None,
        context_uri: None,
    }
}

/// Paused on "Money" at volume 50 on an active device
fn paused_snapshot() -> PlaybackSnapshot {
    PlaybackSnapshot {
        device: Some(device("desk", true)),
        track: Some(TrackInfo {
            id: Some("money".into()),
            uri: "spotify:track:money".into(),
            name: "Money".into(),
            artists: vec!["Pink Floyd".into()],
            album: "The Dark Side of the Moon".into(),
            artwork_url: None,
            duration_ms: 382_000,
        }),
        position_ms: 60_000,
        volume: Some(50),
        ..PlaybackSnapshot::idle(Instant::now())
    }
}

#[derive(Default)]
struct MockSpotify {
    commands: Mutex<Vec<Command>>,
    replies: Mutex<VecDeque<Result<(), RemoteError>>>,
    played: Mutex<Vec<PlayTarget>>,
}

impl MockSpotify {
    fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackService for MockSpotify {
    async fn read(&self) -> Result<PlaybackSnapshot, RemoteError> {
        Ok(paused_snapshot())
    }

    async fn command(&self, command: &Command) -> Result<(), RemoteError> {
        self.commands.lock().unwrap().push(command.clone());
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[async_trait]
impl LibraryService for MockSpotify {
    async fn devices(&self) -> Result<Vec<DeviceInfo>, RemoteError> {
        Ok(vec![device("desk", false), device("kitchen", false)])
    }
    async fn playlists(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![container(ItemKind::Playlist, "Road Trip", "playlist")])
    }
    async fn playlist_tracks(&self, _id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![track_item("Highway"), track_item("Roadhouse")])
    }
    async fn album_tracks(&self, _id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(Vec::new())
    }
    async fn artist_top_tracks(&self, _id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![track_item("Money")])
    }
    async fn artist_albums(&self, _id: &str) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![container(ItemKind::Album, "Animals", "album")])
    }
    async fn saved_tracks(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![track_item("Time"), track_item("Breathe"), track_item("Us and Them")])
    }
    async fn saved_albums(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![container(ItemKind::Album, "Meddle", "album")])
    }
    async fn followed_artists(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![container(ItemKind::Artist, "Pink Floyd", "artist")])
    }
    async fn recently_played(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Err(RemoteError::Network("offline".into()))
    }
    async fn queue(&self) -> Result<Vec<LibraryItem>, RemoteError> {
        Ok(vec![track_item("Next Up")])
    }
    async fn search(&self, query: &str, _limit: usize) -> Result<SearchResults, RemoteError> {
        Ok(SearchResults {
            tracks: vec![track_item(query)],
            ..Default::default()
        })
    }
    async fn play(&self, target: &PlayTarget, _device_id: Option<&str>) -> Result<(), RemoteError> {
        self.played.lock().unwrap().push(target.clone());
        Ok(())
    }
    async fn add_to_queue(&self, _uri: &str, _device_id: Option<&str>) -> Result<(), RemoteError> {
        Ok(())
    }
    async fn save_track(&self, _track_id: &str) -> Result<(), RemoteError> {
        Ok(())
    }
    async fn remove_saved_track(&self, _track_id: &str) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// Helper to create a test app instance
fn create_test_app() -> App {
    let mut app = App::new(&UserConfig::default(), PersistentState::default(), Theme::default());
    app.state_path =
        std::env::temp_dir().join(format!("spotuify-it-state-{}.toml", std::process::id()));
    app
}

struct Harness {
    app: App,
    service: Arc<MockSpotify>,
    dispatcher: Dispatcher,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    sync_rx: mpsc::Receiver<SyncEvent>,
    _canonical: watch::Sender<Arc<PlaybackSnapshot>>,
}

impl Harness {
    fn new() -> Self {
        let service = Arc::new(MockSpotify::default());
        let (canonical, canonical_rx) = watch::channel(Arc::new(paused_snapshot()));
        let (sync_tx, sync_rx) = mpsc::channel(32);
        let config = DispatcherConfig {
            timeout: Duration::from_secs(1),
            default_volume: 30,
        };
        let dispatcher = Dispatcher::new(service.clone(), canonical_rx, sync_tx, config);
        let (tx, rx) = mpsc::channel(32);
        let mut app = create_test_app();
        app.sync_from(&dispatcher);
        Self {
            app,
            library: service.clone(),
            service,
            dispatcher,
            tx,
            rx,
            sync_rx,
            _canonical: canonical,
        }
    }

    fn key(&mut self, code: KeyCode) {
        let ctx = Context {
            dispatcher: &self.dispatcher,
            library: &self.library,
            tx: &self.tx,
        };
        handle_event(KeyEvent::new(code, KeyModifiers::NONE), &mut self.app, &ctx);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Wait for the next background event and apply it the way the main loop does.
    async fn pump(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .unwrap()
            .unwrap();
        match event {
            AppEvent::LibraryLoaded(ticket, title, items) => {
                self.app.library.apply_loaded(ticket, title, items);
            }
            AppEvent::DevicesLoaded(devices) => self.app.on_devices_loaded(devices),
            AppEvent::Notice(message) => self.app.show_toast(&message),
            AppEvent::LibraryFailed(kind) => self.app.on_library_failed(kind),
            AppEvent::Sync(event) => self.app.on_sync_event(&event),
            AppEvent::Input(_) | AppEvent::Tick => {}
        }
    }

    async fn next_sync_event(&mut self) -> SyncEvent {
        let event = tokio::time::timeout(Duration::from_secs(1), self.sync_rx.recv())
            .await
            .unwrap()
            .unwrap();
        self.app.on_sync_event(&event);
        event
    }

    async fn settle(&self) {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }
}

#[test]
fn test_app_initialization() {
    let app = create_test_app();
    assert!(app.is_running);
    assert_eq!(app.view_mode, ViewMode::default());
    assert_eq!(app.library.tab, LibraryTab::Queue);
    assert!(app.library.items.is_empty());
    assert!(app.sync_error.is_none());
}

#[tokio::test]
async fn test_quit_closes_help_first() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('?'));
    assert!(h.app.show_help);

    h.key(KeyCode::Char('q'));
    assert!(!h.app.show_help);
    assert!(h.app.is_running);

    h.key(KeyCode::Char('q'));
    assert!(!h.app.is_running);
}

#[tokio::test]
async fn test_volume_key_is_optimistic() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('+'));

    // Shown before the remote call has run
    assert_eq!(h.app.playback.volume, Some(55));
    assert!(h.service.commands().is_empty());

    h.key(KeyCode::Char('+'));
    assert_eq!(h.app.playback.volume, Some(60));

    h.settle().await;
    assert_eq!(h.service.commands().last(), Some(&Command::SetVolume(60)));
}

#[tokio::test]
async fn test_failed_volume_reverts_and_toasts() {
    let mut h = Harness::new();
    h.service
        .replies
        .lock()
        .unwrap()
        .push_back(Err(RemoteError::Network("reset".into())));

    h.key(KeyCode::Char('-'));
    assert_eq!(h.app.playback.volume, Some(45));

    let event = h.next_sync_event().await;
    assert_eq!(
        event,
        SyncEvent::CommandFailed {
            command: Command::SetVolume(45),
            kind: ErrorKind::TransientNetwork,
        }
    );
    assert_eq!(h.dispatcher.display().volume, Some(50));
    assert!(h.app.toast.as_ref().unwrap().message.contains("volume 45%"));
}

#[tokio::test]
async fn test_play_pause_follows_display() {
    let mut h = Harness::new();
    h.key(KeyCode::Char(' '));
    assert!(h.app.playback.is_playing);

    h.key(KeyCode::Char(' '));
    assert!(!h.app.playback.is_playing);

    h.settle().await;
    assert_eq!(h.service.commands().last(), Some(&Command::Pause));
}

#[tokio::test]
async fn test_no_active_device_blocks_until_device_selected() {
    let mut h = Harness::new();
    h.service
        .replies
        .lock()
        .unwrap()
        .push_back(Err(RemoteError::NoActiveDevice));

    h.key(KeyCode::Char(' '));
    h.next_sync_event().await;
    assert!(h.dispatcher.is_device_blocked());

    // Rejected without reaching the service
    h.key(KeyCode::Char('n'));
    assert_eq!(h.service.commands(), vec![Command::Play]);
    assert!(h.app.toast.as_ref().unwrap().message.contains("No active device"));

    // Pick the second device from the popup
    h.key(KeyCode::Char('d'));
    assert!(h.app.devices.as_ref().unwrap().loading);
    h.pump().await;
    assert_eq!(h.app.devices.as_ref().unwrap().devices.len(), 2);
    h.key(KeyCode::Char('j'));
    h.key(KeyCode::Enter);
    assert!(h.app.devices.is_none());
    assert_eq!(h.app.state.last_device_id.as_deref(), Some("kitchen"));

    h.settle().await;
    assert!(!h.dispatcher.is_device_blocked());
    assert_eq!(
        h.service.commands().last(),
        Some(&Command::SelectDevice("kitchen".into()))
    );

    h.key(KeyCode::Char('n'));
    h.settle().await;
    assert_eq!(h.service.commands().last(), Some(&Command::SkipNext));
}

#[tokio::test]
async fn test_mute_then_unmute_restores_volume() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('m'));
    assert_eq!(h.app.playback.volume, Some(0));
    assert_eq!(h.app.state.unmute_volume, Some(50));

    h.key(KeyCode::Char('m'));
    assert_eq!(h.app.playback.volume, Some(50));
    assert_eq!(h.app.state.unmute_volume, None);
}

#[tokio::test]
async fn test_search_prompt_loads_results() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('/'));
    assert!(h.app.input_state.is_some());

    // Typing goes to the prompt, not to the key bindings
    h.type_text("qmn");
    assert!(h.app.is_running);
    h.key(KeyCode::Enter);

    assert!(h.app.input_state.is_none());
    assert_eq!(h.app.view_mode, ViewMode::Library);
    assert_eq!(h.app.library.tab, LibraryTab::Search);
    assert!(h.app.library.loading);

    h.pump().await;
    assert!(!h.app.library.loading);
    assert_eq!(h.app.library.items.len(), 1);
    assert_eq!(h.app.library.items[0].name, "qmn");
}

#[tokio::test]
async fn test_library_drill_down_play_and_back() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('l'));
    assert_eq!(h.app.view_mode, ViewMode::Library);
    h.pump().await;
    assert_eq!(h.app.library.items[0].name, "Next Up");

    h.key(KeyCode::Tab);
    assert_eq!(h.app.library.tab, LibraryTab::Playlists);
    h.pump().await;

    h.key(KeyCode::Enter);
    h.pump().await;
    assert_eq!(h.app.library.title.as_deref(), Some("Road Trip"));
    assert_eq!(h.app.library.items.len(), 2);

    h.key(KeyCode::Down);
    h.key(KeyCode::Enter);
    h.pump().await;
    assert!(h.app.toast.as_ref().unwrap().message.contains("Roadhouse"));
    assert_eq!(
        h.service.played.lock().unwrap().as_slice(),
        &[PlayTarget::Tracks {
            uris: vec!["spotify:track:roadhouse".into()]
        }]
    );

    h.key(KeyCode::Backspace);
    assert!(h.app.library.title.is_none());
    h.key(KeyCode::Backspace);
    assert_eq!(h.app.view_mode, ViewMode::Home);
}

#[tokio::test]
async fn test_library_filter_and_failed_tab() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('l'));
    h.pump().await;
    h.key(KeyCode::Tab);
    h.pump().await;
    h.key(KeyCode::Tab);
    assert_eq!(h.app.library.tab, LibraryTab::Liked);
    h.pump().await;
    assert_eq!(h.app.library.visible().len(), 3);

    h.key(KeyCode::Char('f'));
    h.type_text("brth");
    assert_eq!(h.app.library.visible().len(), 1);
    h.key(KeyCode::Esc);
    assert!(h.app.library.filter.is_empty());

    h.key(KeyCode::Tab);
    assert_eq!(h.app.library.tab, LibraryTab::Albums);
    h.pump().await;
    h.key(KeyCode::Tab);
    assert_eq!(h.app.library.tab, LibraryTab::Artists);
    h.pump().await;

    h.key(KeyCode::Tab);
    assert_eq!(h.app.library.tab, LibraryTab::Recent);
    h.pump().await;
    assert!(!h.app.library.loading);
    assert!(h.app.toast.is_some());
}

#[tokio::test]
async fn test_artist_page_lists_top_tracks_then_albums() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('l'));
    h.pump().await;
    for _ in 0..4 {
        h.key(KeyCode::Tab);
        h.pump().await;
    }
    assert_eq!(h.app.library.tab, LibraryTab::Artists);
    assert_eq!(h.app.library.items[0].name, "Pink Floyd");

    h.key(KeyCode::Enter);
    h.pump().await;
    assert_eq!(h.app.library.title.as_deref(), Some("Pink Floyd"));
    let kinds: Vec<ItemKind> = h.app.library.items.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![ItemKind::Track, ItemKind::Album]);

    // Albums on the artist page open like any other album
    h.key(KeyCode::Down);
    h.key(KeyCode::Enter);
    assert!(h.app.library.loading);
}

#[tokio::test]
async fn test_back_before_playlist_loads_stays_on_list() {
    let mut h = Harness::new();
    h.key(KeyCode::Char('l'));
    h.pump().await;
    h.key(KeyCode::Tab);
    h.pump().await;

    h.key(KeyCode::Enter);
    assert!(h.app.library.loading);
    h.key(KeyCode::Backspace);
    assert!(!h.app.library.loading);
    assert_eq!(h.app.view_mode, ViewMode::Library);

    // The late result is dropped
    h.pump().await;
    assert!(h.app.library.title.is_none());
    assert_eq!(h.app.library.items[0].name, "Road Trip");
}

#[tokio::test]
async fn test_premium_required_marks_control_disabled() {
    let mut h = Harness::new();
    h.service
        .replies
        .lock()
        .unwrap()
        .push_back(Err(RemoteError::PremiumRequired));

    h.key(KeyCode::Char('z'));
    h.next_sync_event().await;
    h.app.sync_from(&h.dispatcher);
    assert!(h.app.is_disabled(CommandField::Shuffle));
    assert!(!h.app.is_disabled(CommandField::Volume));

    // Refused locally, nothing more is sent
    h.key(KeyCode::Char('z'));
    assert_eq!(h.service.commands(), vec![Command::SetShuffle(true)]);
}

#[tokio::test]
async fn test_blocked_device_is_reported_to_view() {
    let mut h = Harness::new();
    h.service
        .replies
        .lock()
        .unwrap()
        .push_back(Err(RemoteError::NoActiveDevice));

    h.key(KeyCode::Char('n'));
    h.next_sync_event().await;
    assert!(!h.app.device_blocked);
    h.app.sync_from(&h.dispatcher);
    assert!(h.app.device_blocked);
}

#[tokio::test]
async fn test_device_without_volume_shows_default() {
    let mut h = Harness::new();
    let mut silent = paused_snapshot();
    silent.volume = None;
    h._canonical.send_replace(Arc::new(silent));
    h.app.sync_from(&h.dispatcher);
    assert_eq!(h.app.playback.volume, Some(30));

    h.key(KeyCode::Char('+'));
    assert_eq!(h.app.playback.volume, Some(35));
}
