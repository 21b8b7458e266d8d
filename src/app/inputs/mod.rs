use crate::app::events::AppEvent;
use crate::app::{App, ViewMode};
use crate::player::LibraryService;
use crate::sync::Dispatcher;
use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::Arc;
use tokio::sync::mpsc;

pub mod common;
pub mod library;
pub mod player;
pub mod popups;

/// Handles the key handlers need besides the app itself.
pub struct Context<'a> {
    pub dispatcher: &'a Dispatcher,
    pub library: &'a Arc<dyn LibraryService>,
    pub tx: &'a mpsc::Sender<AppEvent>,
}

pub fn handle_event(key: KeyEvent, app: &mut App, ctx: &Context) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // 1. Popups capture every key while open
    if popups::handle_input_box(key, app, ctx) {
        return;
    }
    if popups::handle_devices(key, app, ctx) {
        return;
    }

    // 2. Global keys (quit, help, views, search, devices)
    if common::handle_common_events(key, app, ctx) {
        return;
    }

    // 3. View specific
    let consumed = match app.view_mode {
        ViewMode::Library => library::handle_library_events(key, app, ctx),
        ViewMode::Home => false,
    };
    if consumed {
        return;
    }

    // 4. Playback controls work everywhere unless consumed above
    player::handle_player_events(key, app, ctx);
}
