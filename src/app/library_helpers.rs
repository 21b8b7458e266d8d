//! Background library work. Each helper spawns a task and reports back
//! through the app event channel; none of them touch the playback snapshot.

use crate::app::events::AppEvent;
use crate::app::{LibraryTab, LoadTicket};
use crate::player::{ItemKind, LibraryItem, LibraryService, PlayTarget, RemoteError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

pub const SEARCH_LIMIT: usize = 20;

async fn report_failure(tx: &mpsc::Sender<AppEvent>, what: &str, e: RemoteError) {
    warn!("{} failed: {}", what, e);
    let _ = tx.send(AppEvent::LibraryFailed(e.kind())).await;
}

/// Load the top level of a tab.
pub fn load_tab(
    ticket: LoadTicket,
    query: String,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
) {
    let tab = ticket.tab;
    if tab == LibraryTab::Search && query.trim().is_empty() {
        return;
    }
    tokio::spawn(async move {
        let result = match tab {
            LibraryTab::Queue => library.queue().await,
            LibraryTab::Playlists => library.playlists().await,
            LibraryTab::Liked => library.saved_tracks().await,
            LibraryTab::Albums => library.saved_albums().await,
            LibraryTab::Artists => library.followed_artists().await,
            LibraryTab::Recent => library.recently_played().await,
            LibraryTab::Search => library
                .search(&query, SEARCH_LIMIT)
                .await
                .map(|results| results.into_items()),
        };
        match result {
            Ok(items) => {
                let _ = tx.send(AppEvent::LibraryLoaded(ticket, None, items)).await;
            }
            Err(e) => report_failure(&tx, tab.title(), e).await,
        }
    });
}

/// Whether [`open_item`] can show this row as a nested list.
pub fn can_open(item: &LibraryItem) -> bool {
    item.kind != ItemKind::Track && item.id.is_some()
}

/// Top tracks first, then the artist's albums.
async fn artist_page(
    library: &dyn LibraryService,
    artist_id: &str,
) -> Result<Vec<LibraryItem>, RemoteError> {
    let (mut items, albums) = tokio::try_join!(
        library.artist_top_tracks(artist_id),
        library.artist_albums(artist_id)
    )?;
    items.extend(albums);
    Ok(items)
}

/// Open a playlist, album or artist as a nested list.
pub fn open_item(
    ticket: LoadTicket,
    item: &LibraryItem,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
) {
    let Some(id) = item.id.clone() else {
        return;
    };
    let kind = item.kind;
    let title = item.name.clone();
    tokio::spawn(async move {
        let result = match kind {
            ItemKind::Playlist => library.playlist_tracks(&id).await,
            ItemKind::Album => library.album_tracks(&id).await,
            ItemKind::Artist => artist_page(library.as_ref(), &id).await,
            ItemKind::Track => return,
        };
        match result {
            Ok(items) => {
                let _ = tx
                    .send(AppEvent::LibraryLoaded(ticket, Some(title), items))
                    .await;
            }
            Err(e) => report_failure(&tx, "open", e).await,
        }
    });
}

pub fn play(
    target: PlayTarget,
    label: String,
    device_id: Option<String>,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        match library.play(&target, device_id.as_deref()).await {
            Ok(()) => {
                let _ = tx.send(AppEvent::Notice(format!("▶ {}", label))).await;
            }
            Err(e) => report_failure(&tx, "play", e).await,
        }
    });
}

pub fn add_to_queue(
    item: &LibraryItem,
    device_id: Option<String>,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
) {
    let uri = item.uri.clone();
    let name = item.name.clone();
    tokio::spawn(async move {
        match library.add_to_queue(&uri, device_id.as_deref()).await {
            Ok(()) => {
                let _ = tx.send(AppEvent::Notice(format!("➕ Queued: {}", name))).await;
            }
            Err(e) => report_failure(&tx, "queue", e).await,
        }
    });
}

/// Like (`save = true`) or unlike a track.
pub fn set_saved(
    track_id: String,
    name: String,
    save: bool,
    library: Arc<dyn LibraryService>,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = if save {
            library.save_track(&track_id).await
        } else {
            library.remove_saved_track(&track_id).await
        };
        match result {
            Ok(()) => {
                let msg = if save {
                    format!("💚 Liked: {}", name)
                } else {
                    format!("Removed from Liked: {}", name)
                };
                let _ = tx.send(AppEvent::Notice(msg)).await;
            }
            Err(e) => report_failure(&tx, "save", e).await,
        }
    });
}

pub fn load_devices(library: Arc<dyn LibraryService>, tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        match library.devices().await {
            Ok(devices) => {
                let _ = tx.send(AppEvent::DevicesLoaded(devices)).await;
            }
            Err(e) => report_failure(&tx, "devices", e).await,
        }
    });
}
