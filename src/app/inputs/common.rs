use super::Context;
use crate::app::library_helpers;
use crate::app::{App, DevicePicker, InputMode, InputState, ViewMode};
use crate::player::ErrorKind;
use crossterm::event::KeyEvent;

pub fn handle_common_events(key: KeyEvent, app: &mut App, ctx: &Context) -> bool {
    let keys = &app.keys;

    // Quit ('q'): close the help overlay first
    if keys.matches(key, &keys.quit) {
        if app.show_help {
            app.show_help = false;
        } else {
            app.is_running = false;
        }
        return true;
    }

    if keys.matches(key, &keys.toggle_help) {
        app.show_help = !app.show_help;
        return true;
    }

    if keys.matches(key, &keys.close) && app.show_help {
        app.show_help = false;
        return true;
    }

    // Search ('s' or '/'): prompt, then show results in the library panel
    if keys.matches_any(key, &keys.search, &keys.search_alt) {
        let query = app.library.search_query.clone();
        app.input_state = Some(InputState::new(InputMode::Search, " Search Spotify ", &query));
        return true;
    }

    if keys.matches(key, &keys.show_devices) {
        app.devices = Some(DevicePicker::loading());
        library_helpers::load_devices(ctx.library.clone(), ctx.tx.clone());
        return true;
    }

    if keys.matches(key, &keys.view_library) {
        app.view_mode = ViewMode::Library;
        if app.library.items.is_empty() && !app.library.loading {
            let tab = app.library.tab;
            super::library::reload(app, ctx, tab);
        }
        return true;
    }

    if keys.matches(key, &keys.view_home) && app.view_mode != ViewMode::Home {
        app.view_mode = ViewMode::Home;
        return true;
    }

    // After `spotuify auth` in another shell, 'R' picks up the new token
    if keys.matches(key, &keys.refresh) && app.sync_error == Some(ErrorKind::AuthExpired) {
        app.reauth_requested = true;
        app.show_toast("🔑 Reloading credentials...");
        return true;
    }

    false
}
