use super::Context;
use crate::app::library_helpers;
use crate::app::{App, InputMode, InputState, LibraryTab, ViewMode};
use crossterm::event::KeyEvent;

/// Show `tab` from scratch and start loading it.
pub(super) fn reload(app: &mut App, ctx: &Context, tab: LibraryTab) {
    let ticket = app.library.switch_tab(tab);
    library_helpers::load_tab(
        ticket,
        app.library.search_query.clone(),
        ctx.library.clone(),
        ctx.tx.clone(),
    );
}

pub fn handle_library_events(key: KeyEvent, app: &mut App, ctx: &Context) -> bool {
    let keys = app.keys.clone();

    if keys.matches_any(key, &keys.nav_down, &keys.nav_down_alt) {
        app.library.select_next();
        return true;
    }
    if keys.matches_any(key, &keys.nav_up, &keys.nav_up_alt) {
        app.library.select_prev();
        return true;
    }

    if keys.matches(key, &keys.tab_next) {
        let tab = app.library.tab.next();
        reload(app, ctx, tab);
        return true;
    }
    if keys.matches(key, &keys.tab_prev) {
        let tab = app.library.tab.prev();
        reload(app, ctx, tab);
        return true;
    }

    if keys.matches(key, &keys.refresh) {
        let tab = app.library.tab;
        reload(app, ctx, tab);
        return true;
    }

    if keys.matches(key, &keys.filter) {
        let current = app.library.filter.clone();
        app.input_state = Some(InputState::new(InputMode::Filter, " Filter ", &current));
        return true;
    }

    // Enter: open containers, play tracks
    if keys.matches(key, &keys.select) {
        let Some((index, item)) = app.library.selected_item() else {
            return true;
        };
        let item = item.clone();
        if library_helpers::can_open(&item) {
            let ticket = app.library.begin_drill_down();
            library_helpers::open_item(ticket, &item, ctx.library.clone(), ctx.tx.clone());
        } else {
            library_helpers::play(
                item.play_target(index),
                item.name.clone(),
                app.target_device(),
                ctx.library.clone(),
                ctx.tx.clone(),
            );
        }
        return true;
    }

    if keys.matches(key, &keys.back) {
        if !app.library.back() {
            app.view_mode = ViewMode::Home;
        }
        return true;
    }

    if keys.matches(key, &keys.close) {
        if !app.library.filter.is_empty() {
            app.library.set_filter(String::new());
        } else {
            app.view_mode = ViewMode::Home;
        }
        return true;
    }

    if keys.matches(key, &keys.add_to_queue) {
        if let Some((_, item)) = app.library.selected_item() {
            if item.is_track() {
                library_helpers::add_to_queue(
                    item,
                    app.target_device(),
                    ctx.library.clone(),
                    ctx.tx.clone(),
                );
            }
        }
        return true;
    }

    if keys.matches(key, &keys.save_track) || keys.matches(key, &keys.remove_track) {
        let save = keys.matches(key, &keys.save_track);
        if let Some((_, item)) = app.library.selected_item() {
            if let (true, Some(id)) = (item.is_track(), item.id.clone()) {
                library_helpers::set_saved(
                    id,
                    item.name.clone(),
                    save,
                    ctx.library.clone(),
                    ctx.tx.clone(),
                );
            }
        }
        return true;
    }

    false
}
