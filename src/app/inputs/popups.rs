use super::{player, Context};
use crate::app::library_helpers;
use crate::app::{App, DevicePicker, InputMode, LibraryTab, ViewMode};
use crate::player::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Search/filter prompt. Returns true when the key was consumed.
pub fn handle_input_box(key: KeyEvent, app: &mut App, ctx: &Context) -> bool {
    let Some(input) = app.input_state.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Esc => {
            if input.mode == InputMode::Filter {
                app.library.set_filter(String::new());
            }
            app.input_state = None;
        }
        KeyCode::Enter => {
            let mode = input.mode;
            let value = input.value.trim().to_string();
            app.input_state = None;
            match mode {
                InputMode::Search => {
                    if value.is_empty() {
                        return true;
                    }
                    app.library.search_query = value;
                    app.view_mode = ViewMode::Library;
                    super::library::reload(app, ctx, LibraryTab::Search);
                }
                InputMode::Filter => app.library.set_filter(value),
            }
        }
        KeyCode::Backspace => {
            input.value.pop();
            if input.mode == InputMode::Filter {
                let value = input.value.clone();
                app.library.set_filter(value);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.value.push(c);
            // Filter narrows the list as you type
            if input.mode == InputMode::Filter {
                let value = input.value.clone();
                app.library.set_filter(value);
            }
        }
        _ => {}
    }
    true
}

/// Devices popup. Returns true when the key was consumed.
pub fn handle_devices(key: KeyEvent, app: &mut App, ctx: &Context) -> bool {
    if app.devices.is_none() {
        return false;
    }
    let keys = app.keys.clone();

    if keys.matches(key, &keys.close) || keys.matches(key, &keys.quit) {
        app.devices = None;
        return true;
    }
    if keys.matches(key, &keys.refresh) {
        app.devices = Some(DevicePicker::loading());
        library_helpers::load_devices(ctx.library.clone(), ctx.tx.clone());
        return true;
    }

    let Some(picker) = app.devices.as_mut() else {
        return true;
    };
    if keys.matches_any(key, &keys.nav_down, &keys.nav_down_alt) {
        picker.select_next();
    } else if keys.matches_any(key, &keys.nav_up, &keys.nav_up_alt) {
        picker.select_prev();
    } else if keys.matches(key, &keys.select) {
        if let Some(device) = picker.selected_device().cloned() {
            app.devices = None;
            if player::send(app, ctx, Command::SelectDevice(device.id.clone())) {
                app.state.last_device_id = Some(device.id);
                app.save_state();
                app.show_toast(&format!("🔈 Playing on {}", device.name));
            }
        }
    }
    true
}
