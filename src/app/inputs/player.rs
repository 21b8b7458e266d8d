use super::Context;
use crate::app::App;
use crate::player::Command;
use crossterm::event::KeyEvent;

/// Send a command and refresh the display copy so the change shows this frame.
pub fn send(app: &mut App, ctx: &Context, command: Command) -> bool {
    match ctx.dispatcher.dispatch(command) {
        Ok(()) => {
            app.sync_from(ctx.dispatcher);
            true
        }
        Err(kind) => {
            app.on_rejected(kind);
            false
        }
    }
}

pub fn handle_player_events(key: KeyEvent, app: &mut App, ctx: &Context) -> bool {
    let keys = app.keys.clone();

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        let command = app.play_pause_command();
        send(app, ctx, command);
        return true;
    }

    if keys.matches(key, &keys.next_track) {
        if send(app, ctx, Command::SkipNext) {
            app.show_toast("⏭ Next Track");
        }
        return true;
    }

    if keys.matches(key, &keys.prev_track) {
        if send(app, ctx, Command::SkipPrevious) {
            app.show_toast("⏮ Previous Track");
        }
        return true;
    }

    if keys.matches(key, &keys.volume_up) || keys.matches(key, &keys.volume_down) {
        let up = keys.matches(key, &keys.volume_up);
        if let Some(command) = app.volume_command(up) {
            send(app, ctx, command);
        }
        return true;
    }

    if keys.matches(key, &keys.mute) {
        if let Some(command) = app.mute_command() {
            if send(app, ctx, command) {
                app.save_state();
            }
        }
        return true;
    }

    if keys.matches(key, &keys.seek_forward) || keys.matches(key, &keys.seek_backward) {
        let forward = keys.matches(key, &keys.seek_forward);
        if let Some(command) = app.seek_command(forward) {
            send(app, ctx, command);
        }
        return true;
    }

    if keys.matches(key, &keys.shuffle) {
        let command = app.shuffle_command();
        if send(app, ctx, command) {
            let msg = if app.playback.shuffle { "🔀 Shuffle on" } else { "Shuffle off" };
            app.show_toast(msg);
        }
        return true;
    }

    if keys.matches(key, &keys.repeat) {
        let command = app.repeat_command();
        if send(app, ctx, command) {
            app.show_toast(&format!("🔁 Repeat: {}", app.playback.repeat.as_api_str()));
        }
        return true;
    }

    false
}
