use crate::app::App;
use ratatui::layout::Rect;
use ratatui::Frame;

pub mod devices;
pub mod help;
pub mod input;
pub mod toast;

pub fn render(f: &mut Frame, app: &App) {
    if app.toast.is_some() {
        toast::render(f, app);
    }

    if app.devices.is_some() {
        devices::render(f, app);
    }

    if app.input_state.is_some() {
        input::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Rect of `width` x `height` centered in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
