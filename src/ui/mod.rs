pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::{App, ViewMode};
use crate::player::ErrorKind;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Footer label for the last poll failure, if any
pub fn status_label(error: Option<ErrorKind>) -> Option<&'static str> {
    Some(match error? {
        ErrorKind::TransientNetwork => "⚠ offline, retrying",
        ErrorKind::RateLimited => "⏳ rate limited, slowing down",
        ErrorKind::AuthExpired => "🔒 session expired",
        ErrorKind::NoActiveDevice => "no active device",
        ErrorKind::PremiumRequired => "Premium required",
    })
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let main_layout = layout::get_main_layout(area);

    let show_library = app.view_mode == ViewMode::Library;
    let content = layout::get_content_layout(main_layout.body_area, show_library, area.width >= 90);

    widgets::player::render(f, content.player, app);
    if let Some(library_area) = content.library {
        widgets::library::render(f, library_area, app);
    }

    // Footer: sync status on the left, key hint on the right
    let theme = &app.theme;
    let status = match status_label(app.sync_error) {
        Some(label) if app.sync_error == Some(ErrorKind::AuthExpired) => {
            Some((label.to_string(), theme.red))
        }
        Some(label) => Some((label.to_string(), theme.yellow)),
        None if app.device_blocked => Some((
            format!("no device, press {} to pick one", app.keys.display(&app.keys.show_devices)),
            theme.yellow,
        )),
        None => None,
    };
    if let Some((label, color)) = status {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", label), Style::default().fg(color))),
            main_layout.footer_area,
        );
    }
    if !app.show_help {
        let hint = Line::from(vec![
            Span::styled(
                format!(" {} ", app.keys.display(&app.keys.toggle_help)),
                Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
            ),
            Span::styled("keys ", Style::default().fg(theme.overlay)),
        ]);
        f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), main_layout.footer_area);
    }

    widgets::popups::render(f, app);
}
