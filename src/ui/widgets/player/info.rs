use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(track) = &app.playback.track else {
        return;
    };

    let max_width = area.width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            format!("🎵 {}", truncate(&track.name, max_width.saturating_sub(2))),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("🎤 "),
            Span::styled(
                truncate(&track.artist_line(), max_width.saturating_sub(2)),
                Style::default().fg(theme.magenta),
            ),
        ]),
        Line::from(vec![
            Span::raw("💿 "),
            Span::styled(
                truncate(&track.album, max_width.saturating_sub(2)),
                Style::default().fg(theme.cyan).add_modifier(Modifier::DIM),
            ),
        ]),
    ];

    if let Some(device) = &app.playback.device {
        let label = if device.name.is_empty() { "switching..." } else { device.name.as_str() };
        lines.push(Line::from(Span::styled(
            format!("🔈 {}", truncate(label, max_width.saturating_sub(2))),
            Style::default().fg(theme.overlay),
        )));
    }

    // Keep the block vertically centered in tall cards
    let pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let mut text = vec![Line::default(); pad as usize];
    text.extend(lines);

    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
