use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub mod controls;
pub mod info;
pub mod progress;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;

    let music_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(Span::styled(
            " Now Playing ",
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.green))
        .style(Style::default().bg(Color::Reset));

    let inner = music_block.inner(area);
    f.render_widget(music_block, area);

    if app.playback.track.is_none() {
        let hint = match app.playback.device.as_ref() {
            Some(device) => format!("Nothing playing on {}", device.name),
            None => format!(
                "No active device, press {} to pick one",
                app.keys.display(&app.keys.show_devices)
            ),
        };
        let idle = Paragraph::new(vec![Line::default(), Line::from(hint)])
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.overlay));
        f.render_widget(idle, inner);
        return;
    }

    // Tiny mode drops the gauge and time line
    let tiny = inner.height < 9;
    let constraints = if tiny {
        vec![
            Constraint::Min(1),    // Info
            Constraint::Length(0), // Gauge
            Constraint::Length(0), // Time
            Constraint::Length(1), // Controls
        ]
    } else {
        vec![
            Constraint::Min(4),    // Info
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Time
            Constraint::Length(3), // Controls
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    info::render(f, chunks[0], app);
    if chunks[1].height > 0 {
        progress::render_progress(f, chunks[1], app);
    }
    if chunks[2].height > 0 {
        progress::render_time(f, chunks[2], app);
    }
    controls::render(f, chunks[3], app);
}
