use crate::app::App;
use crate::ui::utils::{bar, format_duration};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let duration = app.playback.duration_ms();

    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let ratio = if duration > 0 {
        app.get_current_position_ms() as f64 / duration as f64
    } else {
        0.0
    };
    let (filled, empty) = bar(gauge_area.width as usize, ratio);
    let fill_style = Style::default().fg(theme.green);

    let mut spans = Vec::with_capacity(3);
    if filled > 0 {
        // Playhead knob at the end of the filled part
        spans.push(Span::styled("━".repeat(filled - 1), fill_style));
        spans.push(Span::styled("●", fill_style));
    }
    spans.push(Span::styled("─".repeat(empty), Style::default().fg(theme.surface)));

    f.render_widget(Paragraph::new(Line::from(spans)), gauge_area);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &App) {
    let duration = app.playback.track.as_ref().map(|t| t.duration_ms);
    let time_str = format!(
        "{} / {}",
        format_duration(Some(app.get_current_position_ms())),
        format_duration(duration)
    );
    let label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.overlay));
    f.render_widget(label, area);
}
