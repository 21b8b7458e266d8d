use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const SLIDE_MS: u128 = 300;

/// Horizontal offset from the resting position: slides in from the right, then back out.
pub fn slide_offset(width: u16, since_start_ms: u128, until_deadline_ms: u128) -> u16 {
    let t = if since_start_ms < SLIDE_MS {
        let p = since_start_ms as f32 / SLIDE_MS as f32;
        (1.0 - p).powi(3)
    } else if until_deadline_ms < SLIDE_MS {
        let p = (SLIDE_MS - until_deadline_ms) as f32 / SLIDE_MS as f32;
        p.powi(3)
    } else {
        0.0
    };
    (width as f32 * t) as u16
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(toast) = &app.toast else {
        return;
    };
    let theme = &app.theme;
    let screen = f.area();
    let now = Instant::now();

    let width = (toast.message.width() as u16 + 6).min(screen.width.saturating_sub(4));
    let rest_x = screen.width.saturating_sub(width + 1);
    let x = rest_x.saturating_add(slide_offset(
        width,
        now.duration_since(toast.start_time).as_millis(),
        toast.deadline.saturating_duration_since(now).as_millis(),
    ));
    if x >= screen.width {
        return;
    }

    let area = Rect::new(x, 1, width, 3).intersection(screen);
    if area.is_empty() {
        return;
    }
    f.render_widget(Clear, area);

    let color = if toast.message.starts_with('✗') { theme.red } else { theme.green };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Reset));
    let text = Paragraph::new(Line::from(Span::styled(
        toast.message.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}
