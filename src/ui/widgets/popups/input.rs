use super::centered_rect;
use crate::app::{App, InputMode};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let Some(input) = &app.input_state else {
        return;
    };
    let theme = &app.theme;

    let area = centered_rect(f.area(), 60.min(f.area().width.saturating_sub(4)), 5);
    f.render_widget(Clear, area);

    let hint = match input.mode {
        InputMode::Search => "Enter to search · Esc to cancel",
        InputMode::Filter => "Enter to keep · Esc to clear",
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled(input.value.as_str(), Style::default().fg(theme.text)),
            Span::styled("▌", Style::default().fg(theme.green).add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(theme.overlay)))
            .alignment(Alignment::Right),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(input.title.as_str())
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
