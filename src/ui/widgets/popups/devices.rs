use super::centered_rect;
use crate::app::App;
use crate::ui::utils::truncate;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

fn kind_icon(kind: &str) -> &'static str {
    match kind {
        "Computer" => "💻",
        "Smartphone" => "📱",
        "Speaker" | "AVR" | "STB" => "🔈",
        "TV" | "CastVideo" => "📺",
        _ => "🎧",
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let Some(picker) = &app.devices else {
        return;
    };
    let theme = &app.theme;

    let mut lines: Vec<Line> = Vec::new();
    if picker.loading {
        lines.push(Line::from(Span::styled(
            "Looking for devices...",
            Style::default().fg(theme.overlay),
        )));
    } else if picker.devices.is_empty() {
        lines.push(Line::from(Span::styled(
            "No devices found. Open Spotify somewhere, then press R",
            Style::default().fg(theme.overlay),
        )));
    }

    for (i, device) in picker.devices.iter().enumerate() {
        let is_sel = i == picker.selected;
        let marker = if is_sel { "●" } else { "○" };
        let name_style = if is_sel {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let marker_color = if is_sel { theme.yellow } else { theme.surface };
        let mut spans = vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(marker_color)),
            Span::raw(format!("{} ", kind_icon(&device.kind))),
            Span::styled(truncate(&device.name, 32), name_style),
        ];
        if device.is_active {
            spans.push(Span::styled("  active", Style::default().fg(theme.green)));
        }
        lines.push(Line::from(spans));
    }

    let width = 50.min(f.area().width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(f.area().height.saturating_sub(2));
    let area = centered_rect(f.area(), width, height);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.green))
        .title(" Devices ")
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(Color::Reset));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
