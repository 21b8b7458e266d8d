use crate::app::keys::KeyConfig;
use crate::app::{App, ViewMode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

type Hint = (String, &'static str, &'static str);

fn pair(keys: &KeyConfig, a: &str, b: &str) -> String {
    format!("{}/{}", keys.display(a), keys.display(b))
}

fn library_hints(keys: &KeyConfig) -> Vec<Hint> {
    vec![
        (pair(keys, &keys.nav_down, &keys.nav_up), "📋", "Navigate"),
        (pair(keys, &keys.tab_next, &keys.tab_prev), "🔄", "Switch tab"),
        (keys.display(&keys.select), "▶️", "Open/Play"),
        (keys.display(&keys.back), "←", "Go back"),
        (keys.display(&keys.filter), "🔎", "Filter"),
        (keys.display(&keys.add_to_queue), "➕", "Add to queue"),
        (pair(keys, &keys.save_track, &keys.remove_track), "💚", "Like/Unlike"),
        (keys.display(&keys.refresh), "↻", "Refresh"),
        (keys.display(&keys.close), "🏠", "Close library"),
    ]
}

fn global_hints(keys: &KeyConfig) -> Vec<Hint> {
    vec![
        (keys.display(&keys.play_pause), "▶️", "Play/Pause"),
        (pair(keys, &keys.next_track, &keys.prev_track), "⏭️", "Next/Previous"),
        (pair(keys, &keys.volume_up, &keys.volume_down), "🔊", "Volume"),
        (keys.display(&keys.mute), "🔇", "Mute"),
        (pair(keys, &keys.seek_backward, &keys.seek_forward), "⏩", "Seek"),
        (keys.display(&keys.shuffle), "🔀", "Shuffle"),
        (keys.display(&keys.repeat), "🔁", "Repeat"),
        (keys.display(&keys.search), "🔍", "Search"),
        (keys.display(&keys.show_devices), "🎧", "Devices"),
        (pair(keys, &keys.view_library, &keys.view_home), "📚", "Library/Home"),
        (keys.display(&keys.quit), "🚪", "Quit"),
    ]
}

fn hint_line(hint: &Hint, key_color: Color, text_color: Color) -> Line<'static> {
    let (key, icon, desc) = hint;
    Line::from(vec![
        Span::styled(
            format!(" {:<7} ", key),
            Style::default().fg(key_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::raw(format!("{} ", icon)),
        Span::styled(*desc, Style::default().fg(text_color)),
    ])
}

pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;

    let (title, context) = match app.view_mode {
        ViewMode::Library => ("Library", library_hints(&app.keys)),
        ViewMode::Home => ("Keys", Vec::new()),
    };
    let global = global_hints(&app.keys);

    let mut lines: Vec<Line> = Vec::new();
    for hint in &context {
        lines.push(hint_line(hint, theme.yellow, theme.text));
    }
    if !context.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "────── Global ──────",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    for hint in &global {
        lines.push(hint_line(hint, theme.green, theme.text));
    }

    let content_width = context
        .iter()
        .chain(global.iter())
        .map(|(k, _, d)| 2 + k.width().max(7) + 3 + 3 + d.width())
        .max()
        .unwrap_or(20)
        .max(22);

    // Bottom-right, sized to content
    let screen = f.area();
    let height = (lines.len() as u16 + 2).min(screen.height.saturating_sub(4));
    let width = (content_width as u16 + 4).min(screen.width.saturating_sub(2));
    let area = Rect::new(
        screen.width.saturating_sub(width + 1),
        screen.height.saturating_sub(height + 2),
        width,
        height,
    );
    f.render_widget(Clear, area);

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.blue))
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Left)
            .style(Style::default().bg(Color::Reset)),
    );
    f.render_widget(popup, area);
}
