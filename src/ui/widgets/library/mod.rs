use crate::app::{App, LibraryTab};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub mod list;

/// Lines taken by the header above the item list
const HEADER_LINES: usize = 6;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let lib_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Library ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));

    let inner = lib_block.inner(area);
    f.render_widget(lib_block, area);

    let w = inner.width as usize;
    let h = inner.height as usize;
    let lib = &app.library;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::raw(""));

    // Filter or search line
    let (prompt, color) = if !lib.filter.is_empty() {
        (format!(" filter: {}", lib.filter), theme.yellow)
    } else if lib.tab == LibraryTab::Search && !lib.search_query.is_empty() {
        (format!(" {}", lib.search_query), theme.green)
    } else {
        (
            format!(" Press {} to search...", app.keys.display(&app.keys.search)),
            theme.overlay,
        )
    };
    lines.push(Line::from(vec![
        Span::styled("  ", Style::default().fg(color)),
        Span::styled(prompt, Style::default().fg(color)),
    ]));

    lines.push(
        Line::from(Span::styled("─".repeat(w.min(60)), Style::default().fg(theme.surface)))
            .alignment(Alignment::Center),
    );

    // Tab bar: filled dot marks the active tab
    let mut tabs = Vec::new();
    for (i, tab) in LibraryTab::ALL.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw("    "));
        }
        let active = *tab == lib.tab;
        let dot = if active { "●" } else { "○" };
        let style = if active {
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.overlay)
        };
        tabs.push(Span::styled(format!("{} ", dot), style));
        tabs.push(Span::styled(tab.title(), style));
    }
    lines.push(Line::from(tabs).alignment(Alignment::Center));

    let heading = match &lib.title {
        Some(title) => format!("  {}  ·  {}  ", lib.tab.title().to_uppercase(), title),
        None => format!("  {}  ", lib.tab.title().to_uppercase()),
    };
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(heading, Style::default().fg(theme.green)))
            .alignment(Alignment::Center),
    );

    list::render(app, w, h.saturating_sub(HEADER_LINES), &mut lines);

    f.render_widget(Paragraph::new(lines), inner);
}
