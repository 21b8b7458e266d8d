use crate::app::App;
use crate::player::ItemKind;
use crate::ui::utils::{format_duration, truncate};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};

fn kind_icon(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Track => "♪ ",
        ItemKind::Album => "💿",
        ItemKind::Artist => "🎤",
        ItemKind::Playlist => "📜",
    }
}

/// First visible row so `selected` stays near the middle.
pub fn scroll_start(selected: usize, len: usize, height: usize) -> usize {
    selected
        .saturating_sub(height / 2)
        .min(len.saturating_sub(height))
}

pub fn render(app: &App, width: usize, height: usize, lines: &mut Vec<Line>) {
    let theme = &app.theme;
    let lib = &app.library;

    let time_w = 6;
    let subtitle_w = width / 4;
    let name_w = width.saturating_sub(subtitle_w + time_w + 12);
    let muted = theme.overlay;
    let playing_uri = app.playback.track.as_ref().map(|t| t.uri.as_str());

    if lib.loading {
        lines.push(
            Line::from(Span::styled("Loading...", Style::default().fg(muted)))
                .alignment(Alignment::Center),
        );
        return;
    }

    let visible = lib.visible();
    if visible.is_empty() {
        let msg = if !lib.filter.is_empty() { "No matches" } else { "Nothing here" };
        lines.push(
            Line::from(Span::styled(msg, Style::default().fg(muted))).alignment(Alignment::Center),
        );
        return;
    }

    let start = scroll_start(lib.selected, visible.len(), height);
    for (row, (_, item)) in visible.iter().enumerate().skip(start).take(height) {
        let is_sel = row == lib.selected;
        let is_current = playing_uri == Some(item.uri.as_str());
        let duration = item
            .duration_ms
            .map(|d| format_duration(Some(d)))
            .unwrap_or_default();

        let (marker, marker_color, name_style) = if is_sel {
            ("●", theme.yellow, Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        } else if is_current {
            ("◉", theme.green, Style::default().fg(theme.green))
        } else {
            ("○", theme.surface, Style::default().fg(theme.text))
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), Style::default().fg(marker_color)),
            Span::styled(
                format!("{:>2}  ", row + 1),
                Style::default().fg(if is_sel { theme.green } else { muted }),
            ),
            Span::styled(kind_icon(item.kind), Style::default().fg(theme.green)),
            Span::raw(" "),
            Span::styled(
                format!("{:w$}", truncate(&item.name, name_w), w = name_w),
                name_style,
            ),
            Span::styled(
                format!("{:w$}", truncate(&item.subtitle, subtitle_w), w = subtitle_w),
                Style::default().fg(muted),
            ),
            Span::styled(
                format!("{:>w$}", duration, w = time_w),
                Style::default().fg(muted),
            ),
        ]));
    }
}
