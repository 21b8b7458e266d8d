use crate::app::App;
use crate::player::{CommandField, RepeatMode};
use crate::ui::utils::bar;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CENTER_WIDTH: u16 = 36;
const VOLUME_BAR_WIDTH: usize = 20;

fn centered(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(CENTER_WIDTH),
            Constraint::Fill(1),
        ])
        .split(area)
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let playback = &app.playback;

    let play_icon = if playback.is_playing { "⏸" } else { "▶" };
    // Controls the account cannot use are dimmed
    let tint = |field: CommandField, color| {
        if app.is_disabled(field) {
            Style::default().fg(theme.overlay).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(color)
        }
    };
    let btn = |field| tint(field, theme.text).add_modifier(Modifier::BOLD);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume
        ])
        .split(area);

    let buttons = centered(rows[0]);

    if playback.shuffle {
        let shuffle = Paragraph::new(Span::styled("🔀 ", tint(CommandField::Shuffle, theme.green)))
            .alignment(Alignment::Right);
        f.render_widget(shuffle, buttons[0]);
    }

    let center = Line::from(vec![
        Span::styled("   ⏮   ", btn(CommandField::Track)),
        Span::raw("   "),
        Span::styled(format!("   {}   ", play_icon), btn(CommandField::Playback)),
        Span::raw("   "),
        Span::styled("   ⏭   ", btn(CommandField::Track)),
    ]);
    f.render_widget(Paragraph::new(center).alignment(Alignment::Center), buttons[1]);

    let repeat_style = tint(CommandField::Repeat, theme.green);
    let repeat = match playback.repeat {
        RepeatMode::Off => None,
        RepeatMode::Context => Some(vec![Span::styled(" 🔁", repeat_style)]),
        RepeatMode::Track => Some(vec![
            Span::styled(" 🔂", repeat_style),
            Span::styled("1", repeat_style.add_modifier(Modifier::BOLD)),
        ]),
    };
    if let Some(spans) = repeat {
        f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Left), buttons[2]);
    }

    if rows[2].height == 0 {
        return;
    }
    let Some(volume) = playback.volume else {
        return;
    };

    let (filled, empty) = bar(VOLUME_BAR_WIDTH, volume as f64 / 100.0);
    let icon = match volume {
        0 => "🔇",
        1..=49 => "🔉",
        _ => "🔊",
    };
    let line = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(theme.overlay)),
        Span::styled("━".repeat(filled), tint(CommandField::Volume, theme.green)),
        Span::styled("─".repeat(empty), Style::default().fg(theme.surface)),
        Span::styled(format!(" {:>3}%", volume), Style::default().fg(theme.overlay)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), centered(rows[2])[1]);
}
