use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        footer_area: chunks[1],
    }
}

pub struct ContentLayout {
    pub player: Rect,
    pub library: Option<Rect>,
    pub is_horizontal: bool,
}

/// Height the now-playing card needs when stacked above the library
const STACKED_PLAYER_HEIGHT: u16 = 9;

pub fn get_content_layout(area: Rect, show_library: bool, wide_mode: bool) -> ContentLayout {
    if !show_library {
        return ContentLayout {
            player: area,
            library: None,
            is_horizontal: false,
        };
    }

    if wide_mode {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Min(30)])
            .split(area);
        return ContentLayout {
            player: chunks[0],
            library: Some(chunks[1]),
            is_horizontal: true,
        };
    }

    if area.height < STACKED_PLAYER_HEIGHT + 5 {
        // Too short to stack: the library takes over
        return ContentLayout {
            player: Rect::new(area.x, area.y, area.width, 0),
            library: Some(area),
            is_horizontal: false,
        };
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STACKED_PLAYER_HEIGHT), Constraint::Min(5)])
        .split(area);
    ContentLayout {
        player: chunks[0],
        library: Some(chunks[1]),
        is_horizontal: false,
    }
}
