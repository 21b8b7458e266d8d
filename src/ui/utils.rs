use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to at most `max_width` terminal columns, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out + "…"
}

/// `M:SS`, or `H:MM:SS` past an hour; `--:--` when unknown.
pub fn format_duration(ms: Option<u64>) -> String {
    let Some(ms) = ms else {
        return "--:--".to_string();
    };
    let total = ms / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

pub fn format_artist_names(names: &[String]) -> String {
    if names.is_empty() {
        "Unknown Artist".to_string()
    } else {
        names.join(", ")
    }
}

/// Compact counts: 999, 1.2K, 3.4M, 1.0B
pub fn format_play_count(count: u64) -> String {
    match count {
        c if c >= 1_000_000_000 => format!("{:.1}B", c as f64 / 1e9),
        c if c >= 1_000_000 => format!("{:.1}M", c as f64 / 1e6),
        c if c >= 1_000 => format!("{:.1}K", c as f64 / 1e3),
        c => c.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtSize {
    Large,
    Medium,
    Small,
}

/// Pick an artwork URL. Spotify lists images largest first.
pub fn album_art_url(urls: &[&str], size: ArtSize) -> Option<String> {
    let idx = match size {
        ArtSize::Large => 0,
        ArtSize::Medium => 1,
        ArtSize::Small => 2,
    };
    urls.get(idx).or_else(|| urls.first()).map(|u| u.to_string())
}

/// Text bar of `width` cells filled to `ratio`.
pub fn bar(width: usize, ratio: f64) -> (usize, usize) {
    let filled = (width as f64 * ratio.clamp(0.0, 1.0)).round() as usize;
    (filled.min(width), width.saturating_sub(filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("hello", 0), "");
        // wide glyphs count double
        assert_eq!(truncate("日本語の歌", 5), "日本…");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "--:--");
        assert_eq!(format_duration(Some(0)), "0:00");
        assert_eq!(format_duration(Some(65_000)), "1:05");
        assert_eq!(format_duration(Some(3_725_000)), "1:02:05");
    }

    #[test]
    fn test_format_artist_names() {
        assert_eq!(format_artist_names(&[]), "Unknown Artist");
        assert_eq!(
            format_artist_names(&["A".to_string(), "B".to_string()]),
            "A, B"
        );
    }

    #[test]
    fn test_format_play_count() {
        assert_eq!(format_play_count(999), "999");
        assert_eq!(format_play_count(1_500), "1.5K");
        assert_eq!(format_play_count(2_300_000), "2.3M");
        assert_eq!(format_play_count(1_000_000_000), "1.0B");
    }

    #[test]
    fn test_album_art_url_falls_back_to_first() {
        assert_eq!(album_art_url(&["l", "m", "s"], ArtSize::Small).as_deref(), Some("s"));
        assert_eq!(album_art_url(&["only"], ArtSize::Medium).as_deref(), Some("only"));
        assert_eq!(album_art_url(&[], ArtSize::Large), None);
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(10, 0.5), (5, 5));
        assert_eq!(bar(10, 2.0), (10, 0));
    }
}
