#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
    Playlist,
}

/// One row of the library panel: a track, album, artist or playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItem {
    pub kind: ItemKind,
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
    /// Artists for tracks/albums, owner for playlists
    pub subtitle: String,
    pub duration_ms: Option<u64>,
    /// Album or playlist this row was listed from, used to keep context when playing
    pub context_uri: Option<String>,
}

impl LibraryItem {
    pub fn is_track(&self) -> bool {
        self.kind == ItemKind::Track
    }

    /// What to ask the player to start when this row (at `index`) is chosen.
    pub fn play_target(&self, index: usize) -> PlayTarget {
        match (self.kind, &self.context_uri) {
            (ItemKind::Track, Some(ctx)) => PlayTarget::Context {
                context_uri: ctx.clone(),
                offset: Some(Offset::Uri(self.uri.clone())),
            },
            (ItemKind::Track, None) => PlayTarget::Tracks {
                uris: vec![self.uri.clone()],
            },
            _ => PlayTarget::Context {
                context_uri: self.uri.clone(),
                offset: None,
            },
        }
        .with_fallback_index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offset {
    Uri(String),
    Position(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayTarget {
    Context {
        context_uri: String,
        offset: Option<Offset>,
    },
    Tracks {
        uris: Vec<String>,
    },
}

impl PlayTarget {
    /// Local files in a playlist carry no stable URI offset; fall back to position.
    fn with_fallback_index(self, index: usize) -> Self {
        match self {
            PlayTarget::Context {
                context_uri,
                offset: Some(Offset::Uri(uri)),
            } if uri.starts_with("spotify:local:") => PlayTarget::Context {
                context_uri,
                offset: Some(Offset::Position(index)),
            },
            other => other,
        }
    }

    /// JSON body for `PUT /me/player/play`
    pub fn body(&self) -> serde_json::Value {
        match self {
            PlayTarget::Context { context_uri, offset } => {
                let mut body = serde_json::json!({ "context_uri": context_uri });
                match offset {
                    Some(Offset::Uri(uri)) => body["offset"] = serde_json::json!({ "uri": uri }),
                    Some(Offset::Position(pos)) => {
                        body["offset"] = serde_json::json!({ "position": pos })
                    }
                    None => {}
                }
                body
            }
            PlayTarget::Tracks { uris } => serde_json::json!({ "uris": uris }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub tracks: Vec<LibraryItem>,
    pub albums: Vec<LibraryItem>,
    pub artists: Vec<LibraryItem>,
    pub playlists: Vec<LibraryItem>,
}

impl SearchResults {
    /// Flatten into one list in display order: tracks, albums, artists, playlists.
    pub fn into_items(self) -> Vec<LibraryItem> {
        let mut items = self.tracks;
        items.extend(self.albums);
        items.extend(self.artists);
        items.extend(self.playlists);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(uri: &str, ctx: Option<&str>) -> LibraryItem {
        LibraryItem {
            kind: ItemKind::Track,
            id: None,
            uri: uri.to_string(),
            name: "n".into(),
            subtitle: String::new(),
            duration_ms: Some(1000),
            context_uri: ctx.map(str::to_string),
        }
    }

    #[test]
    fn test_track_in_context_plays_with_uri_offset() {
        let t = track("spotify:track:1", Some("spotify:playlist:p"));
        let body = t.play_target(3).body();
        assert_eq!(body["context_uri"], "spotify:playlist:p");
        assert_eq!(body["offset"]["uri"], "spotify:track:1");
    }

    #[test]
    fn test_local_track_falls_back_to_position() {
        let t = track("spotify:local:a:b:c:1", Some("spotify:playlist:p"));
        assert_eq!(t.play_target(7).body()["offset"]["position"], 7);
    }

    #[test]
    fn test_bare_track_plays_uri_list() {
        let t = track("spotify:track:1", None);
        assert_eq!(t.play_target(0).body()["uris"][0], "spotify:track:1");
    }

    #[test]
    fn test_album_plays_as_context() {
        let mut a = track("spotify:album:9", None);
        a.kind = ItemKind::Album;
        let body = a.play_target(0).body();
        assert_eq!(body["context_uri"], "spotify:album:9");
        assert!(body.get("offset").is_none());
    }
}
