use crate::player::LibraryItem;
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

/// Library panel tab 📚
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryTab {
    #[default]
    Queue,
    Playlists,
    Liked,
    Albums,
    Artists,
    Recent,
    Search,
}

impl LibraryTab {
    pub const ALL: [LibraryTab; 7] = [
        LibraryTab::Queue,
        LibraryTab::Playlists,
        LibraryTab::Liked,
        LibraryTab::Albums,
        LibraryTab::Artists,
        LibraryTab::Recent,
        LibraryTab::Search,
    ];

    pub fn title(self) -> &'static str {
        match self {
            LibraryTab::Queue => "Queue",
            LibraryTab::Playlists => "Playlists",
            LibraryTab::Liked => "Liked",
            LibraryTab::Albums => "Albums",
            LibraryTab::Artists => "Artists",
            LibraryTab::Recent => "Recent",
            LibraryTab::Search => "Search",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Identifies one library load. Only the most recently issued ticket is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub tab: LibraryTab,
    pub id: u64,
    /// Opening a playlist, album or artist rather than a tab's top level
    pub drill_down: bool,
}

/// A list the user drilled out of; restored by going back.
#[derive(Debug, Clone)]
pub struct LibraryPage {
    pub title: Option<String>,
    pub items: Vec<LibraryItem>,
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub tab: LibraryTab,
    /// Drill-down title ("Playlist name") when inside a playlist/album/artist
    pub title: Option<String>,
    pub items: Vec<LibraryItem>,
    /// Index into the filtered view
    pub selected: usize,
    pub history: Vec<LibraryPage>,
    pub loading: bool,
    pub filter: String,
    pub search_query: String,
    /// The load whose result the panel is waiting for
    awaiting: Option<LoadTicket>,
    last_ticket: u64,
}

impl LibraryState {
    /// Items shown, as (index into `items`, item). Fuzzy-filtered and ranked when a filter is set.
    pub fn visible(&self) -> Vec<(usize, &LibraryItem)> {
        if self.filter.is_empty() {
            return self.items.iter().enumerate().collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &LibraryItem)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let haystack = format!("{} {}", item.name, item.subtitle);
                matcher
                    .fuzzy_match(&haystack, &self.filter)
                    .map(|score| (score, i, item))
            })
            .collect();
        // Sort by score (descending), stable on original order
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, i, item)| (i, item)).collect()
    }

    pub fn selected_item(&self) -> Option<(usize, &LibraryItem)> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.selected = 0;
    }

    fn issue(&mut self, drill_down: bool) -> LoadTicket {
        self.last_ticket += 1;
        let ticket = LoadTicket {
            tab: self.tab,
            id: self.last_ticket,
            drill_down,
        };
        self.awaiting = Some(ticket);
        self.loading = true;
        ticket
    }

    /// Switch tab; the caller starts loading its contents with the returned ticket.
    pub fn switch_tab(&mut self, tab: LibraryTab) -> LoadTicket {
        self.tab = tab;
        self.title = None;
        self.items.clear();
        self.history.clear();
        self.filter.clear();
        self.selected = 0;
        let ticket = self.issue(false);
        self.loading = tab != LibraryTab::Search || !self.search_query.is_empty();
        ticket
    }

    /// Start opening the selected container as a nested list.
    pub fn begin_drill_down(&mut self) -> LoadTicket {
        self.issue(true)
    }

    /// Accept loaded items. Results for any ticket but the latest are dropped.
    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        title: Option<String>,
        items: Vec<LibraryItem>,
    ) -> bool {
        if self.awaiting != Some(ticket) {
            return false;
        }
        self.awaiting = None;
        self.loading = false;
        if ticket.drill_down {
            self.history.push(LibraryPage {
                title: self.title.take(),
                items: std::mem::take(&mut self.items),
                selected: self.selected,
            });
        } else {
            self.history.clear();
        }
        self.title = title;
        self.items = items;
        self.selected = 0;
        self.filter.clear();
        true
    }

    /// Leave a drill-down, or cancel one still loading. Returns false at the top of the tab.
    pub fn back(&mut self) -> bool {
        if self.awaiting.is_some_and(|t| t.drill_down) {
            self.awaiting = None;
            self.loading = false;
            return true;
        }
        match self.history.pop() {
            Some(page) => {
                self.title = page.title;
                self.items = page.items;
                self.selected = page.selected;
                self.filter.clear();
                true
            }
            None => false,
        }
    }
}
