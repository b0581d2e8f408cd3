/// UI page components
use crate::app::{App, LibraryTab};
use crate::catalog::{Card, Setting};
use crate::models::Track;
use crate::ui::components::{Disc, PlaybackBar, PlaybackControls, TrackInfo, VolumeBar};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Tabs};

/// List rows with section headers; only entries count towards the cursor
struct Rows<'a> {
    items: Vec<ListItem<'a>>,
    cursor: usize,
    entries: usize,
    selected_row: Option<usize>,
}

impl<'a> Rows<'a> {
    fn new(cursor: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor,
            entries: 0,
            selected_row: None,
        }
    }

    fn header(&mut self, text: &str, theme: &Theme) {
        if !self.items.is_empty() {
            self.items.push(ListItem::new(""));
        }
        self.items
            .push(ListItem::new(Line::from(Span::styled(text.to_string(), theme.title()))));
    }

    fn entry(&mut self, item: ListItem<'a>) {
        if self.entries == self.cursor {
            self.selected_row = Some(self.items.len());
        }
        self.items.push(item);
        self.entries += 1;
    }

    fn note(&mut self, text: &str, theme: &Theme) {
        self.items
            .push(ListItem::new(Line::from(Span::styled(text.to_string(), theme.dim()))));
    }

    fn render(self, f: &mut Frame, area: Rect, title: &str, theme: &Theme) {
        let list = List::new(self.items)
            .style(theme.base())
            .highlight_style(theme.highlight())
            .block(page_block(title, theme));

        let mut state = ListState::default();
        state.select(self.selected_row);

        f.render_stateful_widget(list, area, &mut state);
    }
}

fn page_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme.title()))
        .borders(Borders::NONE)
        .padding(Padding::horizontal(1))
        .style(theme.base())
}

fn track_row<'a>(track: &Track, theme: &Theme) -> ListItem<'a> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!(" {} ", track.pattern.glyph()),
            theme.base().bg(theme.swatch(track.swatch)),
        ),
        Span::raw(format!(" {}", track.title)),
        Span::styled(format!(" · {}", track.artist), theme.dim()),
        Span::styled(format!("  {}", track.duration), theme.dim()),
    ]))
}

fn card_row<'a>(card: &Card, theme: &Theme) -> ListItem<'a> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!(" {} ", card.pattern.glyph()),
            theme.base().bg(theme.swatch(card.swatch)),
        ),
        Span::raw(format!(" {}", card.title)),
        Span::styled(format!(" · {}", card.subtitle), theme.dim()),
    ]))
}

fn setting_row<'a>(setting: &Setting, theme: &Theme) -> ListItem<'a> {
    let mut spans = vec![Span::raw(format!("{:<16}", setting.name))];
    for (i, option) in setting.options.iter().enumerate() {
        if i == setting.current {
            spans.push(Span::styled(format!("({})", option), theme.toggle(true)));
        } else {
            spans.push(Span::styled(format!(" {} ", option), theme.dim()));
        }
        spans.push(Span::raw(" "));
    }
    ListItem::new(Line::from(spans))
}

pub struct HomePage<'a> {
    pub app: &'a App,
}

impl HomePage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let catalog = &self.app.catalog;
        let mut rows = Rows::new(self.app.selected);

        rows.header("Genres", theme);
        for genre in &catalog.genres {
            rows.entry(card_row(genre, theme));
        }
        rows.header("Recently played", theme);
        for track in catalog.tracks_for(&catalog.recently_played) {
            rows.entry(track_row(track, theme));
        }
        rows.header("Made for you", theme);
        for track in catalog.tracks_for(&catalog.made_for_you) {
            rows.entry(track_row(track, theme));
        }

        rows.render(f, area, "Home", theme);
    }
}

pub struct BrowsePage<'a> {
    pub app: &'a App,
}

impl BrowsePage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let catalog = &self.app.catalog;
        let mut rows = Rows::new(self.app.selected);

        rows.header("Categories", theme);
        for card in &catalog.categories {
            rows.entry(card_row(card, theme));
        }
        rows.header("Featured playlists", theme);
        for card in &catalog.featured {
            rows.entry(card_row(card, theme));
        }
        rows.header("Top charts", theme);
        for card in &catalog.top_charts {
            rows.entry(card_row(card, theme));
        }

        rows.render(f, area, "Browse", theme);
    }
}

pub struct LibraryPage<'a> {
    pub app: &'a App,
}

impl LibraryPage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let titles: Vec<&str> = LibraryTab::ALL.iter().map(|t| t.name()).collect();
        let selected = LibraryTab::ALL
            .iter()
            .position(|t| *t == self.app.library_tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme.base())
            .highlight_style(theme.toggle(true))
            .divider("│")
            .block(Block::default().padding(Padding::horizontal(1)).style(theme.base()));
        f.render_widget(tabs, chunks[0]);

        let catalog = &self.app.catalog;
        let mut rows = Rows::new(self.app.selected);
        match self.app.library_tab {
            LibraryTab::Songs => {
                for track in catalog.tracks_for(&catalog.songs) {
                    rows.entry(track_row(track, theme));
                }
            }
            LibraryTab::Albums => {
                for card in &catalog.albums {
                    rows.entry(card_row(card, theme));
                }
            }
            LibraryTab::Artists => {
                for card in &catalog.artists {
                    rows.entry(card_row(card, theme));
                }
            }
            LibraryTab::Favorites => {
                let favorites = self.app.favorite_tracks();
                if favorites.is_empty() {
                    rows.note("No favorites yet, press f on a playing track", theme);
                }
                for track in favorites {
                    rows.entry(track_row(track, theme));
                }
            }
        }

        rows.render(f, chunks[1], "Library  (←/→ switch tab)", theme);
    }
}

pub struct SearchPage<'a> {
    pub app: &'a App,
}

impl SearchPage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let search = &self.app.search;
        let input = if search.editing {
            Line::from(vec![
                Span::raw(search.query.clone()),
                Span::styled("▏", theme.toggle(true)),
            ])
        } else if search.query.is_empty() {
            Line::from(Span::styled("Press / to search artists, songs, albums", theme.dim()))
        } else {
            Line::from(search.query.clone())
        };
        let input = Paragraph::new(input).style(theme.base()).block(
            Block::default()
                .title(" ⌕ Search ")
                .borders(Borders::ALL)
                .border_style(theme.toggle(search.editing)),
        );
        f.render_widget(input, chunks[0]);

        let mut rows = Rows::new(self.app.selected);
        match &search.submitted {
            Some(query) => {
                rows.header(&format!("Results for \"{}\"", query), theme);
                if search.results.is_empty() {
                    rows.note("Nothing matched", theme);
                }
                for card in &search.results {
                    let mut card = card.clone();
                    card.subtitle = format!("{} · {}", card.kind.label(), card.subtitle);
                    rows.entry(card_row(&card, theme));
                }
            }
            None => {
                rows.header("Recent searches", theme);
                for query in &self.app.catalog.recent_searches {
                    rows.entry(ListItem::new(format!("↺ {}", query)));
                }
                rows.header("Browse all", theme);
                for card in &self.app.catalog.top_searches {
                    rows.entry(ListItem::new(Line::from(vec![
                        Span::styled(
                            format!(" {} ", card.pattern.glyph()),
                            theme.base().bg(theme.swatch(card.swatch)),
                        ),
                        Span::raw(format!(" {}", card.title)),
                    ])));
                }
            }
        }

        rows.render(f, chunks[1], "", theme);
    }
}

pub struct SettingsPage<'a> {
    pub app: &'a App,
}

impl SettingsPage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut rows = Rows::new(self.app.selected);

        for section in &self.app.settings {
            rows.header(section.title, theme);
            for setting in &section.settings {
                rows.entry(setting_row(setting, theme));
            }
        }

        rows.header("Quick Actions", theme);
        for action in &self.app.catalog.quick_actions {
            rows.note(&format!("  {}", action), theme);
        }
        rows.note("  Sign Out", theme);

        rows.render(f, area, "Settings  (←/→ or enter to change)", theme);
    }
}

pub struct PlaylistPage<'a> {
    pub app: &'a App,
}

impl PlaylistPage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let controller = &self.app.controller;
        let current = controller.current_index();
        let mut rows = Rows::new(self.app.selected);

        rows.header(&format!("{:<4}{:<24}{:<18}{:>5}", "#", "TITLE", "ARTIST", "⏱"), theme);
        for (index, track) in controller.playlist().tracks().iter().enumerate() {
            let active = current == Some(index);
            let marker = if active && controller.is_playing() {
                "▂▅▇".to_string()
            } else {
                (index + 1).to_string()
            };
            let style = if active { theme.toggle(true) } else { theme.base() };
            rows.entry(ListItem::new(Line::from(vec![
                Span::styled(format!("{:<4}", marker), style),
                Span::styled(format!("{:<24}", track.title), style),
                Span::styled(format!("{:<18}", track.artist), theme.dim()),
                Span::styled(format!("{:>5}", track.duration.to_string()), style),
            ])));
        }

        let title = format!("Playlist · {}  (esc to close)", controller.playlist().name);
        rows.render(f, area, &title, theme);
    }
}

pub struct PlayerPage<'a> {
    pub app: &'a App,
}

impl PlayerPage<'_> {
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let controller = &self.app.controller;
        let track = controller.current_track();

        let block = page_block("Now Playing  (esc to close)", theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let disc_area = centered(chunks[0], 17);
        Disc {
            frame: self.app.disc_frame,
            playing: controller.is_playing(),
            swatch: track.swatch,
        }
        .render(f, disc_area, theme);

        TrackInfo {
            title: track.title.clone(),
            artist: track.artist.clone(),
            pattern: track.pattern,
            swatch: track.swatch,
            favorite: controller.is_favorite(),
        }
        .render(f, chunks[2], theme);

        PlaybackBar {
            progress: controller.progress(),
            elapsed: controller.elapsed_label(),
            total: track.duration.to_string(),
        }
        .render(f, chunks[4], theme);

        PlaybackControls {
            playing: controller.is_playing(),
            shuffle: controller.shuffle(),
            repeat: controller.repeat(),
        }
        .render(f, chunks[6], theme);

        VolumeBar {
            volume: controller.volume(),
            level: controller.volume_level(),
        }
        .render(f, centered(chunks[8], 40), theme);
    }
}

/// A horizontally centered slice of `area`, at most `width` wide
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 7);
        let c = centered(area, 16);
        assert_eq!(c, Rect::new(12, 0, 16, 7));
        assert_eq!(centered(area, 60), area);
    }

    #[test]
    fn test_rows_skip_headers_for_cursor() {
        let theme = Theme::default();
        let mut rows = Rows::new(2);
        rows.header("A", &theme);
        rows.entry(ListItem::new("a1"));
        rows.entry(ListItem::new("a2"));
        rows.header("B", &theme);
        rows.entry(ListItem::new("b1"));

        // "A", a1, a2, blank, "B", b1
        assert_eq!(rows.selected_row, Some(5));
        assert_eq!(rows.entries, 3);
    }
}
