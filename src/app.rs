/// Application state shared by every screen
///
/// Views never mutate anything themselves: key presses become [`Action`]s,
/// and choosing an item yields a [`Selection`] that is handed to the playback
/// controller.
use crate::catalog::{Card, Catalog, SettingKey, SettingsSection};
use crate::config::Config;
use crate::models::{Track, TrackId};
use crate::navigation::{Navigator, Screen, View};
use crate::playback::{PlaybackController, TickOutcome};

/// Volume change for one key press
pub const VOLUME_STEP: i32 = 5;
/// Seek distance for one key press, in percentage points
pub const SEEK_STEP: f64 = 5.0;

/// User intent, independent of the terminal backend
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    GoTo(Screen),
    NextScreen,
    PreviousScreen,
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    TogglePlay,
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFavorite,
    OpenPlayer,
    TogglePlaylist,
    StartSearch,
    SubmitSearch,
    SearchInput(char),
    SearchBackspace,
}

/// Something a view hands back when an item is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Track(Track),
    Card(Card),
    Query(String),
    Setting { section: usize, setting: usize },
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryTab {
    Songs,
    Albums,
    Artists,
    Favorites,
}

impl LibraryTab {
    pub const ALL: [LibraryTab; 4] = [
        LibraryTab::Songs,
        LibraryTab::Albums,
        LibraryTab::Artists,
        LibraryTab::Favorites,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LibraryTab::Songs => "Songs",
            LibraryTab::Albums => "Albums",
            LibraryTab::Artists => "Artists",
            LibraryTab::Favorites => "Favorites",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn shifted(&self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = if forward {
            (self.index() + 1) % len
        } else {
            (self.index() + len - 1) % len
        };
        Self::ALL[index]
    }
}

/// Query being typed and the results of the last submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub editing: bool,
    pub submitted: Option<String>,
    pub results: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

fn card_entries(cards: &[Card]) -> Vec<Entry<'_>> {
    cards.iter().map(Entry::Card).collect()
}

/// One selectable row of the current view
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<'a> {
    Track(&'a Track),
    Card(&'a Card),
    Query(&'a str),
    Setting { section: usize, setting: usize },
}

pub struct App {
    pub catalog: Catalog,
    pub controller: PlaybackController,
    pub nav: Navigator,
    pub library_tab: LibraryTab,
    pub search: SearchState,
    pub settings: Vec<SettingsSection>,
    pub selected: usize,
    /// Rotation frame of the disc, advanced while playing
    pub disc_frame: usize,
    configured_theme: ThemeMode,
    pub exit: bool,
}

impl App {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let controller = PlaybackController::with_config(catalog.playlist.clone(), &config.player)
            .with_favorites(catalog.favorites.iter().copied());
        let settings = catalog.settings.clone();
        let mut app = Self {
            catalog,
            controller,
            nav: Navigator::new(),
            library_tab: LibraryTab::Songs,
            search: SearchState::default(),
            settings,
            selected: 0,
            disc_frame: 0,
            configured_theme: ThemeMode::from_name(&config.general.theme),
            exit: false,
        };
        if app.configured_theme == ThemeMode::Dark {
            app.set_setting_value(SettingKey::Theme, "Dark");
        }
        app
    }

    pub fn view(&self) -> View {
        self.nav.view()
    }

    /// Theme chosen on the settings screen; "System" follows the config file
    pub fn theme_mode(&self) -> ThemeMode {
        match self.setting_value(SettingKey::Theme) {
            Some("Dark") => ThemeMode::Dark,
            Some("Light") => ThemeMode::Light,
            _ => self.configured_theme,
        }
    }

    pub fn setting_value(&self, key: SettingKey) -> Option<&'static str> {
        self.settings
            .iter()
            .flat_map(|section| &section.settings)
            .find(|s| s.key == key)
            .map(|s| s.value())
    }

    fn set_setting_value(&mut self, key: SettingKey, value: &str) {
        if let Some(setting) = self
            .settings
            .iter_mut()
            .flat_map(|section| &mut section.settings)
            .find(|s| s.key == key)
        {
            setting.select(value);
        }
    }

    /// Tracks listed on the library favorites tab, in catalog order
    pub fn favorite_tracks(&self) -> Vec<&Track> {
        let favorites = self.controller.favorites();
        self.catalog
            .tracks
            .iter()
            .filter(|t| favorites.contains(&t.id))
            .collect()
    }

    fn track_entries(&self, ids: &[TrackId]) -> Vec<Entry<'_>> {
        self.catalog.tracks_for(ids).into_iter().map(Entry::Track).collect()
    }

    /// Selectable rows of the current view, top to bottom
    pub fn entries(&self) -> Vec<Entry<'_>> {
        match self.view() {
            View::Player => Vec::new(),
            View::Playlist | View::Screen(Screen::Playlist) => {
                self.controller.playlist().tracks().iter().map(Entry::Track).collect()
            }
            View::Screen(Screen::Home) => {
                let mut entries = card_entries(&self.catalog.genres);
                entries.extend(self.track_entries(&self.catalog.recently_played));
                entries.extend(self.track_entries(&self.catalog.made_for_you));
                entries
            }
            View::Screen(Screen::Browse) => {
                let mut entries = card_entries(&self.catalog.categories);
                entries.extend(card_entries(&self.catalog.featured));
                entries.extend(card_entries(&self.catalog.top_charts));
                entries
            }
            View::Screen(Screen::Library) => match self.library_tab {
                LibraryTab::Songs => self.track_entries(&self.catalog.songs),
                LibraryTab::Albums => card_entries(&self.catalog.albums),
                LibraryTab::Artists => card_entries(&self.catalog.artists),
                LibraryTab::Favorites => self.favorite_tracks().into_iter().map(Entry::Track).collect(),
            },
            View::Screen(Screen::Search) => match self.search.submitted {
                Some(_) => card_entries(&self.search.results),
                None => {
                    let mut entries: Vec<Entry<'_>> = self
                        .catalog
                        .recent_searches
                        .iter()
                        .map(|q| Entry::Query(q.as_str()))
                        .collect();
                    entries.extend(
                        self.catalog
                            .top_searches
                            .iter()
                            .map(|c| Entry::Query(c.title.as_str())),
                    );
                    entries
                }
            },
            View::Screen(Screen::Settings) => self
                .settings
                .iter()
                .enumerate()
                .flat_map(|(section, s)| {
                    (0..s.settings.len()).map(move |setting| Entry::Setting { section, setting })
                })
                .collect(),
        }
    }

    /// The row under the cursor as an owned selection
    pub fn current_selection(&self) -> Selection {
        match self.entries().get(self.selected) {
            Some(Entry::Track(track)) => Selection::Track((*track).clone()),
            Some(Entry::Card(card)) => Selection::Card((*card).clone()),
            Some(Entry::Query(query)) => Selection::Query(query.to_string()),
            Some(Entry::Setting { section, setting }) => Selection::Setting {
                section: *section,
                setting: *setting,
            },
            None => Selection::Nothing,
        }
    }

    /// Apply one action; returns true when the view changed
    pub fn apply(&mut self, action: Action) -> bool {
        let before = self.view();
        let tab_before = self.library_tab;
        let submitted_before = self.search.submitted.clone();

        match action {
            Action::Quit => self.exit = true,
            Action::GoTo(screen) => self.nav.go_to(screen),
            Action::NextScreen => self.nav.next_screen(),
            Action::PreviousScreen => self.nav.previous_screen(),
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => {
                let len = self.entries().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            Action::Left => self.horizontal(false),
            Action::Right => self.horizontal(true),
            Action::Select => {
                let selection = self.current_selection();
                self.on_select(selection);
            }
            Action::Back => {
                if self.search.editing {
                    self.search.editing = false;
                } else if !self.nav.close_overlay() && self.search.submitted.is_some() {
                    self.search.submitted = None;
                    self.search.results.clear();
                }
            }
            Action::TogglePlay => self.controller.toggle_play_pause(),
            Action::Next => {
                self.controller.next();
            }
            Action::Previous => {
                self.controller.previous();
            }
            Action::ToggleShuffle => self.controller.toggle_shuffle(),
            Action::ToggleRepeat => self.controller.toggle_repeat(),
            Action::VolumeUp => self.controller.adjust_volume(VOLUME_STEP),
            Action::VolumeDown => self.controller.adjust_volume(-VOLUME_STEP),
            Action::ToggleMute => self.controller.toggle_mute(),
            Action::ToggleFavorite => self.controller.toggle_favorite(),
            Action::OpenPlayer => self.nav.open_player(),
            Action::TogglePlaylist => self.nav.toggle_playlist(),
            Action::StartSearch => {
                self.nav.go_to(Screen::Search);
                self.search.editing = true;
            }
            Action::SubmitSearch => self.submit_search(),
            Action::SearchInput(c) => self.search.query.push(c),
            Action::SearchBackspace => {
                self.search.query.pop();
            }
        }

        let changed = self.view() != before
            || self.library_tab != tab_before
            || self.search.submitted != submitted_before;
        if changed {
            self.selected = 0;
        } else {
            // rows can disappear under the cursor, e.g. unfavoriting the last one
            self.selected = self.selected.min(self.entries().len().saturating_sub(1));
        }
        changed
    }

    /// Advance the simulated playback by one timer period
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.controller.tick();
        if self.controller.is_playing() {
            self.disc_frame = self.disc_frame.wrapping_add(1);
        }
        outcome
    }

    /// Hand a selection back to the controller.
    ///
    /// Tracks and cards start playback and open the player, queries run a
    /// search and settings cycle to their next option.
    pub fn on_select(&mut self, selection: Selection) {
        match selection {
            Selection::Track(track) => {
                self.controller.select_track(track);
                self.nav.open_player();
            }
            Selection::Card(card) => match self.catalog.track(card.lead).cloned() {
                Some(track) => {
                    tracing::debug!("{} '{}' starts '{}'", card.kind.label(), card.title, track.title);
                    self.controller.select_track(track);
                    self.nav.open_player();
                }
                None => tracing::warn!("'{}' has no playable lead track", card.title),
            },
            Selection::Query(query) => {
                self.search.query = query;
                self.submit_search();
            }
            Selection::Setting { section, setting } => {
                if let Some(s) = self
                    .settings
                    .get_mut(section)
                    .and_then(|sec| sec.settings.get_mut(setting))
                {
                    s.cycle_forward();
                    tracing::info!("{} set to {}", s.name, s.value());
                }
            }
            Selection::Nothing => {}
        }
    }

    /// Run the typed query; blank queries are ignored
    pub fn submit_search(&mut self) {
        self.search.editing = false;
        if self.search.query.trim().is_empty() {
            return;
        }
        self.search.results = self.catalog.search(&self.search.query);
        self.search.submitted = Some(self.search.query.clone());
        self.selected = 0;
    }

    fn horizontal(&mut self, forward: bool) {
        match self.view() {
            View::Player => {
                let delta = if forward { SEEK_STEP } else { -SEEK_STEP };
                self.controller.seek_by(delta);
            }
            View::Screen(Screen::Library) => self.library_tab = self.library_tab.shifted(forward),
            View::Screen(Screen::Settings) => {
                if let Selection::Setting { section, setting } = self.current_selection() {
                    let s = &mut self.settings[section].settings[setting];
                    if forward {
                        s.cycle_forward();
                    } else {
                        s.cycle_backward();
                    }
                }
            }
            _ => {}
        }
    }
}
