/// Screen navigation state
use serde::Serialize;
use std::fmt;

/// Top-level screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    Home,
    Browse,
    Library,
    Search,
    Playlist,
    Settings,
}

impl Screen {
    /// Upper sidebar group
    pub const MAIN: [Screen; 4] = [Screen::Home, Screen::Browse, Screen::Library, Screen::Search];
    /// Lower sidebar group, below the divider
    pub const BOTTOM: [Screen; 2] = [Screen::Playlist, Screen::Settings];
    /// Sidebar order
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Browse,
        Screen::Library,
        Screen::Search,
        Screen::Playlist,
        Screen::Settings,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Browse => "Browse",
            Screen::Library => "Library",
            Screen::Search => "Search",
            Screen::Playlist => "Playlist",
            Screen::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Screen::Home => "⌂",
            Screen::Browse => "▤",
            Screen::Library => "▥",
            Screen::Search => "⌕",
            Screen::Playlist => "≡",
            Screen::Settings => "⚙",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the main pane currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Player,
    Playlist,
    Screen(Screen),
}

/// Active screen plus the player and playlist overlays.
///
/// The player overlay takes precedence over the playlist overlay, which takes
/// precedence over the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    active: Screen,
    show_player: bool,
    show_playlist: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            active: Screen::Home,
            show_player: false,
            show_playlist: false,
        }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_playlist_open(&self) -> bool {
        self.show_playlist
    }

    pub fn view(&self) -> View {
        if self.show_player {
            View::Player
        } else if self.show_playlist {
            View::Playlist
        } else {
            View::Screen(self.active)
        }
    }

    /// Select a sidebar entry.
    ///
    /// Main screens close both overlays; `Playlist` opens the playlist overlay.
    pub fn go_to(&mut self, screen: Screen) {
        tracing::debug!("Navigating to {}", screen);
        self.active = screen;
        self.show_player = false;
        self.show_playlist = screen == Screen::Playlist;
    }

    pub fn next_screen(&mut self) {
        let index = (self.active.index() + 1) % Screen::ALL.len();
        self.go_to(Screen::ALL[index]);
    }

    pub fn previous_screen(&mut self) {
        let len = Screen::ALL.len();
        let index = (self.active.index() + len - 1) % len;
        self.go_to(Screen::ALL[index]);
    }

    pub fn open_player(&mut self) {
        self.show_player = true;
    }

    pub fn close_player(&mut self) {
        self.show_player = false;
    }

    pub fn toggle_playlist(&mut self) {
        self.show_playlist = !self.show_playlist;
        if self.show_playlist {
            self.show_player = false;
        }
    }

    pub fn close_playlist(&mut self) {
        self.show_playlist = false;
    }

    /// Close the topmost overlay; returns false when none was open
    pub fn close_overlay(&mut self) -> bool {
        if self.show_player {
            self.show_player = false;
            true
        } else if self.show_playlist {
            self.show_playlist = false;
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_home() {
        let nav = Navigator::new();
        assert_eq!(nav.view(), View::Screen(Screen::Home));
    }

    #[test]
    fn test_overlay_precedence() {
        let mut nav = Navigator::new();
        nav.go_to(Screen::Library);
        nav.toggle_playlist();
        assert_eq!(nav.view(), View::Playlist);
        nav.open_player();
        assert_eq!(nav.view(), View::Player);
        nav.close_player();
        assert_eq!(nav.view(), View::Playlist);
        nav.close_playlist();
        assert_eq!(nav.view(), View::Screen(Screen::Library));
    }

    #[test]
    fn test_main_screens_clear_overlays() {
        let mut nav = Navigator::new();
        nav.go_to(Screen::Playlist);
        assert_eq!(nav.view(), View::Playlist);
        nav.open_player();
        nav.go_to(Screen::Search);
        assert_eq!(nav.view(), View::Screen(Screen::Search));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut nav = Navigator::new();
        nav.previous_screen();
        assert_eq!(nav.active(), Screen::Settings);
        nav.next_screen();
        assert_eq!(nav.active(), Screen::Home);
        for _ in 0..4 {
            nav.next_screen();
        }
        assert_eq!(nav.active(), Screen::Playlist);
        assert!(nav.is_playlist_open());
    }

    #[test]
    fn test_close_overlay_order() {
        let mut nav = Navigator::new();
        nav.toggle_playlist();
        nav.open_player();
        assert!(nav.close_overlay());
        assert!(nav.is_playlist_open());
        assert!(nav.close_overlay());
        assert!(!nav.close_overlay());
    }

    #[test]
    fn test_menu_groups_cover_all_screens() {
        let grouped: Vec<Screen> = Screen::MAIN.iter().chain(&Screen::BOTTOM).copied().collect();
        assert_eq!(grouped, Screen::ALL.to_vec());
    }
}
