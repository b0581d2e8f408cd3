/// Built-in sample catalog shown by the screens
///
/// Nothing here is global: `Catalog::sample()` builds a fresh catalog that the
/// caller owns and passes to the controller and views.
use crate::error::{PlayerError, Result};
use crate::models::{Pattern, Playlist, Swatch, Track, TrackId};
use serde::Serialize;

/// What a card stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Song,
    Album,
    Artist,
    Playlist,
    Genre,
    Category,
    Chart,
}

impl CardKind {
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Song => "Song",
            CardKind::Album => "Album",
            CardKind::Artist => "Artist",
            CardKind::Playlist => "Playlist",
            CardKind::Genre => "Genre",
            CardKind::Category => "Category",
            CardKind::Chart => "Chart",
        }
    }
}

/// A selectable tile that is not itself a track.
///
/// `lead` is the track that starts playing when the card is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub kind: CardKind,
    pub title: String,
    pub subtitle: String,
    pub swatch: Swatch,
    pub pattern: Pattern,
    pub lead: TrackId,
}

impl Card {
    fn new(
        kind: CardKind,
        title: &str,
        subtitle: &str,
        swatch: Swatch,
        pattern: Pattern,
        lead: TrackId,
    ) -> Self {
        Self {
            kind,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            swatch,
            pattern,
            lead,
        }
    }
}

/// Setting row with a fixed list of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub key: SettingKey,
    pub name: &'static str,
    pub options: Vec<&'static str>,
    pub current: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    AudioQuality,
    Equalizer,
    Crossfade,
    Theme,
    Language,
    Notifications,
}

impl Setting {
    fn new(key: SettingKey, name: &'static str, options: &[&'static str], current: &str) -> Self {
        let current = options.iter().position(|o| *o == current).unwrap_or(0);
        Self {
            key,
            name,
            options: options.to_vec(),
            current,
        }
    }

    pub fn value(&self) -> &'static str {
        self.options[self.current]
    }

    pub fn cycle_forward(&mut self) {
        self.current = (self.current + 1) % self.options.len();
    }

    pub fn cycle_backward(&mut self) {
        self.current = (self.current + self.options.len() - 1) % self.options.len();
    }

    pub fn select(&mut self, option: &str) -> bool {
        match self.options.iter().position(|o| *o == option) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }
}

/// Named group of settings ("Audio", "Appearance")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSection {
    pub title: &'static str,
    pub settings: Vec<Setting>,
}

/// Every piece of sample data the player displays
#[derive(Debug, Clone)]
pub struct Catalog {
    pub tracks: Vec<Track>,
    pub playlist: Playlist,
    pub genres: Vec<Card>,
    pub recently_played: Vec<TrackId>,
    pub made_for_you: Vec<TrackId>,
    pub categories: Vec<Card>,
    pub featured: Vec<Card>,
    pub top_charts: Vec<Card>,
    pub songs: Vec<TrackId>,
    pub albums: Vec<Card>,
    pub artists: Vec<Card>,
    pub favorites: Vec<TrackId>,
    pub recent_searches: Vec<String>,
    pub top_searches: Vec<Card>,
    pub settings: Vec<SettingsSection>,
    pub quick_actions: Vec<&'static str>,
}

impl Catalog {
    /// The lo-fi sample library the mockup ships with
    #[rustfmt::skip]
    pub fn sample() -> Result<Self> {
        use Pattern::*;
        use Swatch::*;

        let tracks = vec![
            Track::new(1, "Peaceful Melody", "Lo-Fi Beats", Some("Chill Collection"), "3:32", Mustard, Circle)?,
            Track::new(2, "Midnight Dreams", "Lo-Fi Beats", Some("Chill Collection"), "2:45", Sky, Waves)?,
            Track::new(3, "Rainy Day", "Lo-Fi Beats", Some("Chill Collection"), "4:12", Blush, Dots)?,
            Track::new(4, "Coffee Shop", "Lo-Fi Beats", Some("Chill Collection"), "3:05", Sky, Triangle)?,
            Track::new(5, "Study Session", "Lo-Fi Beats", Some("Chill Collection"), "5:18", Mustard, Square)?,
            Track::new(6, "Solitude", "Chillhop", Some("Ambient Sounds"), "2:45", Sky, Waves)?,
            Track::new(7, "Morning Coffee", "Easy Life", Some("Breakfast Tunes"), "4:12", Cream, Dots)?,
            Track::new(8, "Catagans", "Nature Sounds", None, "3:48", Blush, Triangle)?,
            Track::new(9, "Pregres", "Urban Beats", None, "2:56", Tangerine, Square)?,
            Track::new(10, "Cotton", "Ambient Flow", None, "4:05", Mustard, Zigzag)?,
            Track::new(11, "Urban Dreams", "City Sounds", Some("Metropolitan"), "3:18", Blush, Triangle)?,
            Track::new(12, "Sunset Drive", "Roadtrip", Some("Highway Collection"), "5:24", Tangerine, Square)?,
        ];

        let playlist_tracks = tracks.iter().filter(|t| t.id <= 5).cloned().collect();
        let playlist = Playlist::new("Lo-Fi Essentials", playlist_tracks)
            .ok_or_else(|| PlayerError::msg("sample playlist is empty"))?;

        let genres = vec![
            Card::new(CardKind::Genre, "Chill Hits", "Genre", Sky, Circle, 6),
            Card::new(CardKind::Genre, "LoFi Vibes", "Genre", Cream, Waves, 1),
            Card::new(CardKind::Genre, "Indie Rock", "Genre", Mustard, Triangle, 11),
            Card::new(CardKind::Genre, "Jazz", "Genre", Cream, Dots, 7),
        ];

        let categories = vec![
            Card::new(CardKind::Category, "New Releases", "Fresh this week", Mustard, Circle, 12),
            Card::new(CardKind::Category, "Podcasts", "Talk and stories", Sky, Waves, 8),
            Card::new(CardKind::Category, "Radio", "Non-stop stations", Blush, Dots, 9),
            Card::new(CardKind::Category, "Live Events", "Concert recordings", Cream, Star, 10),
        ];

        let featured = vec![
            Card::new(CardKind::Playlist, "Summer Vibes", "Perfect for sunny days", Mustard, Sun, 12),
            Card::new(CardKind::Playlist, "Focus Flow", "Concentration enhancing beats", Sky, Concentric, 5),
            Card::new(CardKind::Playlist, "Retro Wave", "80s inspired synth music", Blush, Grid, 11),
        ];

        let top_charts = vec![
            Card::new(CardKind::Chart, "Global Top 50", "50 tracks", Cream, Bars, 1),
            Card::new(CardKind::Chart, "Trending Now", "30 tracks", Cream, Arrow, 9),
            Card::new(CardKind::Chart, "Viral Hits", "25 tracks", Cream, Star, 6),
            Card::new(CardKind::Chart, "Indie Discoveries", "40 tracks", Cream, Diamond, 11),
        ];

        let albums = vec![
            Card::new(CardKind::Album, "Chill Collection", "Lo-Fi Beats · 12 tracks", Mustard, Circle, 1),
            Card::new(CardKind::Album, "Ambient Sounds", "Chillhop · 8 tracks", Sky, Waves, 6),
            Card::new(CardKind::Album, "Breakfast Tunes", "Easy Life · 10 tracks", Cream, Dots, 7),
        ];

        let artists = vec![
            Card::new(CardKind::Artist, "Lo-Fi Beats", "3 albums", Mustard, Circle, 1),
            Card::new(CardKind::Artist, "Chillhop", "2 albums", Sky, Waves, 6),
            Card::new(CardKind::Artist, "Easy Life", "1 album", Blush, Dots, 7),
        ];

        let top_searches = vec![
            Card::new(CardKind::Genre, "Chill Hits", "Browse", Sky, Circle, 6),
            Card::new(CardKind::Playlist, "Focus Flow", "Browse", Mustard, Concentric, 5),
            Card::new(CardKind::Genre, "Indie Rock", "Browse", Blush, Triangle, 11),
            Card::new(CardKind::Genre, "Jazz", "Browse", Cream, Waves, 7),
            Card::new(CardKind::Artist, "Easy Life", "Browse", Tangerine, Dots, 7),
            Card::new(CardKind::Genre, "Ambient", "Browse", Sky, Grid, 10),
        ];

        let settings = vec![
            SettingsSection {
                title: "Audio",
                settings: vec![
                    Setting::new(SettingKey::AudioQuality, "Audio Quality", &["Normal", "High", "Very High"], "High"),
                    Setting::new(SettingKey::Equalizer, "Equalizer", &["Flat", "Bass Boost", "Treble Boost", "Custom"], "Flat"),
                    Setting::new(SettingKey::Crossfade, "Crossfade", &["Off", "1s", "3s", "5s"], "3s"),
                ],
            },
            SettingsSection {
                title: "Appearance",
                settings: vec![
                    Setting::new(SettingKey::Theme, "Theme", &["Light", "Dark", "System"], "Light"),
                    Setting::new(SettingKey::Language, "Language", &["English", "Spanish", "French", "German"], "English"),
                    Setting::new(SettingKey::Notifications, "Notifications", &["All", "Important Only", "None"], "All"),
                ],
            },
        ];

        Ok(Self {
            tracks,
            playlist,
            genres,
            recently_played: vec![1, 6, 7],
            made_for_you: vec![8, 9, 10],
            categories,
            featured,
            top_charts,
            songs: vec![1, 6, 7, 11, 12],
            albums,
            artists,
            favorites: vec![1, 6, 7],
            recent_searches: ["Lo-Fi Beats", "Morning Coffee", "Jazz Classics", "Study Music"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            top_searches,
            settings,
            quick_actions: vec![
                "Offline Mode",
                "Clear Notifications",
                "Privacy Settings",
                "Help & Support",
            ],
        })
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Resolve a list of ids, skipping any that are not in the catalog
    pub fn tracks_for(&self, ids: &[TrackId]) -> Vec<&Track> {
        ids.iter().filter_map(|id| self.track(*id)).collect()
    }

    /// Case-insensitive substring match over tracks, albums, artists and playlists.
    ///
    /// Blank queries return nothing.
    pub fn search(&self, query: &str) -> Vec<Card> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let matches = |s: &str| s.to_lowercase().contains(&needle);

        let songs = self
            .tracks
            .iter()
            .filter(|t| matches(&t.title) || matches(&t.artist))
            .map(|t| Card {
                kind: CardKind::Song,
                title: t.title.clone(),
                subtitle: t.artist.clone(),
                swatch: t.swatch,
                pattern: t.pattern,
                lead: t.id,
            });

        let collections = self
            .artists
            .iter()
            .chain(&self.albums)
            .chain(&self.featured)
            .chain(&self.top_charts)
            .chain(&self.genres)
            .filter(|c| matches(&c.title))
            .cloned();

        let results: Vec<Card> = songs.chain(collections).collect();
        tracing::debug!("search '{}' matched {} results", query, results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_builds() {
        let catalog = Catalog::sample().unwrap();
        assert_eq!(catalog.playlist.len(), 5);
        assert_eq!(catalog.playlist.first().title, "Peaceful Melody");
        assert_eq!(catalog.playlist.first().duration.as_secs(), 212);
    }

    #[test]
    fn test_track_ids_unique() {
        let catalog = Catalog::sample().unwrap();
        let mut ids: Vec<TrackId> = catalog.tracks.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.tracks.len());
    }

    #[test]
    fn test_every_reference_resolves() {
        let catalog = Catalog::sample().unwrap();
        let id_lists = [
            &catalog.recently_played,
            &catalog.made_for_you,
            &catalog.songs,
            &catalog.favorites,
        ];
        for ids in id_lists {
            assert_eq!(catalog.tracks_for(ids).len(), ids.len());
        }

        let cards = catalog
            .genres
            .iter()
            .chain(&catalog.categories)
            .chain(&catalog.featured)
            .chain(&catalog.top_charts)
            .chain(&catalog.albums)
            .chain(&catalog.artists)
            .chain(&catalog.top_searches);
        for card in cards {
            assert!(catalog.track(card.lead).is_some(), "{} has no lead", card.title);
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::sample().unwrap();
        let results = catalog.search("  lo-fi BEATS ");

        assert!(results
            .iter()
            .any(|c| c.kind == CardKind::Song && c.title == "Peaceful Melody"));
        assert!(results
            .iter()
            .any(|c| c.kind == CardKind::Artist && c.title == "Lo-Fi Beats"));
    }

    #[test]
    fn test_search_blank_query() {
        let catalog = Catalog::sample().unwrap();
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("no such thing").is_empty());
    }

    #[test]
    fn test_setting_cycles_wrap() {
        let mut catalog = Catalog::sample().unwrap();
        let theme = &mut catalog.settings[1].settings[0];
        assert_eq!(theme.value(), "Light");
        theme.cycle_backward();
        assert_eq!(theme.value(), "System");
        theme.cycle_forward();
        theme.cycle_forward();
        assert_eq!(theme.value(), "Dark");
        assert!(theme.select("Light"));
        assert!(!theme.select("Neon"));
        assert_eq!(theme.value(), "Light");
    }
}
