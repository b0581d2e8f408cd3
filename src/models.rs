/// Data models for tracks, playlists and playback state
use crate::error::PlayerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a track, unique across the catalog
pub type TrackId = u32;

/// Track length in whole seconds, written as `M:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackDuration {
    seconds: u32,
}

impl TrackDuration {
    pub const fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn as_secs(&self) -> u32 {
        self.seconds
    }
}

impl FromStr for TrackDuration {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlayerError::InvalidDuration(s.to_string());
        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if seconds.len() != 2 || !digits(minutes) || !digits(seconds) {
            return Err(invalid());
        }
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
        if seconds > 59 {
            return Err(invalid());
        }
        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(invalid)?;
        Ok(Self::from_secs(total))
    }
}

impl TryFrom<String> for TrackDuration {
    type Error = PlayerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackDuration> for String {
    fn from(value: TrackDuration) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// Background colour tag of a card or cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    Cream,
    Mustard,
    Sky,
    Blush,
    Tangerine,
}

/// Cover-art motif of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Circle,
    Waves,
    Dots,
    Triangle,
    Square,
    Zigzag,
    Sun,
    Concentric,
    Grid,
    Bars,
    Arrow,
    Star,
    Diamond,
}

impl Pattern {
    /// Short glyph used to draw the pattern in a single terminal cell
    pub fn glyph(&self) -> &'static str {
        match self {
            Pattern::Circle => "◯",
            Pattern::Waves => "≈",
            Pattern::Dots => "⁘",
            Pattern::Triangle => "△",
            Pattern::Square => "□",
            Pattern::Zigzag => "⩘",
            Pattern::Sun => "☼",
            Pattern::Concentric => "◎",
            Pattern::Grid => "▦",
            Pattern::Bars => "▮",
            Pattern::Arrow => "↗",
            Pattern::Star => "☆",
            Pattern::Diamond => "◇",
        }
    }
}

/// Track record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: TrackDuration,
    pub swatch: Swatch,
    pub pattern: Pattern,
}

impl Track {
    /// Build a track from sample data; fails only on a malformed duration
    pub fn new(
        id: TrackId,
        title: &str,
        artist: &str,
        album: Option<&str>,
        duration: &str,
        swatch: Swatch,
        pattern: Pattern,
    ) -> Result<Self, PlayerError> {
        Ok(Self {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.map(str::to_string),
            duration: duration.parse()?,
            swatch,
            pattern,
        })
    }
}

/// Ordered, non-empty list of tracks the controller traverses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    tracks: Vec<Track>,
}

impl Playlist {
    /// Returns `None` when `tracks` is empty; a playlist always has a first track.
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Option<Self> {
        if tracks.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            tracks,
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Icon state derived from the volume level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeLevel {
    pub fn from_volume(volume: u8) -> Self {
        match volume {
            0 => VolumeLevel::Muted,
            1..=49 => VolumeLevel::Low,
            _ => VolumeLevel::High,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            VolumeLevel::Muted => "🔇",
            VolumeLevel::Low => "🔉",
            VolumeLevel::High => "🔊",
        }
    }
}

/// Snapshot of the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_track_id: TrackId,
    pub is_playing: bool,
    /// Percentage in `[0, 100]`
    pub progress: f64,
    pub shuffle: bool,
    pub repeat: bool,
    /// Percentage in `[0, 100]`
    pub volume: u8,
    pub favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_parse_and_display() {
        let d: TrackDuration = "3:32".parse().unwrap();
        assert_eq!(d.as_secs(), 212);
        assert_eq!(d.to_string(), "3:32");
        assert_eq!(TrackDuration::from_secs(65).to_string(), "1:05");
    }

    #[test]
    fn test_duration_rejects_malformed() {
        for bad in [
            "332", "3:5", "3:60", "a:10", "3:xx", "", "+3:32", "3:+5", ":32", "99999999:00",
        ] {
            assert!(bad.parse::<TrackDuration>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_playlist_requires_tracks() {
        assert!(Playlist::new("Empty", Vec::new()).is_none());
    }

    #[test]
    fn test_volume_level_thresholds() {
        assert_eq!(VolumeLevel::from_volume(0), VolumeLevel::Muted);
        assert_eq!(VolumeLevel::from_volume(1), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_volume(49), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_volume(50), VolumeLevel::High);
        assert_eq!(VolumeLevel::from_volume(100), VolumeLevel::High);
    }

    #[test]
    fn test_track_serializes_duration_as_string() {
        let track = Track::new(1, "A", "B", None, "2:45", Swatch::Sky, Pattern::Waves).unwrap();
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["duration"], "2:45");
        assert_eq!(json["swatch"], "sky");
    }
}
