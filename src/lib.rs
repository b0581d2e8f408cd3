/// JEDI Player - terminal music player mockup
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod playback;

#[cfg(feature = "cli")]
pub mod ui;

pub use app::{Action, App, Selection};
pub use catalog::Catalog;
pub use config::Config;
pub use error::{PlayerError, Result};
pub use models::{PlaybackState, Playlist, Track, TrackDuration, TrackId, VolumeLevel};
pub use navigation::{Navigator, Screen, View};
pub use playback::{PlaybackController, ProgressTimer, TickOutcome};
