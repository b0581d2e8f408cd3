/// Playback management
///
/// The controller simulates playback: it never touches audio, it only moves a
/// progress percentage forward on every tick and walks the playlist.
use crate::config::PlayerConfig;
use crate::models::{PlaybackState, Playlist, Track, TrackDuration, TrackId, VolumeLevel};
use std::collections::BTreeSet;

pub mod timer;
pub use timer::ProgressTimer;

const MAX_PROGRESS: f64 = 100.0;
const MAX_VOLUME: u8 = 100;

/// Result of a single progress tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Playback is paused; nothing moved
    Idle,
    Advanced,
    /// End reached with repeat on; progress restarted at 0
    Looped,
    /// End reached with repeat off; playback stopped at 100
    Finished,
}

/// Playback controller - owns the playlist and the simulated playback state
#[derive(Debug, Clone)]
pub struct PlaybackController {
    playlist: Playlist,
    current: Track,
    is_playing: bool,
    progress: f64,
    shuffle: bool,
    repeat: bool,
    volume: u8,
    unmute_volume: u8,
    step: f64,
    favorites: BTreeSet<TrackId>,
}

impl PlaybackController {
    /// Start paused on the first playlist entry with default settings
    pub fn new(playlist: Playlist) -> Self {
        Self::with_config(playlist, &PlayerConfig::default())
    }

    pub fn with_config(playlist: Playlist, config: &PlayerConfig) -> Self {
        let current = playlist.first().clone();
        Self {
            playlist,
            current,
            is_playing: false,
            progress: config.initial_progress.clamp(0.0, MAX_PROGRESS),
            shuffle: false,
            repeat: false,
            volume: config.initial_volume.min(MAX_VOLUME),
            unmute_volume: config.unmute_volume.min(MAX_VOLUME),
            step: config.progress_step,
            favorites: BTreeSet::new(),
        }
    }

    /// Seed the set of favorited tracks
    pub fn with_favorites(mut self, favorites: impl IntoIterator<Item = TrackId>) -> Self {
        self.favorites = favorites.into_iter().collect();
        self
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> &Track {
        &self.current
    }

    /// Index of the current track in the playlist, if it belongs to it
    pub fn current_index(&self) -> Option<usize> {
        self.playlist.position(self.current.id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn volume_level(&self) -> VolumeLevel {
        VolumeLevel::from_volume(self.volume)
    }

    pub fn is_favorite(&self) -> bool {
        self.favorites.contains(&self.current.id)
    }

    pub fn favorites(&self) -> &BTreeSet<TrackId> {
        &self.favorites
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
        tracing::debug!("Playback {}", if self.is_playing { "resumed" } else { "paused" });
    }

    /// Advance progress by one step.
    ///
    /// Ticking while already at 100 behaves like reaching the end.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }

        let next = (self.progress + self.step).min(MAX_PROGRESS);
        if next < MAX_PROGRESS {
            self.progress = next;
            return TickOutcome::Advanced;
        }

        if self.repeat {
            tracing::debug!("'{}' reached the end, repeating", self.current.title);
            self.progress = 0.0;
            TickOutcome::Looped
        } else {
            tracing::info!("'{}' finished", self.current.title);
            self.progress = MAX_PROGRESS;
            self.is_playing = false;
            TickOutcome::Finished
        }
    }

    /// Jump to `fraction` of the track; clamped to `[0, 1]`, NaN seeks to the start
    pub fn seek(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.progress = fraction * MAX_PROGRESS;
    }

    /// Move the playhead by `delta` percentage points
    pub fn seek_by(&mut self, delta: f64) {
        if delta.is_nan() {
            return;
        }
        self.progress = (self.progress + delta).clamp(0.0, MAX_PROGRESS);
    }

    /// Play the next playlist entry, wrapping to the first
    pub fn next(&mut self) -> &Track {
        let index = match self.current_index() {
            Some(i) if i + 1 < self.playlist.len() => i + 1,
            _ => 0,
        };
        self.start_at(index)
    }

    /// Play the previous playlist entry, wrapping to the last
    pub fn previous(&mut self) -> &Track {
        let index = match self.current_index() {
            Some(i) if i > 0 => i - 1,
            _ => self.playlist.len() - 1,
        };
        self.start_at(index)
    }

    fn start_at(&mut self, index: usize) -> &Track {
        let track = self.playlist.get(index).unwrap_or(self.playlist.first()).clone();
        self.select_track(track)
    }

    /// Make `track` current and start it from the beginning.
    ///
    /// The track does not have to belong to the playlist.
    pub fn select_track(&mut self, track: Track) -> &Track {
        tracing::info!("Now playing: {} - {} ({})", track.title, track.artist, track.id);
        self.current = track;
        self.progress = 0.0;
        self.is_playing = true;
        &self.current
    }

    /// Shuffle is a display flag only; traversal order is unchanged
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    /// Set volume, clamped to `[0, 100]`
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, MAX_VOLUME as i32) as u8;
    }

    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(self.volume as i32 + delta);
    }

    /// Mute, or restore the unmute volume when already muted
    pub fn toggle_mute(&mut self) {
        if self.volume == 0 {
            self.volume = self.unmute_volume;
        } else {
            self.volume = 0;
        }
    }

    pub fn toggle_favorite(&mut self) {
        let id = self.current.id;
        if !self.favorites.remove(&id) {
            self.favorites.insert(id);
        }
    }

    /// Elapsed time implied by progress and the current track's length
    pub fn elapsed(&self) -> TrackDuration {
        let total = self.current.duration.as_secs() as f64;
        TrackDuration::from_secs((self.progress / MAX_PROGRESS * total).floor() as u32)
    }

    pub fn elapsed_label(&self) -> String {
        self.elapsed().to_string()
    }

    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_track_id: self.current.id,
            is_playing: self.is_playing,
            progress: self.progress,
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume,
            favorite: self.is_favorite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pattern, Swatch};

    fn track(id: TrackId, title: &str) -> Track {
        Track::new(id, title, "Artist", None, "3:20", Swatch::Cream, Pattern::Circle).unwrap()
    }

    fn abc() -> PlaybackController {
        let playlist =
            Playlist::new("Test", vec![track(1, "A"), track(2, "B"), track(3, "C")]).unwrap();
        PlaybackController::new(playlist)
    }

    #[test]
    fn test_initial_state() {
        let controller = abc();
        assert_eq!(controller.current_track().title, "A");
        assert!(!controller.is_playing());
        assert_eq!(controller.progress(), 30.0);
        assert_eq!(controller.volume(), 70);
        assert!(!controller.shuffle());
        assert!(!controller.repeat());
    }

    #[test]
    fn test_play_pause_only_flips_flag() {
        let mut controller = abc();
        controller.play();
        assert!(controller.is_playing());
        assert_eq!(controller.progress(), 30.0);
        controller.toggle_play_pause();
        assert!(!controller.is_playing());
        controller.toggle_play_pause();
        assert!(controller.is_playing());
        controller.pause();
        assert!(!controller.is_playing());
        assert_eq!(controller.current_track().title, "A");
    }

    #[test]
    fn test_tick_is_idle_while_paused() {
        let mut controller = abc();
        assert_eq!(controller.tick(), TickOutcome::Idle);
        assert_eq!(controller.progress(), 30.0);
    }

    #[test]
    fn test_ticks_stop_exactly_at_end_without_repeat() {
        let mut controller = abc();
        controller.seek(0.0);
        controller.play();

        let mut last = controller.progress();
        let mut ticks = 0;
        while controller.is_playing() {
            let outcome = controller.tick();
            assert!(controller.progress() >= last, "progress went backwards");
            last = controller.progress();
            ticks += 1;
            assert!(ticks <= 1_100, "playback never finished");
            if outcome == TickOutcome::Finished {
                break;
            }
        }

        assert_eq!(controller.progress(), 100.0);
        assert!(!controller.is_playing());
        // roughly 1000 steps of 0.1, give or take float accumulation
        assert!((999..=1001).contains(&ticks), "took {ticks} ticks");
        assert_eq!(controller.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_ticks_loop_with_repeat() {
        let mut controller = abc();
        controller.toggle_repeat();
        controller.seek(0.99);
        controller.play();

        let mut last = controller.progress();
        let mut outcome = TickOutcome::Advanced;
        for _ in 0..20 {
            outcome = controller.tick();
            if outcome == TickOutcome::Looped {
                break;
            }
            assert!(controller.progress() >= last);
            last = controller.progress();
        }
        assert_eq!(outcome, TickOutcome::Looped);
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.is_playing());

        assert_eq!(controller.tick(), TickOutcome::Advanced);
        assert!(controller.progress() > 0.0);
    }

    #[test]
    fn test_tick_at_end_respects_repeat_when_resumed() {
        let mut controller = abc();
        controller.seek(1.0);
        controller.play();
        assert_eq!(controller.tick(), TickOutcome::Finished);
        assert_eq!(controller.progress(), 100.0);

        controller.toggle_repeat();
        controller.play();
        assert_eq!(controller.tick(), TickOutcome::Looped);
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn test_seek_sets_and_clamps() {
        let mut controller = abc();
        controller.seek(0.5);
        assert_eq!(controller.progress(), 50.0);
        controller.seek(-3.0);
        assert_eq!(controller.progress(), 0.0);
        controller.seek(7.0);
        assert_eq!(controller.progress(), 100.0);
        controller.seek(f64::NAN);
        assert_eq!(controller.progress(), 0.0);

        controller.seek(0.5);
        controller.seek_by(-60.0);
        assert_eq!(controller.progress(), 0.0);
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut controller = abc();
        controller.previous(); // A -> C
        assert_eq!(controller.current_track().title, "C");
        controller.pause();
        controller.seek(0.4);

        let next = controller.next().title.clone();
        assert_eq!(next, "A");
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.is_playing());
    }

    #[test]
    fn test_previous_wraps_from_first_to_last() {
        let mut controller = abc();
        assert_eq!(controller.previous().title, "C");
        assert_eq!(controller.previous().title, "B");
        assert_eq!(controller.next().title, "C");
    }

    #[test]
    fn test_navigation_from_track_outside_playlist() {
        let mut controller = abc();
        controller.select_track(track(99, "Elsewhere"));
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.next().title, "A");

        controller.select_track(track(99, "Elsewhere"));
        assert_eq!(controller.previous().title, "C");
    }

    #[test]
    fn test_select_track_restarts_playback() {
        let mut controller = abc();
        controller.select_track(track(2, "B"));
        assert_eq!(controller.current_index(), Some(1));
        assert_eq!(controller.progress(), 0.0);
        assert!(controller.is_playing());
    }

    #[test]
    fn test_shuffle_does_not_change_order() {
        let mut controller = abc();
        controller.toggle_shuffle();
        assert!(controller.shuffle());
        assert_eq!(controller.next().title, "B");
        assert_eq!(controller.next().title, "C");
        controller.toggle_shuffle();
        assert!(!controller.shuffle());
    }

    #[test]
    fn test_volume_clamps() {
        let mut controller = abc();
        controller.set_volume(-10);
        assert_eq!(controller.volume(), 0);
        assert_eq!(controller.volume_level(), VolumeLevel::Muted);
        controller.set_volume(150);
        assert_eq!(controller.volume(), 100);
        controller.set_volume(30);
        assert_eq!(controller.volume_level(), VolumeLevel::Low);
        controller.adjust_volume(-45);
        assert_eq!(controller.volume(), 0);
    }

    #[test]
    fn test_toggle_mute_restores_volume() {
        let mut controller = abc();
        controller.set_volume(40);
        controller.toggle_mute();
        assert_eq!(controller.volume(), 0);
        controller.toggle_mute();
        assert_eq!(controller.volume(), 70);
    }

    #[test]
    fn test_favorites_follow_current_track() {
        let mut controller = abc().with_favorites([2]);
        assert!(!controller.is_favorite());
        controller.toggle_favorite();
        assert!(controller.is_favorite());
        controller.next();
        assert!(controller.is_favorite());
        controller.toggle_favorite();
        assert!(!controller.is_favorite());
        assert_eq!(controller.favorites().iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_elapsed_label_uses_track_length() {
        let mut controller = abc();
        // 3:20 is 200 seconds
        controller.seek(0.3);
        assert_eq!(controller.elapsed_label(), "1:00");
        controller.seek(1.0);
        assert_eq!(controller.elapsed_label(), "3:20");
        controller.seek(0.0);
        assert_eq!(controller.elapsed_label(), "0:00");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut controller = abc();
        controller.toggle_repeat();
        controller.next();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.current_track_id, 2);
        assert!(snapshot.is_playing);
        assert!(snapshot.repeat);
        assert_eq!(snapshot.progress, 0.0);
        assert!(!snapshot.favorite);
    }
}
