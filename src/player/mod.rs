//! The ambient playlist player.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 PlaylistPlayer (Main Thread)                    │
//! │   Owns transport + view state, drives one audio handle          │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ AudioHandle trait
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                CpalAudio (commands via channel)                 │
//! │   Decodes with symphonia, outputs via cpal, reports events      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller never blocks: loading and playback happen on the audio
//! thread, and everything the controller learns about them arrives as
//! [`AudioEvent`]s drained on [`PlaylistPlayer::tick`]. Every source swap
//! carries a generation number; events tagged with an older generation
//! are discarded, so a rapid next/next sequence settles on the last
//! request without ever acting on the superseded one.

mod audio;
mod decoder;
mod playlist;
mod state;
mod visualization;

pub use audio::CpalAudio;
pub use decoder::{DecodedChunk, TrackDecoder};
pub use playlist::Playlist;
pub use state::{
    AudioCommand, AudioEvent, Panel, PlaybackPhase, PlaybackState, ViewMode, ViewState,
    format_duration,
};
pub use visualization::{BAR_COUNT, LevelBars};

use std::path::Path;
use std::time::Duration;

use crate::model::Track;

/// The audio-output contract the player drives.
///
/// One handle is owned per player instance and only the player mutates
/// it. Notifications come back through [`AudioHandle::poll`] rather than
/// callbacks, which keeps the controller single-threaded and testable
/// with a scripted mock.
pub trait AudioHandle: Send {
    /// Swap in a new source. Non-blocking; completion arrives as
    /// [`AudioEvent::Loaded`] or [`AudioEvent::LoadFailed`] tagged with
    /// the same generation.
    fn load(&mut self, source: &Path, generation: u64);

    /// Start or resume playback of the mounted source.
    ///
    /// Rejection is non-fatal: the player surfaces the message and stays
    /// paused.
    fn play(&mut self) -> Result<(), PlayerError>;

    /// Pause playback immediately.
    fn pause(&mut self);

    /// Move the playback position.
    fn seek(&mut self, position: Duration);

    /// Set the output volume (already clamped to 0.0 - 1.0).
    fn set_volume(&mut self, volume: f32);

    /// Drain pending notifications.
    fn poll(&mut self) -> Vec<AudioEvent>;

    /// Stop playback and release the output. Must be idempotent; called
    /// on drop.
    fn shutdown(&mut self);
}

/// The ambient playlist player controller.
///
/// Owns the playlist position, the transport state, the floating
/// widget's view state, and a dismissible error message. All state
/// transitions are synchronous; the audio handle does the waiting.
pub struct PlaylistPlayer {
    playlist: Playlist,
    handle: Box<dyn AudioHandle>,
    state: PlaybackState,
    view: ViewState,
    error: Option<String>,
    generation: u64,
}

impl PlaylistPlayer {
    /// Create a player over a non-empty track list and start loading the
    /// first track (without starting playback).
    pub fn new(
        tracks: Vec<Track>,
        handle: Box<dyn AudioHandle>,
        volume: f32,
    ) -> Result<Self, PlayerError> {
        let playlist = Playlist::new(tracks)?;
        let mut player = Self {
            playlist,
            handle,
            state: PlaybackState {
                volume: volume.clamp(0.0, 1.0),
                ..PlaybackState::default()
            },
            view: ViewState::default(),
            error: None,
            generation: 0,
        };
        player.handle.set_volume(player.state.volume);
        player.mount_current();
        Ok(player)
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    /// Toggle between playing and paused.
    ///
    /// While a source swap is in flight this only flips the intent; the
    /// actual play request is issued when the swap completes. After a
    /// failed load it retries the load.
    pub fn toggle_play_pause(&mut self) {
        if self.state.playing {
            self.handle.pause();
            self.state.playing = false;
            return;
        }

        match self.state.phase {
            PlaybackPhase::Loading => {
                self.state.playing = true;
            }
            PlaybackPhase::Idle => {
                // Last load failed; retry it with play intent set
                self.state.playing = true;
                self.mount_current();
            }
            PlaybackPhase::Ready => self.request_play(),
        }
    }

    /// Skip to the next track, wrapping at the end of the playlist.
    pub fn next(&mut self) {
        self.playlist.advance();
        self.mount_current();
    }

    /// Skip to the previous track, wrapping at the start.
    pub fn prev(&mut self) {
        self.playlist.retreat();
        self.mount_current();
    }

    /// Jump directly to a playlist index. Out-of-range indices and the
    /// current index are no-ops.
    pub fn select_track(&mut self, index: usize) {
        if index == self.playlist.current_index() {
            return;
        }
        if self.playlist.jump_to(index).is_none() {
            tracing::debug!(target: "player", index, "select_track out of range, ignoring");
            return;
        }
        self.mount_current();
    }

    /// Seek within the current track, clamped to the known duration.
    pub fn seek(&mut self, position: Duration) {
        let clamped = match self.state.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.state.elapsed = clamped;
        self.handle.seek(clamped);
    }

    /// Set the volume, clamped to 0.0 - 1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = volume.clamp(0.0, 1.0);
        self.handle.set_volume(self.state.volume);
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Drain and apply pending notifications from the audio handle.
    pub fn tick(&mut self) {
        for event in self.handle.poll() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Loaded { generation, duration } => {
                if generation != self.generation {
                    tracing::debug!(target: "player", generation, "discarding stale load");
                    return;
                }
                self.state.phase = PlaybackPhase::Ready;
                self.state.duration = Some(duration);
                if self.state.playing {
                    self.request_play();
                }
            }
            AudioEvent::Time { elapsed, duration } => {
                // Position snapshots are only meaningful for the track
                // that is actually mounted; drop them mid-swap.
                if self.state.phase == PlaybackPhase::Ready {
                    self.state.elapsed = elapsed;
                    if !duration.is_zero() {
                        self.state.duration = Some(duration);
                    }
                }
            }
            AudioEvent::Ended { generation } => {
                if generation != self.generation {
                    return;
                }
                // Auto-advance always plays: the playlist is circular
                // ambience with no terminal state.
                self.state.playing = true;
                self.next();
            }
            AudioEvent::LoadFailed { generation, message } => {
                if generation != self.generation {
                    return;
                }
                tracing::warn!(target: "player", %message, "track failed to load");
                self.error = Some(message);
                self.state.phase = PlaybackPhase::Idle;
                self.state.duration = None;
                // Clear the intent so the next toggle retries play
                // instead of "pausing" a stream that never started.
                self.state.playing = false;
            }
        }
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    /// Toggle between the mini pill and the expanded card.
    pub fn toggle_mini(&mut self) {
        self.view.mode = match self.view.mode {
            ViewMode::Mini => ViewMode::Expanded,
            ViewMode::Expanded => ViewMode::Mini,
        };
    }

    /// Toggle the playlist panel; closes the volume panel if open.
    pub fn toggle_playlist_panel(&mut self) {
        self.view.panel = match self.view.panel {
            Panel::Playlist => Panel::Closed,
            _ => Panel::Playlist,
        };
    }

    /// Toggle the volume panel; closes the playlist panel if open.
    pub fn toggle_volume_panel(&mut self) {
        self.view.panel = match self.view.panel {
            Panel::Volume => Panel::Closed,
            _ => Panel::Volume,
        };
    }

    /// Dismiss the current error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn playback(&self) -> &PlaybackState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.current()
    }

    pub fn current_index(&self) -> usize {
        self.playlist.current_index()
    }

    pub fn tracks(&self) -> &[Track] {
        self.playlist.tracks()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Release the audio output. Also runs on drop.
    pub fn shutdown(&mut self) {
        self.handle.shutdown();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Start a source swap for the current playlist track.
    ///
    /// Bumps the generation first so anything the previous swap still
    /// reports is recognizably stale.
    fn mount_current(&mut self) {
        self.generation += 1;
        self.state.phase = PlaybackPhase::Loading;
        self.state.elapsed = Duration::ZERO;
        self.state.duration = None;
        self.error = None;
        let source = self.playlist.current().source.clone();
        self.handle.load(&source, self.generation);
    }

    fn request_play(&mut self) {
        match self.handle.play() {
            Ok(()) => self.state.playing = true,
            Err(e) => {
                self.error = Some(e.to_string());
                self.state.playing = false;
            }
        }
    }
}

impl Drop for PlaylistPlayer {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// Player errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("Audio output initialization failed: {0}")]
    AudioInit(String),

    #[error("Playback start rejected: {0}")]
    StartRejected(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio source not found: {0}")]
    SourceNotFound(String),

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("Audio channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockAudioHandle, MockCall, mock_tracks};

    /// Player in auto-ready mode: every load completes instantly with a
    /// 180s duration; construction's load is applied by the first tick.
    fn ready_player(track_count: usize) -> PlaylistPlayer {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(180));
        let mut player =
            PlaylistPlayer::new(mock_tracks(track_count), Box::new(handle), 0.5).unwrap();
        player.tick();
        player
    }

    // Generations are deterministic: construction mounts generation 1,
    // and every next/prev/select_track mounts the next one.

    #[test]
    fn test_empty_playlist_rejected() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(1));
        let result = PlaylistPlayer::new(Vec::new(), Box::new(handle), 0.5);
        assert!(matches!(result, Err(PlayerError::EmptyPlaylist)));
    }

    #[test]
    fn test_construction_loads_first_track_without_playing() {
        let player = ready_player(3);
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.playback().phase, PlaybackPhase::Ready);
        assert!(!player.is_playing());
        assert_eq!(player.playback().duration, Some(Duration::from_secs(180)));
    }

    #[test]
    fn test_toggle_starts_and_pauses() {
        let mut player = ready_player(2);

        player.toggle_play_pause();
        assert!(player.is_playing());

        player.toggle_play_pause();
        assert!(!player.is_playing());
    }

    #[test]
    fn test_rejected_play_surfaces_error_and_stays_paused() {
        let mut handle = MockAudioHandle::auto_ready(Duration::from_secs(60));
        handle.reject_play("blocked");
        let mut player = PlaylistPlayer::new(mock_tracks(2), Box::new(handle), 0.5).unwrap();
        player.tick();

        player.toggle_play_pause();
        assert!(!player.is_playing());
        assert!(player.error().unwrap().contains("blocked"));

        // Non-fatal: dismiss and the player keeps working
        player.dismiss_error();
        assert!(player.error().is_none());
    }

    #[test]
    fn test_next_wraps_and_resets_elapsed() {
        let mut player = ready_player(3);
        player.seek(Duration::from_secs(42));

        player.next();
        assert_eq!(player.current_index(), 1);
        assert_eq!(player.playback().elapsed, Duration::ZERO);
        assert_eq!(player.playback().duration, None);

        player.next();
        player.next();
        assert_eq!(player.current_index(), 0); // wraparound
    }

    #[test]
    fn test_prev_then_next_returns_to_start() {
        let mut player = ready_player(4);
        player.select_track(2);
        player.tick();

        player.prev();
        player.next();
        assert_eq!(player.current_index(), 2);
    }

    #[test]
    fn test_next_while_playing_keeps_intent_through_swap() {
        let handle = MockAudioHandle::manual();
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5).unwrap();
        events.lock().unwrap().push(AudioEvent::Loaded {
            generation: 1,
            duration: Duration::from_secs(90),
        });
        player.tick();
        player.toggle_play_pause();
        assert!(player.is_playing());

        player.next();
        // Mid-swap: still "playing" as far as the user is concerned
        assert_eq!(player.playback().phase, PlaybackPhase::Loading);
        assert!(player.is_playing());

        events.lock().unwrap().push(AudioEvent::Loaded {
            generation: 2,
            duration: Duration::from_secs(75),
        });
        player.tick(); // swap completes and play is re-requested
        assert_eq!(player.playback().phase, PlaybackPhase::Ready);
        assert!(player.is_playing());
    }

    #[test]
    fn test_next_while_paused_stays_paused() {
        let mut player = ready_player(3);

        player.next();
        player.tick();
        assert!(!player.is_playing());
        assert_eq!(player.playback().phase, PlaybackPhase::Ready);
    }

    #[test]
    fn test_select_track_out_of_range_is_noop() {
        let mut player = ready_player(3);
        player.select_track(7);
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn test_select_current_track_does_not_reload() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(60));
        let calls = handle.calls_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5).unwrap();

        let loads = |calls: &std::sync::Arc<std::sync::Mutex<Vec<MockCall>>>| {
            calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| matches!(c, MockCall::Load { .. }))
                .count()
        };

        assert_eq!(loads(&calls), 1);
        player.select_track(0);
        assert_eq!(loads(&calls), 1); // no second load
    }

    #[test]
    fn test_stale_loaded_event_is_discarded() {
        let handle = MockAudioHandle::manual();
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5).unwrap();

        // Two rapid skips: generations 2 then 3. A late "ready" for the
        // superseded swap must not flip the phase.
        player.next();
        player.next();
        events.lock().unwrap().push(AudioEvent::Loaded {
            generation: 2,
            duration: Duration::from_secs(11),
        });
        player.tick();
        assert_eq!(player.playback().phase, PlaybackPhase::Loading);
        assert_eq!(player.playback().duration, None);

        events.lock().unwrap().push(AudioEvent::Loaded {
            generation: 3,
            duration: Duration::from_secs(22),
        });
        player.tick();
        assert_eq!(player.playback().phase, PlaybackPhase::Ready);
        assert_eq!(player.playback().duration, Some(Duration::from_secs(22)));
    }

    #[test]
    fn test_ended_auto_advances_and_forces_playing() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(180));
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5).unwrap();
        player.tick();
        player.select_track(2); // mounts generation 2
        player.tick();
        assert!(!player.is_playing());

        events.lock().unwrap().push(AudioEvent::Ended { generation: 2 });
        player.tick();

        assert_eq!(player.current_index(), 0); // wrapped from last track
        assert!(player.is_playing()); // auto-advance never pauses
    }

    #[test]
    fn test_load_failure_keeps_selection_and_clears_intent() {
        let handle = MockAudioHandle::manual();
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5).unwrap();
        player.toggle_play_pause(); // intent on while still loading
        player.next(); // mounts generation 2

        events.lock().unwrap().push(AudioEvent::LoadFailed {
            generation: 2,
            message: "no such file".to_string(),
        });
        player.tick();

        assert_eq!(player.current_index(), 1); // selection unchanged
        assert!(!player.is_playing());
        assert!(player.error().unwrap().contains("no such file"));
        assert_eq!(player.playback().phase, PlaybackPhase::Idle);
    }

    #[test]
    fn test_toggle_after_load_failure_retries() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(60));
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(2), Box::new(handle), 0.5).unwrap();
        player.tick();
        events.lock().unwrap().push(AudioEvent::LoadFailed {
            generation: 1,
            message: "gone".to_string(),
        });
        player.tick();
        assert_eq!(player.playback().phase, PlaybackPhase::Idle);

        player.toggle_play_pause(); // retry: mounts generation 2
        assert_eq!(player.playback().phase, PlaybackPhase::Loading);
        assert!(player.is_playing());

        player.tick(); // auto-ready completes the retry
        assert_eq!(player.playback().phase, PlaybackPhase::Ready);
        assert!(player.is_playing());
    }

    #[test]
    fn test_time_updates_ignored_mid_swap() {
        let handle = MockAudioHandle::manual();
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(2), Box::new(handle), 0.5).unwrap();

        events.lock().unwrap().push(AudioEvent::Time {
            elapsed: Duration::from_secs(95),
            duration: Duration::from_secs(100),
        });
        player.tick();
        assert_eq!(player.playback().elapsed, Duration::ZERO);
    }

    #[test]
    fn test_time_updates_apply_when_ready() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(180));
        let events = handle.events_probe();
        let mut player = PlaylistPlayer::new(mock_tracks(2), Box::new(handle), 0.5).unwrap();
        player.tick();

        events.lock().unwrap().push(AudioEvent::Time {
            elapsed: Duration::from_secs(12),
            duration: Duration::from_secs(180),
        });
        player.tick();
        assert_eq!(player.playback().elapsed, Duration::from_secs(12));
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut player = ready_player(2);

        player.seek(Duration::from_secs(500));
        assert_eq!(player.playback().elapsed, Duration::from_secs(180));

        player.seek(Duration::from_secs(30));
        assert_eq!(player.playback().elapsed, Duration::from_secs(30));
    }

    #[test]
    fn test_volume_clamps() {
        let mut player = ready_player(1);

        player.set_volume(1.7);
        assert_eq!(player.playback().volume, 1.0);

        player.set_volume(-0.3);
        assert_eq!(player.playback().volume, 0.0);

        player.set_volume(0.4);
        assert_eq!(player.playback().volume, 0.4);
    }

    #[test]
    fn test_panels_are_mutually_exclusive() {
        let mut player = ready_player(1);
        assert_eq!(player.view().panel, Panel::Closed);

        player.toggle_playlist_panel();
        assert_eq!(player.view().panel, Panel::Playlist);

        // Opening the volume panel closes the playlist panel
        player.toggle_volume_panel();
        assert_eq!(player.view().panel, Panel::Volume);

        // And vice versa
        player.toggle_playlist_panel();
        assert_eq!(player.view().panel, Panel::Playlist);

        // Toggling the open panel closes it; both may be closed
        player.toggle_playlist_panel();
        assert_eq!(player.view().panel, Panel::Closed);
    }

    #[test]
    fn test_toggle_mini() {
        let mut player = ready_player(1);
        assert_eq!(player.view().mode, ViewMode::Mini);
        player.toggle_mini();
        assert_eq!(player.view().mode, ViewMode::Expanded);
        player.toggle_mini();
        assert_eq!(player.view().mode, ViewMode::Mini);
    }

    #[test]
    fn test_drop_shuts_down_handle() {
        let handle = MockAudioHandle::auto_ready(Duration::from_secs(1));
        let calls = handle.calls_probe();
        {
            let _player = PlaylistPlayer::new(mock_tracks(1), Box::new(handle), 0.5).unwrap();
        } // dropped here
        assert!(calls.lock().unwrap().contains(&MockCall::Shutdown));
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::{MockAudioHandle, mock_tracks};
    use proptest::prelude::*;

    proptest! {
        /// Stored volume always equals clamp(v, 0, 1).
        #[test]
        fn volume_always_clamped(volume in -10.0f32..10.0) {
            let handle = MockAudioHandle::auto_ready(Duration::from_secs(60));
            let mut player = PlaylistPlayer::new(mock_tracks(1), Box::new(handle), 0.5).unwrap();
            player.set_volume(volume);
            prop_assert_eq!(player.playback().volume, volume.clamp(0.0, 1.0));
        }

        /// Once the duration is known, elapsed after a seek equals
        /// clamp(t, 0, duration).
        #[test]
        fn seek_always_clamped(millis in 0u64..600_000) {
            let handle = MockAudioHandle::auto_ready(Duration::from_secs(180));
            let mut player = PlaylistPlayer::new(mock_tracks(1), Box::new(handle), 0.5).unwrap();
            player.tick();

            player.seek(Duration::from_millis(millis));
            let expected = Duration::from_millis(millis).min(Duration::from_secs(180));
            prop_assert_eq!(player.playback().elapsed, expected);
        }

        /// Calling next() len times returns to the starting index.
        #[test]
        fn next_is_circular(len in 1usize..20, start in 0usize..20) {
            let start = start % len;
            let handle = MockAudioHandle::auto_ready(Duration::from_secs(60));
            let mut player = PlaylistPlayer::new(mock_tracks(len), Box::new(handle), 0.5).unwrap();
            player.select_track(start);

            for _ in 0..len {
                player.next();
            }
            prop_assert_eq!(player.current_index(), start);
        }
    }
}
