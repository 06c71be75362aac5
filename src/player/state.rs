//! Playback and view state types, plus the audio command/event vocabulary.

use std::path::PathBuf;
use std::time::Duration;

/// Phase of the current source swap.
///
/// Each track change walks `Loading -> Ready`; whether a ready track is
/// audibly playing or paused is the separate play intent on
/// [`PlaybackState`]. `Idle` means the current source failed to load and
/// nothing is mounted in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Snapshot of transport state owned by the player controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Phase of the current source swap
    pub phase: PlaybackPhase,
    /// Play intent. Stays true across track swaps so playback resumes
    /// as soon as the new source is ready.
    pub playing: bool,
    /// Elapsed time in the current track
    pub elapsed: Duration,
    /// Total duration, once the source's metadata arrived
    pub duration: Option<Duration>,
    /// Volume level (0.0 - 1.0)
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            playing: false,
            elapsed: Duration::ZERO,
            duration: None,
            volume: 1.0,
        }
    }
}

impl PlaybackState {
    /// Get elapsed time as a fraction (0.0 - 1.0) of the duration.
    pub fn position_fraction(&self) -> f32 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.elapsed.as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Format elapsed time as MM:SS.
    pub fn elapsed_str(&self) -> String {
        format_duration(self.elapsed)
    }

    /// Format total duration as MM:SS, or a placeholder while unknown.
    pub fn duration_str(&self) -> String {
        match self.duration {
            Some(d) => format_duration(d),
            None => "-:--".to_string(),
        }
    }
}

/// Format a duration as MM:SS or HH:MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Presentation size of the floating player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Compact pill: play/pause, current title, next
    #[default]
    Mini,
    /// Full card: transport, seek, panels
    Expanded,
}

/// Which auxiliary panel is open in the expanded player.
///
/// Modeled as a single slot so the playlist and volume panels can never
/// be open at the same time; opening one closes the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Closed,
    Playlist,
    Volume,
}

/// View state of the floating player widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    pub panel: Panel,
}

/// Commands sent to the audio thread.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Swap in a new source. The generation tags every notification the
    /// swap produces so stale ones can be discarded after a newer swap.
    Load { source: PathBuf, generation: u64 },
    /// Start/resume playback of the mounted source
    Play,
    /// Pause playback
    Pause,
    /// Seek to an absolute position
    Seek(Duration),
    /// Shutdown the audio thread
    Shutdown,
}

/// Notifications delivered back from the audio backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// The source for `generation` is mounted and its duration is known
    Loaded { generation: u64, duration: Duration },
    /// Periodic position snapshot for the mounted source
    Time { elapsed: Duration, duration: Duration },
    /// The source for `generation` played to the end
    Ended { generation: u64 },
    /// The source for `generation` could not be loaded or decoded
    LoadFailed { generation: u64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1:01:01");
    }

    #[test]
    fn test_position_fraction() {
        let mut state = PlaybackState::default();
        assert_eq!(state.position_fraction(), 0.0);

        state.duration = Some(Duration::from_secs(100));
        state.elapsed = Duration::from_secs(50);
        assert!((state.position_fraction() - 0.5).abs() < 0.01);

        // A stale elapsed beyond the duration never exceeds 1.0
        state.elapsed = Duration::from_secs(150);
        assert_eq!(state.position_fraction(), 1.0);
    }

    #[test]
    fn test_duration_str_placeholder_until_known() {
        let mut state = PlaybackState::default();
        assert_eq!(state.duration_str(), "-:--");

        state.duration = Some(Duration::from_secs(185));
        assert_eq!(state.duration_str(), "3:05");
    }
}
