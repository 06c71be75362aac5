//! The fixed, circular playlist.

use super::PlayerError;
use crate::model::Track;

/// An ordered, non-empty sequence of tracks with a current position.
///
/// The playlist is circular: advancing past the last track wraps to the
/// first and vice versa, so there is no terminal position. The track list
/// itself is fixed for the session; only the position moves.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    /// Create a playlist positioned on the first track.
    ///
    /// An empty track list is rejected: every operation on a playlist
    /// assumes at least one track.
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks, current: 0 })
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// All tracks, in play order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the current track.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current track.
    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    /// Move to the next track, wrapping at the end.
    pub fn advance(&mut self) -> &Track {
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    /// Move to the previous track, wrapping at the start.
    pub fn retreat(&mut self) -> &Track {
        let n = self.tracks.len();
        self.current = (self.current + n - 1) % n;
        self.current()
    }

    /// Jump directly to a track. Out-of-range indices are rejected.
    pub fn jump_to(&mut self, index: usize) -> Option<&Track> {
        if index >= self.tracks.len() {
            return None;
        }
        self.current = index;
        Some(self.current())
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::mock_tracks;
    use proptest::prelude::*;

    proptest! {
        /// Advancing N times over an N-track playlist returns to the start index.
        #[test]
        fn advance_is_circular(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut playlist = Playlist::new(mock_tracks(len)).unwrap();
            playlist.jump_to(start).unwrap();

            for _ in 0..len {
                playlist.advance();
            }
            prop_assert_eq!(playlist.current_index(), start);
        }

        /// Retreat undoes advance from any position, and vice versa.
        #[test]
        fn advance_retreat_roundtrip(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut playlist = Playlist::new(mock_tracks(len)).unwrap();
            playlist.jump_to(start).unwrap();

            playlist.advance();
            playlist.retreat();
            prop_assert_eq!(playlist.current_index(), start);

            playlist.retreat();
            playlist.advance();
            prop_assert_eq!(playlist.current_index(), start);
        }

        /// The position is always a valid index.
        #[test]
        fn position_stays_in_range(len in 1usize..40, steps in proptest::collection::vec(0u8..3, 0..60)) {
            let mut playlist = Playlist::new(mock_tracks(len)).unwrap();
            for step in steps {
                match step {
                    0 => { playlist.advance(); }
                    1 => { playlist.retreat(); }
                    _ => { playlist.jump_to(len / 2); }
                }
                prop_assert!(playlist.current_index() < len);
            }
        }
    }
}
