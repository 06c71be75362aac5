//! Test utilities and fixtures for showroom tests.
//!
//! This module provides mock factories for the two input collections and
//! a scripted audio handle so the player controller can be exercised
//! without touching a real output device.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockAudioHandle, mock_tracks};
//!
//! let handle = MockAudioHandle::auto_ready(Duration::from_secs(180));
//! let events = handle.events_probe();
//! let player = PlaylistPlayer::new(mock_tracks(3), Box::new(handle), 0.5)?;
//! events.lock().unwrap().push(AudioEvent::Ended { generation: 1 });
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::model::{MediaItem, Orientation, Track};
use crate::player::{AudioEvent, AudioHandle, PlayerError};

/// Creates a mock track with the given id.
pub fn mock_track(id: u32) -> Track {
    Track {
        id,
        title: format!("Track {id}"),
        artist: "Test Artist".to_string(),
        source: PathBuf::from(format!("/showcase/music/track-{id}.mp3")),
    }
}

/// Creates `count` mock tracks with ids 1..=count.
pub fn mock_tracks(count: usize) -> Vec<Track> {
    (1..=count as u32).map(mock_track).collect()
}

/// Creates a mock gallery item with the given id and orientation.
pub fn mock_media_item(id: u32, orientation: Orientation) -> MediaItem {
    MediaItem {
        id,
        source: PathBuf::from(format!("/showcase/images/item-{id}.jpg")),
        title: format!("Item {id}"),
        description: format!("Description of item {id}"),
        orientation,
    }
}

/// Creates a gallery with `portrait` portrait items followed by
/// `landscape` landscape items, ids counting up from 1.
pub fn mock_gallery(portrait: usize, landscape: usize) -> Vec<MediaItem> {
    let mut items = Vec::with_capacity(portrait + landscape);
    let mut id = 1;
    for _ in 0..portrait {
        items.push(mock_media_item(id, Orientation::Portrait));
        id += 1;
    }
    for _ in 0..landscape {
        items.push(mock_media_item(id, Orientation::Landscape));
        id += 1;
    }
    items
}

/// A call recorded by [`MockAudioHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Load { source: PathBuf, generation: u64 },
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
    Shutdown,
}

/// A scripted [`AudioHandle`] for controller tests.
///
/// Calls are recorded into a shared log, and events to deliver on the
/// next `poll` sit in a shared queue; grab clones of both with
/// [`MockAudioHandle::calls_probe`] / [`MockAudioHandle::events_probe`]
/// before boxing the handle.
pub struct MockAudioHandle {
    /// When set, every `load` immediately queues a matching
    /// [`AudioEvent::Loaded`] with this duration.
    auto_ready: Option<Duration>,
    play_rejection: Option<String>,
    events: Arc<Mutex<Vec<AudioEvent>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAudioHandle {
    /// Every load completes instantly with the given duration.
    pub fn auto_ready(duration: Duration) -> Self {
        Self {
            auto_ready: Some(duration),
            play_rejection: None,
            events: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Loads complete only when the test queues the event itself.
    pub fn manual() -> Self {
        Self {
            auto_ready: None,
            play_rejection: None,
            events: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every `play` request fail with the given message.
    pub fn reject_play(&mut self, message: impl Into<String>) {
        self.play_rejection = Some(message.into());
    }

    /// Shared queue of events delivered on the next `poll`.
    pub fn events_probe(&self) -> Arc<Mutex<Vec<AudioEvent>>> {
        Arc::clone(&self.events)
    }

    /// Shared log of calls the controller made.
    pub fn calls_probe(&self) -> Arc<Mutex<Vec<MockCall>>> {
        Arc::clone(&self.calls)
    }
}

impl AudioHandle for MockAudioHandle {
    fn load(&mut self, source: &Path, generation: u64) {
        self.calls.lock().unwrap().push(MockCall::Load {
            source: source.to_path_buf(),
            generation,
        });
        if let Some(duration) = self.auto_ready {
            self.events
                .lock()
                .unwrap()
                .push(AudioEvent::Loaded { generation, duration });
        }
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.calls.lock().unwrap().push(MockCall::Play);
        match &self.play_rejection {
            Some(message) => Err(PlayerError::StartRejected(message.clone())),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push(MockCall::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.calls.lock().unwrap().push(MockCall::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.lock().unwrap().push(MockCall::SetVolume(volume));
    }

    fn poll(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn shutdown(&mut self) {
        self.calls.lock().unwrap().push(MockCall::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tracks_have_unique_ids() {
        let tracks = mock_tracks(5);
        assert_eq!(tracks.len(), 5);
        assert_eq!(tracks[0].id, 1);
        assert_eq!(tracks[4].id, 5);
    }

    #[test]
    fn test_mock_gallery_orientation_split() {
        let items = mock_gallery(3, 2);
        assert_eq!(items.len(), 5);
        assert!(items[..3].iter().all(|i| i.orientation == Orientation::Portrait));
        assert!(items[3..].iter().all(|i| i.orientation == Orientation::Landscape));
    }

    #[test]
    fn test_mock_handle_records_calls() {
        let mut handle = MockAudioHandle::manual();
        let calls = handle.calls_probe();

        handle.load(Path::new("/a.mp3"), 1);
        handle.pause();
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert!(handle.poll().is_empty()); // manual mode queues nothing
    }

    #[test]
    fn test_mock_handle_auto_ready() {
        let mut handle = MockAudioHandle::auto_ready(Duration::from_secs(30));
        handle.load(Path::new("/a.mp3"), 4);

        let events = handle.poll();
        assert_eq!(
            events,
            vec![AudioEvent::Loaded {
                generation: 4,
                duration: Duration::from_secs(30)
            }]
        );
        assert!(handle.poll().is_empty()); // drained
    }
}
