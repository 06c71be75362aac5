//! Message types for the Showroom UI.

use std::path::PathBuf;

use iced::keyboard;
use iced::widget::image::Handle as ImageHandle;

use crate::gallery::{Direction, GalleryLayout, OrientationFilter};
use crate::manifest::Showcase;

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Initialization
    ShowcaseLoaded(PathBuf, Result<Showcase, String>),

    // Player messages
    PlayerToggle,
    PlayerNext,
    PlayerPrevious,
    PlayerSelectTrack(usize), // Jump to playlist index
    PlayerSeekPreview(f32),   // While dragging - updates display only
    PlayerSeekRelease,        // On release - performs the actual seek
    PlayerVolumeChanged(f32),
    PlayerVolumeCommit, // Volume slider released - persist to config
    PlayerToggleMini,
    PlayerTogglePlaylist,
    PlayerToggleVolume,
    PlayerDismissError,
    PlayerTick,        // Timer tick: drain audio notifications
    VisualizationTick, // Fast tick for the level bars, only while audible

    // Gallery messages
    GalleryFilterChanged(OrientationFilter),
    GalleryLayoutChanged(GalleryLayout),
    GalleryOpen(u32),
    GalleryClose,
    GalleryNavigate(Direction),
    GalleryImageLoaded(u32, Result<ImageHandle, String>),

    // Toast notification messages
    ToastDismiss(u64),

    // Config persistence outcome (fire-and-forget, logged only)
    ConfigSaved(Result<(), String>),

    // Keyboard shortcuts
    KeyPressed(keyboard::Key, keyboard::Modifiers),
}
