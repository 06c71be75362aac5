//! Application state types for the Showroom UI.

use std::collections::HashMap;

use iced::widget::image::Handle as ImageHandle;

use crate::config::Config;
use crate::gallery::Gallery;
use crate::manifest::Showcase;
use crate::player::{CpalAudio, LevelBars, PlaylistPlayer};
use crate::ui::views::toast::ToastQueue;

/// Top-level application state
///
/// Note: LoadedState is boxed to reduce stack size (Clippy large_enum_variant)
pub enum AppState {
    Loading,
    Loaded(Box<LoadedState>),
    Error(String),
}

/// State for a fully loaded application
pub struct LoadedState {
    /// The ambient player; absent when the showcase has no tracks or the
    /// audio device could not be opened
    pub player: Option<PlaylistPlayer>,
    /// Animated level bars for the player widget
    pub bars: LevelBars,
    /// Seek preview position - when the user is dragging the slider
    /// None = not seeking, Some(fraction) = dragging to this position
    pub seek_preview: Option<f32>,

    /// The gallery controller
    pub gallery: Gallery,
    /// Decoded image handles, keyed by gallery item id
    pub images: HashMap<u32, ImageHandle>,

    pub toasts: ToastQueue,
    pub config: Config,
}

impl LoadedState {
    /// Assemble the loaded state from a validated showcase.
    ///
    /// Player setup failures degrade to a gallery-only page with a
    /// toast; they never fail the whole app.
    pub fn from_showcase(showcase: Showcase, config: Config) -> Self {
        let mut toasts = ToastQueue::default();

        let player = if showcase.tracks.is_empty() {
            tracing::info!("Showcase has no tracks; ambient player disabled");
            None
        } else {
            match CpalAudio::new(config.player.volume) {
                Ok(audio) => {
                    match PlaylistPlayer::new(
                        showcase.tracks,
                        Box::new(audio),
                        config.player.volume,
                    ) {
                        Ok(mut player) => {
                            if !config.player.start_mini {
                                player.toggle_mini();
                            }
                            Some(player)
                        }
                        Err(e) => {
                            toasts.error(format!("Player unavailable: {e}"));
                            None
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Audio output unavailable: {}", e);
                    toasts.error(format!("Audio output unavailable: {e}"));
                    None
                }
            }
        };

        if showcase.gallery.is_empty() {
            toasts.warning("Showcase has no gallery items");
        }

        Self {
            player,
            bars: LevelBars::new(),
            seek_preview: None,
            gallery: Gallery::new(showcase.gallery),
            images: HashMap::new(),
            toasts,
            config,
        }
    }

    /// Whether the level-bar animation needs ticks right now.
    pub fn animation_active(&self) -> bool {
        let playing = self.player.as_ref().is_some_and(|p| p.is_playing());
        playing || !self.bars.is_settled()
    }
}
