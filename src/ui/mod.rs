//! UI module for Showroom.

mod canvas;
mod messages;
mod state;
mod tasks;
pub mod theme;
mod update;
mod views;

use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{container, text};
use iced::{Element, Length, Subscription, Task, keyboard, time};

pub use messages::Message;
use state::AppState;

use crate::config::Config;

/// Animation tick for the level bars (roughly the original's
/// requestAnimationFrame cadence, throttled to what a decorative
/// visualization needs).
const ANIMATION_TICK: Duration = Duration::from_millis(66);

/// Slow tick: drains audio notifications and expires toasts.
const PLAYER_TICK: Duration = Duration::from_millis(100);

pub struct Showroom {
    state: AppState,
    config: Config,
}

impl Showroom {
    pub fn new(manifest_path: PathBuf, config: Config) -> (Self, Task<Message>) {
        tracing::debug!("UI::new() loading showcase from {:?}", manifest_path);
        (
            Self {
                state: AppState::Loading,
                config,
            },
            tasks::load_showcase(manifest_path),
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let AppState::Loaded(s) = &self.state else {
            return Subscription::none();
        };

        let mut subscriptions = vec![
            // Audio notifications + toast expiry
            time::every(PLAYER_TICK).map(|_| Message::PlayerTick),
            // Keyboard shortcuts - global within the app
            keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers))),
        ];

        // The bar animation ticks only while audible (or still settling
        // after a pause); a paused player schedules no per-frame work.
        if s.animation_active() {
            subscriptions.push(time::every(ANIMATION_TICK).map(|_| Message::VisualizationTick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match &self.state {
            AppState::Loading => text("Loading showcase...").size(30).into(),
            AppState::Loaded(s) => views::loaded_view(s),
            AppState::Error(e) => text(format!("Error: {}", e))
                .size(30)
                .color([0.9, 0.0, 0.0])
                .into(),
        };
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let is_tick = matches!(message, Message::PlayerTick | Message::VisualizationTick);
        if !is_tick {
            tracing::trace!(target: "ui::update", message = ?message, "Update received");
        }

        // Handle messages that work regardless of state
        match &message {
            Message::ShowcaseLoaded(path, result) => {
                return update::handle_showcase_loaded(
                    &mut self.state,
                    path.clone(),
                    result.clone(),
                    self.config.clone(),
                );
            }
            Message::ConfigSaved(Err(e)) => {
                tracing::error!("Failed to save config: {}", e);
                return Task::none();
            }
            Message::ConfigSaved(Ok(())) => return Task::none(),
            _ => {}
        }

        // Handle messages that require loaded state
        let AppState::Loaded(s) = &mut self.state else {
            return Task::none();
        };

        match message {
            // Player messages
            Message::PlayerTick
            | Message::VisualizationTick
            | Message::PlayerToggle
            | Message::PlayerNext
            | Message::PlayerPrevious
            | Message::PlayerSelectTrack(_)
            | Message::PlayerSeekPreview(_)
            | Message::PlayerSeekRelease
            | Message::PlayerVolumeChanged(_)
            | Message::PlayerVolumeCommit
            | Message::PlayerToggleMini
            | Message::PlayerTogglePlaylist
            | Message::PlayerToggleVolume
            | Message::PlayerDismissError => update::handle_player(s, message),

            // Gallery messages
            Message::GalleryFilterChanged(_)
            | Message::GalleryLayoutChanged(_)
            | Message::GalleryOpen(_)
            | Message::GalleryClose
            | Message::GalleryNavigate(_)
            | Message::GalleryImageLoaded(_, _) => update::handle_gallery(s, message),

            // Toast notification messages
            Message::ToastDismiss(id) => {
                s.toasts.remove(id);
                Task::none()
            }

            // Keyboard shortcuts
            Message::KeyPressed(key, modifiers) => update::handle_keyboard(s, key, modifiers),

            _ => Task::none(),
        }
    }
}
