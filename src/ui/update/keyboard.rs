//! Keyboard shortcut handling.
//!
//! The arrow keys and Escape drive the lightbox while it is open; with
//! the lightbox closed, the arrows fall through to track skipping and
//! Space toggles playback.

use iced::Task;
use iced::keyboard::{self, key};

use crate::gallery::Direction;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;

/// Handle keyboard shortcuts.
///
/// Returns a Task if the key triggered an action, or Task::none() if unhandled.
pub fn handle_keyboard(
    s: &mut LoadedState,
    key: keyboard::Key,
    modifiers: keyboard::Modifiers,
) -> Task<Message> {
    if !modifiers.is_empty() {
        return Task::none();
    }

    match key.as_ref() {
        // Escape: close the lightbox
        keyboard::Key::Named(key::Named::Escape) => {
            if s.gallery.is_open() {
                tracing::debug!(target: "ui::keyboard", "Escape pressed - closing lightbox");
                return Task::done(Message::GalleryClose);
            }
        }

        // Right Arrow: lightbox next, or next track
        keyboard::Key::Named(key::Named::ArrowRight) => {
            return if s.gallery.is_open() {
                Task::done(Message::GalleryNavigate(Direction::Next))
            } else {
                tracing::debug!(target: "ui::keyboard", "Right pressed - next track");
                Task::done(Message::PlayerNext)
            };
        }

        // Left Arrow: lightbox previous, or previous track
        keyboard::Key::Named(key::Named::ArrowLeft) => {
            return if s.gallery.is_open() {
                Task::done(Message::GalleryNavigate(Direction::Previous))
            } else {
                tracing::debug!(target: "ui::keyboard", "Left pressed - previous track");
                Task::done(Message::PlayerPrevious)
            };
        }

        // Space: Play/Pause toggle
        keyboard::Key::Named(key::Named::Space) => {
            tracing::debug!(target: "ui::keyboard", "Space pressed - toggling playback");
            return Task::done(Message::PlayerToggle);
        }

        _ => {}
    }

    Task::none()
}
