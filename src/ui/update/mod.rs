//! Update handlers for the Showroom UI, split per concern.

mod gallery;
mod keyboard;
mod player;

pub use gallery::handle_gallery;
pub use keyboard::handle_keyboard;
pub use player::handle_player;

use std::path::PathBuf;

use iced::Task;

use crate::config::Config;
use crate::manifest::Showcase;
use crate::ui::messages::Message;
use crate::ui::state::{AppState, LoadedState};
use crate::ui::tasks;

/// Apply the showcase load result and kick off image loading.
pub fn handle_showcase_loaded(
    state: &mut AppState,
    path: PathBuf,
    result: Result<Showcase, String>,
    config: Config,
) -> Task<Message> {
    match result {
        Ok(showcase) => {
            let image_tasks = tasks::load_all_images(&showcase.gallery);
            *state = AppState::Loaded(Box::new(LoadedState::from_showcase(showcase, config)));
            image_tasks
        }
        Err(e) => {
            tracing::error!("Failed to load showcase from {:?}: {}", path, e);
            *state = AppState::Error(format!("Failed to load showcase from {}: {e}", path.display()));
            Task::none()
        }
    }
}
