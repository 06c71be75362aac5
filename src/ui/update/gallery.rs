//! Gallery message handlers.

use iced::Task;

use crate::gallery::LoadStatus;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;

/// Handle gallery-related messages.
pub fn handle_gallery(s: &mut LoadedState, msg: Message) -> Task<Message> {
    match msg {
        Message::GalleryFilterChanged(filter) => {
            s.gallery.set_filter(filter);
        }

        Message::GalleryLayoutChanged(layout) => {
            s.gallery.set_layout(layout);
        }

        Message::GalleryOpen(id) => {
            s.gallery.open(id);
        }

        Message::GalleryClose => {
            s.gallery.close();
        }

        Message::GalleryNavigate(direction) => {
            s.gallery.navigate(direction);
        }

        Message::GalleryImageLoaded(id, Ok(handle)) => {
            s.images.insert(id, handle);
            s.gallery.report_load_result(id, LoadStatus::Loaded);
        }

        Message::GalleryImageLoaded(id, Err(e)) => {
            // Per-item failure: the tile shows a placeholder, the rest
            // of the gallery is unaffected.
            tracing::warn!("Gallery image {} failed to load: {}", id, e);
            s.gallery.report_load_result(id, LoadStatus::Error);
        }

        _ => {}
    }
    Task::none()
}
