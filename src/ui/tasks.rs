//! Background task helpers for the UI.
//!
//! Images decode off the UI thread; each task reports back with the
//! item id and either a displayable handle or an error message. The
//! gallery's load-status map is updated from those messages, never from
//! inside the tasks themselves.

use std::path::PathBuf;

use iced::Task;
use image::GenericImageView;
use iced::widget::image::Handle as ImageHandle;

use crate::model::{MediaItem, Orientation};
use crate::ui::messages::Message;

/// Load the showcase manifest.
pub fn load_showcase(path: PathBuf) -> Task<Message> {
    Task::perform(
        {
            let path = path.clone();
            async move { crate::manifest::load_async(path).await.map_err(|e| e.to_string()) }
        },
        move |result| Message::ShowcaseLoaded(path.clone(), result),
    )
}

/// Load and decode one gallery image.
pub fn load_image(item: &MediaItem) -> Task<Message> {
    let id = item.id;
    let source = item.source.clone();
    let declared = item.orientation;

    Task::perform(
        async move { decode_image(id, source, declared).await },
        |(id, result)| Message::GalleryImageLoaded(id, result),
    )
}

/// Load tasks for every item in a showcase gallery.
pub fn load_all_images(items: &[MediaItem]) -> Task<Message> {
    Task::batch(items.iter().map(load_image))
}

async fn decode_image(
    id: u32,
    source: PathBuf,
    declared: Orientation,
) -> (u32, Result<ImageHandle, String>) {
    let bytes = match tokio::fs::read(&source).await {
        Ok(bytes) => bytes,
        Err(e) => return (id, Err(format!("{}: {e}", source.display()))),
    };

    // Decode up front so a broken file surfaces as an error here rather
    // than as a silently blank widget later.
    match image::load_from_memory(&bytes) {
        Ok(decoded) => {
            let actual = Orientation::from_dimensions(decoded.width(), decoded.height());
            if actual != declared {
                tracing::warn!(
                    "Gallery item {} is declared {} but measures {}x{}",
                    id,
                    declared,
                    decoded.width(),
                    decoded.height()
                );
            }
            (id, Ok(ImageHandle::from_bytes(bytes)))
        }
        Err(e) => (id, Err(format!("{}: {e}", source.display()))),
    }
}
