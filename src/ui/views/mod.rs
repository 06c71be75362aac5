//! View composition for the Showroom UI.

mod gallery;
mod player;
pub mod toast;

use iced::Element;
use iced::widget::stack;

use super::messages::Message;
use super::state::LoadedState;

/// The loaded page: gallery underneath, then the lightbox, the floating
/// player, and toasts layered over it.
pub fn loaded_view(s: &LoadedState) -> Element<'_, Message> {
    let mut layers = stack![gallery::gallery_page(s)];

    if let Some(lightbox) = gallery::lightbox_overlay(s) {
        layers = layers.push(lightbox);
    }

    if let Some(player) = player::player_overlay(s) {
        layers = layers.push(player);
    }

    if let Some(toasts) = toast::toast_overlay(&s.toasts) {
        layers = layers.push(toasts);
    }

    layers.into()
}
