//! The floating ambient player widget.
//!
//! Renders bottom-right over the gallery, as either a compact pill or an
//! expanded card with transport controls, a seek bar, and one of the two
//! auxiliary panels (playlist or volume). Layout follows the original
//! floating player: error banner on top, then the mini/expand toggle,
//! then the active body.

use iced::widget::{Space, button, column, container, row, slider, text};
use iced::{Alignment, Element, Length};

use crate::player::{BAR_COUNT, Panel, PlaylistPlayer, ViewMode, format_duration};
use crate::ui::canvas::level_bars;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;
use crate::ui::theme::{self, color, spacing, typography};

/// Width of the expanded card.
const CARD_WIDTH: f32 = 320.0;

/// Width of the mini pill.
const PILL_WIDTH: f32 = 200.0;

/// The player overlay, anchored bottom-right. `None` when the showcase
/// has no player.
pub fn player_overlay(s: &LoadedState) -> Option<Element<'_, Message>> {
    let player = s.player.as_ref()?;

    let mut stack = column![].spacing(spacing::SM).align_x(Alignment::End);

    if let Some(error) = player.error() {
        stack = stack.push(error_banner(error));
    }

    stack = stack.push(mini_toggle(player));
    stack = stack.push(match player.view().mode {
        ViewMode::Mini => mini_view(s, player),
        ViewMode::Expanded => expanded_view(s, player),
    });

    Some(
        container(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Bottom)
            .padding(spacing::LG)
            .into(),
    )
}

/// Dismissible error banner above the player.
fn error_banner(message: &str) -> Element<'_, Message> {
    let dismiss = button(text("Dismiss").size(typography::SIZE_SMALL))
        .style(theme::button_ghost)
        .padding([spacing::XS, spacing::SM])
        .on_press(Message::PlayerDismissError);

    container(
        row![
            text(message).size(typography::SIZE_SMALL).color(color::TEXT_PRIMARY),
            Space::with_width(spacing::SM),
            dismiss,
        ]
        .align_y(Alignment::Center),
    )
    .max_width(CARD_WIDTH)
    .padding(spacing::SM)
    .style(|_| container::Style {
        background: Some(iced::Background::Color(color::ERROR)),
        border: iced::Border {
            radius: theme::radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

/// The collapse/expand chevron above the player body.
fn mini_toggle(player: &PlaylistPlayer) -> Element<'_, Message> {
    let glyph = match player.view().mode {
        ViewMode::Mini => "↑",
        ViewMode::Expanded => "↓",
    };
    button(text(glyph).size(typography::SIZE_BODY))
        .style(theme::button_transport)
        .padding([spacing::XS, spacing::SM])
        .on_press(Message::PlayerToggleMini)
        .into()
}

/// Compact pill: a few bars, play/pause, the title, next.
fn mini_view<'a>(s: &'a LoadedState, player: &'a PlaylistPlayer) -> Element<'a, Message> {
    let play_pause = transport_button(if player.is_playing() { "||" } else { "|>" })
        .on_press(Message::PlayerToggle);
    let next = button(text(">|").size(typography::SIZE_SMALL))
        .style(theme::button_ghost)
        .padding(spacing::XS)
        .on_press(Message::PlayerNext);

    let title = text(&player.current_track().title)
        .size(typography::SIZE_SMALL)
        .color(color::TEXT_PRIMARY);

    container(
        row![
            level_bars(&s.bars, 3, 14.0, 18.0),
            Space::with_width(spacing::SM),
            play_pause,
            Space::with_width(spacing::SM),
            title.width(Length::Fill),
            next,
        ]
        .align_y(Alignment::Center),
    )
    .width(Length::Fixed(PILL_WIDTH))
    .padding([spacing::SM, spacing::MD])
    .style(|_| theme::pill_style())
    .into()
}

/// Expanded card: track header, seek, transport, optional panel.
fn expanded_view<'a>(s: &'a LoadedState, player: &'a PlaylistPlayer) -> Element<'a, Message> {
    let track = player.current_track();
    let playback = player.playback();

    // Header: bars, title/artist, playlist panel toggle
    let panel_glyph = match player.view().panel {
        Panel::Playlist => "▲",
        _ => "▼",
    };
    let header = row![
        container(level_bars(&s.bars, BAR_COUNT, 48.0, 32.0))
            .padding(spacing::XS)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(color::PRIMARY_PRESSED)),
                border: iced::Border {
                    radius: theme::radius::MD.into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        Space::with_width(spacing::MD),
        column![
            text(&track.title).size(typography::SIZE_BODY).color(color::TEXT_PRIMARY),
            text(&track.artist).size(typography::SIZE_SMALL).color(color::TEXT_SECONDARY),
        ]
        .width(Length::Fill),
        button(text(panel_glyph).size(typography::SIZE_SMALL))
            .style(theme::button_ghost)
            .padding(spacing::XS)
            .on_press(Message::PlayerTogglePlaylist),
    ]
    .align_y(Alignment::Center);

    // Seek slider with preview-while-dragging
    let display_fraction = s.seek_preview.unwrap_or_else(|| playback.position_fraction());
    let elapsed_label = match (s.seek_preview, playback.duration) {
        (Some(fraction), Some(duration)) => {
            format_duration(duration.mul_f32(fraction))
        }
        _ => playback.elapsed_str(),
    };
    let seek = slider(0.0..=1.0, display_fraction, Message::PlayerSeekPreview)
        .on_release(Message::PlayerSeekRelease)
        .step(0.001)
        .style(theme::slider_style);
    let times = row![
        text(elapsed_label).size(typography::SIZE_SMALL).color(color::TEXT_SECONDARY),
        Space::with_width(Length::Fill),
        text(playback.duration_str())
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
    ];

    // Transport row
    let controls = row![
        button(text("|<").size(typography::SIZE_BODY))
            .style(theme::button_ghost)
            .padding(spacing::SM)
            .on_press(Message::PlayerPrevious),
        Space::with_width(Length::Fill),
        transport_button(if player.is_playing() { "||" } else { "|>" })
            .on_press(Message::PlayerToggle),
        Space::with_width(Length::Fill),
        button(text(">|").size(typography::SIZE_BODY))
            .style(theme::button_ghost)
            .padding(spacing::SM)
            .on_press(Message::PlayerNext),
        button(text("vol").size(typography::SIZE_SMALL))
            .style(theme::button_ghost)
            .padding(spacing::SM)
            .on_press(Message::PlayerToggleVolume),
    ]
    .align_y(Alignment::Center);

    let mut body = column![header, seek, times, controls].spacing(spacing::MD);

    match player.view().panel {
        Panel::Volume => body = body.push(volume_panel(playback.volume)),
        Panel::Playlist => body = body.push(playlist_panel(player)),
        Panel::Closed => {}
    }

    container(body)
        .width(Length::Fixed(CARD_WIDTH))
        .padding(spacing::LG)
        .style(|_| theme::card_style())
        .into()
}

/// Round play/pause button.
fn transport_button(glyph: &str) -> iced::widget::Button<'_, Message> {
    button(text(glyph).size(typography::SIZE_BODY))
        .style(theme::button_transport)
        .padding([spacing::SM, spacing::MD])
}

/// Volume slider panel; commits to config on release.
fn volume_panel<'a>(volume: f32) -> Element<'a, Message> {
    container(
        row![
            text("vol").size(typography::SIZE_SMALL).color(color::TEXT_SECONDARY),
            Space::with_width(spacing::SM),
            slider(0.0..=1.0, volume, Message::PlayerVolumeChanged)
                .on_release(Message::PlayerVolumeCommit)
                .step(0.01)
                .style(theme::slider_style),
            Space::with_width(spacing::SM),
            text(format!("{:.0}%", volume * 100.0))
                .size(typography::SIZE_SMALL)
                .color(color::TEXT_PRIMARY),
        ]
        .align_y(Alignment::Center),
    )
    .padding(spacing::SM)
    .style(|_| container::Style {
        background: Some(iced::Background::Color(color::SURFACE)),
        border: iced::Border {
            radius: theme::radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

/// Scrollable-ish track list; the playlist is small, a column suffices.
fn playlist_panel(player: &PlaylistPlayer) -> Element<'_, Message> {
    let current = player.current_index();

    let rows: Vec<Element<Message>> = player
        .tracks()
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let marker = if index == current && player.is_playing() {
                "♪"
            } else if index == current {
                "▸"
            } else {
                " "
            };
            button(
                row![
                    text(marker).size(typography::SIZE_SMALL).width(Length::Fixed(16.0)),
                    text(track.display_label()).size(typography::SIZE_SMALL),
                ]
                .align_y(Alignment::Center),
            )
            .style(theme::button_toggle(index == current))
            .width(Length::Fill)
            .padding([spacing::XS, spacing::SM])
            .on_press(Message::PlayerSelectTrack(index))
            .into()
        })
        .collect();

    container(iced::widget::column(rows).spacing(spacing::XS))
        .padding(spacing::SM)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(color::SURFACE)),
            border: iced::Border {
                radius: theme::radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}
