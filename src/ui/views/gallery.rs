//! Gallery grid/list and the lightbox viewer.

use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::gallery::{Direction, Gallery, GalleryLayout, LoadStatus, OrientationFilter};
use crate::model::MediaItem;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;
use crate::ui::theme::{self, color, spacing, typography};

/// Columns in grid layout; list layout is a single column.
const GRID_COLUMNS: usize = 3;

/// Thumbnail heights per layout.
const GRID_TILE_HEIGHT: f32 = 210.0;
const LIST_TILE_HEIGHT: f32 = 300.0;

/// The gallery page: headline, controls, and the item grid.
pub fn gallery_page(s: &LoadedState) -> Element<'_, Message> {
    let headline = column![
        text("Gallery").size(typography::SIZE_HEADLINE).color(color::TEXT_PRIMARY),
        text("Portrait and landscape work from the shop")
            .size(typography::SIZE_BODY)
            .color(color::TEXT_MUTED),
    ]
    .spacing(spacing::XS)
    .align_x(Alignment::Center);

    let page = column![
        headline,
        controls(&s.gallery),
        item_area(s),
    ]
    .spacing(spacing::XL)
    .padding(spacing::XL)
    .align_x(Alignment::Center)
    .width(Length::Fill);

    container(scrollable(page).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(color::BASE)),
            ..Default::default()
        })
        .into()
}

/// Layout and filter button groups.
fn controls(gallery: &Gallery) -> Element<'_, Message> {
    let layout_group = row![
        segment("Grid", gallery.layout() == GalleryLayout::Grid)
            .on_press(Message::GalleryLayoutChanged(GalleryLayout::Grid)),
        segment("List", gallery.layout() == GalleryLayout::List)
            .on_press(Message::GalleryLayoutChanged(GalleryLayout::List)),
    ]
    .spacing(spacing::XS);

    let mut filter_group = row![].spacing(spacing::XS);
    for filter in OrientationFilter::ALL {
        filter_group = filter_group.push(
            segment(filter.label(), gallery.filter() == filter)
                .on_press(Message::GalleryFilterChanged(filter)),
        );
    }

    row![
        group_box(layout_group.into()),
        Space::with_width(spacing::LG),
        group_box(filter_group.into()),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn segment(label: &str, active: bool) -> iced::widget::Button<'_, Message> {
    button(text(label).size(typography::SIZE_BODY))
        .style(theme::button_toggle(active))
        .padding([spacing::XS, spacing::MD])
}

fn group_box(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(spacing::XS)
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

/// The filtered items, chunked into rows.
fn item_area(s: &LoadedState) -> Element<'_, Message> {
    let filtered = s.gallery.filtered();

    if filtered.is_empty() {
        return container(
            text("Nothing to show yet")
                .size(typography::SIZE_TITLE)
                .color(color::TEXT_MUTED),
        )
        .padding(spacing::XL)
        .into();
    }

    let columns = match s.gallery.layout() {
        GalleryLayout::Grid => GRID_COLUMNS,
        GalleryLayout::List => 1,
    };
    let tile_height = match s.gallery.layout() {
        GalleryLayout::Grid => GRID_TILE_HEIGHT,
        GalleryLayout::List => LIST_TILE_HEIGHT,
    };

    let mut rows = column![].spacing(spacing::LG).width(Length::Fixed(960.0));
    for chunk in filtered.chunks(columns) {
        let mut tile_row = row![].spacing(spacing::LG);
        for &item in chunk {
            tile_row = tile_row.push(tile(s, item, tile_height));
        }
        // Pad the last row so tiles keep their width
        for _ in chunk.len()..columns {
            tile_row = tile_row.push(Space::with_width(Length::Fill));
        }
        rows = rows.push(tile_row);
    }

    rows.into()
}

/// One gallery tile: the image (or a status placeholder) over its title.
fn tile<'a>(s: &'a LoadedState, item: &'a MediaItem, height: f32) -> Element<'a, Message> {
    let status = s.gallery.load_status(item.id);

    let visual: Element<'a, Message> = match (s.images.get(&item.id), status) {
        (Some(handle), _) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into(),
        (None, LoadStatus::Error) => placeholder("Image unavailable", color::ERROR, height),
        (None, _) => placeholder("Loading…", color::TEXT_MUTED, height),
    };

    let caption = column![
        text(&item.title).size(typography::SIZE_BODY).color(color::TEXT_PRIMARY),
        text(&item.description)
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
    ]
    .spacing(2);

    let content = container(column![visual, caption].spacing(spacing::SM))
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(move |_| theme::tile_style(status == LoadStatus::Error));

    button(content)
        .style(theme::button_ghost)
        .padding(0)
        .width(Length::Fill)
        .on_press(Message::GalleryOpen(item.id))
        .into()
}

fn placeholder<'a>(label: &'a str, tint: iced::Color, height: f32) -> Element<'a, Message> {
    container(text(label).size(typography::SIZE_BODY).color(tint))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(color::SURFACE_HOVER)),
            ..Default::default()
        })
        .into()
}

/// The lightbox overlay, shown while an item is open.
pub fn lightbox_overlay(s: &LoadedState) -> Option<Element<'_, Message>> {
    let item = s.gallery.open_item()?;
    let (index, len) = s.gallery.open_position()?;

    let visual: Element<'_, Message> = match s.images.get(&item.id) {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(640.0))
            .height(Length::Fixed(440.0))
            .into(),
        None => placeholder(
            match s.gallery.load_status(item.id) {
                LoadStatus::Error => "Image unavailable",
                _ => "Loading…",
            },
            color::TEXT_MUTED,
            440.0,
        ),
    };

    let close = button(text("×").size(typography::SIZE_TITLE))
        .style(theme::button_ghost)
        .padding([spacing::XS, spacing::SM])
        .on_press(Message::GalleryClose);

    let nav = |glyph: &'static str, direction: Direction| {
        button(text(glyph).size(typography::SIZE_TITLE))
            .style(theme::button_transport)
            .padding([spacing::SM, spacing::MD])
            .on_press(Message::GalleryNavigate(direction))
    };

    let caption = column![
        text(&item.title).size(typography::SIZE_TITLE).color(color::TEXT_PRIMARY),
        text(&item.description)
            .size(typography::SIZE_BODY)
            .color(color::TEXT_SECONDARY),
        text(format!("{} / {}", index + 1, len))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
    ]
    .spacing(spacing::XS);

    let card = container(
        column![
            row![Space::with_width(Length::Fill), close],
            row![
                nav("‹", Direction::Previous),
                Space::with_width(spacing::MD),
                visual,
                Space::with_width(spacing::MD),
                nav("›", Direction::Next),
            ]
            .align_y(Alignment::Center),
            caption,
        ]
        .spacing(spacing::MD),
    )
    .padding(spacing::LG)
    .style(|_| theme::card_style());

    Some(
        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .style(|_| theme::scrim_style())
            .into(),
    )
}
