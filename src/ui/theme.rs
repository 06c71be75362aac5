//! Design System Theme Constants
//!
//! Centralized theme definitions for consistent UI across the application.
//! All colors, spacing, and sizing should be defined here.
//!
//! # Color Philosophy
//! - Warm dark theme: deep browns rather than pure black
//! - Maroon primary with clay accents, cream/sand text
//! - Semantic colors for status (success/warning/error)
//!
//! # Usage
//! ```rust
//! use crate::ui::theme;
//!
//! let bg = theme::color::SURFACE;
//! let padding = theme::spacing::MD;
//! ```

use iced::Color;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

// =============================================================================
// COLORS
// =============================================================================

pub mod color {
    use super::*;

    // -------------------------------------------------------------------------
    // Backgrounds (darkest to lightest)
    // -------------------------------------------------------------------------

    /// Main app background - deep warm brown
    /// Hex: #171311
    pub const BASE: Color = rgb(0x17, 0x13, 0x11);

    /// Cards, panels, raised surfaces
    /// Hex: #221c19
    pub const SURFACE: Color = rgb(0x22, 0x1c, 0x19);

    /// Elevated surfaces, the lightbox card, the player card
    /// Hex: #2d2521
    pub const SURFACE_ELEVATED: Color = rgb(0x2d, 0x25, 0x21);

    /// Hover states, active items
    /// Hex: #3a2f29
    pub const SURFACE_HOVER: Color = rgb(0x3a, 0x2f, 0x29);

    // -------------------------------------------------------------------------
    // Borders
    // -------------------------------------------------------------------------

    /// Subtle separation
    pub const BORDER_SUBTLE: Color = rgb(0x3a, 0x2f, 0x29);

    /// Standard borders - clay tint
    pub const BORDER: Color = rgb(0x5c, 0x45, 0x39);

    // -------------------------------------------------------------------------
    // Brand (the workshop palette)
    // -------------------------------------------------------------------------

    /// Primary maroon
    /// Hex: #9A3F3F
    pub const PRIMARY: Color = rgb(0x9a, 0x3f, 0x3f);

    /// Hovered primary
    /// Hex: #B24A4A
    pub const PRIMARY_HOVER: Color = rgb(0xb2, 0x4a, 0x4a);

    /// Pressed primary
    /// Hex: #7E3333
    pub const PRIMARY_PRESSED: Color = rgb(0x7e, 0x33, 0x33);

    /// Clay accent
    /// Hex: #C1856D
    pub const ACCENT: Color = rgb(0xc1, 0x85, 0x6d);

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Headlines and primary copy - cream
    /// Hex: #FBF9D1
    pub const TEXT_PRIMARY: Color = rgb(0xfb, 0xf9, 0xd1);

    /// Secondary copy - sand
    /// Hex: #E6CFA9
    pub const TEXT_SECONDARY: Color = rgb(0xe6, 0xcf, 0xa9);

    /// De-emphasized text
    /// Hex: #9d8d74
    pub const TEXT_MUTED: Color = rgb(0x9d, 0x8d, 0x74);

    // -------------------------------------------------------------------------
    // Semantic
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = rgb(0x6a, 0x9a, 0x55);
    pub const WARNING: Color = rgb(0xd4, 0xa2, 0x3c);
    pub const ERROR: Color = rgb(0xc0, 0x4a, 0x3a);

    /// Dimmed backdrop behind the lightbox
    pub const SCRIM: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.85);
}

// =============================================================================
// SPACING
// =============================================================================

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

// =============================================================================
// RADII
// =============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    /// The mini player pill
    pub const PILL: f32 = 24.0;
}

// =============================================================================
// TYPOGRAPHY
// =============================================================================

pub mod typography {
    pub const SIZE_SMALL: u16 = 11;
    pub const SIZE_BODY: u16 = 14;
    pub const SIZE_TITLE: u16 = 18;
    pub const SIZE_HEADLINE: u16 = 28;
}

// =============================================================================
// CONTAINER STYLE HELPERS
// =============================================================================

use iced::widget::container;
use iced::{Border, Shadow, Theme, Vector};

/// Raised card with a clay border (the expanded player, panels).
pub fn card_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SURFACE_ELEVATED)),
        border: Border {
            color: color::BORDER,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 10.0,
        },
        ..Default::default()
    }
}

/// The mini player pill.
pub fn pill_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::PRIMARY)),
        border: Border {
            color: color::ACCENT,
            width: 1.0,
            radius: radius::PILL.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

/// Full-window dimmed backdrop behind the lightbox.
pub fn scrim_style() -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SCRIM)),
        ..Default::default()
    }
}

/// Grid cell frame; error cells get a warning tint.
pub fn tile_style(error: bool) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::SURFACE)),
        border: Border {
            color: if error { color::ERROR } else { color::BORDER_SUBTLE },
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

// =============================================================================
// BUTTON STYLE HELPERS
// =============================================================================

use iced::widget::button;

/// Primary button - filled with the maroon accent.
pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text) = match status {
        button::Status::Active => (color::PRIMARY, color::TEXT_PRIMARY),
        button::Status::Hovered => (color::PRIMARY_HOVER, color::TEXT_PRIMARY),
        button::Status::Pressed => (color::PRIMARY_PRESSED, color::TEXT_PRIMARY),
        button::Status::Disabled => (color::SURFACE_HOVER, color::TEXT_MUTED),
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Ghost button - minimal, for less important actions.
pub fn button_ghost(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text) = match status {
        button::Status::Active => (Color::TRANSPARENT, color::TEXT_SECONDARY),
        button::Status::Hovered => (color::SURFACE_HOVER, color::TEXT_PRIMARY),
        button::Status::Pressed => (color::SURFACE_ELEVATED, color::TEXT_PRIMARY),
        button::Status::Disabled => (Color::TRANSPARENT, color::TEXT_MUTED),
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Segmented toggle (filter / layout buttons); `active` marks the
/// selected segment.
pub fn button_toggle(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let (bg, text) = if active {
            (color::PRIMARY, color::TEXT_PRIMARY)
        } else {
            match status {
                button::Status::Hovered => (color::SURFACE_HOVER, color::TEXT_PRIMARY),
                _ => (color::SURFACE, color::TEXT_SECONDARY),
            }
        };

        button::Style {
            background: Some(iced::Background::Color(bg)),
            text_color: text,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Round transport button on the player.
pub fn button_transport(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active => color::ACCENT,
        button::Status::Hovered => color::PRIMARY_HOVER,
        button::Status::Pressed => color::PRIMARY_PRESSED,
        button::Status::Disabled => color::SURFACE_HOVER,
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: color::TEXT_PRIMARY,
        border: Border {
            radius: radius::PILL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

// =============================================================================
// SLIDER STYLE
// =============================================================================

use iced::widget::slider;
use iced::widget::slider::{Handle, HandleShape, Rail as SliderRail};

/// Standard slider style (volume, seek).
pub fn slider_style(_theme: &Theme, status: slider::Status) -> slider::Style {
    let (rail_fill, handle_color) = match status {
        slider::Status::Active => (color::ACCENT, color::TEXT_PRIMARY),
        slider::Status::Hovered => (color::PRIMARY_HOVER, color::TEXT_PRIMARY),
        slider::Status::Dragged => (color::PRIMARY_PRESSED, color::TEXT_PRIMARY),
    };

    slider::Style {
        rail: SliderRail {
            backgrounds: (
                iced::Background::Color(rail_fill),
                iced::Background::Color(color::SURFACE_HOVER),
            ),
            width: 4.0,
            border: Border {
                radius: 2.0.into(),
                ..Default::default()
            },
        },
        handle: Handle {
            shape: HandleShape::Circle { radius: 6.0 },
            background: iced::Background::Color(handle_color),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
