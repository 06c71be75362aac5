//! Toast notification component for non-blocking user feedback.
//!
//! Toasts are ephemeral messages that appear at the bottom of the screen
//! and auto-dismiss after a configurable duration.
//!
//! # Example
//! ```ignore
//! state.toasts.error("Audio output unavailable");
//! state.toasts.warning("Showcase has no gallery items");
//! ```

use crate::ui::messages::Message;
use crate::ui::theme::{self, color, spacing, typography};
use iced::widget::{Space, button, container, row, text};
use iced::{Element, Length, Padding};
use std::time::{Duration, Instant};

/// Duration before toasts auto-dismiss
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Maximum number of visible toasts at once
pub const MAX_VISIBLE_TOASTS: usize = 5;

/// Toast severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    /// Marker glyph for this toast level
    fn glyph(&self) -> &'static str {
        match self {
            ToastLevel::Error => "✕",
            ToastLevel::Warning => "!",
            ToastLevel::Info => "i",
        }
    }

    /// Accent color for this toast level
    fn color(&self) -> iced::Color {
        match self {
            ToastLevel::Error => color::ERROR,
            ToastLevel::Warning => color::WARNING,
            ToastLevel::Info => color::ACCENT,
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique ID for this toast (for removal)
    id: u64,
    /// Severity level
    level: ToastLevel,
    /// Message to display
    message: String,
    /// When this toast was created
    created_at: Instant,
}

impl Toast {
    /// Create a new toast with auto-generated ID
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        Self {
            id: COUNTER.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    /// Check if this toast should be dismissed
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Container for managing multiple toasts
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Add a toast to the queue
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
        // Keep only the most recent toasts
        if self.toasts.len() > MAX_VISIBLE_TOASTS * 2 {
            self.toasts.drain(0..MAX_VISIBLE_TOASTS);
        }
    }

    /// Remove a toast by ID
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Remove all expired toasts
    pub fn remove_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Get visible toasts (most recent, up to MAX_VISIBLE_TOASTS)
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let start = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        self.toasts[start..].iter().filter(|t| !t.is_expired())
    }

    /// Convenience: add an error toast
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Error, message));
    }

    /// Convenience: add a warning toast
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Warning, message));
    }

    /// Convenience: add an info toast
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(ToastLevel::Info, message));
    }
}

/// Render a single toast notification
fn toast_view(toast: &Toast) -> Element<'_, Message> {
    let accent = toast.level.color();

    let glyph = text(toast.level.glyph())
        .size(typography::SIZE_BODY)
        .color(accent);

    let message_text = text(&toast.message)
        .size(typography::SIZE_BODY)
        .color(color::TEXT_PRIMARY);

    let dismiss_btn = button(text("×").size(typography::SIZE_BODY).color(color::TEXT_MUTED))
        .padding([spacing::XS, spacing::SM])
        .style(theme::button_ghost)
        .on_press(Message::ToastDismiss(toast.id));

    let content = row![
        glyph,
        Space::with_width(spacing::SM),
        message_text,
        Space::with_width(Length::Fill),
        dismiss_btn,
    ]
    .align_y(iced::Alignment::Center)
    .padding([spacing::SM, spacing::MD]);

    // Toast container with an accent border
    container(content)
        .width(Length::Fixed(400.0))
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(color::SURFACE_ELEVATED)),
            border: iced::Border {
                color: accent,
                width: 2.0,
                radius: 6.0.into(),
            },
            shadow: iced::Shadow {
                color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            ..Default::default()
        })
        .into()
}

/// Render the toast container overlay
/// This should be stacked on top of the main content
pub fn toast_overlay(queue: &ToastQueue) -> Option<Element<'_, Message>> {
    let toasts: Vec<_> = queue.visible().collect();

    if toasts.is_empty() {
        return None;
    }

    let toast_elements: Vec<Element<Message>> = toasts.iter().map(|t| toast_view(t)).collect();

    // Stack toasts in a column at the bottom-left, clear of the player
    let toast_column = iced::widget::column(toast_elements)
        .spacing(spacing::SM)
        .align_x(iced::Alignment::Start);

    let overlay = container(toast_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Left)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(Padding {
            top: 0.0,
            right: 0.0,
            bottom: spacing::XL as f32,
            left: spacing::XL as f32,
        });

    Some(overlay.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_remove() {
        let mut queue = ToastQueue::default();
        queue.error("one");
        queue.info("two");
        assert_eq!(queue.visible().count(), 2);

        let first_id = queue.toasts[0].id;
        queue.remove(first_id);
        assert_eq!(queue.visible().count(), 1);
        assert_eq!(queue.toasts[0].message, "two");
    }

    #[test]
    fn test_queue_caps_visible() {
        let mut queue = ToastQueue::default();
        for i in 0..20 {
            queue.info(format!("toast {i}"));
        }
        assert!(queue.visible().count() <= MAX_VISIBLE_TOASTS);
    }
}
