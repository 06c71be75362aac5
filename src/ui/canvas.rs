//! Level-bar visualization widget for the player.
//!
//! Draws the animated bars from [`LevelBars`] into a small canvas. The
//! data is pure decoration (see `player::visualization`); this just
//! renders whatever heights it is handed.

use iced::mouse::Cursor;
use iced::widget::canvas::{self, Canvas, Frame, Geometry};
use iced::{Element, Length, Point, Rectangle, Size, Theme};

use super::messages::Message;
use super::theme::color;
use crate::player::LevelBars;

/// Gap between bars, in pixels.
const BAR_GAP: f32 = 2.0;

/// Minimum visible sliver so the widget doesn't vanish at rest.
const MIN_BAR_HEIGHT: f32 = 2.0;

/// Canvas program rendering a row of level bars.
pub struct LevelBarsCanvas {
    levels: Vec<f32>,
}

impl LevelBarsCanvas {
    fn new(bars: &LevelBars, count: usize) -> Self {
        Self {
            levels: bars.levels().iter().copied().take(count).collect(),
        }
    }
}

impl canvas::Program<Message> for LevelBarsCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let count = self.levels.len().max(1) as f32;
        let bar_width = ((bounds.width - BAR_GAP * (count - 1.0)) / count).max(1.0);

        for (i, &level) in self.levels.iter().enumerate() {
            let height = (level * bounds.height).max(MIN_BAR_HEIGHT);
            let x = i as f32 * (bar_width + BAR_GAP);
            // Bars grow from the bottom edge
            frame.fill_rectangle(
                Point::new(x, bounds.height - height),
                Size::new(bar_width, height),
                color::TEXT_PRIMARY,
            );
        }

        vec![frame.into_geometry()]
    }
}

/// A fixed-size level-bar element showing the first `count` bars.
pub fn level_bars(bars: &LevelBars, count: usize, width: f32, height: f32) -> Element<'_, Message> {
    Canvas::new(LevelBarsCanvas::new(bars, count))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .into()
}
