//! Level-bar animation data for the player widget.
//!
//! The bars are decorative, not analytical: while a track plays each bar
//! takes a fresh random height every animation tick, and when playback
//! pauses they decay back to rest. The UI advances this once per
//! animation frame and only while the player is audible, so a paused
//! player schedules no work.

use rand::Rng;

/// Number of bars in the expanded player; the mini pill shows the first few.
pub const BAR_COUNT: usize = 15;

/// Per-tick decay factor while settling.
const SETTLE_FALLOFF: f32 = 0.6;

/// Heights below this snap to zero so settling terminates.
const REST_THRESHOLD: f32 = 0.02;

/// Animated bar heights, each in 0.0 - 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelBars {
    levels: [f32; BAR_COUNT],
}

impl Default for LevelBars {
    fn default() -> Self {
        Self {
            levels: [0.0; BAR_COUNT],
        }
    }
}

impl LevelBars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current heights, in 0.0 - 1.0.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// One animation tick while playing: every bar jumps to a new height.
    pub fn advance(&mut self) {
        let mut rng = rand::rng();
        for level in &mut self.levels {
            *level = rng.random_range(0.05..1.0);
        }
    }

    /// One animation tick while paused: bars decay toward rest.
    pub fn settle(&mut self) {
        for level in &mut self.levels {
            *level *= SETTLE_FALLOFF;
            if *level < REST_THRESHOLD {
                *level = 0.0;
            }
        }
    }

    /// True once every bar is at rest; the animation tick can stop.
    pub fn is_settled(&self) -> bool {
        self.levels.iter().all(|&l| l == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_settled() {
        let bars = LevelBars::new();
        assert!(bars.is_settled());
        assert!(bars.levels().iter().all(|&l| l == 0.0));
    }

    #[test]
    fn test_advance_stays_in_range() {
        let mut bars = LevelBars::new();
        for _ in 0..50 {
            bars.advance();
            assert!(bars.levels().iter().all(|&l| (0.0..=1.0).contains(&l)));
        }
        assert!(!bars.is_settled());
    }

    #[test]
    fn test_settle_reaches_rest() {
        let mut bars = LevelBars::new();
        bars.advance();

        // Falloff of 0.6 from a max of 1.0 crosses the rest threshold
        // well within 10 ticks.
        for _ in 0..10 {
            bars.settle();
        }
        assert!(bars.is_settled());
    }

    #[test]
    fn test_settle_is_monotonic() {
        let mut bars = LevelBars::new();
        bars.advance();
        let before = bars.levels().to_vec();
        bars.settle();
        for (b, a) in before.iter().zip(bars.levels()) {
            assert!(a <= b);
        }
    }
}
