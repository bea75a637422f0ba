use serde::{Deserialize, Serialize};

use crate::*;

/// Screen-space point or vector, `y` grows downwards.
pub type Vec2 = (f32, f32);

/// A completed pointer fling: where it started, where it was released and how fast it moved.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fling {
    pub start: Vec2,
    pub end: Vec2,
    pub velocity: Vec2,
}

/// Minimum travel (pixels) and speed (pixels per second) for a fling to count as a swipe.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    pub distance: f32,
    pub velocity: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance: 100.0,
            velocity: 100.0,
        }
    }
}

fn magnitude(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

impl Fling {
    pub fn new(start: Vec2, end: Vec2, velocity: Vec2) -> Self {
        Self {
            start,
            end,
            velocity,
        }
    }

    /// Maps the fling to a swipe direction, `None` when it is too short or too slow.
    ///
    /// The dominant axis is the one with the larger displacement, a perfect diagonal counts as vertical.
    pub fn classify(&self, thresholds: &GestureThresholds) -> Option<Direction> {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        let (vx, vy) = self.velocity;

        let (delta, speed, negative, positive) = if magnitude(dx) > magnitude(dy) {
            (dx, vx, Direction::Left, Direction::Right)
        } else {
            (dy, vy, Direction::Up, Direction::Down)
        };

        if magnitude(delta) > thresholds.distance && magnitude(speed) > thresholds.velocity {
            Some(if delta > 0.0 { positive } else { negative })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(dx: f32, dy: f32, vx: f32, vy: f32) -> Option<Direction> {
        Fling::new((200.0, 200.0), (200.0 + dx, 200.0 + dy), (vx, vy))
            .classify(&GestureThresholds::default())
    }

    #[test]
    fn straight_swipes() {
        assert_eq!(classify(150.0, 0.0, 500.0, 0.0), Some(Direction::Right));
        assert_eq!(classify(-150.0, 0.0, -500.0, 0.0), Some(Direction::Left));
        assert_eq!(classify(0.0, 150.0, 0.0, 500.0), Some(Direction::Down));
        assert_eq!(classify(0.0, -150.0, 0.0, -500.0), Some(Direction::Up));
    }

    #[test]
    fn diagonal_resolves_to_larger_axis() {
        assert_eq!(classify(180.0, -120.0, 400.0, 400.0), Some(Direction::Right));
        assert_eq!(classify(-110.0, 170.0, 400.0, 400.0), Some(Direction::Down));
    }

    #[test]
    fn exact_diagonal_counts_as_vertical() {
        assert_eq!(classify(150.0, -150.0, 400.0, 400.0), Some(Direction::Up));
    }

    #[test]
    fn short_or_slow_flings_are_ignored() {
        assert_eq!(classify(100.0, 0.0, 500.0, 0.0), None);
        assert_eq!(classify(150.0, 0.0, 100.0, 0.0), None);
        assert_eq!(classify(150.0, 0.0, 0.0, 900.0), None);
        assert_eq!(classify(0.0, 0.0, 0.0, 0.0), None);
    }

    #[test]
    fn thresholds_are_independent() {
        let thresholds = GestureThresholds {
            distance: 20.0,
            velocity: 800.0,
        };
        let short_fast = Fling::new((0.0, 0.0), (30.0, 0.0), (900.0, 0.0));
        let short_slow = Fling::new((0.0, 0.0), (30.0, 0.0), (500.0, 0.0));

        assert_eq!(short_fast.classify(&thresholds), Some(Direction::Right));
        assert_eq!(short_slow.classify(&thresholds), None);
    }

    #[test]
    fn nan_never_classifies() {
        assert_eq!(classify(f32::NAN, 0.0, 500.0, 0.0), None);
    }
}
