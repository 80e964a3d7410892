// extensions/tween.rs
//
// Tween: an eased straight-line path between two points.
// Holds no clock of its own: the scheduler reports progress and the
// owner samples the tween at that progress.
//
// Usage:
//   let tween = Tween::flight(current, target);
//   let motion = scheduler.animate(owner, tween.duration_ms);
//   // on each Frame { progress, .. }:
//   pos = tween.sample(progress);

use glam::Vec2;
use super::easing::{Easing, ease_vec2};

/// Milliseconds of flight per unit of distance.
pub const FLIGHT_MS_PER_UNIT: f32 = 10.0;
/// Shortest flight, however close the target.
pub const MIN_FLIGHT_MS: f32 = 1000.0;

/// A single eased motion from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    /// Duration in milliseconds.
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
        }
    }

    /// Flight path: quad ease-in-out, `max(1000, distance * 10)` ms long.
    pub fn flight(from: Vec2, to: Vec2) -> Self {
        let duration_ms = (from.distance(to) * FLIGHT_MS_PER_UNIT).max(MIN_FLIGHT_MS);
        Self::new(from, to, duration_ms, Easing::QuadInOut)
    }

    /// Position at normalized progress [0, 1].
    pub fn sample(&self, progress: f32) -> Vec2 {
        ease_vec2(self.from, self.to, progress, self.easing)
    }
}
