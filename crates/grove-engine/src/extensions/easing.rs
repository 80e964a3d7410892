// extensions/easing.rs
//
// Pure easing functions for motion interpolation.
// No dependencies on creatures or the scene, just math.

use glam::Vec2;

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start and end: `2p²` below one half, `-1 + (4 - 2p)p` above.
    QuadInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Both curves stay inside [0, 1] and never decrease.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Interpolate Vec2 with easing.
#[inline]
pub fn ease_vec2(a: Vec2, b: Vec2, t: f32, easing: Easing) -> Vec2 {
    lerp_vec2(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn quad_in_out_matches_curve() {
        assert_eq!(Easing::QuadInOut.apply(0.0), 0.0);
        assert!((Easing::QuadInOut.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(0.75) - 0.875).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quad_in_out_is_monotonic_without_overshoot() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = Easing::QuadInOut.apply(i as f32 / 1000.0);
            assert!(v >= prev, "curve decreased at step {}", i);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::QuadInOut.apply(-0.5), 0.0);
        assert!((Easing::QuadInOut.apply(1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_vec2_interpolates() {
        let v = ease_vec2(Vec2::new(42.0, 180.0), Vec2::new(142.0, 180.0), 0.25, Easing::Linear);
        assert_eq!(v, Vec2::new(67.0, 180.0));
        let v = ease_vec2(Vec2::ZERO, Vec2::new(10.0, -10.0), 0.5, Easing::QuadInOut);
        assert!((v - Vec2::new(5.0, -5.0)).length() < 1e-5);
    }
}
