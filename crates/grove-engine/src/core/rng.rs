//! Random sources for behaviour timing and spawn decisions.
//!
//! The scene never reaches for a global generator: every draw goes through a
//! [`RandomSource`] handed to it by the host, so tests can replay exact
//! sequences with [`SequenceRandom`].

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `[lo, hi)`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
/// Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Every draw returns the same value.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_f32(), rng2.next_f32());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        // Should not panic or get stuck at zero
        let draws: Vec<f32> = (0..4).map(|_| rng.next_f32()).collect();
        assert!(draws.iter().any(|&d| d > 0.0));
    }

    #[test]
    fn rng_stays_in_unit_interval() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "draw out of range: {}", v);
        }
    }

    #[test]
    fn range_maps_draws() {
        let mut seq = SequenceRandom::new(vec![0.0, 0.5]);
        assert_eq!(seq.range(3000.0, 7000.0), 3000.0);
        assert_eq!(seq.range(3000.0, 7000.0), 5000.0);
    }

    #[test]
    fn sequence_cycles_and_clamps() {
        let mut seq = SequenceRandom::new(vec![0.25, 2.0]);
        assert_eq!(seq.next_f32(), 0.25);
        assert!(seq.next_f32() < 1.0);
        assert_eq!(seq.next_f32(), 0.25);
        assert!(seq.next_f32() < 1.0);
    }
}
