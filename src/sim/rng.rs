//! Injectable randomness
//!
//! Every random draw in the simulation (spawn position, word choice, impact
//! damage, particle scatter) goes through [`RandomSource`], so a run is fully
//! reproducible from its seed and tests can script exact values.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples over half-open ranges.
///
/// Empty or inverted ranges return `low` instead of panicking.
pub trait RandomSource {
    /// Uniform float in `[low, high)`
    fn range_f32(&mut self, low: f32, high: f32) -> f32;

    /// Uniform integer in `[low, high)`
    fn range_u32(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `[low, high)`
    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        let low32 = u32::try_from(low).unwrap_or(u32::MAX);
        let high32 = u32::try_from(high).unwrap_or(u32::MAX);
        self.range_u32(low32, high32) as usize
    }
}

/// Seeded PCG generator used for real runs
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..high)
    }

    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..high)
    }
}

/// Replays a fixed list of fractions in `[0, 1)`, cycling when exhausted.
///
/// Each draw maps the next fraction `f` onto the requested range as
/// `low + f * (high - low)` (floored for integers), which makes the outcome of
/// every draw predictable in tests.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    fractions: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(fractions: impl Into<Vec<f32>>) -> Self {
        let fractions = fractions
            .into()
            .into_iter()
            .map(|f| f.clamp(0.0, 0.999_999))
            .collect();
        Self {
            fractions,
            cursor: 0,
        }
    }

    /// Always returns the same fraction
    pub fn constant(fraction: f32) -> Self {
        Self::new(vec![fraction])
    }

    fn next_fraction(&mut self) -> f32 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let f = self.fractions[self.cursor % self.fractions.len()];
        self.cursor += 1;
        f
    }
}

impl RandomSource for ScriptedRandom {
    fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        let f = self.next_fraction();
        if low >= high {
            return low;
        }
        low + f * (high - low)
    }

    fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        let f = self.next_fraction();
        if low >= high {
            return low;
        }
        let span = (high - low) as f64;
        let offset = (f as f64 * span).floor() as u32;
        low + offset.min(high - low - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.range_u32(0, 1000), b.range_u32(0, 1000));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_empty_ranges_return_low() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.range_u32(7, 7), 7);
        assert_eq!(rng.range_f32(3.0, 3.0), 3.0);
        assert_eq!(rng.range_usize(9, 2), 9);
    }

    #[test]
    fn test_scripted_maps_fractions() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(rng.range_u32(5, 10), 5);
        assert_eq!(rng.range_u32(5, 10), 7);
        assert_eq!(rng.range_u32(5, 10), 9);
        // cycles
        assert_eq!(rng.range_f32(0.0, 10.0), 0.0);
    }

    proptest! {
        #[test]
        fn seeded_stays_in_bounds(seed in any::<u64>(), low in 0u32..500, span in 1u32..500) {
            let mut rng = SeededRandom::new(seed);
            for _ in 0..50 {
                let v = rng.range_u32(low, low + span);
                prop_assert!(v >= low && v < low + span);
                let f = rng.range_f32(low as f32, (low + span) as f32);
                prop_assert!(f >= low as f32 && f < (low + span) as f32);
            }
        }

        #[test]
        fn scripted_stays_in_bounds(f in 0.0f32..1.0, low in 0u32..500, span in 1u32..500) {
            let mut rng = ScriptedRandom::constant(f);
            let v = rng.range_u32(low, low + span);
            prop_assert!(v >= low && v < low + span);
        }
    }
}
