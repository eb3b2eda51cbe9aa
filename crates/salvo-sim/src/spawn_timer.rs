//! Bounded-random interval source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use salvo_core::types::SpawnTiming;

/// Draws spawn intervals from an injectable randomness source.
#[derive(Debug, Clone)]
pub struct SpawnTimer<R = ChaCha8Rng> {
    rng: R,
}

impl SpawnTimer<ChaCha8Rng> {
    /// Deterministic timer. Same seed = same interval sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnTimer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Next wait in seconds, never below `timing.minimum`.
    pub fn next(&mut self, timing: &SpawnTiming) -> f64 {
        draw_interval(&mut self.rng, timing)
    }
}

/// Uniform draw in `[base - variance, base + variance]`, then floored at
/// `minimum`. Out-of-range draws are clamped, never re-rolled.
pub fn draw_interval<R: Rng + ?Sized>(rng: &mut R, timing: &SpawnTiming) -> f64 {
    let (low, high) = (timing.low(), timing.high());
    let raw = if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    };
    raw.max(timing.minimum)
}
