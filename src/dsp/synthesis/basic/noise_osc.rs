//! Primitive white noise oscillator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A seeded white noise oscillator.
///
/// Two oscillators built from the same seed produce the same sequence, which
/// keeps the engine's output reproducible.
#[derive(Debug, Clone)]
pub struct NoiseOsc {
    rng: SmallRng,
}

impl NoiseOsc {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Produces a single noise sample at 0.0 dBFS, in `-1.0..1.0`.
    pub fn next(&mut self) -> f64 {
        self.rng.random::<f64>().mul_add(2.0, -1.0)
    }
}
