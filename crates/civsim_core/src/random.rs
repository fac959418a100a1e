//! Injectable randomness
//!
//! Only the fantasy effects draw random samples. Everything goes through
//! [`RandomSource`] so a caller can pin the samples for replayable runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next(&mut self) -> f64 {
        (**self).next()
    }
}

/// Reproducible source backed by a seeded `SmallRng`
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Non-reproducible source seeded from the operating system
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: SmallRng,
}

impl EntropySource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same sample
///
/// `ConstantSource::neutral()` (0.5) makes mana storms cancel out and only
/// fires a snap when its probability is above one half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(f64);

impl ConstantSource {
    /// Samples are clamped into `[0, 1)`
    #[must_use]
    pub fn new(sample: f64) -> Self {
        let sample = if sample.is_finite() { sample } else { 0.5 };
        Self(sample.clamp(0.0, 1.0 - f64::EPSILON))
    }

    #[must_use]
    pub fn neutral() -> Self {
        Self(0.5)
    }
}

impl RandomSource for ConstantSource {
    fn next(&mut self) -> f64 {
        self.0
    }
}
