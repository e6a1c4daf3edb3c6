//! Tie-break jitter
//!
//! A small random amount in `[0, 5)` is added to every crop's score so that
//! repeated identical queries do not always return the same ordering among
//! near-equal crops. The source is injected so scoring stays testable:
//! `NoJitter` for deterministic runs, `RandomJitter::seeded` for reproducible
//! randomness, `RandomJitter::from_entropy` for production.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Exclusive upper bound of a jitter sample
pub const MAX_JITTER: f64 = 5.0;

/// Source of per-crop score perturbations
pub trait Jitter {
    /// Next perturbation, in `[0, MAX_JITTER)`
    fn sample(&mut self) -> f64;
}

/// Always zero; rankings depend only on the deterministic score
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

/// Uniform jitter drawn from an owned generator
#[derive(Debug, Clone)]
pub struct RandomJitter<R: Rng = StdRng> {
    rng: R,
}

impl RandomJitter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(0.0..MAX_JITTER)
    }
}

/// How a caller wants jitter generated for a run of recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JitterMode {
    Disabled,
    /// Stream `i` is seeded with `seed + i`
    Seeded(u64),
    #[default]
    Entropy,
}

impl JitterMode {
    /// Fresh jitter source for one recommendation; never shared between calls
    pub fn source(&self, stream: u64) -> Box<dyn Jitter + Send> {
        match self {
            JitterMode::Disabled => Box::new(NoJitter),
            JitterMode::Seeded(seed) => Box::new(RandomJitter::seeded(seed.wrapping_add(stream))),
            JitterMode::Entropy => Box::new(RandomJitter::from_entropy()),
        }
    }
}
