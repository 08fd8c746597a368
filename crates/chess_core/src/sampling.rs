//! Bounded random sampling shared by every engine.
//!
//! Engines look at a random subset of candidate moves instead of the full
//! list. The [`Sampler`] trait is the injection point: real play uses a
//! [`RandomSampler`], tests and reproducible analysis use a seeded one or
//! [`InOrderSampler`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Uniform sample without replacement of `min(count, items.len())` elements.
/// The order of the result is unspecified.
pub fn sample<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    items.choose_multiple(rng, count).cloned().collect()
}

pub trait Sampler {
    /// Draws `min(count, items.len())` distinct elements.
    fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T>;

    /// One element, or `None` for an empty slice.
    fn choose<T: Clone>(&mut self, items: &[T]) -> Option<T> {
        self.sample(items, 1).into_iter().next()
    }
}

/// Sampler backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomSampler<R = StdRng> {
    rng: R,
}

impl RandomSampler<StdRng> {
    /// Deterministic stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomSampler<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore> Sampler for RandomSampler<R> {
    fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        sample(&mut self.rng, items, count)
    }
}

/// Takes the first `count` items in their given order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrderSampler;

impl Sampler for InOrderSampler {
    fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        items.iter().take(count).cloned().collect()
    }
}

#[cfg(test)]
#[path = "sampling_tests.rs"]
mod sampling_tests;
