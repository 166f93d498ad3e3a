//! Channel noise model: additive Gaussian noise plus a causal first-order
//! smoothing filter, both applied in place and independent of the scheme.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::{NOISE_FILTER_ALPHA, NOISE_LEVEL};

pub struct Channel {
    noise_level: f64,
    alpha: f64,
    rng: StdRng,
}

impl Channel {
    /// Channel with a reproducible noise source.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Channel seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            noise_level: NOISE_LEVEL,
            alpha: NOISE_FILTER_ALPHA,
            rng,
        }
    }

    /// Add an independent zero-mean Gaussian draw to every sample in place.
    pub fn add_noise(&mut self, signal: &mut [f64]) {
        for sample in signal.iter_mut() {
            let draw: f64 = StandardNormal.sample(&mut self.rng);
            *sample += draw * self.noise_level;
        }
    }

    /// Causal exponential smoothing, in place. The first sample is kept;
    /// each later sample blends the current raw value with the previous
    /// raw value — the carry term is the unfiltered neighbour, not the
    /// filter's own previous output.
    pub fn filter_noise(&self, signal: &mut [f64]) {
        if signal.is_empty() {
            return;
        }
        let mut previous = signal[0];
        for index in 1..signal.len() {
            let current = signal[index];
            signal[index] = self.alpha * current + (1.0 - self.alpha) * previous;
            previous = current;
        }
    }
}
