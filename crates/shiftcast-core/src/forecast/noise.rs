//! Injectable jitter sources for generators.
//!
//! Generators never reach for a global RNG. They draw from a [`NoiseSource`]
//! handed in by the caller, so a fixed seed (or no noise at all) makes a
//! series fully reproducible.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

/// A stream of jitter samples in `[-1.0, 1.0]`.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// PCG-backed noise, seeded for reproducibility or from OS entropy.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: Mcg128Xsl64,
}

impl SeededNoise {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(-1.0..=1.0)
    }
}

/// No jitter at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NoiseSource for Silent {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

/// The same jitter sample every time, clamped to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub f64);

impl NoiseSource for Constant {
    fn next_unit(&mut self) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}

/// Noise settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Fixed seed for reproducible jitter; absent means OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NoiseConfig {
    pub fn source(&self) -> SeededNoise {
        match self.seed {
            Some(seed) => SeededNoise::from_seed(seed),
            None => SeededNoise::from_entropy(),
        }
    }
}
