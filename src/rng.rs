//! # RandomNumberGenerator
//!
//! Every stochastic operation in this crate takes an explicit generator, so a run can
//! be reproduced by seeding it. `RandomNumberGenerator` wraps the `rand` crate's
//! `StdRng` and exposes the handful of draws the search operators need.
//!
//! ## Example
//!
//! ```rust
//! use encoding_ga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let idx = rng.gen_index(10);
//! assert!(idx < 10);
//!
//! let coin = rng.gen_bool(0.5);
//! # let _ = coin;
//! ```
//!
//! ## Thread-local RNG
//!
//! Test functions such as the noisy quartic add noise inside `evaluate(&self, ..)`
//! where no generator is threaded through. They draw from `ThreadLocalRng`:
//!
//! ```rust
//! use encoding_ga::rng::ThreadLocalRng;
//!
//! let noise = ThreadLocalRng::gen_range(0.0..1.0);
//! assert!((0.0..1.0).contains(&noise));
//! ```

use rand::{rngs::StdRng, thread_rng, Rng, RngCore, SeedableRng};

/// Access to the `rand` crate's thread-local generator.
pub struct ThreadLocalRng;

impl ThreadLocalRng {
    /// Generates a random number in the given range.
    pub fn gen_range<T, R>(range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        thread_rng().gen_range(range)
    }
}

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`. `len` must be positive.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform draw from `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.gen_probability() < p.clamp(0.0, 1.0)
    }

    /// Derives an independent generator, e.g. one per trial.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.next_u64())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
