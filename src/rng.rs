//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a `StdRng` from the `rand` crate and
//! exposes the handful of draws the genetic operators need: uniform indices,
//! Bernoulli gates and whole-slice shuffles.
//!
//! ## Example
//!
//! ```rust
//! use evolvr::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let index = rng.gen_index(10);
//! assert!(index < 10);
//!
//! let mut genes = vec![1, 2, 3, 4];
//! rng.shuffle(&mut genes);
//! genes.sort();
//! assert_eq!(genes, vec![1, 2, 3, 4]);
//! ```
//!
//! ## Parallel work
//!
//! Work units running on worker threads must not share one generator. The
//! executor hands each unit its own generator obtained through
//! [`RandomNumberGenerator::fork`], so a seeded run gives the same result no
//! matter how the units are scheduled.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Debug, Clone)]
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

    /// Returns a uniformly distributed index in `0..upper`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero. Callers validate their ranges first.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below zero never fire and probabilities at or above one
    /// always fire.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    /// Shuffles `items` uniformly in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Derives an independent generator seeded from this one.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.next_u64())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
