//! # Mutator
//!
//! The `Mutator` trait defines in-place chromosome mutation. The executor calls
//! it once per individual per generation, from worker threads, handing each call
//! its own random number generator.
pub mod swap;

use crate::{
    cancellation::CancellationToken, error::Result, gene::Gene, rng::RandomNumberGenerator,
};

/// Mutates a chromosome in place.
///
/// `probability` gates the whole call: with probability `1 - probability` the
/// call leaves the chromosome untouched and succeeds. Implementations observe
/// `token` before changing anything and return an error wrapping
/// [`GeneticError::Cancelled`](crate::error::GeneticError::Cancelled) once it is
/// cancelled.
pub trait Mutator<G: Gene>: Send + Sync {
    fn mutate(
        &self,
        token: &CancellationToken,
        chromosome: &mut [G],
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()>;
}

pub use swap::SwapMutator;
