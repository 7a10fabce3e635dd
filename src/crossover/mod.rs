//! # Crossover
//!
//! The `Crossover` trait recombines two parent chromosomes into two offspring.
//! The executor pairs up the selected population and calls it once per pair, on
//! the control thread.
pub mod single_point;

use crate::{error::Result, gene::Gene, rng::RandomNumberGenerator};

/// Recombines two parents into two offspring chromosomes.
///
/// Parents are borrowed; offspring are always freshly allocated, so the caller
/// may keep or drop the parents independently of the result.
pub trait Crossover<G: Gene>: Send + Sync {
    fn crossover(
        &self,
        parent1: &[G],
        parent2: &[G],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<G>, Vec<G>)>;
}

pub use single_point::SinglePointCrossover;
