//! # FitnessEvaluator
//!
//! The `FitnessEvaluator` trait maps a chromosome to a scalar fitness. The
//! executor calls it once per individual on every fitness refresh, possibly from
//! several worker threads at once.
pub mod sum;

use crate::{cancellation::CancellationToken, error::Result, gene::Gene};

/// Scores chromosomes. Higher fitness is better.
///
/// Implementations must:
/// - reject an empty chromosome with an error instead of scoring it,
/// - observe `token` before starting and inside any per-gene loop, returning an
///   error that wraps [`GeneticError::Cancelled`](crate::error::GeneticError::Cancelled)
///   once it is cancelled.
///
/// ## Example
///
/// ```rust
/// use evolvr::cancellation::CancellationToken;
/// use evolvr::error::{GeneticError, Result};
/// use evolvr::fitness::FitnessEvaluator;
///
/// struct CountOnes;
///
/// impl FitnessEvaluator<u8> for CountOnes {
///     fn evaluate(&self, token: &CancellationToken, chromosome: &[u8]) -> Result<f64> {
///         token.check()?;
///         if chromosome.is_empty() {
///             return Err(GeneticError::invalid_chromosome("empty chromosome found"));
///         }
///         Ok(chromosome.iter().filter(|&&gene| gene == 1).count() as f64)
///     }
/// }
///
/// let score = CountOnes.evaluate(&CancellationToken::new(), &[1, 0, 1]).unwrap();
/// assert_eq!(score, 2.0);
/// ```
pub trait FitnessEvaluator<G: Gene>: Send + Sync {
    fn evaluate(&self, token: &CancellationToken, chromosome: &[G]) -> Result<f64>;
}

pub use sum::SumFitnessEvaluator;
