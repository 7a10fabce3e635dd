//! # SumFitnessEvaluator
//!
//! Baseline evaluator that scores a chromosome as the sum of its genes. Useful
//! for tests and as a reference for writing real evaluators.
use crate::{
    cancellation::CancellationToken,
    error::{GeneticError, Result},
    gene::{Gene, ToFitness},
};

use super::FitnessEvaluator;

/// Fitness is the sum of every gene converted to `f64`.
///
/// ```rust
/// use evolvr::cancellation::CancellationToken;
/// use evolvr::fitness::{FitnessEvaluator, SumFitnessEvaluator};
///
/// let token = CancellationToken::new();
/// let fitness = SumFitnessEvaluator.evaluate(&token, &[1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(fitness, 15.0);
///
/// let empty: [i32; 0] = [];
/// assert!(SumFitnessEvaluator.evaluate(&token, &empty).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SumFitnessEvaluator;

impl SumFitnessEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl<G> FitnessEvaluator<G> for SumFitnessEvaluator
where
    G: Gene + ToFitness,
{
    fn evaluate(&self, token: &CancellationToken, chromosome: &[G]) -> Result<f64> {
        token
            .check()
            .map_err(|e| GeneticError::fitness_evaluation("context cancelled", e))?;

        if chromosome.is_empty() {
            return Err(GeneticError::fitness_evaluation(
                "cannot calculate fitness",
                GeneticError::invalid_chromosome("empty chromosome found"),
            ));
        }

        let mut sum = 0.0;
        for gene in chromosome {
            token
                .check()
                .map_err(|e| GeneticError::fitness_evaluation("context cancelled", e))?;

            let value = gene.to_fitness().map_err(|e| {
                GeneticError::fitness_evaluation(
                    format!("invalid chromosome value {:?}", gene),
                    GeneticError::InvalidChromosome {
                        message: "unable to convert chromosome value to f64".to_string(),
                        source: Some(e),
                    },
                )
            })?;
            sum += value;
        }

        Ok(sum)
    }
}
