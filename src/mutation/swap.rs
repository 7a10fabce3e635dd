//! # SwapMutator
//!
//! Swaps the genes at two distinct, uniformly chosen positions. The chromosome
//! keeps exactly the same multiset of genes, which makes this operator valid for
//! any gene type, including permutation encodings.
use crate::{
    cancellation::CancellationToken,
    error::{GeneticError, Result},
    gene::Gene,
    rng::RandomNumberGenerator,
};

use super::Mutator;

/// Probability used by [`SwapMutator::default`].
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.01;

/// Single-swap mutation.
///
/// The mutator itself is stateless apart from a default probability that
/// standalone callers can use through [`SwapMutator::mutate_default`]; the
/// executor always passes its configured probability explicitly.
///
/// ## Example
///
/// ```rust
/// use evolvr::cancellation::CancellationToken;
/// use evolvr::mutation::{Mutator, SwapMutator};
/// use evolvr::rng::RandomNumberGenerator;
///
/// let mut chromosome = vec![1, 2, 3, 4];
/// let mut rng = RandomNumberGenerator::from_seed(11);
///
/// SwapMutator::default()
///     .mutate(&CancellationToken::new(), &mut chromosome, 1.0, &mut rng)
///     .unwrap();
///
/// let changed = chromosome.iter().zip([1, 2, 3, 4]).filter(|(a, b)| **a != *b).count();
/// assert_eq!(changed, 2);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutator {
    default_probability: f64,
}

impl SwapMutator {
    /// Creates a swap mutator whose default probability is `default_probability`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the probability is not a finite value in
    /// `[0, 1]`.
    pub fn new(default_probability: f64) -> Result<Self> {
        if !default_probability.is_finite() || !(0.0..=1.0).contains(&default_probability) {
            return Err(GeneticError::Configuration(format!(
                "Mutation probability must be within [0, 1], but was {}",
                default_probability
            )));
        }
        Ok(Self {
            default_probability,
        })
    }

    pub fn default_probability(&self) -> f64 {
        self.default_probability
    }

    /// Mutates `chromosome` using the mutator's own default probability.
    pub fn mutate_default<G: Gene>(
        &self,
        token: &CancellationToken,
        chromosome: &mut [G],
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        self.mutate(token, chromosome, self.default_probability, rng)
    }
}

impl Default for SwapMutator {
    fn default() -> Self {
        Self {
            default_probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }
}

impl<G: Gene> Mutator<G> for SwapMutator {
    fn mutate(
        &self,
        token: &CancellationToken,
        chromosome: &mut [G],
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        if chromosome.is_empty() {
            return Err(GeneticError::mutation(
                "cannot mutate chromosome",
                GeneticError::invalid_chromosome("empty chromosome found"),
            ));
        }
        if chromosome.len() < 2 {
            return Err(GeneticError::mutation(
                "cannot mutate chromosome",
                GeneticError::invalid_chromosome("chromosome must contain at least two genes"),
            ));
        }
        if !rng.gen_bool(probability) {
            return Ok(());
        }

        token
            .check()
            .map_err(|e| GeneticError::mutation("context cancelled", e))?;

        let n = chromosome.len();
        let first = rng.gen_index(n);
        let mut second = rng.gen_index(n - 1);
        if second == first {
            second += 1;
        }

        chromosome.swap(first, second);
        Ok(())
    }
}
