use crate::{
    error::{GeneticError, Result},
    gene::Gene,
    rng::RandomNumberGenerator,
};

use super::Crossover;

/// Single-point crossover.
///
/// A crossover point is picked uniformly from `1..len`, so each offspring always
/// receives a non-empty prefix from one parent and a non-empty suffix from the
/// other. Parents with a single gene have no interior point and are returned as
/// their own offspring.
///
/// # Examples
///
/// ```
/// use evolvr::crossover::{Crossover, SinglePointCrossover};
/// use evolvr::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let (child1, child2) = SinglePointCrossover
///     .crossover(&[1, 2, 3, 4], &[5, 6, 7, 8], &mut rng)
///     .unwrap();
///
/// assert_eq!(child1.len(), 4);
/// assert_eq!(child1[0], 1);
/// assert_eq!(child2[0], 5);
/// assert_eq!(child1[3], 8);
/// assert_eq!(child2[3], 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene> Crossover<G> for SinglePointCrossover {
    fn crossover(
        &self,
        parent1: &[G],
        parent2: &[G],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<G>, Vec<G>)> {
        if parent1.is_empty() || parent2.is_empty() {
            return Err(GeneticError::crossover(
                "cannot perform crossover",
                GeneticError::invalid_chromosome("parent chromosomes cannot be empty"),
            ));
        }
        if parent1.len() != parent2.len() {
            return Err(GeneticError::crossover(
                "cannot perform crossover",
                GeneticError::invalid_chromosome(format!(
                    "parent chromosomes must be of the same length ({} != {})",
                    parent1.len(),
                    parent2.len()
                )),
            ));
        }

        let len = parent1.len();
        if len == 1 {
            return Ok((parent1.to_vec(), parent2.to_vec()));
        }

        let point = rng.gen_index(len - 1) + 1;

        let mut offspring1 = Vec::with_capacity(len);
        offspring1.extend_from_slice(&parent1[..point]);
        offspring1.extend_from_slice(&parent2[point..]);

        let mut offspring2 = Vec::with_capacity(len);
        offspring2.extend_from_slice(&parent2[..point]);
        offspring2.extend_from_slice(&parent1[point..]);

        Ok((offspring1, offspring2))
    }
}
