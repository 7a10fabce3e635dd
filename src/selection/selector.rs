use crate::error::Result;
use crate::gene::Gene;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for selection operators in genetic algorithms.
///
/// A selector reads the current population, whose fitness values have just been
/// refreshed, and returns the population the next crossover stage works on.
/// Individuals placed in the returned population must be deep copies, since the
/// input and output populations are mutated independently afterwards.
///
/// # Examples
///
/// ```
/// use evolvr::population::Population;
/// use evolvr::rng::RandomNumberGenerator;
/// use evolvr::selection::{Selector, TournamentSelector};
/// use evolvr::solution::Solution;
///
/// let mut population = Population::new(vec![
///     Solution::new(vec![1, 2]),
///     Solution::new(vec![3, 4]),
///     Solution::new(vec![5, 6]),
/// ]);
/// for (solution, fitness) in population.individuals.iter_mut().zip([0.5, 0.8, 0.3]) {
///     solution.fitness = fitness;
/// }
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let selector = TournamentSelector::new(2, 1).unwrap();
/// let selected = selector.select(&population, &mut rng).unwrap();
///
/// assert_eq!(selected.len(), 3);
/// assert_eq!(selected.individuals[0].chromosome, vec![3, 4]);
/// ```
pub trait Selector<G: Gene>: Send + Sync {
    /// Selects a new population from `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The selector's configuration cannot be applied to a population of this size
    fn select(
        &self,
        population: &Population<G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>>;
}
