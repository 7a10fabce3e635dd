//! # Population
//!
//! The ordered collection of solutions evolved together in one generation.
//!
//! Every pipeline operation that needs individuals to work on rejects an empty
//! population with [`GeneticError::EmptyPopulation`] before doing anything else.
//!
//! ```rust
//! use evolvr::population::Population;
//! use evolvr::solution::Solution;
//!
//! let mut population = Population::new(vec![
//!     Solution::new(vec![1, 2]),
//!     Solution::new(vec![3, 4]),
//! ]);
//! population.individuals[1].fitness = 7.0;
//!
//! assert_eq!(population.best_fitness().unwrap(), 7.0);
//! assert_eq!(population.best_solution().unwrap().chromosome, vec![3, 4]);
//! ```

use crate::error::{GeneticError, Result};
use crate::gene::Gene;
use crate::solution::Solution;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G> {
    pub individuals: Vec<Solution<G>>,
}

impl<G: Gene> Population<G> {
    pub fn new(individuals: Vec<Solution<G>>) -> Self {
        Self { individuals }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates `size` individuals with `chromosome_length` genes each, drawn
    /// from `gen`. Fitness starts at `0.0` for everyone.
    pub fn random<F>(size: usize, chromosome_length: usize, mut gen: F) -> Self
    where
        F: FnMut() -> G,
    {
        let individuals = (0..size)
            .map(|_| Solution::random(chromosome_length, &mut gen))
            .collect();
        Self::new(individuals)
    }

    /// Returns the individual with the highest fitness. Among equal fitness
    /// values the earliest individual wins.
    pub fn best_solution(&self) -> Result<&Solution<G>> {
        let (first, rest) = self
            .individuals
            .split_first()
            .ok_or(GeneticError::EmptyPopulation)?;

        Ok(rest.iter().fold(first, |best, candidate| {
            if candidate.fitness > best.fitness {
                candidate
            } else {
                best
            }
        }))
    }

    /// Returns the fitness of [`best_solution`](Self::best_solution).
    pub fn best_fitness(&self) -> Result<f64> {
        self.best_solution().map(|best| best.fitness)
    }

    /// Fails with [`GeneticError::EmptyPopulation`] if there are no individuals.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Solution<G>] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Solution<G>] {
        &mut self.individuals
    }

    pub fn into_individuals(self) -> Vec<Solution<G>> {
        self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution<G>> {
        self.individuals.iter()
    }

    /// Sum of the cached fitness values.
    pub fn total_fitness(&self) -> f64 {
        self.individuals.iter().map(|solution| solution.fitness).sum()
    }
}

impl<G: Gene> Default for Population<G> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<G: Gene> From<Vec<Solution<G>>> for Population<G> {
    fn from(individuals: Vec<Solution<G>>) -> Self {
        Self::new(individuals)
    }
}

impl<G: Gene> FromIterator<Solution<G>> for Population<G> {
    fn from_iter<I: IntoIterator<Item = Solution<G>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, G: Gene> IntoIterator for &'a Population<G> {
    type Item = &'a Solution<G>;
    type IntoIter = std::slice::Iter<'a, Solution<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
