//! # Solution
//!
//! A `Solution` pairs a chromosome with its cached fitness. The fitness is only
//! meaningful right after an evaluation: it starts at `0.0` and goes stale as
//! soon as the chromosome is changed, until the next fitness refresh.

use crate::gene::Gene;

/// A single candidate solution: a chromosome and its last computed fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<G> {
    /// The genetic material of the solution.
    pub chromosome: Vec<G>,
    /// Higher values indicate better solutions.
    pub fitness: f64,
}

impl<G: Gene> Solution<G> {
    /// Creates a solution with the given chromosome and a fitness of `0.0`.
    pub fn new(chromosome: Vec<G>) -> Self {
        Self {
            chromosome,
            fitness: 0.0,
        }
    }

    /// Creates a solution with an empty chromosome.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a solution whose `length` genes are produced by `gen`.
    ///
    /// ```rust
    /// use evolvr::solution::Solution;
    ///
    /// let mut next = 0;
    /// let solution = Solution::random(3, || { next += 1; next });
    /// assert_eq!(solution.chromosome, vec![1, 2, 3]);
    /// ```
    pub fn random<F>(length: usize, gen: F) -> Self
    where
        F: FnMut() -> G,
    {
        Self::new(std::iter::repeat_with(gen).take(length).collect())
    }

    /// Returns a copy with its own chromosome storage.
    ///
    /// Used wherever an individual moves into another pool (elites, tournament
    /// winners) so that in-place mutation of one copy never shows up in another.
    pub fn deep_copy(&self) -> Self {
        Self {
            chromosome: self.chromosome.to_vec(),
            fitness: self.fitness,
        }
    }

    pub fn chromosome(&self) -> &[G] {
        &self.chromosome
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of genes in the chromosome.
    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }
}

impl<G: Gene> From<Vec<G>> for Solution<G> {
    fn from(chromosome: Vec<G>) -> Self {
        Self::new(chromosome)
    }
}
