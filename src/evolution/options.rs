//! # ExecutorOptions
//!
//! The `ExecutorOptions` struct holds the run configuration of a
//! [`GeneticAlgorithmExecutor`](crate::evolution::GeneticAlgorithmExecutor): the
//! number of generations, how many work units the parallel stages may run at
//! once, the mutation probability and an optional seed.
//!
//! ## Example
//!
//! ```rust
//! use evolvr::evolution::options::{ExecutorOptions, WorkerLimit};
//!
//! // Create a new ExecutorOptions instance with custom parameters
//! let custom_options = ExecutorOptions::new(200, WorkerLimit::bounded(4).unwrap());
//!
//! // Create a new ExecutorOptions instance with default parameters
//! let default_options = ExecutorOptions::default();
//! assert_eq!(default_options.get_workers(), WorkerLimit::default());
//!
//! // Or use the builder
//! let options = ExecutorOptions::builder()
//!     .generations(50)
//!     .workers(WorkerLimit::Unbounded)
//!     .mutation_probability(0.05)
//!     .seed(42)
//!     .build();
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Worker limits
//!
//! - `WorkerLimit::Bounded(n)`: at most `n` individuals are evaluated or mutated
//!   at the same time. The default is a single worker.
//! - `WorkerLimit::Unbounded`: every individual gets its own worker thread for
//!   the duration of the stage, so all units are in flight together.

use std::num::NonZeroUsize;

use crate::error::{GeneticError, Result};
use crate::mutation::swap::DEFAULT_MUTATION_PROBABILITY;

/// How many units of work the parallel stages may run concurrently.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerLimit {
    Bounded(NonZeroUsize),
    Unbounded,
}

impl WorkerLimit {
    /// Sentinel worker count meaning "no limit".
    pub const UNBOUNDED_SENTINEL: i64 = -1;

    /// Creates a bounded limit.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `workers` is 0.
    pub fn bounded(workers: usize) -> Result<Self> {
        NonZeroUsize::new(workers)
            .map(WorkerLimit::Bounded)
            .ok_or_else(|| {
                GeneticError::Configuration("Worker count must be at least 1".to_string())
            })
    }

    /// Interprets a signed worker count where `-1` means unbounded.
    ///
    /// ```rust
    /// use evolvr::evolution::options::WorkerLimit;
    ///
    /// assert_eq!(WorkerLimit::from_count(-1).unwrap(), WorkerLimit::Unbounded);
    /// assert_eq!(WorkerLimit::from_count(4).unwrap().limit(), Some(4));
    /// assert!(WorkerLimit::from_count(0).is_err());
    /// ```
    pub fn from_count(count: i64) -> Result<Self> {
        if count == Self::UNBOUNDED_SENTINEL {
            return Ok(WorkerLimit::Unbounded);
        }
        let workers = usize::try_from(count).map_err(|_| {
            GeneticError::Configuration(format!(
                "Worker count must be positive or {} for unbounded, but was {}",
                Self::UNBOUNDED_SENTINEL,
                count
            ))
        })?;
        Self::bounded(workers)
    }

    /// Returns the cap, or `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            WorkerLimit::Bounded(workers) => Some(workers.get()),
            WorkerLimit::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, WorkerLimit::Unbounded)
    }
}

impl Default for WorkerLimit {
    fn default() -> Self {
        WorkerLimit::Bounded(NonZeroUsize::MIN)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOptions {
    generations: usize,
    workers: WorkerLimit,
    mutation_probability: f64,
    /// Seed for the executor's random number generator; entropy when `None`.
    seed: Option<u64>,
}

impl ExecutorOptions {
    pub fn new(generations: usize, workers: WorkerLimit) -> Self {
        Self {
            generations,
            workers,
            ..Self::default()
        }
    }

    /// Checks the options for values the executor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.mutation_probability.is_finite()
            || !(0.0..=1.0).contains(&self.mutation_probability)
        {
            return Err(GeneticError::Configuration(format!(
                "Mutation probability must be within [0, 1], but was {}",
                self.mutation_probability
            )));
        }
        Ok(())
    }

    pub fn get_generations(&self) -> usize {
        self.generations
    }

    pub fn get_workers(&self) -> WorkerLimit {
        self.workers
    }

    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the number of generations.
    pub fn set_generations(&mut self, generations: usize) {
        self.generations = generations;
    }

    /// Sets the worker limit.
    pub fn set_workers(&mut self, workers: WorkerLimit) {
        self.workers = workers;
    }

    /// Sets the mutation probability.
    pub fn set_mutation_probability(&mut self, probability: f64) {
        self.mutation_probability = probability;
    }

    /// Sets the seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating an `ExecutorOptions` instance.
    pub fn builder() -> ExecutorOptionsBuilder {
        ExecutorOptionsBuilder::default()
    }
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            generations: 100,
            workers: WorkerLimit::default(),
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            seed: None,
        }
    }
}

/// Builder for `ExecutorOptions`.
///
/// Provides a fluent interface for constructing `ExecutorOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct ExecutorOptionsBuilder {
    generations: Option<usize>,
    workers: Option<WorkerLimit>,
    mutation_probability: Option<f64>,
    seed: Option<u64>,
}

impl ExecutorOptionsBuilder {
    /// Sets the number of generations.
    pub fn generations(mut self, value: usize) -> Self {
        self.generations = Some(value);
        self
    }

    /// Sets the worker limit.
    pub fn workers(mut self, value: WorkerLimit) -> Self {
        self.workers = Some(value);
        self
    }

    /// Sets the mutation probability.
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `ExecutorOptions` instance.
    pub fn build(self) -> ExecutorOptions {
        let default = ExecutorOptions::default();
        ExecutorOptions {
            generations: self.generations.unwrap_or(default.generations),
            workers: self.workers.unwrap_or(default.workers),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(default.mutation_probability),
            seed: self.seed,
        }
    }
}
