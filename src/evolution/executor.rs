//! # GeneticAlgorithmExecutor
//!
//! The executor owns a population and drives it through the generation
//! pipeline:
//!
//! 1. refresh the fitness of every individual, concurrently
//! 2. read the best fitness and report progress
//! 3. replace the population with the selector's output
//! 4. shuffle, pair, and replace the population with the crossover offspring
//! 5. mutate every offspring, concurrently
//!
//! After the last generation one more fitness refresh runs so the returned
//! population carries current fitness values.
//!
//! ## Example
//!
//! ```rust
//! use evolvr::cancellation::CancellationToken;
//! use evolvr::crossover::SinglePointCrossover;
//! use evolvr::evolution::{ExecutorOptions, GeneticAlgorithmExecutor, WorkerLimit};
//! use evolvr::fitness::SumFitnessEvaluator;
//! use evolvr::mutation::SwapMutator;
//! use evolvr::population::Population;
//! use evolvr::rng::RandomNumberGenerator;
//! use evolvr::selection::TournamentSelector;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let population = Population::random(20, 8, || rng.gen_index(10) as i64);
//!
//! let options = ExecutorOptions::builder()
//!     .generations(10)
//!     .workers(WorkerLimit::bounded(4).unwrap())
//!     .seed(7)
//!     .build();
//!
//! let mut executor = GeneticAlgorithmExecutor::new(
//!     population,
//!     SumFitnessEvaluator,
//!     SwapMutator::default(),
//!     TournamentSelector::new(3, 2).unwrap(),
//!     SinglePointCrossover,
//!     options,
//! )
//! .unwrap();
//!
//! let population = executor.run(&CancellationToken::new()).unwrap();
//! assert_eq!(population.len(), 20);
//! assert!(population.best_fitness().unwrap() >= 0.0);
//! ```

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::cancellation::CancellationToken;
use crate::crossover::Crossover;
use crate::error::{GeneticError, Result, Stage};
use crate::fitness::FitnessEvaluator;
use crate::gene::Gene;
use crate::mutation::Mutator;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::Selector;
use crate::solution::Solution;

use super::options::ExecutorOptions;
use super::pool::WorkerPool;

/// Progress snapshot handed to the callback registered with
/// [`GeneticAlgorithmExecutor::with_progress`] once per generation, after the
/// fitness refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_fitness: f64,
}

type ProgressCallback = Box<dyn Fn(&GenerationReport) + Send + Sync>;

/// Drives a population through the generation pipeline using the supplied
/// fitness evaluator and genetic operators.
pub struct GeneticAlgorithmExecutor<G, E, M, S, C>
where
    G: Gene,
{
    population: Population<G>,
    evaluator: E,
    mutator: M,
    selector: S,
    crossover: C,
    options: ExecutorOptions,
    pool: WorkerPool,
    rng: RandomNumberGenerator,
    progress: Option<ProgressCallback>,
}

impl<G, E, M, S, C> GeneticAlgorithmExecutor<G, E, M, S, C>
where
    G: Gene,
    E: FitnessEvaluator<G>,
    M: Mutator<G>,
    S: Selector<G>,
    C: Crossover<G>,
{
    /// Creates a new executor.
    ///
    /// An empty population is accepted here; every stage reports
    /// [`GeneticError::EmptyPopulation`] when it runs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the options are invalid or the worker
    /// pool cannot be built.
    pub fn new(
        population: Population<G>,
        evaluator: E,
        mutator: M,
        selector: S,
        crossover: C,
        options: ExecutorOptions,
    ) -> Result<Self> {
        options.validate()?;
        let pool = WorkerPool::new(options.get_workers())?;
        let rng = match options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        Ok(Self {
            population,
            evaluator,
            mutator,
            selector,
            crossover,
            options,
            pool,
            rng,
            progress: None,
        })
    }

    /// Registers a callback that receives a [`GenerationReport`] each generation.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&GenerationReport) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    pub fn into_population(self) -> Population<G> {
        self.population
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Re-evaluates every individual and stores the result in its fitness slot.
    ///
    /// Units run on the worker pool. The first failure cancels the remaining
    /// units; fitness values written by units that already finished are kept.
    pub fn refresh_fitness(&mut self, token: &CancellationToken) -> Result<()> {
        self.population.ensure_not_empty()?;

        let evaluator = &self.evaluator;
        self.pool
            .try_for_each(
                token,
                self.population.individuals_mut(),
                |scope, _, solution| {
                    solution.fitness = evaluator.evaluate(scope, &solution.chromosome)?;
                    Ok(())
                },
            )
            .map_err(|e| GeneticError::fitness_evaluation("failed to evaluate fitness", e))
    }

    /// Replaces the population with the selector's output.
    pub fn perform_selection(&mut self) -> Result<()> {
        self.population.ensure_not_empty()?;

        let selected = self.selector.select(&self.population, &mut self.rng)?;
        self.population = selected;
        Ok(())
    }

    /// Shuffles the population, recombines consecutive pairs and replaces the
    /// population with the offspring.
    ///
    /// With an odd number of individuals the last one after shuffling is carried
    /// over unchanged. If any pair fails the population is left as it was after
    /// the shuffle.
    pub fn perform_crossover(&mut self) -> Result<()> {
        if self.population.is_empty() {
            return Err(GeneticError::crossover(
                "cannot perform crossover on empty population",
                GeneticError::EmptyPopulation,
            ));
        }

        self.rng.shuffle(self.population.individuals_mut());

        let individuals = self.population.individuals();
        let mut offspring = Vec::with_capacity(individuals.len());
        let mut pairs = individuals.chunks_exact(2);
        for pair in pairs.by_ref() {
            let (child1, child2) =
                self.crossover
                    .crossover(&pair[0].chromosome, &pair[1].chromosome, &mut self.rng)?;
            offspring.push(Solution::new(child1));
            offspring.push(Solution::new(child2));
        }
        offspring.extend(pairs.remainder().iter().map(Solution::deep_copy));

        self.population = Population::new(offspring);
        Ok(())
    }

    /// Mutates every individual in place on the worker pool.
    ///
    /// Each unit gets its own generator forked from the executor's before
    /// dispatch.
    pub fn perform_mutation(&mut self, token: &CancellationToken) -> Result<()> {
        self.population.ensure_not_empty()?;

        let probability = self.options.get_mutation_probability();
        let mutator = &self.mutator;
        let rng = &mut self.rng;
        let mut units: Vec<(&mut Solution<G>, RandomNumberGenerator)> = self
            .population
            .individuals_mut()
            .iter_mut()
            .map(|solution| (solution, rng.fork()))
            .collect();

        self.pool
            .try_for_each(token, &mut units, |scope, _, (solution, rng)| {
                mutator.mutate(scope, &mut solution.chromosome, probability, rng)
            })
            .map_err(|e| GeneticError::mutation("failed to mutate population", e))
    }

    /// Runs the configured number of generations. See [`run_generations`].
    ///
    /// [`run_generations`]: Self::run_generations
    pub fn run(&mut self, token: &CancellationToken) -> Result<&Population<G>> {
        self.run_generations(token, self.options.get_generations())
    }

    /// Runs `generations` generations followed by a final fitness refresh and
    /// returns the resulting population.
    ///
    /// # Errors
    ///
    /// Stops at the first failing stage and returns it wrapped in
    /// [`GeneticError::Generation`]. A failure of the trailing refresh carries
    /// [`Stage::FinalRefresh`] and `generation == generations`. The executor keeps
    /// the population produced by the last stage that succeeded.
    pub fn run_generations(
        &mut self,
        token: &CancellationToken,
        generations: usize,
    ) -> Result<&Population<G>> {
        info!(
            generations,
            population_size = self.population.len(),
            workers = ?self.options.get_workers(),
            "Starting genetic algorithm"
        );

        for generation in 0..generations {
            self.run_generation(token, generation)?;
        }

        checked(
            generations,
            Stage::FinalRefresh,
            self.refresh_fitness(token),
        )?;

        let best_fitness = self.population.best_fitness()?;
        info!(generations, best_fitness, "Finished genetic algorithm");
        Ok(&self.population)
    }

    fn run_generation(&mut self, token: &CancellationToken, generation: usize) -> Result<()> {
        checked(generation, Stage::RefreshFitness, self.refresh_fitness(token))?;

        let best_fitness = checked(
            generation,
            Stage::BestFitness,
            self.population.best_fitness(),
        )?;
        debug!(generation, best_fitness, "Generation evaluated");
        if let Some(progress) = &self.progress {
            progress(&GenerationReport {
                generation,
                best_fitness,
            });
        }

        checked(generation, Stage::Selection, self.perform_selection())?;
        checked(generation, Stage::Crossover, self.perform_crossover())?;
        checked(generation, Stage::Mutation, self.perform_mutation(token))?;
        Ok(())
    }
}

fn checked<T>(generation: usize, stage: Stage, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            trace!(generation, %stage, "Stage completed");
            Ok(value)
        }
        Err(source) => {
            warn!(generation, %stage, error = %source, "Stage failed");
            Err(GeneticError::Generation {
                generation,
                stage,
                source: Box::new(source),
            })
        }
    }
}

impl<G, E, M, S, C> fmt::Debug for GeneticAlgorithmExecutor<G, E, M, S, C>
where
    G: Gene,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithmExecutor")
            .field("population_size", &self.population.len())
            .field("options", &self.options)
            .field("has_progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}
