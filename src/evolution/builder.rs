use crate::{
    crossover::Crossover,
    error::{GeneticError, OptionExt, Result},
    fitness::FitnessEvaluator,
    gene::Gene,
    mutation::Mutator,
    population::Population,
    selection::Selector,
};

use super::{ExecutorOptions, GeneticAlgorithmExecutor};

/// Fluent construction of a [`GeneticAlgorithmExecutor`].
///
/// The evaluator and all three operators are required. A missing population is
/// treated as an empty one, and missing options fall back to
/// [`ExecutorOptions::default`].
///
/// ```rust
/// use evolvr::crossover::SinglePointCrossover;
/// use evolvr::evolution::ExecutorBuilder;
/// use evolvr::fitness::SumFitnessEvaluator;
/// use evolvr::mutation::SwapMutator;
/// use evolvr::population::Population;
/// use evolvr::selection::TournamentSelector;
/// use evolvr::solution::Solution;
///
/// let executor = ExecutorBuilder::new()
///     .with_population(Population::new(vec![Solution::new(vec![1, 2]), Solution::new(vec![3, 4])]))
///     .with_evaluator(SumFitnessEvaluator)
///     .with_mutator(SwapMutator::default())
///     .with_selector(TournamentSelector::default())
///     .with_crossover(SinglePointCrossover)
///     .build()
///     .unwrap();
/// assert_eq!(executor.population().len(), 2);
///
/// let missing = ExecutorBuilder::<i32, SumFitnessEvaluator, SwapMutator, TournamentSelector, SinglePointCrossover>::new()
///     .with_evaluator(SumFitnessEvaluator)
///     .build();
/// assert!(missing.is_err());
/// ```
pub struct ExecutorBuilder<G, E, M, S, C>
where
    G: Gene,
{
    population: Option<Population<G>>,
    evaluator: Option<E>,
    mutator: Option<M>,
    selector: Option<S>,
    crossover: Option<C>,
    options: Option<ExecutorOptions>,
}

impl<G, E, M, S, C> ExecutorBuilder<G, E, M, S, C>
where
    G: Gene,
    E: FitnessEvaluator<G>,
    M: Mutator<G>,
    S: Selector<G>,
    C: Crossover<G>,
{
    pub fn new() -> Self {
        Self {
            population: None,
            evaluator: None,
            mutator: None,
            selector: None,
            crossover: None,
            options: None,
        }
    }

    pub fn with_population(mut self, population: Population<G>) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_evaluator(mut self, evaluator: E) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn with_mutator(mut self, mutator: M) -> Self {
        self.mutator = Some(mutator);
        self
    }

    pub fn with_selector(mut self, selector: S) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_crossover(mut self, crossover: C) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<GeneticAlgorithmExecutor<G, E, M, S, C>> {
        let evaluator = self.evaluator.ok_or_else_genetic(|| {
            GeneticError::Configuration("Fitness evaluator not specified".to_string())
        })?;

        let mutator = self
            .mutator
            .ok_or_else_genetic(|| GeneticError::Configuration("Mutator not specified".to_string()))?;

        let selector = self
            .selector
            .ok_or_else_genetic(|| GeneticError::Configuration("Selector not specified".to_string()))?;

        let crossover = self
            .crossover
            .ok_or_else_genetic(|| GeneticError::Configuration("Crossover not specified".to_string()))?;

        GeneticAlgorithmExecutor::new(
            self.population.unwrap_or_default(),
            evaluator,
            mutator,
            selector,
            crossover,
            self.options.unwrap_or_default(),
        )
    }
}

impl<G, E, M, S, C> Default for ExecutorBuilder<G, E, M, S, C>
where
    G: Gene,
    E: FitnessEvaluator<G>,
    M: Mutator<G>,
    S: Selector<G>,
    C: Crossover<G>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationToken;
    use crate::crossover::SinglePointCrossover;
    use crate::fitness::SumFitnessEvaluator;
    use crate::mutation::SwapMutator;
    use crate::selection::TournamentSelector;

    type Builder = ExecutorBuilder<
        i32,
        SumFitnessEvaluator,
        SwapMutator,
        TournamentSelector,
        SinglePointCrossover,
    >;

    fn complete() -> Builder {
        Builder::new()
            .with_evaluator(SumFitnessEvaluator)
            .with_mutator(SwapMutator::default())
            .with_selector(TournamentSelector::default())
            .with_crossover(SinglePointCrossover)
    }

    #[test]
    fn test_missing_parts_are_configuration_errors() {
        let cases = [
            Builder::new()
                .with_mutator(SwapMutator::default())
                .with_selector(TournamentSelector::default())
                .with_crossover(SinglePointCrossover),
            Builder::new()
                .with_evaluator(SumFitnessEvaluator)
                .with_selector(TournamentSelector::default())
                .with_crossover(SinglePointCrossover),
            Builder::new()
                .with_evaluator(SumFitnessEvaluator)
                .with_mutator(SwapMutator::default())
                .with_crossover(SinglePointCrossover),
            Builder::new()
                .with_evaluator(SumFitnessEvaluator)
                .with_mutator(SwapMutator::default())
                .with_selector(TournamentSelector::default()),
        ];

        for builder in cases {
            assert!(matches!(
                builder.build(),
                Err(GeneticError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_missing_population_builds_empty_executor() {
        let mut executor = complete().build().unwrap();

        assert!(executor.population().is_empty());
        let err = executor
            .run_generations(&CancellationToken::new(), 1)
            .unwrap_err();
        assert!(err.is_empty_population());
    }

    #[test]
    fn test_options_are_passed_through() {
        let options = ExecutorOptions::builder().generations(7).seed(1).build();
        let executor = complete().with_options(options.clone()).build().unwrap();

        assert_eq!(executor.options(), &options);
    }
}
