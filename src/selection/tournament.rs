use crate::error::{GeneticError, Result};
use crate::gene::Gene;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::Selector;
use crate::solution::Solution;

/// A selection operator that fills the next population through tournaments,
/// optionally carrying the fittest individuals over unchanged (elitism).
///
/// Each tournament samples `tournament_size` individuals uniformly with
/// replacement from the pool and keeps the fittest. A challenger only replaces
/// the current winner when its fitness is strictly greater, so among equally fit
/// individuals the one drawn first wins.
///
/// Tournament selection balances exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// With `num_elites = k > 0` the `k` fittest individuals are copied into the
/// output first and the tournaments draw only from the remaining ones.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelector {
    tournament_size: usize,
    num_elites: usize,
}

impl TournamentSelector {
    /// Creates a new TournamentSelector.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of individuals that participate in each tournament.
    ///   Must be at least 1. A tournament size of 1 is equivalent to random selection.
    /// * `num_elites` - How many of the fittest individuals are carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `tournament_size` is 0.
    pub fn new(tournament_size: usize, num_elites: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be positive, but was {}",
                tournament_size
            )));
        }

        Ok(Self {
            tournament_size,
            num_elites,
        })
    }

    /// Creates a new TournamentSelector from signed values, as read from
    /// user-facing configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `tournament_size` is not positive or
    /// `num_elites` is negative.
    pub fn try_new(tournament_size: i64, num_elites: i64) -> Result<Self> {
        if tournament_size <= 0 {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be positive, but was {}",
                tournament_size
            )));
        }
        if num_elites < 0 {
            return Err(GeneticError::Configuration(format!(
                "Number of elites cannot be negative, but was {}",
                num_elites
            )));
        }

        let tournament_size = usize::try_from(tournament_size).map_err(|_| {
            GeneticError::Configuration(format!("Tournament size {} is too large", tournament_size))
        })?;
        let num_elites = usize::try_from(num_elites).map_err(|_| {
            GeneticError::Configuration(format!("Number of elites {} is too large", num_elites))
        })?;

        Self::new(tournament_size, num_elites)
    }

    pub fn with_tournament_size(mut self, tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be positive, but was {}",
                tournament_size
            )));
        }
        self.tournament_size = tournament_size;
        Ok(self)
    }

    pub fn with_elites(mut self, num_elites: usize) -> Self {
        self.num_elites = num_elites;
        self
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn num_elites(&self) -> usize {
        self.num_elites
    }

    /// Runs a single tournament over `pool` and returns the winner's index.
    ///
    /// `pool` must not be empty.
    fn run_tournament<G: Gene>(
        &self,
        pool: &[&Solution<G>],
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut winner = rng.gen_index(pool.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_index(pool.len());
            if pool[challenger].fitness > pool[winner].fitness {
                winner = challenger;
            }
        }
        winner
    }
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self {
            tournament_size: 2,
            num_elites: 0,
        }
    }
}

impl<G: Gene> Selector<G> for TournamentSelector {
    fn select(
        &self,
        population: &Population<G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>> {
        if population.is_empty() {
            return Err(GeneticError::selection(
                "cannot perform selection on empty population",
                GeneticError::EmptyPopulation,
            ));
        }

        let population_size = population.len();
        if self.num_elites >= population_size {
            return Err(GeneticError::selection(
                "cannot apply elitism",
                GeneticError::Configuration(format!(
                    "number of elites ({}) is greater than or equal to population size ({})",
                    self.num_elites, population_size
                )),
            ));
        }

        let mut offspring = Vec::with_capacity(population_size);
        let mut ranked: Vec<&Solution<G>> = population.iter().collect();

        if self.num_elites > 0 {
            ranked.sort_unstable_by(|a, b| b.fitness.total_cmp(&a.fitness));
            offspring.extend(ranked[..self.num_elites].iter().map(|elite| elite.deep_copy()));
        }
        let pool = &ranked[self.num_elites..];

        for _ in 0..population_size - self.num_elites {
            let winner = self.run_tournament(pool, rng);
            offspring.push(pool[winner].deep_copy());
        }

        Ok(Population::new(offspring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population_with_fitness(values: &[f64]) -> Population<i32> {
        values
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Solution {
                chromosome: vec![i as i32, i as i32 * 10],
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_output_size_matches_input() {
        let population = population_with_fitness(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(1);

        for (size, elites) in [(1, 0), (2, 0), (3, 2), (5, 4), (10, 1)] {
            let selector = TournamentSelector::new(size, elites).unwrap();
            let selected = selector.select(&population, &mut rng).unwrap();
            assert_eq!(selected.len(), population.len());
        }
    }

    #[test]
    fn test_elites_are_carried_over_unchanged() {
        let population = population_with_fitness(&[0.5, 0.8, 0.3, 0.9, 0.1, 0.7]);
        let selector = TournamentSelector::new(2, 3).unwrap();

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = selector.select(&population, &mut rng).unwrap();

            for expected in [3usize, 1, 5] {
                let original = &population.individuals[expected];
                assert!(
                    selected.iter().any(|s| s == original),
                    "elite {:?} missing from selection",
                    original
                );
            }
            assert_eq!(selected.individuals[0], population.individuals[3]);
            assert_eq!(selected.individuals[1], population.individuals[1]);
            assert_eq!(selected.individuals[2], population.individuals[5]);
        }
    }

    #[test]
    fn test_tournament_pool_excludes_elites() {
        let population = population_with_fitness(&[1.0, 2.0, 3.0, 4.0]);
        let selector = TournamentSelector::new(1, 2).unwrap();

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = selector.select(&population, &mut rng).unwrap();
            for winner in &selected.individuals[2..] {
                assert!(winner.fitness <= 2.0);
            }
        }
    }

    #[test]
    fn test_large_tournament_converges_on_the_fittest() {
        let population = population_with_fitness(&[0.1, 0.2, 5.0, 0.3]);
        let selector = TournamentSelector::new(200, 0).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(12);

        let selected = selector.select(&population, &mut rng).unwrap();

        assert!(selected.iter().all(|s| s.fitness == 5.0));
    }

    #[test]
    fn test_selected_individuals_are_deep_copies() {
        let population = population_with_fitness(&[1.0, 2.0, 3.0]);
        let selector = TournamentSelector::new(2, 1).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);

        let mut selected = selector.select(&population, &mut rng).unwrap();
        for solution in selected.individuals_mut() {
            solution.chromosome[0] = -1;
        }

        assert!(population
            .iter()
            .all(|solution| solution.chromosome[0] >= 0));
    }

    #[test]
    fn test_empty_population() {
        let population: Population<i32> = Population::empty();
        let selector = TournamentSelector::default();
        let mut rng = RandomNumberGenerator::new();

        let err = selector.select(&population, &mut rng).unwrap_err();

        assert!(matches!(err, GeneticError::Selection { .. }));
        assert!(err.is_empty_population());
    }

    #[test]
    fn test_elites_must_leave_room_for_tournaments() {
        let population = population_with_fitness(&[1.0, 2.0, 3.0]);
        let mut rng = RandomNumberGenerator::new();

        for elites in [3, 4] {
            let selector = TournamentSelector::new(2, elites).unwrap();
            let err = selector.select(&population, &mut rng).unwrap_err();
            assert!(matches!(err, GeneticError::Selection { .. }));
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            TournamentSelector::new(0, 1),
            Err(GeneticError::Configuration(_))
        ));
        assert!(TournamentSelector::default().with_tournament_size(0).is_err());
        assert!(TournamentSelector::try_new(0, 0).is_err());
        assert!(TournamentSelector::try_new(-3, 0).is_err());
        assert!(matches!(
            TournamentSelector::try_new(3, -1),
            Err(GeneticError::Configuration(msg)) if msg.contains("negative")
        ));

        let selector = TournamentSelector::try_new(3, 1).unwrap();
        assert_eq!(selector.tournament_size(), 3);
        assert_eq!(selector.num_elites(), 1);
    }

    #[test]
    fn test_run_tournament_ties_keep_first_draw() {
        let a = Solution {
            chromosome: vec![1],
            fitness: 1.0,
        };
        let b = Solution {
            chromosome: vec![2],
            fitness: 1.0,
        };
        let pool = vec![&a, &b];
        let selector = TournamentSelector::new(8, 0).unwrap();

        let mut rng = RandomNumberGenerator::from_seed(21);
        let mut replay = rng.clone();
        let winner = selector.run_tournament(&pool, &mut rng);

        assert_eq!(winner, replay.gen_index(2));
    }
}
