use rand::seq::index;

use crate::error::{GeneticError, Result};
use crate::evolution::options::{EvolutionOptions, Objective};
use crate::evolution::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each call draws `tournament_size` distinct members uniformly at random and
/// returns the fittest of them under the configured objective. Ties go to the
/// member drawn first.
///
/// Smaller tournaments favour exploration, larger ones exploitation. A tournament
/// of size 1 is uniform random selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
    objective: Objective,
}

impl TournamentSelection {
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize, objective: Objective) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            tournament_size,
            objective,
        })
    }

    /// Tournament configured from a run's options.
    pub fn from_options(options: &EvolutionOptions) -> Result<Self> {
        Self::new(options.get_tournament_size(), options.get_objective())
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: 2,
            objective: Objective::Minimize,
        }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(&self, population: &Population, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if self.tournament_size > population.len() {
            return Err(GeneticError::Configuration(format!(
                "Tournament size {} exceeds population size {}",
                self.tournament_size,
                population.len()
            )));
        }

        let mut best: Option<(usize, f64)> = None;
        for idx in index::sample(&mut rng.rng, population.len(), self.tournament_size) {
            let fitness = population.fitness_at(idx)?;
            match best {
                Some((_, incumbent)) if !self.objective.is_better(fitness, incumbent) => {}
                _ => best = Some((idx, fitness)),
            }
        }
        best.map(|(idx, _)| idx).ok_or(GeneticError::EmptyPopulation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chromosome::Chromosome;
    use crate::evolution::population::IdArena;
    use crate::functions::OneMax;
    use crate::representation::{generators, Interval};

    fn evaluated(values: &[f64]) -> Population {
        let rep = Arc::new(generators::binary(&Interval::integers(4).unwrap()).unwrap());
        let mut arena = IdArena::new();
        let mut pop = Population::from_chromosomes(
            values
                .iter()
                .map(|&v| Chromosome::from_values(rep.clone(), &[v]).unwrap()),
            &mut arena,
        );
        pop.evaluate(&OneMax::new(15.0, 1)).unwrap();
        pop
    }

    #[test]
    fn test_full_tournament_picks_the_best() {
        let pop = evaluated(&[3.0, 12.0, 7.0, 1.0, 9.0]);
        let mut rng = RandomNumberGenerator::from_seed(42);

        let maximize = TournamentSelection::new(5, Objective::Maximize).unwrap();
        let minimize = TournamentSelection::new(5, Objective::Minimize).unwrap();
        for _ in 0..20 {
            assert_eq!(maximize.select(&pop, &mut rng).unwrap(), 1);
            assert_eq!(minimize.select(&pop, &mut rng).unwrap(), 3);
        }
    }

    #[test]
    fn test_worst_member_never_wins_a_pair_tournament() {
        let pop = evaluated(&[3.0, 12.0, 7.0, 1.0, 9.0]);
        let mut rng = RandomNumberGenerator::from_seed(3);
        let selection = TournamentSelection::new(2, Objective::Maximize).unwrap();

        let mut counts = [0usize; 5];
        for _ in 0..2000 {
            counts[selection.select(&pop, &mut rng).unwrap()] += 1;
        }
        assert_eq!(counts[3], 0);
        // The best member wins every tournament it enters: 2 of 5 slots.
        assert!(counts[1] > 700 && counts[1] < 900, "{:?}", counts);
    }

    #[test]
    fn test_unit_tournament_is_uniform() {
        let pop = evaluated(&[3.0, 12.0, 7.0, 1.0]);
        let mut rng = RandomNumberGenerator::from_seed(8);
        let selection = TournamentSelection::new(1, Objective::Maximize).unwrap();

        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[selection.select(&pop, &mut rng).unwrap()] += 1;
        }
        assert!(counts.iter().all(|&c| c > 850 && c < 1150), "{:?}", counts);
    }

    #[test]
    fn test_invalid_configurations() {
        assert!(TournamentSelection::new(0, Objective::Maximize).is_err());

        let pop = evaluated(&[1.0, 2.0]);
        let mut rng = RandomNumberGenerator::from_seed(1);
        let selection = TournamentSelection::new(3, Objective::Maximize).unwrap();
        assert!(selection.select(&pop, &mut rng).is_err());
        assert!(matches!(
            TournamentSelection::default().select(&Population::default(), &mut rng),
            Err(GeneticError::EmptyPopulation)
        ));
    }
}
