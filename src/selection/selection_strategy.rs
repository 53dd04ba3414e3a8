use std::fmt::Debug;

use crate::error::Result;
use crate::evolution::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection.
///
/// A strategy picks one member of an evaluated population and returns its index.
/// Calling it twice yields two independent draws; the caller decides what to do
/// when both land on the same individual.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use encoding_ga::chromosome::Chromosome;
/// use encoding_ga::evolution::options::Objective;
/// use encoding_ga::evolution::population::{IdArena, Population};
/// use encoding_ga::functions::OneMax;
/// use encoding_ga::representation::{generators, Interval};
/// use encoding_ga::rng::RandomNumberGenerator;
/// use encoding_ga::selection::{SelectionStrategy, TournamentSelection};
///
/// let rep = Arc::new(generators::binary(&Interval::integers(3)?)?);
/// let mut arena = IdArena::new();
/// let mut population = Population::from_chromosomes(
///     [1.0, 4.0, 6.0].iter().map(|&v| Chromosome::from_values(rep.clone(), &[v]).unwrap()),
///     &mut arena,
/// );
/// population.evaluate(&OneMax::new(7.0, 1))?;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let selection = TournamentSelection::new(2, Objective::Maximize)?;
/// let winner = selection.select(&population, &mut rng)?;
/// assert!(winner < population.len());
/// # Ok::<(), encoding_ga::GeneticError>(())
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects one member of `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - A member taking part in the draw has not been evaluated
    /// - The strategy cannot be applied to a population of this size
    fn select(&self, population: &Population, rng: &mut RandomNumberGenerator) -> Result<usize>;
}
