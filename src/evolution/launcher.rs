use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    challenge::TestFunction,
    options::{EvolutionOptions, LogLevel},
    population::{IdArena, Population},
    trace::FitnessTrace,
};
use crate::{
    chromosome::Chromosome,
    error::{GeneticError, OptionExt, Result},
    representation::Representation,
    rng::RandomNumberGenerator,
    selection::{SelectionStrategy, TournamentSelection},
};

/// Outcome of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// Decoded input vector of the best chromosome ever evaluated.
    pub best_solution: Vec<f64>,
    /// The fitness score of that chromosome.
    pub best_fitness: f64,
    /// Best-so-far fitness after each generation.
    pub trace: FitnessTrace,
}

/// Runs a generational genetic algorithm on one test function under one
/// representation.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<F>
where
    F: TestFunction,
{
    function: F,
    rep: Arc<Representation>,
}

impl<F> EvolutionLauncher<F>
where
    F: TestFunction,
{
    /// Creates a new `EvolutionLauncher` for `function`, encoding every input
    /// coordinate with `rep`.
    pub fn new(function: F, rep: Arc<Representation>) -> Self {
        Self { function, rep }
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn representation(&self) -> &Arc<Representation> {
        &self.rep
    }

    /// Evolves a population with tournament selection configured from `options`.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options fail validation
    /// - The test function's dimension disagrees with the chromosome
    /// - A fitness evaluation is not finite
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        options.validate()?;
        let selection = TournamentSelection::from_options(options)?;
        self.evolve_with(options, &selection, rng)
    }

    /// Evolves a population for `options.get_num_generations()` generations.
    ///
    /// Generation 1 is the random initial population. Every later generation is
    /// built from `population_size / 2` pairs of distinct parents; each pair is
    /// crossed with probability `crossover_rate` (otherwise copied) and each child
    /// is mutated with probability `mutation_rate`. The best chromosome is only
    /// replaced by a strictly better one.
    pub fn evolve_with<S>(
        &self,
        options: &EvolutionOptions,
        selection: &S,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult>
    where
        S: SelectionStrategy,
    {
        options.validate()?;
        let objective = options.get_objective();
        let log_level = *options.get_log_level();
        let dimension = self.function.input_dimension();

        if log_level != LogLevel::None {
            info!(
                function = self.function.name(),
                representation = self.rep.name(),
                generations = options.get_num_generations(),
                population = options.get_population_size(),
                "starting evolution"
            );
        }

        let mut arena = IdArena::new();
        let initial = (0..options.get_population_size())
            .map(|_| Chromosome::random(self.rep.clone(), dimension, rng))
            .collect::<Result<Vec<_>>>()?;
        let mut population = Population::from_chromosomes(initial, &mut arena);
        population.evaluate(&self.function)?;

        let (fittest, fitness) = population.fittest(objective)?;
        let mut best = fittest.chromosome.clone();
        let mut best_fitness = fitness;

        let mut trace = FitnessTrace::new(self.rep.name());
        trace.push(1, best_fitness);

        for generation in 2..=options.get_num_generations() {
            let mut offspring = Vec::with_capacity(population.len());

            for _ in 0..population.len() / 2 {
                let first = selection.select(&population, rng)?;
                let first_id = population.get(first).map(|m| m.id).ok_or_else_genetic(|| {
                    GeneticError::InvariantViolation(format!("selected index {} is missing", first))
                })?;
                let mut second = selection.select(&population, rng)?;
                while population.get(second).map(|m| m.id) == Some(first_id) {
                    second = selection.select(&population, rng)?;
                }
                let (parent_a, parent_b) = match (population.get(first), population.get(second)) {
                    (Some(a), Some(b)) => (&a.chromosome, &b.chromosome),
                    _ => {
                        return Err(GeneticError::InvariantViolation(
                            "selection returned an index outside the population".to_string(),
                        ))
                    }
                };

                let (mut child_a, mut child_b) = if rng.gen_bool(options.get_crossover_rate()) {
                    parent_a.crossover(parent_b, rng)?
                } else {
                    (parent_a.clone(), parent_b.clone())
                };

                for child in [&mut child_a, &mut child_b] {
                    if rng.gen_bool(options.get_mutation_rate()) {
                        child.mutate(rng)?;
                    }
                }
                offspring.push(child_a);
                offspring.push(child_b);
            }

            population = Population::from_chromosomes(offspring, &mut arena);
            population.evaluate(&self.function)?;

            let (fittest, fitness) = population.fittest(objective)?;
            if objective.is_better(fitness, best_fitness) {
                best = fittest.chromosome.clone();
                best_fitness = fitness;
                if log_level != LogLevel::None {
                    info!(generation, best = best_fitness, "new {}", objective.label());
                }
            }
            if log_level == LogLevel::Verbose {
                debug!(generation, generation_best = fitness, best = best_fitness, "generation complete");
            }
            trace.push(generation, best_fitness);
        }

        if log_level != LogLevel::None {
            info!(best = best_fitness, chromosomes = arena.allocated(), "evolution finished");
        }

        Ok(EvolutionResult {
            best_solution: best.decode()?,
            best_fitness,
            trace,
        })
    }

    /// Runs `trials` independent evolutions and averages their traces point-wise.
    ///
    /// Each trial receives its own generator forked from `rng`, so results are
    /// reproducible from one seed. Trials run in parallel.
    pub fn run_trials(
        &self,
        options: &EvolutionOptions,
        trials: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<FitnessTrace> {
        if trials == 0 {
            return Err(GeneticError::Configuration(
                "Number of trials must be greater than 0".to_string(),
            ));
        }
        options.validate()?;

        let generators: Vec<RandomNumberGenerator> = (0..trials).map(|_| rng.fork()).collect();
        let traces = generators
            .into_par_iter()
            .map(|mut trial_rng| self.evolve(options, &mut trial_rng).map(|r| r.trace))
            .collect::<Result<Vec<_>>>()?;

        FitnessTrace::average(&traces, self.rep.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::options::Objective;
    use crate::functions::{OneMax, Parabola};
    use crate::representation::{generators, Interval};

    fn integer_launcher(bits: u32) -> EvolutionLauncher<OneMax> {
        let rep = Arc::new(generators::binary(&Interval::integers(bits).unwrap()).unwrap());
        EvolutionLauncher::new(OneMax::new(5.0, 2), rep)
    }

    #[test]
    fn test_trace_is_monotone_and_complete() {
        let launcher = integer_launcher(4);
        let options = EvolutionOptions::builder()
            .num_generations(30)
            .population_size(10)
            .objective(Objective::Maximize)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(9);

        let result = launcher.evolve(&options, &mut rng).unwrap();
        assert_eq!(result.trace.len(), 30);
        assert_eq!(result.trace.points[0].0, 1);
        assert_eq!(result.trace.points[29].0, 30);
        for w in result.trace.points.windows(2) {
            assert!(w[1].1 >= w[0].1);
        }
        assert_eq!(result.trace.last(), Some(result.best_fitness));
        assert_eq!(launcher.function().evaluate(&result.best_solution), result.best_fitness);
    }

    #[test]
    fn test_single_generation_reports_initial_best() {
        let launcher = integer_launcher(3);
        let options = EvolutionOptions::builder()
            .num_generations(1)
            .population_size(4)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let result = launcher.evolve(&options, &mut rng).unwrap();
        assert_eq!(result.trace.points.len(), 1);
    }

    #[test]
    fn test_same_seed_same_run() {
        let rep = Arc::new(generators::reflected_gray(&Interval::new(-5.0, 5.0, 0.5).unwrap()).unwrap());
        let launcher = EvolutionLauncher::new(Parabola::new(2), rep);
        let options = EvolutionOptions::builder()
            .num_generations(20)
            .population_size(8)
            .build();

        let a = launcher
            .evolve(&options, &mut RandomNumberGenerator::from_seed(77))
            .unwrap();
        let b = launcher
            .evolve(&options, &mut RandomNumberGenerator::from_seed(77))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_options_fail_before_running() {
        let launcher = integer_launcher(3);
        let options = EvolutionOptions::builder().population_size(5).build();
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(matches!(
            launcher.evolve(&options, &mut rng),
            Err(GeneticError::Configuration(_))
        ));
        assert!(launcher.run_trials(&EvolutionOptions::default(), 0, &mut rng).is_err());
    }

    #[test]
    fn test_run_trials_averages() {
        let launcher = integer_launcher(4);
        let options = EvolutionOptions::builder()
            .num_generations(15)
            .population_size(6)
            .objective(Objective::Maximize)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(4);
        let trace = launcher.run_trials(&options, 5, &mut rng).unwrap();
        assert_eq!(trace.label, "binary");
        assert_eq!(trace.len(), 15);
        // One-max with target 5 in two coordinates never exceeds 10.
        assert!(trace.points.iter().all(|&(_, f)| f <= 10.0));
    }
}
