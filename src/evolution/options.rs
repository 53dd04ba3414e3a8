//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration of a generational
//! genetic algorithm run: generation count, population size, variation rates,
//! tournament size, optimisation direction and logging level.
//!
//! ## Example
//!
//! ```rust
//! use encoding_ga::evolution::options::{EvolutionOptions, LogLevel, Objective};
//!
//! // Grefenstette's settings, minimising
//! let options = EvolutionOptions::builder()
//!     .num_generations(1000)
//!     .population_size(50)
//!     .mutation_rate(0.05)
//!     .crossover_rate(0.5)
//!     .objective(Objective::Minimize)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//! assert!(options.validate().is_ok());
//!
//! // Same settings
//! let default_options = EvolutionOptions::default();
//! # let _ = default_options;
//! ```
//!
//! ## Validation
//!
//! [`EvolutionOptions::validate`] is called once at the start of every run and
//! rejects, with [`GeneticError::Configuration`]:
//!
//! - a population size that is zero or odd,
//! - mutation or crossover rates outside `[0, 1]`,
//! - a generation count of zero,
//! - a tournament size of zero or not below the population size. A tournament
//!   spanning the whole population always returns the same winner, so two distinct
//!   parents could never be drawn.

use crate::error::{GeneticError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Improvements plus one event per generation.
    Verbose,
    /// Start, finish and improvements.
    Minimal,
    None,
}

/// Direction of optimisation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Minimize,
    Maximize,
}

impl Objective {
    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Minimize => candidate < incumbent,
            Objective::Maximize => candidate > incumbent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Objective::Minimize => "minimum",
            Objective::Maximize => "maximum",
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    tournament_size: usize,
    objective: Objective,
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        log_level: LogLevel,
        population_size: usize,
        mutation_rate: f64,
        crossover_rate: f64,
        objective: Objective,
    ) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            mutation_rate,
            crossover_rate,
            tournament_size: 2,
            objective,
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_objective(&self) -> Objective {
        self.objective
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the optimisation direction.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    /// Checks every parameter; see the module documentation for the rules.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.population_size % 2 != 0 {
            return Err(GeneticError::Configuration(format!(
                "Population size must be even, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate must be between 0.0 and 1.0, got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GeneticError::Configuration(format!(
                "Crossover rate must be between 0.0 and 1.0, got {}",
                self.crossover_rate
            )));
        }
        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations must be greater than 0".to_string(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size >= self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be in 1..{}, got {}",
                self.population_size, self.tournament_size
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        EvolutionOptionsBuilder::default().build()
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    tournament_size: Option<usize>,
    objective: Option<Objective>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn objective(mut self, value: Objective) -> Self {
        self.objective = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance. Validation happens when a run starts.
    pub fn build(self) -> EvolutionOptions {
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(1000),
            log_level: self.log_level.unwrap_or(LogLevel::None),
            population_size: self.population_size.unwrap_or(50),
            mutation_rate: self.mutation_rate.unwrap_or(0.05),
            crossover_rate: self.crossover_rate.unwrap_or(0.5),
            tournament_size: self.tournament_size.unwrap_or(2),
            objective: self.objective.unwrap_or(Objective::Minimize),
        }
    }
}
