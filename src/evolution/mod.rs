pub mod challenge;
pub mod launcher;
pub mod options;
pub mod population;
pub mod trace;

pub use challenge::TestFunction;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{EvolutionOptions, LogLevel, Objective};
pub use population::{ChromosomeId, IdArena, Individual, Population};
pub use trace::FitnessTrace;
