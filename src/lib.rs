//! # encoding-ga
//!
//! Tools for studying how the genotype-to-phenotype encoding of a search space
//! (binary, reflected Gray, non-greedy Gray or an arbitrary permutation code)
//! changes the behaviour of evolutionary search:
//!
//! - [`representation`]: bijections between codewords and numbers, plus generators.
//! - [`chromosome`]: multi-dimensional genotypes with validity-preserving operators.
//! - [`evolution`]: a generational genetic algorithm producing fitness traces.
//! - [`markov`]: absorbing-chain analysis of single-individual local search.
//! - [`locality`]: how faithfully Hamming distance tracks numeric distance.

pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod functions;
pub mod locality;
pub mod markov;
pub mod representation;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, FitnessTrace, TestFunction};
pub use representation::{Bitstring, Interval, Representation};
