//! # Markov chain analysis
//!
//! Theoretical counterpart of the GA experiments: a single individual searching a
//! one-dimensional landscape by single-bit moves is a Markov chain over the
//! codewords of its representation. Local optima of the encoded landscape become
//! absorbing states, and the long-run mass absorbed at the global optimum measures
//! how much the encoding misleads local search.
//!
//! ```rust
//! use encoding_ga::functions::OneMax;
//! use encoding_ga::markov::MarkovChain;
//! use encoding_ga::representation::{generators, Interval};
//!
//! let rep = generators::reflected_gray(&Interval::integers(4)?)?;
//! let chain = MarkovChain::hill_climbing(&rep, &OneMax::new(9.0, 1))?;
//! let p = chain.long_run_absorption_probability(None, 256)?;
//! assert!((p - 1.0).abs() < 1e-9);
//! # Ok::<(), encoding_ga::GeneticError>(())
//! ```

pub mod absorption;
pub mod chain;
pub mod landscape;
pub mod matrix;
pub mod passage;
pub mod schedule;

pub use absorption::{annealed_absorption_probability, long_run_absorption_probability};
pub use chain::MarkovChain;
pub use landscape::Landscape;
pub use matrix::TransitionMatrix;
pub use passage::{mean_first_passage_time, PassageEstimate};
pub use schedule::CoolingSchedule;
