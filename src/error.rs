//! # Error Types
//!
//! This module defines the error taxonomy shared by representations, chromosomes,
//! the genetic algorithm engine and the Markov chain analyser. Every error is
//! raised fail-fast, either at construction time or at the start of an operation.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use encoding_ga::error::{GeneticError, Result};
//! use encoding_ga::representation::Interval;
//!
//! fn unit_interval() -> Result<Interval> {
//!     Interval::new(0.0, 1.0, 0.1)
//! }
//!
//! match Interval::new(0.0, 1.0, -0.1) {
//!     Err(GeneticError::InvalidInterval(msg)) => println!("rejected: {}", msg),
//!     _ => unreachable!(),
//! }
//! # unit_interval().unwrap();
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use encoding_ga::error::{GeneticError, OptionExt};
//!
//! fn fittest(scores: &[f64]) -> encoding_ga::error::Result<f64> {
//!     scores.iter().cloned().reduce(f64::max).ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while building encodings or running searches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// A bitstring or number is not part of a representation's domain.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A malformed `(start, end, step)` triple, or too few codewords for an interval.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A structural invariant was broken. This always indicates a construction bug,
    /// never bad user input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,
}

/// A specialized Result type for this crate.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = GeneticError::InvalidEncoding("10101 is not a codeword".to_string());
        assert_eq!(err.to_string(), "Invalid encoding: 10101 is not a codeword");

        let err = GeneticError::InvariantViolation("row 3 sums to 1.2".to_string());
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_option_ext() {
        let some: Option<u8> = Some(3);
        assert_eq!(some.ok_or_else_genetic(|| GeneticError::EmptyPopulation), Ok(3));

        let none: Option<u8> = None;
        assert_eq!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        );
    }
}
