use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use super::matrix::TransitionMatrix;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Monte Carlo estimate of a first-passage time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PassageEstimate {
    /// Mean step count over the walks that reached the target; `None` when none did.
    pub mean: Option<f64>,
    /// Walks that reached the target within the step cap.
    pub completed: usize,
    /// Walks cut off at the step cap. They do not enter the mean.
    pub censored: usize,
}

/// Simulates `trials` walks from uniformly random start states and records the
/// first step, counting from 1, at which each walk stands on `target`.
///
/// A walk that starts on the target still has to step onto it again.
pub fn mean_first_passage_time(
    matrix: &TransitionMatrix,
    target: usize,
    trials: usize,
    max_steps: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<PassageEstimate> {
    if trials == 0 || max_steps == 0 {
        return Err(GeneticError::Configuration(format!(
            "need at least one trial and one step, got {} trials of {} steps",
            trials, max_steps
        )));
    }
    if target >= matrix.size() {
        return Err(GeneticError::Configuration(format!(
            "target index {} outside a chain of {} states",
            target,
            matrix.size()
        )));
    }

    let rows = matrix
        .rows()
        .enumerate()
        .map(|(i, row)| {
            WeightedIndex::<f64>::new(row).map_err(|e| {
                GeneticError::InvariantViolation(format!("row {} is not a distribution: {}", i, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total = 0usize;
    let mut completed = 0usize;
    for _ in 0..trials {
        let mut state = rng.gen_index(rows.len());
        for step in 1..=max_steps {
            state = rows[state].sample(&mut rng.rng);
            if state == target {
                total += step;
                completed += 1;
                break;
            }
        }
    }

    let censored = trials - completed;
    let mean = (completed > 0).then(|| total as f64 / completed as f64);
    debug!(trials, completed, censored, ?mean, "first-passage simulation finished");
    Ok(PassageEstimate {
        mean,
        completed,
        censored,
    })
}
