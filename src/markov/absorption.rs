use tracing::debug;

use super::chain::MarkovChain;
use super::landscape::Landscape;
use super::matrix::{TransitionMatrix, STOCHASTIC_TOLERANCE};
use super::schedule::CoolingSchedule;
use crate::error::{GeneticError, Result};
use crate::representation::Representation;

/// Checks a caller-supplied initial distribution, or builds the uniform one.
pub fn initial_distribution(initial: Option<&[f64]>, states: usize) -> Result<Vec<f64>> {
    let Some(alpha) = initial else {
        if states == 0 {
            return Err(GeneticError::Configuration(
                "cannot build a distribution over zero states".to_string(),
            ));
        }
        return Ok(vec![1.0 / states as f64; states]);
    };

    if alpha.len() != states {
        return Err(GeneticError::Configuration(format!(
            "initial distribution has {} entries, chain has {} states",
            alpha.len(),
            states
        )));
    }
    if let Some(p) = alpha.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
        return Err(GeneticError::Configuration(format!(
            "initial distribution contains {}",
            p
        )));
    }
    let total: f64 = alpha.iter().sum();
    if (total - 1.0).abs() > STOCHASTIC_TOLERANCE {
        return Err(GeneticError::Configuration(format!(
            "initial distribution sums to {}",
            total
        )));
    }
    Ok(alpha.to_vec())
}

/// Probability of sitting in state `optimum` after `power` steps, starting from
/// `initial` (uniform when `None`): `alpha . (P^power)[:, optimum]`.
///
/// With every local optimum absorbing, a large power approximates the share of
/// starting mass that ends at the global optimum. No convergence check is made;
/// the caller chooses a power large enough for the chain at hand.
pub fn long_run_absorption_probability(
    matrix: &TransitionMatrix,
    optimum: usize,
    initial: Option<&[f64]>,
    power: u64,
) -> Result<f64> {
    if optimum >= matrix.size() {
        return Err(GeneticError::Configuration(format!(
            "optimum index {} outside a chain of {} states",
            optimum,
            matrix.size()
        )));
    }
    let alpha = initial_distribution(initial, matrix.size())?;
    let powered = matrix.power(power)?;
    Ok(alpha
        .iter()
        .enumerate()
        .map(|(i, a)| a * powered.get(i, optimum))
        .sum())
}

/// Probability of sitting at the global optimum after `steps` annealing steps,
/// the k-th step using the chain at temperature `schedule.temperature(k)`.
///
/// The chain is non-homogeneous, so instead of a matrix power the distribution is
/// pushed through `P(T_0) ... P(T_{steps-1})` one step at a time.
pub fn annealed_absorption_probability<L>(
    rep: &Representation,
    landscape: &L,
    schedule: &CoolingSchedule,
    steps: usize,
    initial: Option<&[f64]>,
) -> Result<f64>
where
    L: Landscape + ?Sized,
{
    let first = MarkovChain::annealing(rep, landscape, schedule.initial_temperature())?;
    let optimum = first.optimum();
    let mut distribution = initial_distribution(initial, first.len())?;

    for (k, temperature) in schedule.temperatures(steps).enumerate() {
        let chain = if k == 0 {
            first.clone()
        } else {
            MarkovChain::annealing(rep, landscape, temperature)?
        };
        distribution = chain.matrix().propagate(&distribution)?;
    }
    debug!(
        representation = rep.name(),
        steps,
        final_temperature = schedule.temperature(steps.saturating_sub(1)),
        "annealed chain composed"
    );
    Ok(distribution[optimum])
}

impl MarkovChain {
    /// [`long_run_absorption_probability`] for this chain's optimum.
    pub fn long_run_absorption_probability(&self, initial: Option<&[f64]>, power: u64) -> Result<f64> {
        long_run_absorption_probability(self.matrix(), self.optimum(), initial, power)
    }
}
