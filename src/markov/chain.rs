use tracing::debug;

use super::landscape::Landscape;
use super::matrix::{TransitionMatrix, STOCHASTIC_TOLERANCE};
use crate::error::{GeneticError, Result};
use crate::representation::{Bitstring, Representation};

/// A single-individual search over the codewords of a representation, modelled
/// as a Markov chain.
///
/// State `i` is the i-th codeword in ascending integer order. Every row of the
/// matrix sums to 1; the self-loop takes whatever probability the moves leave.
#[derive(Debug, Clone)]
pub struct MarkovChain {
    states: Vec<Bitstring>,
    matrix: TransitionMatrix,
    optimum: usize,
}

impl MarkovChain {
    /// Single-bit hill climbing: each of the `b` bits is flipped with probability
    /// `1/b` and the move is kept only if it strictly improves fitness.
    ///
    /// Every local optimum, the global one included, is absorbing.
    pub fn hill_climbing<L>(rep: &Representation, landscape: &L) -> Result<Self>
    where
        L: Landscape + ?Sized,
    {
        let chain = Self::single_bit(rep, landscape, |_| 0.0)?;
        debug!(representation = rep.name(), states = chain.len(), "built hill-climbing chain");
        Ok(chain)
    }

    /// Single-bit annealing at a fixed temperature: non-improving flips are also
    /// accepted, with probability `exp(delta / T)`.
    pub fn annealing<L>(rep: &Representation, landscape: &L, temperature: f64) -> Result<Self>
    where
        L: Landscape + ?Sized,
    {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(GeneticError::Configuration(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }
        Self::single_bit(rep, landscape, |delta| (delta / temperature).exp())
    }

    /// The (1+1) evolution strategy with bitwise mutation at rate `m = 1/b`.
    ///
    /// Any strictly better state `j` is reached in one step with probability
    /// `m^h (1-m)^(b-h)`, `h` being the Hamming distance to `j`.
    pub fn bitwise_mutation<L>(rep: &Representation, landscape: &L) -> Result<Self>
    where
        L: Landscape + ?Sized,
    {
        let (states, fitness, optimum) = Self::state_space(rep, landscape)?;
        let b = rep.num_bits() as i32;
        let m = 1.0 / f64::from(b);

        let mut matrix = TransitionMatrix::zeros(states.len());
        for (i, state) in states.iter().enumerate() {
            for (j, other) in states.iter().enumerate() {
                if fitness[j] > fitness[i] {
                    let h = state.hamming_distance(other) as i32;
                    matrix.set(i, j, m.powi(h) * (1.0 - m).powi(b - h));
                }
            }
            Self::close_row(&mut matrix, i)?;
        }
        debug!(representation = rep.name(), states = states.len(), "built bitwise-mutation chain");
        Ok(Self {
            states,
            matrix,
            optimum,
        })
    }

    /// Shared builder for the single-bit chains. `accept` gives the acceptance
    /// probability of a non-improving move with fitness change `delta <= 0`.
    fn single_bit<L, A>(rep: &Representation, landscape: &L, accept: A) -> Result<Self>
    where
        L: Landscape + ?Sized,
        A: Fn(f64) -> f64,
    {
        let (states, fitness, optimum) = Self::state_space(rep, landscape)?;
        let flip = 1.0 / f64::from(rep.num_bits());

        let mut matrix = TransitionMatrix::zeros(states.len());
        for (i, state) in states.iter().enumerate() {
            for neighbor in rep.neighbors(state) {
                let j = Self::index_in(&states, &neighbor)?;
                let delta = fitness[j] - fitness[i];
                let p = if delta > 0.0 { flip } else { accept(delta) * flip };
                matrix.set(i, j, p);
            }
            Self::close_row(&mut matrix, i)?;
        }
        Ok(Self {
            states,
            matrix,
            optimum,
        })
    }

    /// States in integer order, their fitness, and the index of the optimum.
    fn state_space<L>(rep: &Representation, landscape: &L) -> Result<(Vec<Bitstring>, Vec<f64>, usize)>
    where
        L: Landscape + ?Sized,
    {
        let optimum_code = rep.to_bitstring(landscape.optimum())?;
        let states = rep.codewords();
        let fitness = states
            .iter()
            .map(|s| rep.to_number(s).map(|x| landscape.fitness(x)))
            .collect::<Result<Vec<_>>>()?;
        let optimum = Self::index_in(&states, &optimum_code)?;
        Ok((states, fitness, optimum))
    }

    fn index_in(states: &[Bitstring], code: &Bitstring) -> Result<usize> {
        states.binary_search(code).map_err(|_| {
            GeneticError::InvalidEncoding(format!("{} is not a chain state", code))
        })
    }

    /// Puts the leftover probability of row `i` on its diagonal.
    fn close_row(matrix: &mut TransitionMatrix, i: usize) -> Result<()> {
        let outgoing: f64 = matrix.row(i).iter().sum();
        if outgoing > 1.0 + STOCHASTIC_TOLERANCE {
            return Err(GeneticError::InvariantViolation(format!(
                "row {} leaves with probability {}",
                i, outgoing
            )));
        }
        matrix.set(i, i, (1.0 - outgoing).max(0.0));
        Ok(())
    }

    pub fn states(&self) -> &[Bitstring] {
        &self.states
    }

    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Index of the global optimum's state.
    pub fn optimum(&self) -> usize {
        self.optimum
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether state `i` can never be left.
    pub fn is_absorbing(&self, i: usize) -> bool {
        self.matrix.get(i, i) == 1.0
    }

    /// Indices of all absorbing states.
    pub fn absorbing_states(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.is_absorbing(i)).collect()
    }
}
