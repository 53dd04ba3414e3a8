//! Interval-to-domain mapping.
//!
//! An `Interval` is an inclusive `(start, end, step)` triple such as
//! `(-5.12, 5.12, 0.01)`. Its points are the numbers a representation encodes;
//! [`Interval::assign`] hands an ordered list of codewords to those points.

use crate::error::{GeneticError, Result};

use super::{Bitstring, Representation};

/// An inclusive arithmetic sequence of phenotype values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
    step: f64,
}

impl Interval {
    /// Validates the triple. The step must move from `start` towards `end`.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(GeneticError::InvalidInterval(format!(
                "({}, {}, {}) contains a non-finite bound",
                start, end, step
            )));
        }
        let consistent = (start < end && step > 0.0) || (start > end && step < 0.0);
        if !consistent {
            return Err(GeneticError::InvalidInterval(format!(
                "step {} does not lead from {} to {}",
                step, start, end
            )));
        }
        Ok(Self { start, end, step })
    }

    /// The integers `0..2^bits`, the domain of permutation codes.
    pub fn integers(bits: u32) -> Result<Self> {
        if bits == 0 || bits > super::bitstring::MAX_WIDTH {
            return Err(GeneticError::InvalidInterval(format!(
                "cannot build an integer domain for {} bits",
                bits
            )));
        }
        Self::new(0.0, ((1u64 << bits) - 1) as f64, 1.0)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Decimal places used when rounding points: the most used by any operand.
    pub fn precision(&self) -> u32 {
        [self.start, self.end, self.step]
            .iter()
            .map(|x| decimal_places(*x))
            .max()
            .unwrap_or(0)
    }

    /// Number of points in the interval.
    pub fn len(&self) -> usize {
        let span = ((self.end - self.start) / self.step).abs();
        // Tolerate representation error in spans like 10.24 / 0.01.
        (span + 1e-9).floor() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Minimum number of bits needed to give every point its own codeword.
    pub fn num_bits(&self) -> u32 {
        let len = self.len() as u64;
        (64 - (len - 1).leading_zeros()).max(1)
    }

    /// Points in ascending order, rounded to [`Interval::precision`].
    pub fn points(&self) -> Vec<f64> {
        let (low, step) = if self.start > self.end {
            (self.end, -self.step)
        } else {
            (self.start, self.step)
        };
        let scale = 10f64.powi(self.precision() as i32);
        (0..self.len())
            .map(|k| ((low + k as f64 * step) * scale).round() / scale + 0.0)
            .collect()
    }

    /// Assigns `codewords` in order to the ascending points of the interval.
    ///
    /// Fails with [`GeneticError::InvalidInterval`] when there are fewer codewords
    /// than points. Surplus codewords stay unassigned and are invalid in the
    /// resulting representation.
    pub fn assign(&self, codewords: &[Bitstring], name: impl Into<String>) -> Result<Representation> {
        let points = self.points();
        if codewords.len() < points.len() {
            return Err(GeneticError::InvalidInterval(format!(
                "{} points in the interval but only {} codewords",
                points.len(),
                codewords.len()
            )));
        }
        Representation::from_pairs(codewords.iter().copied().zip(points), name)
    }
}

fn decimal_places(x: f64) -> u32 {
    let text = format!("{}", x);
    match text.find('.') {
        Some(dot) => (text.len() - dot - 1) as u32,
        None => 0,
    }
}
