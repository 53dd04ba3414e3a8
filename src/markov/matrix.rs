use rayon::prelude::*;

use crate::error::{GeneticError, Result};

/// Matrices with at least this many rows are multiplied row-parallel.
const PARALLEL_THRESHOLD: usize = 128;

/// Tolerance for row sums and probability vectors.
pub const STOCHASTIC_TOLERANCE: f64 = 1e-9;

/// Dense square matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    size: usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        m
    }

    /// Builds a matrix from equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GeneticError::Configuration(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            data.extend(row);
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.size.max(1))
    }

    pub fn row_sums(&self) -> Vec<f64> {
        self.rows().map(|row| row.iter().sum()).collect()
    }

    /// Fails with `InvariantViolation` unless every entry is non-negative and every
    /// row sums to 1 within [`STOCHASTIC_TOLERANCE`].
    pub fn check_stochastic(&self) -> Result<()> {
        for (i, row) in self.rows().enumerate() {
            if let Some(j) = row.iter().position(|&p| p < 0.0 || !p.is_finite()) {
                return Err(GeneticError::InvariantViolation(format!(
                    "entry ({}, {}) = {} is not a probability",
                    i, j, row[j]
                )));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > STOCHASTIC_TOLERANCE {
                return Err(GeneticError::InvariantViolation(format!(
                    "row {} sums to {}",
                    i, sum
                )));
            }
        }
        Ok(())
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &TransitionMatrix) -> Result<TransitionMatrix> {
        if self.size != other.size {
            return Err(GeneticError::Configuration(format!(
                "cannot multiply a {0}x{0} matrix by a {1}x{1} matrix",
                self.size, other.size
            )));
        }
        let n = self.size;
        let mut out = Self::zeros(n);
        if n == 0 {
            return Ok(out);
        }

        let fill = |(i, out_row): (usize, &mut [f64])| {
            for (k, &a) in self.row(i).iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out_row.iter_mut().zip(other.row(k)) {
                    *o += a * b;
                }
            }
        };

        if n >= PARALLEL_THRESHOLD {
            out.data.par_chunks_mut(n).enumerate().for_each(fill);
        } else {
            out.data.chunks_mut(n).enumerate().for_each(fill);
        }
        Ok(out)
    }

    /// `self^exponent` by repeated squaring. `self^0` is the identity.
    pub fn power(&self, exponent: u64) -> Result<TransitionMatrix> {
        let mut result = Self::identity(self.size);
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = result.multiply(&base)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.multiply(&base)?;
            }
        }
        Ok(result)
    }

    /// Row vector times matrix: the distribution one step after `distribution`.
    pub fn propagate(&self, distribution: &[f64]) -> Result<Vec<f64>> {
        if distribution.len() != self.size {
            return Err(GeneticError::Configuration(format!(
                "distribution has {} entries, matrix has {} states",
                distribution.len(),
                self.size
            )));
        }
        let mut out = vec![0.0; self.size];
        for (&weight, row) in distribution.iter().zip(self.rows()) {
            if weight == 0.0 {
                continue;
            }
            for (o, &p) in out.iter_mut().zip(row) {
                *o += weight * p;
            }
        }
        Ok(out)
    }
}
