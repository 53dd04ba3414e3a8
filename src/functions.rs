//! # Benchmark functions
//!
//! De Jong's test suite plus the integer one-max landscape, all implementing
//! [`TestFunction`]. The usual search intervals are:
//!
//! | Function | Dimension | Interval | Goal |
//! |---|---|---|---|
//! | [`Parabola`] | 3 | `(-100, 100, 0.001)` | minimise |
//! | [`Rosenbrock`] | 2 | `(-5.12, 5.12, 0.01)` | minimise |
//! | [`Step`] | 5 | `(-5.12, 5.12, 0.01)` | minimise |
//! | [`NoisyQuartic`] | 30 | `(-1.28, 1.28, 0.01)` | minimise |
//! | [`ShekelFoxholes`] | 2 | `(-65.536, 65.536, 0.001)` | minimise |
//! | [`Easom`] | 2 | `(-100, 100, 0.001)` | minimise |
//! | [`OneMax`] | any | `0..2^b` | maximise |

use std::f64::consts::PI;

use crate::evolution::TestFunction;
use crate::rng::ThreadLocalRng;

/// Sum of squares.
#[derive(Debug, Clone, Copy)]
pub struct Parabola {
    dimension: usize,
}

impl Parabola {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for Parabola {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TestFunction for Parabola {
    fn input_dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }

    fn name(&self) -> &str {
        "parabola"
    }
}

/// Rosenbrock's saddle, minimum 0 at (1, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct Rosenbrock;

impl TestFunction for Rosenbrock {
    fn input_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.input_dimension());
        100.0 * (x[0] * x[0] - x[1]).powi(2) + (1.0 - x[0]).powi(2)
    }

    fn name(&self) -> &str {
        "rosenbrock"
    }
}

/// Sum of floors, a plateau landscape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Step;

impl TestFunction for Step {
    fn input_dimension(&self) -> usize {
        5
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi.floor()).sum()
    }

    fn name(&self) -> &str {
        "step"
    }
}

/// Weighted quartic with uniform `[0, 1)` noise added on every evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoisyQuartic;

impl TestFunction for NoisyQuartic {
    fn input_dimension(&self) -> usize {
        30
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let quartic: f64 = x
            .iter()
            .enumerate()
            .map(|(i, xi)| (i + 1) as f64 * xi.powi(4))
            .sum();
        quartic + ThreadLocalRng::gen_range(0.0..1.0)
    }

    fn name(&self) -> &str {
        "noisy quartic"
    }
}

/// Shekel's foxholes: 25 narrow wells on a 5x5 grid, global minimum near 0.998
/// at (-32, -32).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShekelFoxholes;

impl ShekelFoxholes {
    const GRID: [f64; 5] = [-32.0, -16.0, 0.0, 16.0, 32.0];
}

impl TestFunction for ShekelFoxholes {
    fn input_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.input_dimension());
        let wells: f64 = (0..25)
            .map(|j| {
                let a1 = Self::GRID[j % 5];
                let a2 = Self::GRID[j / 5];
                1.0 / ((j + 1) as f64 + (x[0] - a1).powi(6) + (x[1] - a2).powi(6))
            })
            .sum();
        1.0 / (0.002 + wells)
    }

    fn name(&self) -> &str {
        "shekel foxholes"
    }
}

/// Easom's function: flat almost everywhere, minimum -1 at (pi, pi).
#[derive(Debug, Clone, Copy, Default)]
pub struct Easom;

impl TestFunction for Easom {
    fn input_dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.input_dimension());
        -x[0].cos() * x[1].cos() * (-((x[0] - PI).powi(2) + (x[1] - PI).powi(2))).exp()
    }

    fn name(&self) -> &str {
        "easom"
    }
}

/// Generalised integer one-max: each coordinate scores `a - |x - a|`, so the
/// optimum is the vector with every entry equal to the target `a`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneMax {
    target: f64,
    dimension: usize,
}

impl OneMax {
    pub fn new(target: f64, dimension: usize) -> Self {
        Self { target, dimension }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Score of a single coordinate.
    pub fn score(&self, x: f64) -> f64 {
        self.target - (x - self.target).abs()
    }
}

impl TestFunction for OneMax {
    fn input_dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        x.iter().map(|&xi| self.score(xi)).sum()
    }

    fn name(&self) -> &str {
        "one-max"
    }
}
