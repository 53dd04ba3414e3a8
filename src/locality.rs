//! # Locality metrics
//!
//! Measures of how well genotypic distance (Hamming distance between codewords)
//! tracks phenotypic distance (absolute difference of the decoded values) for a
//! [`Representation`].
//!
//! ```rust
//! use encoding_ga::locality::single_bit_locality;
//! use encoding_ga::representation::{generators, Interval};
//!
//! let domain = Interval::integers(3)?;
//! let binary = generators::binary(&domain)?;
//! let gray = generators::reflected_gray(&domain)?;
//! assert!((single_bit_locality(&binary) - single_bit_locality(&gray)).abs() < 1e-12);
//! # Ok::<(), encoding_ga::GeneticError>(())
//! ```

use crate::representation::{Bitstring, Representation};

fn phenotypic_distance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Smallest gap between two consecutive domain values; 1 for integer domains.
fn minimal_distance(entries: &[(Bitstring, f64)]) -> f64 {
    entries
        .windows(2)
        .map(|w| phenotypic_distance(w[0].1, w[1].1))
        .fold(f64::INFINITY, f64::min)
}

/// Mean phenotypic distance covered by a single-bit flip, averaged over every
/// codeword and every flip that lands on a valid codeword.
pub fn single_bit_locality(rep: &Representation) -> f64 {
    let mut total = 0.0;
    let mut flips = 0u64;
    for (code, value) in rep.iter() {
        for neighbor in rep.neighbors(&code) {
            if let Ok(other) = rep.to_number(&neighbor) {
                total += phenotypic_distance(value, other);
                flips += 1;
            }
        }
    }
    if flips == 0 {
        return 0.0;
    }
    total / flips as f64
}

/// Locality as a sum over unordered codeword pairs at Hamming distance 1 of how
/// far their values lie beyond the minimal phenotypic distance. Zero for codes
/// where every single-bit neighbour is a numeric neighbour.
pub fn rothlauf_locality(rep: &Representation) -> f64 {
    let entries: Vec<_> = rep.iter().collect();
    if entries.len() < 2 {
        return 0.0;
    }
    let d_min = minimal_distance(&entries);
    let mut sum = 0.0;
    for (i, (a, va)) in entries.iter().enumerate() {
        for (b, vb) in &entries[i + 1..] {
            if a.hamming_distance(b) == 1 {
                sum += (phenotypic_distance(*va, *vb) - d_min).abs();
            }
        }
    }
    sum
}

/// The dual of [`rothlauf_locality`]: a sum over numerically adjacent values of
/// how many bits beyond one separate their codewords. Zero exactly for Gray codes.
pub fn neighbor_locality(rep: &Representation) -> u64 {
    let entries: Vec<_> = rep.iter().collect();
    entries
        .windows(2)
        .map(|w| u64::from(w[0].0.hamming_distance(&w[1].0)).abs_diff(1))
        .sum()
}

/// Mean absolute difference between phenotypic and genotypic distance over all
/// unordered codeword pairs.
pub fn distance_distortion(rep: &Representation) -> f64 {
    let entries: Vec<_> = rep.iter().collect();
    if entries.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, (a, va)) in entries.iter().enumerate() {
        for (b, vb) in &entries[i + 1..] {
            sum += (phenotypic_distance(*va, *vb) - f64::from(a.hamming_distance(b))).abs();
        }
    }
    let pairs = (entries.len() * (entries.len() - 1) / 2) as f64;
    sum / pairs
}
