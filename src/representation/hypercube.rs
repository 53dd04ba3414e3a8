//! Non-greedy Gray codes.
//!
//! A Gray code is a Hamiltonian cycle on the `b`-dimensional hypercube. The
//! reflected Gray code is the cycle a greedy walk finds (always flip the lowest bit
//! that reaches a new vertex), which makes it monotone in the phenotype. The
//! non-greedy code below starts with the walk `0, 1, 3, 7`, leaving the greedy
//! segment `0, 1, 3, 2` at its fourth vertex, and completes the cycle with a
//! depth-first search. Wide codes are grown from the 3-bit cycle by reflection.

use tracing::{debug, warn};

use crate::error::{GeneticError, Result};

use super::{Bitstring, Interval, Representation};

/// Widest cube searched exhaustively; wider codes are built by doubling.
pub const MAX_SEARCH_BITS: u32 = 6;

/// Width of the searched cycle that doubling starts from.
const SEED_BITS: u32 = 3;

/// First vertices of every searched cycle.
const FORCED_PREFIX: [u64; 4] = [0, 1, 3, 7];

/// Upper bound on popped search states before giving up.
const MAX_EXPANSIONS: usize = 1_000_000;

/// Set of removed hypercube vertices, one bit per vertex.
#[derive(Debug, Clone)]
struct VertexSet {
    words: Vec<u64>,
}

impl VertexSet {
    fn with_capacity(vertices: usize) -> Self {
        Self {
            words: vec![0; vertices.div_ceil(64)],
        }
    }

    fn insert(&mut self, v: u64) {
        self.words[(v / 64) as usize] |= 1 << (v % 64);
    }

    fn contains(&self, v: u64) -> bool {
        self.words[(v / 64) as usize] & (1 << (v % 64)) != 0
    }
}

/// A partial path together with the vertices it has removed from the cube.
struct Branch {
    path: Vec<u64>,
    removed: VertexSet,
}

/// Searches for a Hamiltonian cycle on the `bits`-cube that starts with `prefix`.
///
/// The search keeps an explicit stack of branches; each branch owns its removed
/// set, so no graph is shared or mutated between branches. Returns `None` if the
/// prefix cannot be completed, the expansion budget runs out, or the cube is
/// wider than [`MAX_SEARCH_BITS`].
pub fn hamiltonian_cycle(bits: u32, prefix: &[u64]) -> Option<Vec<u64>> {
    if bits > MAX_SEARCH_BITS {
        return None;
    }
    let vertices = 1usize << bits;
    let first = *prefix.first()?;

    let mut removed = VertexSet::with_capacity(vertices);
    for window in prefix.windows(2) {
        if (window[0] ^ window[1]).count_ones() != 1 {
            return None;
        }
    }
    for &v in prefix {
        if v as usize >= vertices || removed.contains(v) {
            return None;
        }
        removed.insert(v);
    }

    let mut stack = vec![Branch {
        path: prefix.to_vec(),
        removed,
    }];
    let mut expansions = 0;

    while let Some(branch) = stack.pop() {
        expansions += 1;
        if expansions > MAX_EXPANSIONS {
            warn!(bits, expansions, "hamiltonian search budget exhausted");
            return None;
        }

        let last = *branch.path.last()?;
        if branch.path.len() == vertices {
            if (last ^ first).count_ones() == 1 {
                debug!(bits, expansions, "hamiltonian cycle found");
                return Some(branch.path);
            }
            continue;
        }

        // Pushed high bit first so the lowest-bit flip is explored first.
        for bit in (0..bits).rev() {
            let next = last ^ (1 << bit);
            if branch.removed.contains(next) {
                continue;
            }
            let mut path = branch.path.clone();
            path.push(next);
            let mut removed = branch.removed.clone();
            removed.insert(next);
            stack.push(Branch { path, removed });
        }
    }

    debug!(bits, expansions, "no hamiltonian cycle extends the prefix");
    None
}

/// Doubles a `width`-bit Gray cycle: the sequence itself, then its reverse with a
/// leading 1.
pub fn reflect(sequence: &[u64], width: u32) -> Vec<u64> {
    sequence
        .iter()
        .copied()
        .chain(sequence.iter().rev().map(|&c| c | (1 << width)))
        .collect()
}

/// Codewords of a non-greedy Gray cycle of width `bits` (at least 3).
pub fn non_greedy_gray_sequence(bits: u32) -> Result<Vec<Bitstring>> {
    if bits < SEED_BITS || bits > super::bitstring::MAX_WIDTH {
        return Err(GeneticError::Configuration(format!(
            "non-greedy gray codes exist for 3..={} bits, got {}",
            super::bitstring::MAX_WIDTH,
            bits
        )));
    }

    let searched = if bits <= MAX_SEARCH_BITS {
        hamiltonian_cycle(bits, &FORCED_PREFIX)
    } else {
        None
    };

    let cycle = match searched {
        Some(cycle) => cycle,
        None => {
            let mut cycle = hamiltonian_cycle(SEED_BITS, &FORCED_PREFIX).ok_or_else(|| {
                GeneticError::InvariantViolation(
                    "the 3-cube has no cycle starting 0, 1, 3, 7".to_string(),
                )
            })?;
            for width in SEED_BITS..bits {
                cycle = reflect(&cycle, width);
            }
            cycle
        }
    };

    cycle.into_iter().map(|c| Bitstring::new(c, bits)).collect()
}

/// Non-greedy Gray code over `interval`. The interval needs at least 3 bits.
pub fn non_greedy_gray(interval: &Interval) -> Result<Representation> {
    let bits = interval.num_bits();
    let codes = non_greedy_gray_sequence(bits)?;
    interval.assign(&codes, format!("non-greedy gray {}-bit", bits))
}

/// Whether `codes` visits every codeword of its width exactly once with single-bit
/// steps, including the step from the last codeword back to the first.
pub fn is_hamiltonian_cycle(codes: &[Bitstring]) -> bool {
    let width = match codes.first() {
        Some(c) => c.width(),
        None => return false,
    };
    if codes.len() as u64 != 1u64 << width {
        return false;
    }
    let mut seen = VertexSet::with_capacity(codes.len());
    for code in codes {
        if code.width() != width || seen.contains(code.value()) {
            return false;
        }
        seen.insert(code.value());
    }
    codes
        .iter()
        .zip(codes.iter().cycle().skip(1))
        .all(|(a, b)| a.hamming_distance(b) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::generators;

    #[test]
    fn test_three_bit_cycle_leaves_greedy_segment() {
        let codes = non_greedy_gray_sequence(3).unwrap();
        assert!(is_hamiltonian_cycle(&codes));
        let text: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        assert_eq!(&text[..4], &["000", "001", "011", "111"]);
    }

    #[test]
    fn test_searched_and_doubled_widths_are_cycles() {
        for bits in 3..=9 {
            let codes = non_greedy_gray_sequence(bits).unwrap();
            assert!(is_hamiltonian_cycle(&codes), "{} bits", bits);
        }
    }

    #[test]
    fn test_reflected_gray_is_a_cycle() {
        let codes = generators::reflected_gray_sequence(5).unwrap();
        assert!(is_hamiltonian_cycle(&codes));
        assert!(!is_hamiltonian_cycle(&generators::binary_sequence(5).unwrap()));
    }

    #[test]
    fn test_too_narrow_widths_are_rejected() {
        assert!(matches!(
            non_greedy_gray_sequence(2),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_impossible_prefix() {
        assert_eq!(hamiltonian_cycle(3, &[0, 3]), None);
        assert_eq!(hamiltonian_cycle(3, &[0, 1, 0]), None);
        assert_eq!(hamiltonian_cycle(2, &[0, 1, 3, 7]), None);
    }

    #[test]
    fn test_search_refuses_wide_cubes() {
        assert_eq!(hamiltonian_cycle(MAX_SEARCH_BITS + 1, &[0]), None);
        assert_eq!(hamiltonian_cycle(64, &[0]), None);
        assert_eq!(hamiltonian_cycle(u32::MAX, &FORCED_PREFIX), None);
    }

    #[test]
    fn test_reflect_preserves_gray_property() {
        let doubled = reflect(&[0, 1, 3, 2], 2);
        assert_eq!(doubled, vec![0, 1, 3, 2, 6, 7, 5, 4]);
    }

    #[test]
    fn test_non_greedy_representation() {
        let rep = non_greedy_gray(&Interval::integers(5).unwrap()).unwrap();
        assert_eq!(rep.len(), 32);
        assert_eq!(rep.to_number(&"00000".parse().unwrap()).unwrap(), 0.0);
        assert_eq!(rep.to_number(&"00111".parse().unwrap()).unwrap(), 3.0);
    }
}
