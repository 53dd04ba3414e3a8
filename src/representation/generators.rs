//! Constructors for the encodings compared by the experiments.
//!
//! * [`binary`] – codeword `i` is the plain binary expansion of `i`.
//! * [`reflected_gray`] – the reflected binary Gray sequence; numerically adjacent
//!   values differ in exactly one bit.
//! * [`permutation`] – an arbitrary caller-chosen code, used to build deliberately
//!   poor ("worst case locality") encodings.
//! * [`super::hypercube::non_greedy_gray`] – a Gray code that is not monotone in
//!   the phenotype.

use crate::error::{GeneticError, Result};

use super::{bitstring::MAX_WIDTH, Bitstring, Interval, Representation};

/// Codewords `0..2^bits` in plain binary order.
pub fn binary_sequence(bits: u32) -> Result<Vec<Bitstring>> {
    check_width(bits)?;
    (0..1u64 << bits).map(|i| Bitstring::new(i, bits)).collect()
}

/// The reflected binary Gray sequence of length `2^bits`.
pub fn reflected_gray_sequence(bits: u32) -> Result<Vec<Bitstring>> {
    check_width(bits)?;
    (0..1u64 << bits)
        .map(|i| Bitstring::new(i ^ (i >> 1), bits))
        .collect()
}

/// Binary code over `interval`.
pub fn binary(interval: &Interval) -> Result<Representation> {
    interval.assign(&binary_sequence(interval.num_bits())?, "binary")
}

/// Reflected Gray code over `interval`.
pub fn reflected_gray(interval: &Interval) -> Result<Representation> {
    interval.assign(&reflected_gray_sequence(interval.num_bits())?, "reflected gray")
}

/// Assigns an explicit ordered codeword list to `interval`.
pub fn from_codewords(
    codewords: &[Bitstring],
    interval: &Interval,
    name: impl Into<String>,
) -> Result<Representation> {
    interval.assign(codewords, name)
}

/// A user-specified code: the codeword whose binary value is `i` decodes to `perm[i]`.
///
/// `perm` must be a permutation of `0..2^b` for some `b >= 1`.
///
/// ```rust
/// use encoding_ga::representation::generators::permutation;
///
/// let rep = permutation(&[0, 5, 6, 3, 7, 1, 2, 4], "worst")?;
/// assert_eq!(rep.to_number(&"001".parse()?)?, 5.0);
/// # Ok::<(), encoding_ga::GeneticError>(())
/// ```
pub fn permutation(perm: &[u64], name: impl Into<String>) -> Result<Representation> {
    let len = perm.len() as u64;
    if len < 2 || !len.is_power_of_two() {
        return Err(GeneticError::InvalidEncoding(format!(
            "a permutation code needs 2^b entries, got {}",
            len
        )));
    }
    let bits = len.trailing_zeros();
    check_width(bits)?;

    let mut seen = vec![false; perm.len()];
    for &value in perm {
        match seen.get_mut(value as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(GeneticError::InvalidEncoding(format!(
                    "{} is out of range or repeated in a permutation of 0..{}",
                    value, len
                )))
            }
        }
    }

    let pairs = perm
        .iter()
        .enumerate()
        .map(|(i, &value)| Ok((Bitstring::new(i as u64, bits)?, value as f64)))
        .collect::<Result<Vec<_>>>()?;
    Representation::from_pairs(pairs, name)
}

fn check_width(bits: u32) -> Result<()> {
    if bits == 0 || bits > MAX_WIDTH {
        return Err(GeneticError::InvalidEncoding(format!(
            "cannot generate codewords of width {}",
            bits
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflected_gray_three_bits() {
        let rep = reflected_gray(&Interval::new(0.0, 7.0, 1.0).unwrap()).unwrap();
        let expected = ["000", "001", "011", "010", "110", "111", "101", "100"];
        for (value, code) in expected.iter().enumerate() {
            assert_eq!(rep.to_bitstring(value as f64).unwrap().to_string(), *code);
        }
    }

    #[test]
    fn test_binary_codeword_order() {
        let rep = binary(&Interval::new(-1.0, 1.0, 0.5).unwrap()).unwrap();
        assert_eq!(rep.num_bits(), 3);
        assert_eq!(rep.len(), 5);
        assert_eq!(rep.to_bitstring(-1.0).unwrap().to_string(), "000");
        assert_eq!(rep.to_bitstring(0.5).unwrap().to_string(), "011");
        assert!(!rep.is_valid("101"));
    }

    #[test]
    fn test_permutation_validation() {
        assert!(permutation(&[0, 1, 2], "odd").is_err());
        assert!(permutation(&[0, 1, 1, 3], "repeat").is_err());
        assert!(permutation(&[0, 1, 2, 4], "range").is_err());
        assert!(permutation(&[3, 1, 2, 0], "ok").is_ok());
    }

    #[test]
    fn test_permutation_matches_binary_for_identity() {
        let perm: Vec<u64> = (0..32).collect();
        let ident = permutation(&perm, "identity").unwrap();
        let bin = binary(&Interval::integers(5).unwrap()).unwrap();
        for (code, value) in bin.iter() {
            assert_eq!(ident.to_number(&code).unwrap(), value);
        }
    }
}
