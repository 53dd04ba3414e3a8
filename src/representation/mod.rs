//! # Representations
//!
//! A `Representation` is the genotype-to-phenotype map under study: a bijection
//! between a set of `b`-bit codewords and a finite ordered set of numbers. How
//! Hamming-adjacent codewords spread over the numeric domain (the locality of the
//! encoding) is what drives mutation behaviour, GA convergence and the Markov
//! transition structure analysed in [`crate::markov`].
//!
//! ## Example
//!
//! ```rust
//! use encoding_ga::representation::{generators, Bitstring, Interval};
//!
//! let gray = generators::reflected_gray(&Interval::new(0.0, 7.0, 1.0)?)?;
//! let code: Bitstring = "010".parse()?;
//!
//! assert_eq!(gray.to_number(&code)?, 3.0);
//! assert_eq!(gray.to_bitstring(3.0)?, code);
//! assert!(gray.is_valid("110"));
//! assert!(gray.is_valid(7.0));
//! assert!(!gray.is_valid(8.0));
//! # Ok::<(), encoding_ga::GeneticError>(())
//! ```

pub mod bitstring;
pub mod generators;
pub mod hypercube;
pub mod interval;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

pub use bitstring::Bitstring;
pub use interval::Interval;

/// Anything whose membership in a representation's domain can be tested:
/// codewords, their textual form, or decoded numbers.
pub trait Member {
    fn is_member_of(&self, rep: &Representation) -> bool;
}

impl Member for Bitstring {
    fn is_member_of(&self, rep: &Representation) -> bool {
        self.width() == rep.num_bits && rep.by_code.contains_key(&self.value())
    }
}

impl Member for &str {
    fn is_member_of(&self, rep: &Representation) -> bool {
        self.parse::<Bitstring>()
            .map(|b| b.is_member_of(rep))
            .unwrap_or(false)
    }
}

impl Member for f64 {
    fn is_member_of(&self, rep: &Representation) -> bool {
        rep.position_of_value(*self).is_some()
    }
}

/// An immutable bijection between fixed-width codewords and numbers.
///
/// Entries are kept in ascending numeric order, so the position of a codeword in
/// [`Representation::iter`] is its rank in the phenotype domain.
#[derive(Debug, Clone)]
pub struct Representation {
    name: String,
    num_bits: u32,
    entries: Vec<(Bitstring, f64)>,
    by_code: HashMap<u64, usize>,
}

impl Representation {
    /// Builds a representation from `(codeword, value)` pairs.
    ///
    /// All codewords must share one width, and neither codewords nor values may
    /// repeat; a repeat breaks the bijection and is reported as
    /// [`GeneticError::InvariantViolation`].
    pub fn from_pairs<I>(pairs: I, name: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (Bitstring, f64)>,
    {
        let mut entries: Vec<(Bitstring, f64)> = pairs.into_iter().collect();
        let num_bits = match entries.first() {
            Some((code, _)) => code.width(),
            None => {
                return Err(GeneticError::InvalidEncoding(
                    "a representation needs at least one codeword".to_string(),
                ))
            }
        };

        if let Some((code, _)) = entries.iter().find(|(c, _)| c.width() != num_bits) {
            return Err(GeneticError::InvalidEncoding(format!(
                "codeword {} is not {} bits wide",
                code, num_bits
            )));
        }
        if let Some((_, value)) = entries.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GeneticError::InvalidEncoding(format!(
                "value {} is not finite",
                value
            )));
        }

        entries.sort_by(|a, b| a.1.total_cmp(&b.1));
        if let Some(w) = entries.windows(2).find(|w| w[0].1 == w[1].1) {
            return Err(GeneticError::InvariantViolation(format!(
                "value {} is assigned to both {} and {}",
                w[0].1, w[0].0, w[1].0
            )));
        }

        let mut by_code = HashMap::with_capacity(entries.len());
        for (idx, (code, _)) in entries.iter().enumerate() {
            if by_code.insert(code.value(), idx).is_some() {
                return Err(GeneticError::InvariantViolation(format!(
                    "codeword {} is assigned to more than one value",
                    code
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            num_bits,
            entries,
            by_code,
        })
    }

    /// Decodes a codeword.
    pub fn to_number(&self, code: &Bitstring) -> Result<f64> {
        self.position_of_code(code)
            .map(|idx| self.entries[idx].1)
            .ok_or_else(|| {
                GeneticError::InvalidEncoding(format!(
                    "{} is not a codeword of {}",
                    code, self.name
                ))
            })
    }

    /// Encodes a number of the domain.
    pub fn to_bitstring(&self, value: f64) -> Result<Bitstring> {
        self.position_of_value(value)
            .map(|idx| self.entries[idx].0)
            .ok_or_else(|| {
                GeneticError::InvalidEncoding(format!(
                    "{} is not in the domain of {}",
                    value, self.name
                ))
            })
    }

    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of codewords (equal to the number of domain values).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every `b`-bit string is a codeword.
    pub fn is_complete(&self) -> bool {
        self.entries.len() as u64 == 1u64 << self.num_bits
    }

    /// Uniform draw over the valid codewords.
    pub fn random_bitstring(&self, rng: &mut RandomNumberGenerator) -> Bitstring {
        self.entries[rng.gen_index(self.entries.len())].0
    }

    /// Membership test for codewords, codeword text, or numbers.
    pub fn is_valid<M: Member>(&self, value: M) -> bool {
        value.is_member_of(self)
    }

    /// Valid codewords at Hamming distance 1 from `code`.
    pub fn neighbors(&self, code: &Bitstring) -> Vec<Bitstring> {
        code.bit_neighbors()
            .filter(|n| n.is_member_of(self))
            .collect()
    }

    /// Position of a codeword in the ascending numeric domain.
    pub fn rank_of(&self, code: &Bitstring) -> Result<usize> {
        self.position_of_code(code).ok_or_else(|| {
            GeneticError::InvalidEncoding(format!("{} is not a codeword of {}", code, self.name))
        })
    }

    /// `(codeword, value)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (Bitstring, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Codewords sorted by their integer value, the state order used by the
    /// Markov analyser.
    pub fn codewords(&self) -> Vec<Bitstring> {
        let mut codes: Vec<Bitstring> = self.entries.iter().map(|(c, _)| *c).collect();
        codes.sort();
        codes
    }

    fn position_of_code(&self, code: &Bitstring) -> Option<usize> {
        if code.width() != self.num_bits {
            return None;
        }
        self.by_code.get(&code.value()).copied()
    }

    fn position_of_value(&self, value: f64) -> Option<usize> {
        self.entries
            .binary_search_by(|(_, v)| v.partial_cmp(&value).unwrap_or(Ordering::Less))
            .ok()
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bits): {{", self.name, self.num_bits)?;
        for (i, (code, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", code, value)?;
        }
        write!(f, "}}")
    }
}
