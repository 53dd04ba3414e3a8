use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};

/// Widest codeword a `Bitstring` can hold.
pub const MAX_WIDTH: u32 = 63;

/// A fixed-width codeword.
///
/// The bits are packed into an integer whose most significant used bit is the
/// leftmost character of the textual form, so `"011"` has value 3 and position 0
/// refers to the leading `'0'`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bitstring {
    width: u32,
    bits: u64,
}

impl Bitstring {
    /// Builds a codeword from its integer value.
    ///
    /// Fails if `width` is zero or above [`MAX_WIDTH`], or if `bits` does not fit.
    pub fn new(bits: u64, width: u32) -> Result<Self> {
        if width == 0 || width > MAX_WIDTH {
            return Err(GeneticError::InvalidEncoding(format!(
                "codeword width must be in 1..={}, got {}",
                MAX_WIDTH, width
            )));
        }
        if bits >> width != 0 {
            return Err(GeneticError::InvalidEncoding(format!(
                "value {} does not fit in {} bits",
                bits, width
            )));
        }
        Ok(Self { width, bits })
    }

    /// Builds a codeword from genes, leftmost gene first.
    pub fn from_bools(genes: &[bool]) -> Result<Self> {
        let bits = genes
            .iter()
            .fold(0u64, |acc, &g| (acc << 1) | u64::from(g));
        Self::new(bits, genes.len() as u32)
    }

    pub fn value(&self) -> u64 {
        self.bits
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The bit at `pos`, counted from the left.
    pub fn bit(&self, pos: u32) -> bool {
        debug_assert!(pos < self.width);
        (self.bits >> (self.width - 1 - pos)) & 1 == 1
    }

    /// A copy with the bit at `pos` (counted from the left) inverted.
    pub fn flipped(&self, pos: u32) -> Self {
        debug_assert!(pos < self.width);
        Self {
            width: self.width,
            bits: self.bits ^ (1 << (self.width - 1 - pos)),
        }
    }

    pub fn hamming_distance(&self, other: &Self) -> u32 {
        (self.bits ^ other.bits).count_ones()
    }

    /// All codewords of the same width at Hamming distance 1.
    pub fn bit_neighbors(&self) -> impl Iterator<Item = Bitstring> + '_ {
        (0..self.width).map(move |pos| self.flipped(pos))
    }

    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.width).map(|pos| self.bit(pos)).collect()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.width as usize)
    }
}

impl FromStr for Bitstring {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        let genes = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GeneticError::InvalidEncoding(format!(
                    "unexpected character {:?} in bitstring {:?}",
                    other, s
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Self::from_bools(&genes)
    }
}
