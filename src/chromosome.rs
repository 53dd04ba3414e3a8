//! # Chromosome
//!
//! A chromosome is a real-valued vector in genotype form: `d` codewords of a shared
//! [`Representation`] concatenated into one bitstring of `d * b` genes. Every
//! block is a valid codeword at all times; crossover and mutation resample until
//! that holds.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use encoding_ga::chromosome::Chromosome;
//! use encoding_ga::representation::{generators, Interval};
//! use encoding_ga::rng::RandomNumberGenerator;
//!
//! let rep = Arc::new(generators::reflected_gray(&Interval::new(-1.0, 1.0, 0.25)?)?);
//! let mut rng = RandomNumberGenerator::from_seed(5);
//!
//! let mut chrom = Chromosome::from_values(rep.clone(), &[-1.0, 0.5])?;
//! assert_eq!(chrom.decode()?, vec![-1.0, 0.5]);
//!
//! chrom.mutate(&mut rng)?;
//! assert!(chrom.is_valid());
//! # Ok::<(), encoding_ga::GeneticError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::{GeneticError, Result};
use crate::evolution::TestFunction;
use crate::representation::{Bitstring, Representation};
use crate::rng::RandomNumberGenerator;

/// Resampling rounds per crossover block before falling back to parent A's block.
pub const MAX_CROSSOVER_ATTEMPTS: usize = 10_000;

/// Probability that a child inherits a gene from the first parent.
const UNIFORM_CROSSOVER_BIAS: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<bool>,
    rep: Arc<Representation>,
}

impl Chromosome {
    /// Wraps raw genes. The length must be a positive multiple of the codeword
    /// width and every block must be a codeword.
    pub fn from_genes(rep: Arc<Representation>, genes: Vec<bool>) -> Result<Self> {
        let width = rep.num_bits() as usize;
        if genes.is_empty() || genes.len() % width != 0 {
            return Err(GeneticError::InvalidEncoding(format!(
                "{} genes do not split into {}-bit blocks",
                genes.len(),
                width
            )));
        }
        let chrom = Self { genes, rep };
        if !chrom.is_valid() {
            return Err(GeneticError::InvalidEncoding(format!(
                "{} contains a block that is not a codeword of {}",
                chrom,
                chrom.rep.name()
            )));
        }
        Ok(chrom)
    }

    /// Encodes a vector of domain values.
    pub fn from_values(rep: Arc<Representation>, values: &[f64]) -> Result<Self> {
        let mut genes = Vec::with_capacity(values.len() * rep.num_bits() as usize);
        for &value in values {
            genes.extend(rep.to_bitstring(value)?.to_bools());
        }
        Self::from_genes(rep, genes)
    }

    /// `dimension` codewords drawn uniformly from the representation.
    pub fn random(
        rep: Arc<Representation>,
        dimension: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(GeneticError::Configuration(
                "chromosome dimension must be positive".to_string(),
            ));
        }
        let mut genes = Vec::with_capacity(dimension * rep.num_bits() as usize);
        for _ in 0..dimension {
            genes.extend(rep.random_bitstring(rng).to_bools());
        }
        Ok(Self { genes, rep })
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn representation(&self) -> &Arc<Representation> {
        &self.rep
    }

    /// Number of encoded values.
    pub fn dimension(&self) -> usize {
        self.genes.len() / self.block_width()
    }

    fn block_width(&self) -> usize {
        self.rep.num_bits() as usize
    }

    fn block(&self, index: usize) -> &[bool] {
        let width = self.block_width();
        &self.genes[index * width..(index + 1) * width]
    }

    /// Splits the genes into codewords and decodes each one.
    pub fn decode(&self) -> Result<Vec<f64>> {
        self.genes
            .chunks(self.block_width())
            .map(|block| self.rep.to_number(&Bitstring::from_bools(block)?))
            .collect()
    }

    /// Decodes and scores the chromosome.
    pub fn evaluate_fitness<F>(&self, function: &F) -> Result<f64>
    where
        F: TestFunction + ?Sized,
    {
        if function.input_dimension() != self.dimension() {
            return Err(GeneticError::Configuration(format!(
                "{} expects {} inputs but the chromosome encodes {}",
                function.name(),
                function.input_dimension(),
                self.dimension()
            )));
        }
        Ok(function.evaluate(&self.decode()?))
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_genes(&self.genes)
    }

    /// Whether `genes` would form a valid chromosome under this representation.
    pub fn is_valid_genes(&self, genes: &[bool]) -> bool {
        let width = self.block_width();
        genes.len() % width == 0
            && genes.chunks(width).all(|block| {
                Bitstring::from_bools(block)
                    .map(|code| self.rep.is_valid(code))
                    .unwrap_or(false)
            })
    }

    /// Uniform crossover producing two independently drawn children.
    ///
    /// Each gene comes from `self` with probability 0.5, otherwise from `partner`.
    /// A block that is not a codeword is drawn again.
    pub fn crossover(
        &self,
        partner: &Chromosome,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Chromosome, Chromosome)> {
        if self.genes.len() != partner.genes.len() || self.rep.num_bits() != partner.rep.num_bits()
        {
            return Err(GeneticError::Configuration(format!(
                "cannot cross {} genes of {} with {} genes of {}",
                self.genes.len(),
                self.rep.name(),
                partner.genes.len(),
                partner.rep.name()
            )));
        }
        let first = self.mate(partner, rng)?;
        let second = self.mate(partner, rng)?;
        Ok((first, second))
    }

    fn mate(&self, partner: &Chromosome, rng: &mut RandomNumberGenerator) -> Result<Chromosome> {
        let width = self.block_width();
        let mut genes = Vec::with_capacity(self.genes.len());

        // Blocks are drawn independently, so resampling one block at a time yields
        // the same distribution as resampling the whole child.
        for index in 0..self.dimension() {
            let (a, b) = (self.block(index), partner.block(index));
            let mut block = Vec::with_capacity(width);
            let mut accepted = false;

            for _ in 0..MAX_CROSSOVER_ATTEMPTS {
                block.clear();
                block.extend(a.iter().zip(b).map(|(&ga, &gb)| {
                    if rng.gen_bool(UNIFORM_CROSSOVER_BIAS) {
                        ga
                    } else {
                        gb
                    }
                }));
                if self.rep.is_valid(Bitstring::from_bools(&block)?) {
                    accepted = true;
                    break;
                }
            }

            if !accepted {
                warn!(
                    block = index,
                    attempts = MAX_CROSSOVER_ATTEMPTS,
                    "crossover block never became a codeword, keeping the first parent's"
                );
                block.clear();
                block.extend_from_slice(a);
            }
            genes.extend(block);
        }

        Ok(Chromosome {
            genes,
            rep: self.rep.clone(),
        })
    }

    /// Single-bit mutation of one randomly chosen block.
    ///
    /// The flipped position is uniform among the positions whose flip yields a
    /// codeword. A block without any such position is replaced by a random codeword.
    pub fn mutate(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let index = rng.gen_index(self.dimension());
        let code = Bitstring::from_bools(self.block(index))?;

        let flips: Vec<Bitstring> = self.rep.neighbors(&code);
        let mutated = if flips.is_empty() {
            warn!(block = index, code = %code, "no valid single-bit flip, redrawing the block");
            self.rep.random_bitstring(rng)
        } else {
            flips[rng.gen_index(flips.len())]
        };

        let width = self.block_width();
        self.genes[index * width..(index + 1) * width].copy_from_slice(&mutated.to_bools());
        Ok(())
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes && Arc::ptr_eq(&self.rep, &other.rep)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &gene in &self.genes {
            write!(f, "{}", if gene { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::{generators, hypercube, Interval};

    struct Sum(usize);

    impl TestFunction for Sum {
        fn input_dimension(&self) -> usize {
            self.0
        }

        fn evaluate(&self, x: &[f64]) -> f64 {
            x.iter().sum()
        }
    }

    fn sparse_rep() -> Arc<Representation> {
        // 11 points in 4 bits: five codewords are invalid.
        Arc::new(generators::binary(&Interval::new(0.0, 1.0, 0.1).unwrap()).unwrap())
    }

    fn hamming(a: &Chromosome, b: &Chromosome) -> usize {
        a.genes().iter().zip(b.genes()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_decode_and_fitness() {
        let rep = sparse_rep();
        let chrom = Chromosome::from_values(rep, &[0.2, 0.7, 1.0]).unwrap();
        assert_eq!(chrom.dimension(), 3);
        assert_eq!(chrom.to_string(), "001001111010");
        assert_eq!(chrom.decode().unwrap(), vec![0.2, 0.7, 1.0]);
        assert!((chrom.evaluate_fitness(&Sum(3)).unwrap() - 1.9).abs() < 1e-12);
        assert!(matches!(
            chrom.evaluate_fitness(&Sum(2)),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_genes_rejects_invalid_blocks() {
        let rep = sparse_rep();
        let invalid = vec![true, true, true, true];
        assert!(Chromosome::from_genes(rep.clone(), invalid).is_err());
        assert!(Chromosome::from_genes(rep.clone(), vec![false; 3]).is_err());
        assert!(Chromosome::from_genes(rep, vec![false; 8]).is_ok());
    }

    #[test]
    fn test_is_valid_genes_override() {
        let rep = sparse_rep();
        let chrom = Chromosome::from_values(rep, &[0.0]).unwrap();
        assert!(chrom.is_valid_genes(&[true, false, true, false]));
        assert!(!chrom.is_valid_genes(&[true, true, false, false]));
        assert!(!chrom.is_valid_genes(&[true, false]));
    }

    #[test]
    fn test_mutation_flips_exactly_one_bit() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        for rep in [
            sparse_rep(),
            Arc::new(hypercube::non_greedy_gray(&Interval::integers(5).unwrap()).unwrap()),
        ] {
            for _ in 0..200 {
                let original = Chromosome::random(rep.clone(), 4, &mut rng).unwrap();
                let mut mutated = original.clone();
                mutated.mutate(&mut rng).unwrap();
                assert!(mutated.is_valid());
                assert_eq!(hamming(&original, &mutated), 1);
            }
        }
    }

    #[test]
    fn test_crossover_children_are_valid() {
        let rep = sparse_rep();
        let mut rng = RandomNumberGenerator::from_seed(23);
        for _ in 0..200 {
            let a = Chromosome::random(rep.clone(), 5, &mut rng).unwrap();
            let b = Chromosome::random(rep.clone(), 5, &mut rng).unwrap();
            let (c1, c2) = a.crossover(&b, &mut rng).unwrap();
            assert!(c1.is_valid() && c2.is_valid());
            assert_eq!(c1.genes().len(), a.genes().len());
            assert_eq!(c2.genes().len(), a.genes().len());
            // Genes where the parents agree are inherited unchanged.
            for i in 0..a.genes().len() {
                if a.genes()[i] == b.genes()[i] {
                    assert_eq!(c1.genes()[i], a.genes()[i]);
                    assert_eq!(c2.genes()[i], a.genes()[i]);
                }
            }
        }
    }

    #[test]
    fn test_crossover_rejects_mismatched_partner() {
        let rep = sparse_rep();
        let mut rng = RandomNumberGenerator::from_seed(2);
        let a = Chromosome::random(rep.clone(), 2, &mut rng).unwrap();
        let b = Chromosome::random(rep, 3, &mut rng).unwrap();
        assert!(a.crossover(&b, &mut rng).is_err());
    }

    #[test]
    fn test_random_requires_positive_dimension() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        assert!(Chromosome::random(sparse_rep(), 0, &mut rng).is_err());
    }
}
