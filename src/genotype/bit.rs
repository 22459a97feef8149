use super::builder::{Builder, TryFromBuilderError};
use super::Genotype;
use fixedbitset::FixedBitSet;
use rand::Rng;
use std::fmt;

/// Genotype with boolean alleles stored as packed bits ([FixedBitSet]). Functionally equivalent
/// to [BooleanGenotype](super::BooleanGenotype), with a much smaller memory footprint for long
/// chromosomes.
///
/// # Example:
/// ```
/// use evolutionary_algorithm::genotype::{BitGenotype, Genotype};
///
/// let genotype = BitGenotype::builder()
///     .with_chromosome_length(1024)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Bit {
    pub num_chromosomes: usize,
    pub chromosome_length: usize,
    pub seed_genes_list: Vec<Vec<FixedBitSet>>,
}

impl TryFrom<Builder<Bit>> for Bit {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<Bit>) -> Result<Self, Self::Error> {
        let Some(chromosome_length) = builder.chromosome_length else {
            return Err(TryFromBuilderError(
                "BitGenotype requires a chromosome_length",
            ));
        };
        if builder.num_chromosomes == 0 {
            return Err(TryFromBuilderError(
                "BitGenotype requires num_chromosomes > 0",
            ));
        }
        if !super::validate_seed_genes_list::<Bit>(
            &builder.seed_genes_list,
            builder.num_chromosomes,
            chromosome_length,
        ) {
            return Err(TryFromBuilderError(
                "BitGenotype seed genes do not match the genome shape",
            ));
        }
        Ok(Self {
            num_chromosomes: builder.num_chromosomes,
            chromosome_length,
            seed_genes_list: builder.seed_genes_list,
        })
    }
}

impl Bit {
    /// Build a chromosome from a string of '0' and '1' characters, high bit first.
    /// Other characters count as '0'. Useful for tests and seeding.
    pub fn chromosome_from_str(string: &str) -> FixedBitSet {
        let mut chromosome = FixedBitSet::with_capacity(string.len());
        for (index, char) in string.chars().enumerate() {
            chromosome.set(index, char == '1');
        }
        chromosome
    }
}

impl Genotype for Bit {
    type Allele = bool;
    type Chromosome = FixedBitSet;

    fn num_chromosomes(&self) -> usize {
        self.num_chromosomes
    }
    fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Self::Chromosome {
        let mut chromosome = FixedBitSet::with_capacity(self.chromosome_length);
        for index in 0..self.chromosome_length {
            chromosome.set(index, rng.gen());
        }
        chromosome
    }
    fn zero_chromosome(&self) -> Self::Chromosome {
        FixedBitSet::with_capacity(self.chromosome_length)
    }

    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        chromosome.set(index, rng.gen());
    }
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, _rng: &mut R) {
        chromosome.toggle(index);
    }

    fn seed_genes_list(&self) -> &Vec<Vec<Self::Chromosome>> {
        &self.seed_genes_list
    }

    fn chromosome_to_string(&self, chromosome: &Self::Chromosome) -> String {
        format!("{:b}", chromosome)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  type: bit")?;
        writeln!(f, "  num_chromosomes: {}", self.num_chromosomes)?;
        writeln!(f, "  chromosome_length: {}", self.chromosome_length)
    }
}
