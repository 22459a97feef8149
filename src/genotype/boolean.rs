use super::builder::{Builder, TryFromBuilderError};
use super::Genotype;
use rand::Rng;
use std::fmt;

/// Genotype with boolean alleles, one allele per word.
///
/// # Example:
/// ```
/// use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype};
///
/// let genotype = BooleanGenotype::builder()
///     .with_chromosome_length(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Boolean {
    pub num_chromosomes: usize,
    pub chromosome_length: usize,
    pub seed_genes_list: Vec<Vec<Vec<bool>>>,
}

impl TryFrom<Builder<Boolean>> for Boolean {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<Boolean>) -> Result<Self, Self::Error> {
        let Some(chromosome_length) = builder.chromosome_length else {
            return Err(TryFromBuilderError(
                "BooleanGenotype requires a chromosome_length",
            ));
        };
        if builder.num_chromosomes == 0 {
            return Err(TryFromBuilderError(
                "BooleanGenotype requires num_chromosomes > 0",
            ));
        }
        if !super::validate_seed_genes_list::<Boolean>(
            &builder.seed_genes_list,
            builder.num_chromosomes,
            chromosome_length,
        ) {
            return Err(TryFromBuilderError(
                "BooleanGenotype seed genes do not match the genome shape",
            ));
        }
        Ok(Self {
            num_chromosomes: builder.num_chromosomes,
            chromosome_length,
            seed_genes_list: builder.seed_genes_list,
        })
    }
}

impl Genotype for Boolean {
    type Allele = bool;
    type Chromosome = Vec<bool>;

    fn num_chromosomes(&self) -> usize {
        self.num_chromosomes
    }
    fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Self::Chromosome {
        (0..self.chromosome_length).map(|_| rng.gen()).collect()
    }
    fn zero_chromosome(&self) -> Self::Chromosome {
        vec![false; self.chromosome_length]
    }

    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        chromosome[index] = rng.gen();
    }
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, _rng: &mut R) {
        chromosome[index] = !chromosome[index];
    }

    fn seed_genes_list(&self) -> &Vec<Vec<Self::Chromosome>> {
        &self.seed_genes_list
    }

    fn chromosome_to_string(&self, chromosome: &Self::Chromosome) -> String {
        chromosome
            .iter()
            .map(|&allele| if allele { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  type: boolean")?;
        writeln!(f, "  num_chromosomes: {}", self.num_chromosomes)?;
        writeln!(f, "  chromosome_length: {}", self.chromosome_length)
    }
}
