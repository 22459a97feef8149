use super::builder::{Builder, TryFromBuilderError};
use super::Genotype;
use crate::random;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Genotype with signed integer alleles inside a mandatory allele range.
///
/// The unbounded rendition of the catalogue is the degenerate case of a full-width range
/// (`i64::MIN..=i64::MAX`); every built-in operator therefore behaves as the bounded variant:
/// seeding samples inside the range, drift wraps around it and gaussian perturbation clamps to it.
///
/// # Example:
/// ```
/// use evolutionary_algorithm::genotype::{IntegerGenotype, Genotype};
///
/// let genotype = IntegerGenotype::builder()
///     .with_chromosome_length(100)
///     .with_allele_range(0..=10)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Integer {
    pub num_chromosomes: usize,
    pub chromosome_length: usize,
    pub allele_range: RangeInclusive<i64>,
    pub seed_genes_list: Vec<Vec<Vec<i64>>>,
}

impl TryFrom<Builder<Integer>> for Integer {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<Integer>) -> Result<Self, Self::Error> {
        let Some(chromosome_length) = builder.chromosome_length else {
            return Err(TryFromBuilderError(
                "IntegerGenotype requires a chromosome_length",
            ));
        };
        let Some(allele_range) = builder.allele_range else {
            return Err(TryFromBuilderError(
                "IntegerGenotype requires an allele_range",
            ));
        };
        if allele_range.is_empty() {
            return Err(TryFromBuilderError(
                "IntegerGenotype requires a non-empty allele_range",
            ));
        }
        if builder.num_chromosomes == 0 {
            return Err(TryFromBuilderError(
                "IntegerGenotype requires num_chromosomes > 0",
            ));
        }
        if !super::validate_seed_genes_list::<Integer>(
            &builder.seed_genes_list,
            builder.num_chromosomes,
            chromosome_length,
        ) {
            return Err(TryFromBuilderError(
                "IntegerGenotype seed genes do not match the genome shape",
            ));
        }
        Ok(Self {
            num_chromosomes: builder.num_chromosomes,
            chromosome_length,
            allele_range,
            seed_genes_list: builder.seed_genes_list,
        })
    }
}

impl Integer {
    fn allele_min(&self) -> i64 {
        *self.allele_range.start()
    }
    fn allele_max(&self) -> i64 {
        *self.allele_range.end()
    }

    /// Wrap a stepped value back into the allele range. Width arithmetic in i128 so full-width
    /// ranges do not overflow.
    fn wrap(&self, value: i128) -> i64 {
        let min = self.allele_min() as i128;
        let max = self.allele_max() as i128;
        let width = max - min + 1;
        (min + (value - min).rem_euclid(width)) as i64
    }
}

impl Genotype for Integer {
    type Allele = i64;
    type Chromosome = Vec<i64>;

    fn num_chromosomes(&self) -> usize {
        self.num_chromosomes
    }
    fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Self::Chromosome {
        (0..self.chromosome_length)
            .map(|_| rng.gen_range(self.allele_range.clone()))
            .collect()
    }
    fn zero_chromosome(&self) -> Self::Chromosome {
        // zero seeding still honors the allele bounds
        vec![0i64.clamp(self.allele_min(), self.allele_max()); self.chromosome_length]
    }

    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        chromosome[index] = rng.gen_range(self.allele_range.clone());
    }
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        let delta: i128 = if rng.gen() { 1 } else { -1 };
        chromosome[index] = self.wrap(chromosome[index] as i128 + delta);
    }
    fn gaussian_allele<R: Rng>(
        &self,
        chromosome: &mut Self::Chromosome,
        index: usize,
        sigma: f64,
        rng: &mut R,
    ) {
        let delta = random::gaussian(rng, 0.0, sigma).round() as i64;
        chromosome[index] =
            chromosome[index].saturating_add(delta).clamp(self.allele_min(), self.allele_max());
    }
    fn supports_gaussian(&self) -> bool {
        true
    }

    fn seed_genes_list(&self) -> &Vec<Vec<Self::Chromosome>> {
        &self.seed_genes_list
    }

    fn chromosome_to_string(&self, chromosome: &Self::Chromosome) -> String {
        chromosome
            .iter()
            .map(|allele| allele.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  type: integer")?;
        writeln!(f, "  num_chromosomes: {}", self.num_chromosomes)?;
        writeln!(f, "  chromosome_length: {}", self.chromosome_length)?;
        writeln!(f, "  allele_range: {:?}", self.allele_range)
    }
}
