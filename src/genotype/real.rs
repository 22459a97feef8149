use super::builder::{Builder, TryFromBuilderError};
use super::{DifferentialGenotype, Genotype};
use crate::random;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;

/// Genotype with double precision float alleles inside a mandatory allele range.
///
/// Seeding samples uniformly inside the range, drift steps by ±1.0 with wrap around the range,
/// gaussian perturbation clamps to it. The differential evolution trial-vector arithmetic is
/// intentionally unbounded (only the seed and mutation operators guarantee the bounds).
///
/// # Example:
/// ```
/// use evolutionary_algorithm::genotype::{RealGenotype, Genotype};
///
/// let genotype = RealGenotype::builder()
///     .with_chromosome_length(4)
///     .with_allele_range(-5.12..=5.12)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Real {
    pub num_chromosomes: usize,
    pub chromosome_length: usize,
    pub allele_range: RangeInclusive<f64>,
    pub seed_genes_list: Vec<Vec<Vec<f64>>>,
}

impl TryFrom<Builder<Real>> for Real {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<Real>) -> Result<Self, Self::Error> {
        let Some(chromosome_length) = builder.chromosome_length else {
            return Err(TryFromBuilderError(
                "RealGenotype requires a chromosome_length",
            ));
        };
        let Some(allele_range) = builder.allele_range else {
            return Err(TryFromBuilderError("RealGenotype requires an allele_range"));
        };
        if !allele_range.start().is_finite()
            || !allele_range.end().is_finite()
            || allele_range.start() > allele_range.end()
        {
            return Err(TryFromBuilderError(
                "RealGenotype requires a finite, ordered allele_range",
            ));
        }
        if builder.num_chromosomes == 0 {
            return Err(TryFromBuilderError(
                "RealGenotype requires num_chromosomes > 0",
            ));
        }
        if !super::validate_seed_genes_list::<Real>(
            &builder.seed_genes_list,
            builder.num_chromosomes,
            chromosome_length,
        ) {
            return Err(TryFromBuilderError(
                "RealGenotype seed genes do not match the genome shape",
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

impl Real {
    fn allele_min(&self) -> f64 {
        *self.allele_range.start()
    }
    fn allele_max(&self) -> f64 {
        *self.allele_range.end()
    }

    fn wrap(&self, value: f64) -> f64 {
        let width = self.allele_max() - self.allele_min();
        if width <= 0.0 {
            self.allele_min()
        } else {
            self.allele_min() + (value - self.allele_min()).rem_euclid(width)
        }
    }
}

impl Genotype for Real {
    type Allele = f64;
    type Chromosome = Vec<f64>;

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
        vec![0f64.clamp(self.allele_min(), self.allele_max()); self.chromosome_length]
    }

    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        chromosome[index] = rng.gen_range(self.allele_range.clone());
    }
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R) {
        let delta = if rng.gen() { 1.0 } else { -1.0 };
        chromosome[index] = self.wrap(chromosome[index] + delta);
    }
    fn gaussian_allele<R: Rng>(
        &self,
        chromosome: &mut Self::Chromosome,
        index: usize,
        sigma: f64,
        rng: &mut R,
    ) {
        let delta = random::gaussian(rng, 0.0, sigma);
        chromosome[index] = (chromosome[index] + delta).clamp(self.allele_min(), self.allele_max());
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
            .map(|allele| format!("{:.6}", allele))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DifferentialGenotype for Real {}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  type: real")?;
        writeln!(f, "  num_chromosomes: {}", self.num_chromosomes)?;
        writeln!(f, "  chromosome_length: {}", self.chromosome_length)?;
        writeln!(f, "  allele_range: {:?}", self.allele_range)
    }
}
