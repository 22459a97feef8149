//! The search space: genome shape plus the allele-level primitives keyed on the atom type.
//!
//! A genotype fixes the atom type of a population's chromosomes (boolean, integer, double,
//! character or packed bit) and provides the seed and allele-mutation primitives the generic
//! operator catalogues ([select](crate::select), [crossover](crate::crossover),
//! [mutate](crate::mutate)) build on.
mod bit;
mod boolean;
mod builder;
mod character;
mod integer;
mod real;

pub use self::bit::Bit as BitGenotype;
pub use self::boolean::Boolean as BooleanGenotype;
pub use self::builder::{
    Builder as GenotypeBuilder, TryFromBuilderError as TryFromGenotypeBuilderError,
};
pub use self::character::Character as CharacterGenotype;
pub use self::integer::Integer as IntegerGenotype;
pub use self::real::Real as RealGenotype;

pub use crate::allele::Allele;
use crate::chromosome::Chromosome;
use rand::Rng;
use std::fmt;

/// Standard genotype, suitable for all engines. Each implemented genotype handles its own random
/// initialization and allele mutation primitives; the operator catalogues stay generic.
pub trait Genotype:
    Clone
    + Send
    + Sync
    + fmt::Debug
    + fmt::Display
    + TryFrom<GenotypeBuilder<Self>>
    + 'static
{
    type Allele: Allele;
    type Chromosome: Chromosome;

    fn num_chromosomes(&self) -> usize;
    fn chromosome_length(&self) -> usize;
    /// Total number of loci over all chromosomes.
    fn loci_size(&self) -> usize {
        self.num_chromosomes() * self.chromosome_length()
    }

    fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Self::Chromosome;
    fn zero_chromosome(&self) -> Self::Chromosome;
    fn random_genome<R: Rng>(&self, rng: &mut R) -> Vec<Self::Chromosome> {
        (0..self.num_chromosomes())
            .map(|_| self.random_chromosome(rng))
            .collect()
    }
    fn zero_genome(&self) -> Vec<Self::Chromosome> {
        (0..self.num_chromosomes())
            .map(|_| self.zero_chromosome())
            .collect()
    }

    /// Replace the allele at `index` with a fresh random-but-valid value.
    fn randomize_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R);

    /// Perturb the allele at `index` by one step (±1 with wrap inside the allele bounds for
    /// numeric types, a flip for booleans and bits).
    fn drift_allele<R: Rng>(&self, chromosome: &mut Self::Chromosome, index: usize, rng: &mut R);

    /// Add a gaussian perturbation with the given sigma, clamped to the allele bounds.
    /// Only supported where [supports_gaussian](Genotype::supports_gaussian) returns true; the
    /// engine builders validate this before use.
    fn gaussian_allele<R: Rng>(
        &self,
        _chromosome: &mut Self::Chromosome,
        _index: usize,
        _sigma: f64,
        _rng: &mut R,
    ) {
        panic!("the genotype does not support gaussian mutation");
    }
    fn supports_gaussian(&self) -> bool {
        false
    }

    /// User-supplied seed genomes, cycled through by
    /// [Population::seed](crate::population::Population::seed) when non-empty.
    fn seed_genes_list(&self) -> &Vec<Vec<Self::Chromosome>>;

    fn builder() -> GenotypeBuilder<Self> {
        GenotypeBuilder::<Self>::default()
    }

    /// Render one chromosome for diagnostics and logging.
    fn chromosome_to_string(&self, chromosome: &Self::Chromosome) -> String;

    fn genome_to_string(&self, genome: &[Self::Chromosome]) -> String {
        genome
            .iter()
            .map(|chromosome| self.chromosome_to_string(chromosome))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Genotype suitable for
/// [DifferentialEvolution](crate::strategy::differential_evolution::DifferentialEvolution):
/// real-vector chromosomes the trial-vector arithmetic can be applied to.
pub trait DifferentialGenotype: Genotype<Allele = f64, Chromosome = Vec<f64>> {}

pub(crate) fn validate_seed_genes_list<G: Genotype>(
    seed_genes_list: &[Vec<G::Chromosome>],
    num_chromosomes: usize,
    chromosome_length: usize,
) -> bool {
    seed_genes_list.iter().all(|genome| {
        genome.len() == num_chromosomes
            && genome
                .iter()
                .all(|chromosome| chromosome.len() == chromosome_length)
    })
}
