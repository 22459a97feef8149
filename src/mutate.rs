//! The mutation operators: produce one offspring genome from one parent.
//!
//! The engine hands the operator a genome cloned from the parent; the operator perturbs it in
//! place. An operator is bound to its [Genotype] through a trait attribute, like
//! [Fitness](crate::fitness::Fitness); the built-in catalogue works through the allele
//! primitives of the genotype and is implemented for every atom type supporting them, while
//! embedding applications can supply domain-specific operators (e.g. permutation-preserving
//! swaps) for a concrete genotype.
mod gaussian;
mod multi_point;
mod single_point_drift;
mod single_point_random;
mod wrapper;

pub use self::gaussian::Gaussian as MutateGaussian;
pub use self::multi_point::MultiPoint as MutateMultiPoint;
pub use self::single_point_drift::SinglePointDrift as MutateSinglePointDrift;
pub use self::single_point_random::SinglePointRandom as MutateSinglePointRandom;
pub use self::wrapper::Wrapper as MutateWrapper;

use crate::genotype::Genotype;
use rand::Rng;

/// The per-allele probability of the multi-point mutation operator.
pub const MULTI_POINT_CHANCE: f64 = 0.02;

pub trait Mutate: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    /// `genome` starts as a clone of the parent's genome.
    fn call<R: Rng>(
        &self,
        genotype: &Self::Genotype,
        genome: &mut [<Self::Genotype as Genotype>::Chromosome],
        rng: &mut R,
    );

    /// Whether this operator needs gaussian allele support from the genotype. Validated by the
    /// engine builders.
    fn require_gaussian(&self) -> bool {
        false
    }
}

/// A uniformly chosen (chromosome, locus) position, `None` for empty genomes.
pub(crate) fn random_locus<G: Genotype, R: Rng>(
    genotype: &G,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if genotype.num_chromosomes() == 0 || genotype.chromosome_length() == 0 {
        return None;
    }
    Some((
        rng.gen_range(0..genotype.num_chromosomes()),
        rng.gen_range(0..genotype.chromosome_length()),
    ))
}
