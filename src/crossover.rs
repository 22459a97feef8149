//! The crossover operators: produce two offspring genomes from two parents.
//!
//! The engine hands the operator a daughter genome cloned from the mother and a son genome
//! cloned from the father; the operator swaps material between them in place. An operator is
//! bound to its [Genotype] through a trait attribute, like [Fitness](crate::fitness::Fitness);
//! the built-in catalogue is implemented for every genotype and embedding applications can
//! supply domain-specific operators (e.g. permutation-preserving recombination) for a concrete
//! genotype.
//!
//! Multi-chromosome genomes are treated as a concatenation of loci, so a "single cut" is a
//! single cut over the whole genome, not one per chromosome (see
//! [CrossoverChromosomeSinglePoint](crate::crossover::CrossoverChromosomeSinglePoint) for the
//! per-chromosome variant).
mod allele_mixing;
mod chromosome_single_point;
mod double_point;
mod mixing;
mod single_point;
mod wrapper;

pub use self::allele_mixing::AlleleMixing as CrossoverAlleleMixing;
pub use self::chromosome_single_point::ChromosomeSinglePoint as CrossoverChromosomeSinglePoint;
pub use self::double_point::DoublePoint as CrossoverDoublePoint;
pub use self::mixing::Mixing as CrossoverMixing;
pub use self::single_point::SinglePoint as CrossoverSinglePoint;
pub use self::wrapper::Wrapper as CrossoverWrapper;

use crate::chromosome::Chromosome;
use crate::genotype::Genotype;
use rand::Rng;
use std::ops::Range;

pub trait Crossover: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    /// `daughter` starts as a clone of the mother's genome, `son` as a clone of the father's.
    fn call<R: Rng>(
        &self,
        genotype: &Self::Genotype,
        daughter: &mut [<Self::Genotype as Genotype>::Chromosome],
        son: &mut [<Self::Genotype as Genotype>::Chromosome],
        rng: &mut R,
    );
}

/// Swap the global locus range `[range.start, range.end)` between two genomes, where the global
/// index runs over the concatenated chromosomes.
pub(crate) fn swap_loci<C: Chromosome>(
    daughter: &mut [C],
    son: &mut [C],
    chromosome_length: usize,
    range: Range<usize>,
) {
    if chromosome_length == 0 {
        return;
    }
    for (index, (daughter_chromosome, son_chromosome)) in
        daughter.iter_mut().zip(son.iter_mut()).enumerate()
    {
        let chromosome_start = index * chromosome_length;
        let chromosome_end = chromosome_start + chromosome_length;
        let from = range.start.max(chromosome_start);
        let to = range.end.min(chromosome_end);
        if from >= to {
            continue;
        }
        if from == chromosome_start && to == chromosome_end {
            std::mem::swap(daughter_chromosome, son_chromosome);
        } else {
            daughter_chromosome
                .swap_range(son_chromosome, (from - chromosome_start)..(to - chromosome_start));
        }
    }
}
