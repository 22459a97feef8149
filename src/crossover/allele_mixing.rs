use super::Crossover;
use crate::chromosome::Chromosome;
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Allele-level uniform crossover: every locus is swapped between the offspring independently
/// with probability 0.5.
#[derive(Clone, Debug)]
pub struct AlleleMixing<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> AlleleMixing<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for AlleleMixing<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Crossover for AlleleMixing<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &self,
        genotype: &G,
        daughter: &mut [G::Chromosome],
        son: &mut [G::Chromosome],
        rng: &mut R,
    ) {
        for (daughter_chromosome, son_chromosome) in daughter.iter_mut().zip(son.iter_mut()) {
            for index in 0..genotype.chromosome_length() {
                if rng.gen() {
                    daughter_chromosome.swap_allele(son_chromosome, index);
                }
            }
        }
    }
}
