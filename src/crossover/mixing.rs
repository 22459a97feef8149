use super::Crossover;
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Chromosome-level uniform crossover: each whole chromosome is swapped between the offspring
/// with probability 0.5. Only meaningful for genomes with more than one chromosome; single
/// chromosome genomes either stay clones or are exchanged entirely.
#[derive(Clone, Debug)]
pub struct Mixing<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Mixing<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for Mixing<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Crossover for Mixing<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &self,
        _genotype: &G,
        daughter: &mut [G::Chromosome],
        son: &mut [G::Chromosome],
        rng: &mut R,
    ) {
        for (daughter_chromosome, son_chromosome) in daughter.iter_mut().zip(son.iter_mut()) {
            if rng.gen() {
                std::mem::swap(daughter_chromosome, son_chromosome);
            }
        }
    }
}
