use super::Crossover;
use crate::chromosome::Chromosome;
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Crossover with one independent cut per chromosome: within every chromosome the tail after
/// its own uniformly chosen cut is taken from the other parent.
#[derive(Clone, Debug)]
pub struct ChromosomeSinglePoint<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> ChromosomeSinglePoint<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for ChromosomeSinglePoint<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Crossover for ChromosomeSinglePoint<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &self,
        genotype: &G,
        daughter: &mut [G::Chromosome],
        son: &mut [G::Chromosome],
        rng: &mut R,
    ) {
        let chromosome_length = genotype.chromosome_length();
        if chromosome_length < 2 {
            return;
        }
        for (daughter_chromosome, son_chromosome) in daughter.iter_mut().zip(son.iter_mut()) {
            let cut = rng.gen_range(1..chromosome_length);
            daughter_chromosome.swap_tail(son_chromosome, cut);
        }
    }
}
