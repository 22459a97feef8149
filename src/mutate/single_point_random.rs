use super::{random_locus, Mutate};
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Replace a single uniformly chosen allele with a fresh random-but-valid value.
#[derive(Clone, Debug)]
pub struct SinglePointRandom<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> SinglePointRandom<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for SinglePointRandom<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Mutate for SinglePointRandom<G> {
    type Genotype = G;

    fn call<R: Rng>(&self, genotype: &G, genome: &mut [G::Chromosome], rng: &mut R) {
        if let Some((chromosome, locus)) = random_locus(genotype, rng) {
            genotype.randomize_allele(&mut genome[chromosome], locus, rng);
        }
    }
}
