use super::{random_locus, Mutate};
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Perturb a single uniformly chosen allele by one step: ±1 with wrap inside the allele bounds
/// for numeric atom types, a flip for booleans and bits.
#[derive(Clone, Debug)]
pub struct SinglePointDrift<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> SinglePointDrift<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for SinglePointDrift<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Mutate for SinglePointDrift<G> {
    type Genotype = G;

    fn call<R: Rng>(&self, genotype: &G, genome: &mut [G::Chromosome], rng: &mut R) {
        if let Some((chromosome, locus)) = random_locus(genotype, rng) {
            genotype.drift_allele(&mut genome[chromosome], locus, rng);
        }
    }
}
