use super::{Mutate, MULTI_POINT_CHANCE};
use crate::genotype::Genotype;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use std::marker::PhantomData;

/// Drift every allele independently with a small probability
/// ([MULTI_POINT_CHANCE](super::MULTI_POINT_CHANCE) by default).
#[derive(Clone, Debug)]
pub struct MultiPoint<G: Genotype> {
    pub probability: f64,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> MultiPoint<G> {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            _phantom: PhantomData,
        }
    }
}

impl<G: Genotype> Default for MultiPoint<G> {
    fn default() -> Self {
        Self::new(MULTI_POINT_CHANCE)
    }
}

impl<G: Genotype> Mutate for MultiPoint<G> {
    type Genotype = G;

    fn call<R: Rng>(&self, genotype: &G, genome: &mut [G::Chromosome], rng: &mut R) {
        let sampler = Bernoulli::new(self.probability.clamp(0.0, 1.0)).unwrap();
        for chromosome in genome.iter_mut() {
            for locus in 0..genotype.chromosome_length() {
                if sampler.sample(rng) {
                    genotype.drift_allele(chromosome, locus, rng);
                }
            }
        }
    }
}
