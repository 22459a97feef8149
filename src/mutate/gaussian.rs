use super::{random_locus, Mutate};
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Add a gaussian perturbation with the configured sigma to a single uniformly chosen allele,
/// rounded for integer atom types and clamped to the allele bounds.
///
/// Requires gaussian support from the genotype (integer and real genotypes), which the engine
/// builders validate.
#[derive(Clone, Debug)]
pub struct Gaussian<G: Genotype> {
    pub sigma: f64,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Gaussian<G> {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            _phantom: PhantomData,
        }
    }
}

impl<G: Genotype> Default for Gaussian<G> {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<G: Genotype> Mutate for Gaussian<G> {
    type Genotype = G;

    fn call<R: Rng>(&self, genotype: &G, genome: &mut [G::Chromosome], rng: &mut R) {
        if let Some((chromosome, locus)) = random_locus(genotype, rng) {
            genotype.gaussian_allele(&mut genome[chromosome], locus, self.sigma, rng);
        }
    }

    fn require_gaussian(&self) -> bool {
        true
    }
}
