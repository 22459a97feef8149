use super::{swap_loci, Crossover};
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Crossover with a single cut over the concatenated loci: the genes after the cut are taken
/// from the other parent. The cut position is chosen with uniform probability.
#[derive(Clone, Debug)]
pub struct SinglePoint<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> SinglePoint<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for SinglePoint<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Crossover for SinglePoint<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &self,
        genotype: &G,
        daughter: &mut [G::Chromosome],
        son: &mut [G::Chromosome],
        rng: &mut R,
    ) {
        let loci_size = genotype.loci_size();
        if loci_size < 2 {
            return;
        }
        let cut = rng.gen_range(1..loci_size);
        swap_loci(daughter, son, genotype.chromosome_length(), cut..loci_size);
    }
}
