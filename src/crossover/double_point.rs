use super::{swap_loci, Crossover};
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

/// Crossover with two cuts over the concatenated loci: the middle segment is taken from the
/// other parent. When the two sampled cuts coincide the offspring stay clones of their parents.
#[derive(Clone, Debug)]
pub struct DoublePoint<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> DoublePoint<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for DoublePoint<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Crossover for DoublePoint<G> {
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
        let cut_a = rng.gen_range(1..loci_size);
        let cut_b = rng.gen_range(1..loci_size);
        if cut_a == cut_b {
            return;
        }
        let range = cut_a.min(cut_b)..cut_a.max(cut_b);
        swap_loci(daughter, son, genotype.chromosome_length(), range);
    }
}
