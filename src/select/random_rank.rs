use super::Select;
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Rank-biased random selection: draw an upper rank uniformly, then draw the actual rank
/// uniformly below it. The resulting triangular distribution favors the better ranks without
/// looking at the fitness magnitudes, so it is insensitive to fitness scaling.
#[derive(Clone, Debug)]
pub struct RandomRank<G: Genotype> {
    parents: usize,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> RandomRank<G> {
    pub fn new() -> Self {
        Self {
            parents: 0,
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for RandomRank<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for RandomRank<G> {
    type Genotype = G;

    fn prepare<R: Rng>(
        &mut self,
        population: &Population<G>,
        _fitness_ordering: FitnessOrdering,
        parents: usize,
        _draws: usize,
        _rng: &mut R,
    ) {
        self.parents = parents.min(population.size());
    }

    fn select_one<R: Rng>(&mut self, population: &Population<G>, rng: &mut R) -> Option<usize> {
        if self.parents == 0 {
            return None;
        }
        let upper = rng.gen_range(0..self.parents);
        let rank = rng.gen_range(0..=upper);
        Some(population.slot_of_rank(rank))
    }
}
