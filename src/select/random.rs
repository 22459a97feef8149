use super::Select;
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Select parents uniformly at random from the parent pool, without selection pressure.
#[derive(Clone, Debug)]
pub struct Random<G: Genotype> {
    parents: usize,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Random<G> {
    pub fn new() -> Self {
        Self {
            parents: 0,
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for Random<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for Random<G> {
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
        Some(population.slot_of_rank(rng.gen_range(0..self.parents)))
    }
}
