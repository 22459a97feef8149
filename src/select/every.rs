use super::Select;
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Round-robin over the parent pool ranks. Every parent is selected exactly once per generation,
/// best first; afterwards the operator reports selection exhaustion and the reproduction phase
/// ends.
#[derive(Clone, Debug)]
pub struct Every<G: Genotype> {
    parents: usize,
    cursor: usize,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Every<G> {
    pub fn new() -> Self {
        Self {
            parents: 0,
            cursor: 0,
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for Every<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for Every<G> {
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
        self.cursor = 0;
    }

    fn select_one<R: Rng>(&mut self, population: &Population<G>, _rng: &mut R) -> Option<usize> {
        if self.cursor >= self.parents {
            return None;
        }
        let slot = population.slot_of_rank(self.cursor);
        self.cursor += 1;
        Some(slot)
    }
}
