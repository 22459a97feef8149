use super::Select;
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Tournament of two: draw two parents uniformly and keep the fitter one. Equal fitness
/// resolves to the lower rank, so a seeded run is fully deterministic.
#[derive(Clone, Debug)]
pub struct BestOfTwo<G: Genotype> {
    parents: usize,
    fitness_ordering: FitnessOrdering,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> BestOfTwo<G> {
    pub fn new() -> Self {
        Self {
            parents: 0,
            fitness_ordering: FitnessOrdering::default(),
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for BestOfTwo<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for BestOfTwo<G> {
    type Genotype = G;

    fn prepare<R: Rng>(
        &mut self,
        population: &Population<G>,
        fitness_ordering: FitnessOrdering,
        parents: usize,
        _draws: usize,
        _rng: &mut R,
    ) {
        self.parents = parents.min(population.size());
        self.fitness_ordering = fitness_ordering;
    }

    fn select_one<R: Rng>(&mut self, population: &Population<G>, rng: &mut R) -> Option<usize> {
        if self.parents == 0 {
            return None;
        }
        let rank_a = rng.gen_range(0..self.parents);
        let rank_b = rng.gen_range(0..self.parents);
        let fitness_a = population.entity_of_rank(rank_a).fitness;
        let fitness_b = population.entity_of_rank(rank_b).fitness;

        let winner = match self.fitness_ordering.compare(fitness_a, fitness_b) {
            std::cmp::Ordering::Less => rank_a,
            std::cmp::Ordering::Greater => rank_b,
            std::cmp::Ordering::Equal => rank_a.min(rank_b),
        };
        Some(population.slot_of_rank(winner))
    }
}
