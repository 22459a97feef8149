use super::{bucket_of, cumulative_weights, Select};
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Fitness-proportionate selection. The cumulative weight table is built once per generation.
///
/// The plain variant uses the raw fitness values as weights (rebasing only when negative values
/// are present, since proportional selection needs a non-negative scale). The rebased variant
/// always subtracts the worst fitness first, which keeps the selection pressure meaningful when
/// all fitness values share a large common offset.
#[derive(Clone, Debug)]
pub struct Roulette<G: Genotype> {
    pub rebase: bool,
    slots: Vec<usize>,
    cumulative_weights: Vec<f64>,
    total: f64,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Roulette<G> {
    pub fn new() -> Self {
        Self {
            rebase: false,
            slots: vec![],
            cumulative_weights: vec![],
            total: 0.0,
            _phantom: PhantomData,
        }
    }

    pub fn new_rebased() -> Self {
        Self {
            rebase: true,
            ..Self::new()
        }
    }
}
impl<G: Genotype> Default for Roulette<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for Roulette<G> {
    type Genotype = G;

    fn prepare<R: Rng>(
        &mut self,
        population: &Population<G>,
        fitness_ordering: FitnessOrdering,
        parents: usize,
        _draws: usize,
        _rng: &mut R,
    ) {
        let (slots, cumulative_weights, total) =
            cumulative_weights(population, fitness_ordering, parents, self.rebase);
        self.slots = slots;
        self.cumulative_weights = cumulative_weights;
        self.total = total;
    }

    fn select_one<R: Rng>(&mut self, _population: &Population<G>, rng: &mut R) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let pointer = rng.gen_range(0.0..self.total);
        Some(self.slots[bucket_of(&self.cumulative_weights, pointer)])
    }
}
