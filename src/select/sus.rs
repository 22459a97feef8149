use super::{bucket_of, cumulative_weights, Select};
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;
use std::marker::PhantomData;

/// Stochastic universal sampling. A single pointer advances in equal steps of `total / draws`
/// from a uniform offset in `[0, total / draws)`; each stop yields the parent whose cumulative
/// bucket contains it. One entity cannot dominate the draw the way it can with repeated roulette
/// spins, and with all-equal fitness every bucket is hit uniformly.
///
/// Negative fitness values are rebased by subtracting the minimum before the cumulative table
/// is built. After the planned number of draws the operator reports selection exhaustion.
#[derive(Clone, Debug)]
pub struct Sus<G: Genotype> {
    slots: Vec<usize>,
    cumulative_weights: Vec<f64>,
    pointer: f64,
    spacing: f64,
    remaining_draws: usize,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> Sus<G> {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            cumulative_weights: vec![],
            pointer: 0.0,
            spacing: 0.0,
            remaining_draws: 0,
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for Sus<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Select for Sus<G> {
    type Genotype = G;

    fn prepare<R: Rng>(
        &mut self,
        population: &Population<G>,
        fitness_ordering: FitnessOrdering,
        parents: usize,
        draws: usize,
        rng: &mut R,
    ) {
        let (slots, cumulative_weights, total) =
            cumulative_weights(population, fitness_ordering, parents, false);
        self.slots = slots;
        self.cumulative_weights = cumulative_weights;
        self.remaining_draws = draws;
        if self.slots.is_empty() || draws == 0 {
            self.spacing = 0.0;
            self.pointer = 0.0;
        } else {
            self.spacing = total / draws as f64;
            self.pointer = rng.gen_range(0.0..self.spacing.max(f64::MIN_POSITIVE));
        }
    }

    fn select_one<R: Rng>(&mut self, _population: &Population<G>, _rng: &mut R) -> Option<usize> {
        if self.slots.is_empty() || self.remaining_draws == 0 {
            return None;
        }
        let slot = self.slots[bucket_of(&self.cumulative_weights, self.pointer)];
        self.pointer += self.spacing;
        self.remaining_draws -= 1;
        Some(slot)
    }
}
