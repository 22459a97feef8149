//! The replacement operator: how an evaluated offspring is merged into the population.
//!
//! When the engine is built without one, the default policy applies: parents and offspring are
//! merged, ranked, and the population is truncated back to stable_size. With a replacement
//! operator, the engine delegates each offspring individually and leaves truncation to it.
use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use std::marker::PhantomData;

pub trait Replace: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    /// Integrate the evaluated child at `child_slot` into the population, keeping the size
    /// steady.
    fn call(
        &self,
        population: &mut Population<Self::Genotype>,
        fitness_ordering: FitnessOrdering,
        child_slot: usize,
    );
}

/// Keep the child only if it ranks at least as good as the current worst entity, which it then
/// replaces; otherwise the child itself is released.
#[derive(Clone, Debug)]
pub struct ReplaceByFitness<G: Genotype> {
    _phantom: PhantomData<G>,
}

impl<G: Genotype> ReplaceByFitness<G> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Default for ReplaceByFitness<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Replace for ReplaceByFitness<G> {
    type Genotype = G;

    fn call(
        &self,
        population: &mut Population<G>,
        fitness_ordering: FitnessOrdering,
        child_slot: usize,
    ) {
        let worst_slot = population
            .ranked_slots()
            .iter()
            .copied()
            .filter(|&slot| slot != child_slot)
            .max_by(|&a, &b| {
                let entity_a = population.entity(a);
                let entity_b = population.entity(b);
                fitness_ordering
                    .compare(entity_a.fitness, entity_b.fitness)
                    .then_with(|| entity_a.id.cmp(&entity_b.id))
            });

        if let Some(worst_slot) = worst_slot {
            let child_fitness = population.entity(child_slot).fitness;
            let worst_fitness = population.entity(worst_slot).fitness;
            if fitness_ordering.compare(child_fitness, worst_fitness) != std::cmp::Ordering::Greater
            {
                population.release(worst_slot);
            } else {
                population.release(child_slot);
            }
        }
    }
}
