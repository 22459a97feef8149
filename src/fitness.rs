//! The search goal to optimize towards (maximize or minimize).
//!
//! Each problem has its own specific [Fitness] function, implemented by the embedding
//! application. The function is bound to a concrete [Genotype] through a trait attribute.
//!
//! Returning `None` from [calculate_for_entity](Fitness::calculate_for_entity) marks the entity
//! as rejected: the engine releases it and it never participates in ranking or selection. An
//! entity that has simply not been evaluated yet also carries `fitness == None` on its slot, so
//! there is no sentinel fitness value a valid result could collide with.
//!
//! Population evaluation runs either sequentially or over a rayon thread pool; the parallel path
//! is only ever invoked on batches of independent entities (offspring, trial vectors, candidate
//! neighborhoods), with each worker receiving a disjoint entity.
pub mod placeholders;

use crate::entity::Entity;
use crate::genotype::Genotype;
use crate::population::Population;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cell::RefCell;
use std::cmp::Ordering;
use thread_local::ThreadLocal;

/// Fitness scalar, higher is better under [FitnessOrdering::Maximize] (the default).
/// "Not evaluated" is represented as `Option::None` on the entity, never as a sentinel value.
pub type FitnessValue = f64;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FitnessOrdering {
    #[default]
    Maximize,
    Minimize,
}

impl FitnessOrdering {
    /// Total order over cached fitness values: `Less` means the left side ranks before (is
    /// better than) the right side, unevaluated entities rank last.
    pub fn compare(&self, a: Option<FitnessValue>, b: Option<FitnessValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => match self {
                FitnessOrdering::Maximize => OrderedFloat(b).cmp(&OrderedFloat(a)),
                FitnessOrdering::Minimize => OrderedFloat(a).cmp(&OrderedFloat(b)),
            },
        }
    }

    pub fn is_improvement(&self, contending: FitnessValue, current: FitnessValue) -> bool {
        self.compare(Some(contending), Some(current)) == Ordering::Less
    }
}

/// The number of evaluation threads requested through the advisory `GA_NUM_THREADS` environment
/// variable, if set to a positive integer.
pub fn configured_num_threads() -> Option<usize> {
    std::env::var("GA_NUM_THREADS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&count| count > 0)
}

/// A dedicated rayon pool sized by `GA_NUM_THREADS`, or `None` to use the global pool.
pub fn build_thread_pool() -> Option<rayon::ThreadPool> {
    let num_threads = configured_num_threads()?;
    match rayon::ThreadPoolBuilder::new().num_threads(num_threads).build() {
        Ok(pool) => Some(pool),
        Err(error) => {
            log::warn!("falling back to the global rayon pool: {}", error);
            None
        }
    }
}

/// The fitness function, implemented as a fitness method object.
///
/// # Example:
/// ```rust
/// use evolutionary_algorithm::entity::Entity;
/// use evolutionary_algorithm::fitness::{Fitness, FitnessValue};
/// use evolutionary_algorithm::genotype::BooleanGenotype;
///
/// #[derive(Clone, Debug)]
/// pub struct CountTrue;
/// impl Fitness for CountTrue {
///     type Genotype = BooleanGenotype;
///     fn calculate_for_entity(
///         &mut self,
///         _genotype: &Self::Genotype,
///         entity: &Entity<Self::Genotype>,
///     ) -> Option<FitnessValue> {
///         Some(
///             entity
///                 .genome
///                 .iter()
///                 .flat_map(|chromosome| chromosome.iter())
///                 .filter(|&&value| value)
///                 .count() as FitnessValue,
///         )
///     }
/// }
/// ```
pub trait Fitness: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    /// Evaluate a single entity in place. Returns false when the entity was rejected.
    fn call_for_entity(
        &mut self,
        genotype: &Self::Genotype,
        entity: &mut Entity<Self::Genotype>,
    ) -> bool {
        let score = self.calculate_for_entity(genotype, entity);
        entity.fitness = score;
        score.is_some()
    }

    /// Evaluate every unevaluated entity in the population. Pass a thread_local for parallel
    /// evaluation over a rayon pool, each worker lazily cloning this fitness object once.
    /// Returns the slots of rejected entities; the caller is responsible for releasing them.
    fn call_for_population(
        &mut self,
        genotype: &Self::Genotype,
        population: &mut Population<Self::Genotype>,
        thread_local: Option<&ThreadLocal<RefCell<Self>>>,
    ) -> Vec<usize> {
        if let Some(thread_local) = thread_local {
            population
                .slots_mut()
                .par_iter_mut()
                .enumerate()
                .filter_map(|(slot, entity)| {
                    entity
                        .as_mut()
                        .filter(|entity| entity.fitness.is_none())
                        .map(|entity| (slot, entity))
                })
                .map_init(
                    || {
                        thread_local
                            .get_or(|| RefCell::new(self.clone()))
                            .borrow_mut()
                    },
                    |fitness, (slot, entity)| {
                        let score = fitness.calculate_for_entity(genotype, entity);
                        entity.fitness = score;
                        if score.is_some() {
                            None
                        } else {
                            Some(slot)
                        }
                    },
                )
                .flatten()
                .collect()
        } else {
            let mut rejected = Vec::new();
            for (slot, entity) in population.slots_mut().iter_mut().enumerate() {
                if let Some(entity) = entity.as_mut() {
                    if entity.fitness.is_none() {
                        let score = self.calculate_for_entity(genotype, entity);
                        entity.fitness = score;
                        if score.is_none() {
                            rejected.push(slot);
                        }
                    }
                }
            }
            rejected
        }
    }

    fn calculate_for_entity(
        &mut self,
        genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue>;
}
