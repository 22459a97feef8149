//! The selection operators: choose parents from the ranked parent pool for reproduction.
//!
//! A selection operator is prepared once per generation, after ranking, with the size of the
//! parent pool (ranks `[0, parents)`) and the number of draws the engine plans to take. The
//! termination convention is `Option`: `None` from [select_one](Select::select_one) or
//! [select_pair](Select::select_pair) ends the current reproduction phase (selection
//! exhaustion); whatever offspring exist so far proceed to evaluation and ranking.
//!
//! An operator is bound to its [Genotype] through a trait attribute, like
//! [Fitness](crate::fitness::Fitness). Fitness ties are broken on the lower rank, which keeps
//! selection deterministic for a seeded PRNG.
mod best_of_two;
mod every;
mod random;
mod random_rank;
mod roulette;
mod sus;
mod wrapper;

pub use self::best_of_two::BestOfTwo as SelectBestOfTwo;
pub use self::every::Every as SelectEvery;
pub use self::random::Random as SelectRandom;
pub use self::random_rank::RandomRank as SelectRandomRank;
pub use self::roulette::Roulette as SelectRoulette;
pub use self::sus::Sus as SelectSus;
pub use self::wrapper::Wrapper as SelectWrapper;

use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;

pub trait Select: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    /// Called once per generation after ranking. `parents` is the size of the parent pool
    /// (ranks `[0, parents)`), `draws` the number of selections the engine plans to take.
    fn prepare<R: Rng>(
        &mut self,
        population: &Population<Self::Genotype>,
        fitness_ordering: FitnessOrdering,
        parents: usize,
        draws: usize,
        rng: &mut R,
    );

    /// Select one parent slot, or `None` to end the current reproduction phase.
    fn select_one<R: Rng>(
        &mut self,
        population: &Population<Self::Genotype>,
        rng: &mut R,
    ) -> Option<usize>;

    /// Select a mother and father slot, or `None` to end the current reproduction phase.
    fn select_pair<R: Rng>(
        &mut self,
        population: &Population<Self::Genotype>,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let mother = self.select_one(population, rng)?;
        let father = self.select_one(population, rng)?;
        Some((mother, father))
    }
}

/// Cumulative selection weights over the parent pool, shared by the roulette and SUS operators.
/// Weights are rebased to be non-negative by subtracting the worst value whenever any weight is
/// negative (always, for the rebased roulette variant); a degenerate all-zero total falls back
/// to uniform weights.
pub(crate) fn cumulative_weights<G: Genotype>(
    population: &Population<G>,
    fitness_ordering: FitnessOrdering,
    parents: usize,
    force_rebase: bool,
) -> (Vec<usize>, Vec<f64>, f64) {
    let parents = parents.min(population.size());
    let slots: Vec<usize> = population.ranked_slots()[..parents].to_vec();
    let raw: Vec<f64> = slots
        .iter()
        .map(|&slot| population.entity(slot).fitness.unwrap_or(0.0))
        .collect();

    let mut weights: Vec<f64> = match fitness_ordering {
        FitnessOrdering::Maximize => raw.clone(),
        // minimizing turns the scale upside down: the worst (largest) value gets weight zero
        FitnessOrdering::Minimize => {
            let worst = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            raw.iter().map(|&value| worst - value).collect()
        }
    };
    let minimum = weights.iter().copied().fold(f64::INFINITY, f64::min);
    if force_rebase || minimum < 0.0 {
        weights.iter_mut().for_each(|weight| *weight -= minimum);
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let uniform: Vec<f64> = (1..=weights.len()).map(|index| index as f64).collect();
        let total = weights.len() as f64;
        return (slots, uniform, total);
    }

    let mut cumulative = 0.0;
    let cumulative_weights: Vec<f64> = weights
        .iter()
        .map(|weight| {
            cumulative += weight;
            cumulative
        })
        .collect();
    (slots, cumulative_weights, total)
}

/// Index of the first cumulative bucket containing the pointer.
pub(crate) fn bucket_of(cumulative_weights: &[f64], pointer: f64) -> usize {
    cumulative_weights
        .partition_point(|&cumulative| cumulative <= pointer)
        .min(cumulative_weights.len().saturating_sub(1))
}
