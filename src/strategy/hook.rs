//! Per-generation and per-iteration hooks, the engines' observation and cancellation points.
//!
//! A hook returning `false` terminates the run cleanly at the next boundary; partial
//! generations are never observable. Hooks are also the place for advisory work: convergence
//! metrics, island migration between populations, statistics dumps.
use crate::entity::Entity;
use crate::genotype::Genotype;
use crate::population::Population;
use std::marker::PhantomData;

/// Called by the population engines before every generation (and once before the first).
pub trait GenerationHook: Clone + Send + Sync {
    type Genotype: Genotype;

    fn on_generation(
        &mut self,
        _generation: usize,
        _genotype: &Self::Genotype,
        _population: &Population<Self::Genotype>,
    ) -> bool {
        true
    }
}

/// Called by the tabu engine before every iteration with the current working solution.
pub trait IterationHook: Clone + Send + Sync {
    type Genotype: Genotype;

    fn on_iteration(
        &mut self,
        _iteration: usize,
        _genotype: &Self::Genotype,
        _entity: &Entity<Self::Genotype>,
    ) -> bool {
        true
    }
}

/// No-op hook, never terminates the run.
pub struct HookNoop<G: Genotype>(PhantomData<G>);

impl<G: Genotype> HookNoop<G> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<G: Genotype> Default for HookNoop<G> {
    fn default() -> Self {
        Self::new()
    }
}
impl<G: Genotype> Clone for HookNoop<G> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<G: Genotype> GenerationHook for HookNoop<G> {
    type Genotype = G;
}
impl<G: Genotype> IterationHook for HookNoop<G> {
    type Genotype = G;
}

/// Logs population statistics every `period` generations or iterations, never terminates the
/// run.
pub struct HookPeriodic<G: Genotype> {
    pub period: usize,
    _phantom: PhantomData<G>,
}

impl<G: Genotype> HookPeriodic<G> {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            _phantom: PhantomData,
        }
    }
}
impl<G: Genotype> Clone for HookPeriodic<G> {
    fn clone(&self) -> Self {
        Self::new(self.period)
    }
}

impl<G: Genotype> GenerationHook for HookPeriodic<G> {
    type Genotype = G;

    fn on_generation(
        &mut self,
        generation: usize,
        _genotype: &Self::Genotype,
        population: &Population<Self::Genotype>,
    ) -> bool {
        if generation % self.period == 0 {
            log::debug!(
                "generation {}: size {}, fitness (count/mean/stddev): {} / {:.6} / {:.6}, convergence (genotypes/alleles): {:.4} / {:.4}",
                generation,
                population.size(),
                population.fitness_score_count(),
                population.fitness_score_mean(),
                population.fitness_score_stddev(),
                population.convergence_genotypes(),
                population.convergence_alleles(),
            );
        }
        true
    }
}

impl<G: Genotype> IterationHook for HookPeriodic<G> {
    type Genotype = G;

    fn on_iteration(
        &mut self,
        iteration: usize,
        genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> bool {
        if iteration % self.period == 0 {
            log::debug!(
                "iteration {}: fitness {:?}, genome {}",
                iteration,
                entity.fitness,
                genotype.genome_to_string(&entity.genome),
            );
        }
        true
    }
}
