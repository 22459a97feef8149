//! Tabu search: single-solution neighborhood search with a recency memory.
mod builder;

pub use self::builder::{
    Builder as TabuSearchBuilder, TryFromBuilderError as TryFromTabuSearchBuilderError,
};

use super::hook::{HookNoop, IterationHook};
use super::Strategy;
use crate::chromosome::Chromosome;
use crate::entity::Entity;
use crate::fitness::{Fitness, FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use crate::mutate::Mutate;
use crate::population::Population;
use rand::Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use thread_local::ThreadLocal;

/// Decides whether a candidate move is tabu (rejected) against the ring of recently visited
/// genomes.
pub trait TabuAccept: Clone + Send + Sync + std::fmt::Debug {
    fn is_tabu<G: Genotype>(
        &self,
        genotype: &G,
        candidate: &[G::Chromosome],
        tabu_list: &VecDeque<Vec<G::Chromosome>>,
    ) -> bool;
}

/// A candidate is tabu when its genome is bitwise identical to any ring entry. The built-in
/// choice for boolean, integer, character and bit genomes.
#[derive(Clone, Debug, Default)]
pub struct TabuAcceptExact;

impl TabuAcceptExact {
    pub fn new() -> Self {
        Self
    }
}

impl TabuAccept for TabuAcceptExact {
    fn is_tabu<G: Genotype>(
        &self,
        _genotype: &G,
        candidate: &[G::Chromosome],
        tabu_list: &VecDeque<Vec<G::Chromosome>>,
    ) -> bool {
        tabu_list.iter().any(|visited| visited.as_slice() == candidate)
    }
}

/// A candidate is tabu when every allele is within epsilon of a ring entry. The built-in choice
/// for real genomes, where exact equality rarely recurs.
#[derive(Clone, Debug)]
pub struct TabuAcceptApprox {
    pub epsilon: f64,
}

impl TabuAcceptApprox {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

impl TabuAccept for TabuAcceptApprox {
    fn is_tabu<G: Genotype>(
        &self,
        _genotype: &G,
        candidate: &[G::Chromosome],
        tabu_list: &VecDeque<Vec<G::Chromosome>>,
    ) -> bool {
        tabu_list.iter().any(|visited| {
            visited.len() == candidate.len()
                && visited
                    .iter()
                    .zip(candidate.iter())
                    .all(|(a, b)| a.eq_approx(b, self.epsilon))
        })
    }
}

/// The TabuSearch engine walks a single solution through its mutation neighborhood:
/// * produce `search_count` candidates by mutating the current solution
/// * evaluate them (in parallel when configured)
/// * move to the best candidate that is not tabu; when every candidate is tabu, move to the
///   best candidate regardless (the aspiration criterion)
/// * push the previous solution onto the tabu ring, evicting the oldest entry beyond
///   `tabu_list_length`
///
/// The global best is tracked separately, so the reported solution is the best ever visited,
/// not the final working solution. The iteration hook is the cancellation point.
///
/// See [TabuSearchBuilder] for initialization options.
///
/// Example:
/// ```
/// use evolutionary_algorithm::fitness::placeholders::CountTrue;
/// use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype};
/// use evolutionary_algorithm::mutate::MutateSinglePointDrift;
/// use evolutionary_algorithm::strategy::tabu_search::TabuSearch;
/// use evolutionary_algorithm::strategy::Strategy;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let genotype = BooleanGenotype::builder()
///     .with_chromosome_length(16)
///     .build()
///     .unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(0);
/// let mut tabu_search = TabuSearch::builder()
///     .with_genotype(genotype)
///     .with_fitness(CountTrue)
///     .with_mutate(MutateSinglePointDrift::new())
///     .with_max_iterations(100)
///     .build()
///     .unwrap();
/// tabu_search.call(&mut rng);
///
/// assert!(tabu_search.best_fitness_score().unwrap() > 10.0);
/// ```
pub struct TabuSearch<
    G: Genotype,
    F: Fitness<Genotype = G>,
    M: Mutate<Genotype = G>,
    A: TabuAccept = TabuAcceptExact,
    H: IterationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: G,
    pub fitness: F,
    pub mutate: M,
    pub accept: A,
    pub hook: H,
    pub config: TabuSearchConfig,
    pub state: TabuSearchState<G>,
}

pub struct TabuSearchConfig {
    pub max_iterations: usize,
    pub tabu_list_length: usize,
    pub search_count: usize,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

pub struct TabuSearchState<G: Genotype> {
    pub current: Option<Entity<G>>,
    pub tabu_list: VecDeque<Vec<G::Chromosome>>,
    pub current_iteration: usize,
    pub best_iteration: usize,
    pub best_fitness: Option<FitnessValue>,
    pub best_genome: Option<Vec<G::Chromosome>>,
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: TabuAccept,
        H: IterationHook<Genotype = G>,
    > Strategy<G> for TabuSearch<G, F, M, A, H>
{
    fn call<R: Rng>(&mut self, rng: &mut R) {
        TabuSearch::call(self, rng)
    }
    fn best_generation(&self) -> usize {
        self.state.best_iteration
    }
    fn best_fitness_score(&self) -> Option<FitnessValue> {
        self.state.best_fitness
    }
    fn best_genome(&self) -> Option<Vec<G::Chromosome>> {
        self.state.best_genome.clone()
    }
}

impl<G: Genotype, F: Fitness<Genotype = G>, M: Mutate<Genotype = G>> TabuSearch<G, F, M> {
    pub fn builder() -> TabuSearchBuilder<G, F, M> {
        TabuSearchBuilder::new()
    }
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: TabuAccept,
        H: IterationHook<Genotype = G>,
    > TabuSearch<G, F, M, A, H>
{
    /// Run the iteration loop, at most max_iterations times. The iteration count actually
    /// executed is left in `state.current_iteration`.
    pub fn call<R: Rng>(&mut self, rng: &mut R) {
        self.state.current_iteration = 0;
        self.state.best_iteration = 0;
        self.state.best_fitness = None;
        self.state.best_genome = None;
        self.state.tabu_list.clear();

        let thread_local: Option<ThreadLocal<RefCell<F>>> =
            self.config.par_fitness.then(ThreadLocal::new);
        let pool = if self.config.par_fitness {
            crate::fitness::build_thread_pool()
        } else {
            None
        };

        // candidate neighborhoods are evaluated as independent batches in a scratch population
        let mut neighborhood: Population<G> =
            Population::new(self.config.search_count, self.config.search_count);

        // caller-supplied initial solution (through the builder or the genotype's seed genes),
        // or a random one
        if self.state.current.is_none() {
            let genome = match self.genotype.seed_genes_list().first() {
                Some(genome) => genome.clone(),
                None => self.genotype.random_genome(rng),
            };
            self.state.current = Some(Entity::new(0, genome));
        }
        if let Some(current) = self.state.current.as_mut() {
            if current.fitness.is_none() {
                self.fitness.call_for_entity(&self.genotype, current);
            }
        }
        self.update_best();

        loop {
            let proceed = match self.state.current.as_ref() {
                Some(current) => {
                    self.hook
                        .on_iteration(self.state.current_iteration, &self.genotype, current)
                }
                None => false,
            };
            if !proceed || self.state.current_iteration >= self.config.max_iterations {
                break;
            }
            self.state.current_iteration += 1;
            self.iteration_step(&mut neighborhood, thread_local.as_ref(), pool.as_ref(), rng);
        }
    }

    fn iteration_step<R: Rng>(
        &mut self,
        neighborhood: &mut Population<G>,
        thread_local: Option<&ThreadLocal<RefCell<F>>>,
        pool: Option<&rayon::ThreadPool>,
        rng: &mut R,
    ) {
        let Some(current) = self.state.current.as_ref() else {
            return;
        };

        neighborhood.clear();
        for _ in 0..self.config.search_count {
            let mut candidate = current.genome.clone();
            self.mutate.call(&self.genotype, &mut candidate, rng);
            neighborhood.insert(candidate);
        }

        let rejected = match pool {
            Some(pool) => pool.install(|| {
                self.fitness
                    .call_for_population(&self.genotype, neighborhood, thread_local)
            }),
            None => self
                .fitness
                .call_for_population(&self.genotype, neighborhood, thread_local),
        };
        for slot in rejected {
            neighborhood.release(slot);
        }
        if neighborhood.is_empty() {
            return; // every candidate was rejected, stay in place
        }
        neighborhood.sort(self.config.fitness_ordering);

        // best non-tabu candidate, or the best overall when all moves are tabu (aspiration)
        let chosen_slot = neighborhood
            .ranked_slots()
            .iter()
            .copied()
            .find(|&slot| {
                !self.accept.is_tabu(
                    &self.genotype,
                    &neighborhood.entity(slot).genome,
                    &self.state.tabu_list,
                )
            })
            .unwrap_or_else(|| neighborhood.slot_of_rank(0));
        let chosen = neighborhood.entity(chosen_slot);

        // the previous working solution becomes tabu
        let Some(current) = self.state.current.as_mut() else {
            return;
        };
        self.state.tabu_list.push_back(current.genome.clone());
        while self.state.tabu_list.len() > self.config.tabu_list_length {
            self.state.tabu_list.pop_front();
        }
        current.genome.clone_from(&chosen.genome);
        current.fitness = chosen.fitness;

        self.update_best();
        log::debug!(
            "iteration (current/best): {}/{}, fitness score (current/best): {:?} / {:?}, tabu ring: {}",
            self.state.current_iteration,
            self.state.best_iteration,
            self.state.current.as_ref().and_then(|entity| entity.fitness),
            self.state.best_fitness,
            self.state.tabu_list.len(),
        );
    }

    fn update_best(&mut self) {
        let Some(current) = self.state.current.as_ref() else {
            return;
        };
        let improved = match (self.state.best_fitness, current.fitness) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(best), Some(contending)) => self
                .config
                .fitness_ordering
                .is_improvement(contending, best),
        };
        if improved {
            self.state.best_fitness = current.fitness;
            self.state.best_genome = Some(current.genome.clone());
            self.state.best_iteration = self.state.current_iteration;
        }
    }
}

impl<G: Genotype> TabuSearchState<G> {
    pub fn new() -> Self {
        Self {
            current: None,
            tabu_list: VecDeque::new(),
            current_iteration: 0,
            best_iteration: 0,
            best_fitness: None,
            best_genome: None,
        }
    }
}

impl<G: Genotype> Default for TabuSearchState<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabuSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tabu_search_config:")?;
        writeln!(f, "  max_iterations: {}", self.max_iterations)?;
        writeln!(f, "  tabu_list_length: {}", self.tabu_list_length)?;
        writeln!(f, "  search_count: {}", self.search_count)?;
        writeln!(f, "  fitness_ordering: {:?}", self.fitness_ordering)?;
        writeln!(f, "  par_fitness: {}", self.par_fitness)
    }
}
