//! The generation engine: evolve a population under a scheme and elitism policy.
mod builder;

pub use self::builder::{
    Builder as EvolveBuilder, TryFromBuilderError as TryFromEvolveBuilderError,
};

use super::hook::{GenerationHook, HookNoop};
use super::{Elitism, Scheme, Strategy};
use crate::adapt::{Adapt, AdaptNoop};
use crate::crossover::Crossover;
use crate::fitness::{Fitness, FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use crate::mutate::Mutate;
use crate::population::Population;
use crate::replace::{Replace, ReplaceByFitness};
use crate::select::Select;
use rand::Rng;
use std::cell::RefCell;
use std::fmt;
use thread_local::ThreadLocal;

/// The Evolve engine seeds a population (unless one was passed in pre-seeded), evaluates it, and
/// then runs through generations in a loop:
/// * select parents from the ranked parent pool
/// * [crossover](crate::crossover) until the crossover share of offspring is produced
/// * [mutate](crate::mutate) single parents until the mutation share is produced
/// * apply the [adapt](crate::adapt) operator per the configured [Scheme] (Baldwin keeps only
///   the adapted fitness, Lamarck also the adapted genome)
/// * evaluate the offspring batch, in parallel when configured
/// * apply the [Elitism] policy to the parent generation
/// * rank, then integrate offspring: by default merge + truncate back to stable_size, or
///   delegate to the [replace](crate::replace) operator when one is configured
///
/// The run ends after max_generations, when the generation hook returns false, or effectively
/// earlier when selection reports exhaustion every generation.
///
/// See [EvolveBuilder] for initialization options.
///
/// Example:
/// ```
/// use evolutionary_algorithm::crossover::CrossoverSinglePoint;
/// use evolutionary_algorithm::fitness::placeholders::CountTrue;
/// use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype};
/// use evolutionary_algorithm::mutate::MutateSinglePointDrift;
/// use evolutionary_algorithm::select::SelectBestOfTwo;
/// use evolutionary_algorithm::strategy::evolve::Evolve;
/// use evolutionary_algorithm::strategy::Strategy;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let genotype = BooleanGenotype::builder()
///     .with_chromosome_length(20)
///     .build()
///     .unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(0);
/// let mut evolve = Evolve::builder()
///     .with_genotype(genotype)
///     .with_stable_size(50)
///     .with_max_generations(40)
///     .with_fitness(CountTrue)
///     .with_select(SelectBestOfTwo::new())
///     .with_crossover(CrossoverSinglePoint::new())
///     .with_mutate(MutateSinglePointDrift::new())
///     .build()
///     .unwrap();
/// evolve.call(&mut rng);
///
/// assert!(evolve.best_fitness_score().unwrap() > 10.0);
/// ```
pub struct Evolve<
    G: Genotype,
    F: Fitness<Genotype = G>,
    S: Select<Genotype = G>,
    C: Crossover<Genotype = G>,
    M: Mutate<Genotype = G>,
    A: Adapt<Genotype = G> = AdaptNoop<G>,
    RP: Replace<Genotype = G> = ReplaceByFitness<G>,
    H: GenerationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: G,
    pub fitness: F,
    pub plugins: EvolvePlugins<S, C, M>,
    pub adapt: Option<A>,
    pub replace: Option<RP>,
    pub hook: H,
    pub config: EvolveConfig,
    pub state: EvolveState<G>,
}

pub struct EvolvePlugins<S: Select, C: Crossover, M: Mutate> {
    pub select: S,
    pub crossover: C,
    pub mutate: M,
}

pub struct EvolveConfig {
    pub max_generations: usize,
    pub scheme: Scheme,
    pub elitism: Elitism,
    pub crossover_ratio: f64,
    pub mutation_ratio: f64,
    pub migration_ratio: f64,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

pub struct EvolveState<G: Genotype> {
    pub population: Population<G>,
    pub current_generation: usize,
    pub best_generation: usize,
    pub best_fitness: Option<FitnessValue>,
    pub best_genome: Option<Vec<G::Chromosome>>,
}

/// The offspring capacity a population must be able to hold on top of its parents: the
/// crossover share rounded up to whole pairs plus the mutation share.
pub(crate) fn offspring_capacity(
    stable_size: usize,
    crossover_ratio: f64,
    mutation_ratio: f64,
) -> usize {
    let crossover_target = (stable_size as f64 * crossover_ratio).floor() as usize;
    let mutation_target = (stable_size as f64 * mutation_ratio).floor() as usize;
    crossover_target + crossover_target % 2 + mutation_target
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: Adapt<Genotype = G>,
        RP: Replace<Genotype = G>,
        H: GenerationHook<Genotype = G>,
    > Strategy<G> for Evolve<G, F, S, C, M, A, RP, H>
{
    fn call<R: Rng>(&mut self, rng: &mut R) {
        Evolve::call(self, rng)
    }
    fn best_generation(&self) -> usize {
        self.state.best_generation
    }
    fn best_fitness_score(&self) -> Option<FitnessValue> {
        self.state.best_fitness
    }
    fn best_genome(&self) -> Option<Vec<G::Chromosome>> {
        self.state.best_genome.clone()
    }
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
    > Evolve<G, F, S, C, M>
{
    pub fn builder() -> EvolveBuilder<G, F, S, C, M> {
        EvolveBuilder::new()
    }
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: Adapt<Genotype = G>,
        RP: Replace<Genotype = G>,
        H: GenerationHook<Genotype = G>,
    > Evolve<G, F, S, C, M, A, RP, H>
{
    /// Run the generation loop, at most max_generations times. The generation count actually
    /// executed is left in `state.current_generation`.
    pub fn call<R: Rng>(&mut self, rng: &mut R) {
        self.state.current_generation = 0;
        self.state.best_generation = 0;
        self.state.best_fitness = None;
        self.state.best_genome = None;

        if self.state.population.size() < self.state.population.stable_size {
            self.state.population.seed(&self.genotype, rng);
        }

        let thread_local: Option<ThreadLocal<RefCell<F>>> =
            self.config.par_fitness.then(ThreadLocal::new);
        let pool = if self.config.par_fitness {
            crate::fitness::build_thread_pool()
        } else {
            None
        };

        self.evaluate_population(thread_local.as_ref(), pool.as_ref());
        self.state.population.sort(self.config.fitness_ordering);
        self.update_best();

        while self.hook.on_generation(
            self.state.current_generation,
            &self.genotype,
            &self.state.population,
        ) && self.state.current_generation < self.config.max_generations
        {
            self.state.current_generation += 1;
            self.generation_step(thread_local.as_ref(), pool.as_ref(), rng);
            self.update_best();
            self.report_round();
        }
        self.state.population.assert_invariants();
    }

    fn generation_step<R: Rng>(
        &mut self,
        thread_local: Option<&ThreadLocal<RefCell<F>>>,
        pool: Option<&rayon::ThreadPool>,
        rng: &mut R,
    ) {
        let fitness_ordering = self.config.fitness_ordering;
        let stable_size = self.state.population.stable_size;
        let crossover_target =
            (stable_size as f64 * self.config.crossover_ratio).floor() as usize;
        let mutation_target = (stable_size as f64 * self.config.mutation_ratio).floor() as usize;

        self.state.population.mark_parents();
        let parent_count = self.state.population.size();

        // reproduction: crossover pairs first, then single-parent mutants
        let mut offspring: Vec<usize> = Vec::with_capacity(
            offspring_capacity(stable_size, self.config.crossover_ratio, self.config.mutation_ratio),
        );
        {
            let population = &mut self.state.population;
            let draws = crossover_target + crossover_target % 2 + mutation_target;
            self.plugins
                .select
                .prepare(population, fitness_ordering, parent_count, draws, rng);

            while offspring.len() < crossover_target {
                let Some((mother, father)) = self.plugins.select.select_pair(population, rng)
                else {
                    break;
                };
                let mut daughter = population.entity(mother).genome.clone();
                let mut son = population.entity(father).genome.clone();
                self.plugins
                    .crossover
                    .call(&self.genotype, &mut daughter, &mut son, rng);
                offspring.push(population.insert(daughter));
                offspring.push(population.insert(son));
            }
            while offspring.len() < crossover_target + mutation_target {
                let Some(mother) = self.plugins.select.select_one(population, rng) else {
                    break;
                };
                let mut child = population.entity(mother).genome.clone();
                self.plugins.mutate.call(&self.genotype, &mut child, rng);
                offspring.push(population.insert(child));
            }
        }

        if self.config.scheme.adapts() {
            self.adapt_step(&offspring, rng);
            offspring.retain(|&slot| self.state.population.is_live(slot));
        }

        self.evaluate_population(thread_local, pool);
        offspring.retain(|&slot| self.state.population.is_live(slot));

        let protected = self.elitism_step(fitness_ordering, stable_size);

        self.state.population.sort(fitness_ordering);

        if let Some(replace) = self.replace.as_ref() {
            for child in offspring {
                if self.state.population.is_live(child) {
                    replace.call(&mut self.state.population, fitness_ordering, child);
                }
            }
            self.state.population.sort(fitness_ordering);
        } else {
            release_worst_protected(&mut self.state.population, stable_size, &protected);
        }
        self.state.population.assert_invariants();
    }

    /// Apply the adapt operator to the scheme's subset: offspring only, or the whole population.
    fn adapt_step<R: Rng>(&mut self, offspring: &[usize], rng: &mut R) {
        let Some(adapt) = self.adapt.as_mut() else {
            return;
        };
        let targets: Vec<usize> = if self.config.scheme.adapts_all() {
            self.state.population.ranked_slots().to_vec()
        } else {
            offspring.to_vec()
        };
        for slot in targets {
            let mut genome = self.state.population.entity(slot).genome.clone();
            match adapt.call(&self.genotype, &mut genome, rng) {
                Some(adapted_fitness) => {
                    let entity = self.state.population.entity_mut(slot);
                    if self.config.scheme.keeps_adapted_genome() {
                        entity.genome = genome;
                    }
                    entity.fitness = Some(adapted_fitness);
                }
                None => self.state.population.release(slot),
            }
        }
    }

    /// Apply the elitism policy to the parent generation. Returns the slots guaranteed to
    /// survive truncation.
    fn elitism_step(&mut self, fitness_ordering: FitnessOrdering, stable_size: usize) -> Vec<usize> {
        let population = &mut self.state.population;
        match self.config.elitism {
            Elitism::ParentsSurvive => vec![],
            Elitism::ParentsDie => {
                for slot in population.parent_slots() {
                    population.release(slot);
                }
                vec![]
            }
            elitism => {
                let elite_count = elitism.elite_count(stable_size).unwrap_or(0);
                let mut parents = population.parent_slots();
                parents.sort_by(|&a, &b| {
                    let entity_a = population.entity(a);
                    let entity_b = population.entity(b);
                    fitness_ordering
                        .compare(entity_a.fitness, entity_b.fitness)
                        .then_with(|| entity_a.id.cmp(&entity_b.id))
                });
                let elite: Vec<usize> = parents.iter().copied().take(elite_count).collect();
                if !elitism.parents_compete() {
                    for slot in parents.into_iter().skip(elite_count) {
                        population.release(slot);
                    }
                }
                elite
            }
        }
    }

    fn evaluate_population(
        &mut self,
        thread_local: Option<&ThreadLocal<RefCell<F>>>,
        pool: Option<&rayon::ThreadPool>,
    ) {
        let rejected = match pool {
            Some(pool) => pool.install(|| {
                self.fitness.call_for_population(
                    &self.genotype,
                    &mut self.state.population,
                    thread_local,
                )
            }),
            None => self.fitness.call_for_population(
                &self.genotype,
                &mut self.state.population,
                thread_local,
            ),
        };
        for slot in rejected {
            self.state.population.release(slot);
        }
    }

    fn update_best(&mut self) {
        let Some(best_entity) = self.state.population.best_entity(self.config.fitness_ordering)
        else {
            return;
        };
        let improved = match (self.state.best_fitness, best_entity.fitness) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(current), Some(contending)) => self
                .config
                .fitness_ordering
                .is_improvement(contending, current),
        };
        if improved {
            self.state.best_fitness = best_entity.fitness;
            self.state.best_genome = Some(best_entity.genome.clone());
            self.state.best_generation = self.state.current_generation;
        }
    }

    fn report_round(&self) {
        log::debug!(
            "generation (current/best): {}/{}, size: {}, fitness score (best/count/mean/stddev): {:?} / {} / {:.6} / {:.6}",
            self.state.current_generation,
            self.state.best_generation,
            self.state.population.size(),
            self.state.best_fitness,
            self.state.population.fitness_score_count(),
            self.state.population.fitness_score_mean(),
            self.state.population.fitness_score_stddev(),
        );
        log::trace!(
            "best - fitness score: {:?}, genome: {}",
            self.state.best_fitness,
            self.state
                .best_genome
                .as_ref()
                .map_or_else(String::new, |genome| self.genotype.genome_to_string(genome)),
        );
    }
}

/// Release the worst-ranked entities until the population is down to target_size, skipping the
/// protected slots. Assumes a ranked population.
fn release_worst_protected<G: Genotype>(
    population: &mut Population<G>,
    target_size: usize,
    protected: &[usize],
) {
    let excess = population.size().saturating_sub(target_size);
    if excess == 0 {
        return;
    }
    let releases: Vec<usize> = population
        .ranked_slots()
        .iter()
        .rev()
        .copied()
        .filter(|slot| !protected.contains(slot))
        .take(excess)
        .collect();
    for slot in releases {
        population.release(slot);
    }
}

impl<G: Genotype> EvolveState<G> {
    pub fn new(population: Population<G>) -> Self {
        Self {
            population,
            current_generation: 0,
            best_generation: 0,
            best_fitness: None,
            best_genome: None,
        }
    }
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            max_generations: 0,
            scheme: Scheme::default(),
            elitism: Elitism::default(),
            crossover_ratio: 0.9,
            mutation_ratio: 0.1,
            migration_ratio: 0.1,
            fitness_ordering: FitnessOrdering::default(),
            par_fitness: false,
        }
    }
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: Adapt<Genotype = G>,
        RP: Replace<Genotype = G>,
        H: GenerationHook<Genotype = G>,
    > fmt::Display for Evolve<G, F, S, C, M, A, RP, H>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evolve:")?;
        write!(f, "{}", self.genotype)?;
        writeln!(f, "  fitness: {:?}", self.fitness)?;
        writeln!(f, "  select: {:?}", self.plugins.select)?;
        writeln!(f, "  crossover: {:?}", self.plugins.crossover)?;
        writeln!(f, "  mutate: {:?}", self.plugins.mutate)?;
        write!(f, "{}", self.config)?;
        write!(f, "{}", self.state)
    }
}

impl fmt::Display for EvolveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evolve_config:")?;
        writeln!(f, "  max_generations: {}", self.max_generations)?;
        writeln!(f, "  scheme: {:?}", self.scheme)?;
        writeln!(f, "  elitism: {:?}", self.elitism)?;
        writeln!(
            f,
            "  ratios (crossover/mutation/migration): {} / {} / {}",
            self.crossover_ratio, self.mutation_ratio, self.migration_ratio
        )?;
        writeln!(f, "  fitness_ordering: {:?}", self.fitness_ordering)?;
        writeln!(f, "  par_fitness: {}", self.par_fitness)
    }
}

impl<G: Genotype> fmt::Display for EvolveState<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "evolve_state:")?;
        writeln!(f, "  current_generation: {}", self.current_generation)?;
        writeln!(f, "  best_generation: {}", self.best_generation)?;
        writeln!(f, "  best fitness score: {:?}", self.best_fitness)?;
        write!(f, "{}", self.population)
    }
}
