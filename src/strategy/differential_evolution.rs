//! Differential evolution: population-based optimization over real-vector genomes.
mod builder;

pub use self::builder::{
    Builder as DifferentialEvolutionBuilder,
    TryFromBuilderError as TryFromDifferentialEvolutionBuilderError,
};

use super::hook::{GenerationHook, HookNoop};
use super::Strategy;
use crate::fitness::{Fitness, FitnessOrdering, FitnessValue};
use crate::genotype::{DifferentialGenotype, Genotype};
use crate::population::Population;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use thread_local::ThreadLocal;

/// The recombination strategy: which vectors the trial arithmetic draws from.
/// All variants use the exponential crossover run by default; `perturb_random` switches to the
/// binomial per-locus variant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DeStrategy {
    /// trial = partner0 + F·(partner1 - partner2)
    #[default]
    Rand1,
    /// trial = best + F·(partner1 - partner2)
    Best1,
    /// trial = partner0 + F·(best + partner0 - partner1 - partner2)
    RandToBest1,
    /// trial = best + F·(partner0 + partner1 - partner2 - partner3)
    Best2,
    /// trial = partner4 + F·(partner0 + partner1 - partner2 - partner3)
    Rand2,
}

/// For every entity in the population, a trial vector is produced by differential recombination
/// of distinct partners and evaluated; the trial replaces its target when it ranks at least as
/// good, otherwise it is discarded. The originals of a generation are dereferenced at its end,
/// since each was either replaced or logically kept through its surviving copy.
///
/// Preconditions (validated at build time): a single-chromosome real genotype, a stable_size of
/// at least 6 (the recombination needs the target, five distinct partners), a crossover_factor
/// within [0, 1].
///
/// See [DifferentialEvolutionBuilder] for initialization options.
///
/// Example:
/// ```
/// use evolutionary_algorithm::fitness::placeholders::NegativeSphere;
/// use evolutionary_algorithm::genotype::{Genotype, RealGenotype};
/// use evolutionary_algorithm::strategy::differential_evolution::DifferentialEvolution;
/// use evolutionary_algorithm::strategy::Strategy;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let genotype = RealGenotype::builder()
///     .with_chromosome_length(4)
///     .with_allele_range(-5.12..=5.12)
///     .build()
///     .unwrap();
///
/// let mut rng = SmallRng::seed_from_u64(0);
/// let mut differential_evolution = DifferentialEvolution::builder()
///     .with_genotype(genotype)
///     .with_fitness(NegativeSphere)
///     .with_stable_size(20)
///     .with_max_generations(50)
///     .build()
///     .unwrap();
/// differential_evolution.call(&mut rng);
///
/// assert!(differential_evolution.best_fitness_score().unwrap() > -1.0);
/// ```
pub struct DifferentialEvolution<
    G: DifferentialGenotype,
    F: Fitness<Genotype = G>,
    H: GenerationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: G,
    pub fitness: F,
    pub hook: H,
    pub config: DifferentialEvolutionConfig,
    pub state: DifferentialEvolutionState<G>,
}

pub struct DifferentialEvolutionConfig {
    pub max_generations: usize,
    pub strategy: DeStrategy,
    pub weighting_factor: f64,
    pub crossover_factor: f64,
    pub num_perturbed: usize,
    pub perturb_random: bool,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

pub struct DifferentialEvolutionState<G: Genotype> {
    pub population: Population<G>,
    pub current_generation: usize,
    pub best_generation: usize,
    pub best_fitness: Option<FitnessValue>,
    pub best_genome: Option<Vec<G::Chromosome>>,
}

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>, H: GenerationHook<Genotype = G>>
    Strategy<G> for DifferentialEvolution<G, F, H>
{
    fn call<R: Rng>(&mut self, rng: &mut R) {
        DifferentialEvolution::call(self, rng)
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

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>> DifferentialEvolution<G, F> {
    pub fn builder() -> DifferentialEvolutionBuilder<G, F> {
        DifferentialEvolutionBuilder::new()
    }
}

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>, H: GenerationHook<Genotype = G>>
    DifferentialEvolution<G, F, H>
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

        let mut permutation: Vec<usize> = (0..self.state.population.size()).collect();

        while self.hook.on_generation(
            self.state.current_generation,
            &self.genotype,
            &self.state.population,
        ) && self.state.current_generation < self.config.max_generations
        {
            self.state.current_generation += 1;
            self.generation_step(&mut permutation, thread_local.as_ref(), pool.as_ref(), rng);
            self.update_best();
            log::debug!(
                "generation (current/best): {}/{}, fitness score (best/mean/stddev): {:?} / {:.6} / {:.6}",
                self.state.current_generation,
                self.state.best_generation,
                self.state.best_fitness,
                self.state.population.fitness_score_mean(),
                self.state.population.fitness_score_stddev(),
            );
        }

        self.state.population.sort(self.config.fitness_ordering);
        self.state.population.assert_invariants();
    }

    fn generation_step<R: Rng>(
        &mut self,
        permutation: &mut Vec<usize>,
        thread_local: Option<&ThreadLocal<RefCell<F>>>,
        pool: Option<&rayon::ThreadPool>,
        rng: &mut R,
    ) {
        let orig_size = self.state.population.size();
        if orig_size < 6 {
            return;
        }
        permutation.clear();
        permutation.extend(0..orig_size);

        let chromosome_length = self.genotype.chromosome_length();
        let best_slot = self.state.population.slot_of_rank(0);
        let crossover_sampler =
            Bernoulli::new(self.config.crossover_factor.clamp(0.0, 1.0)).unwrap();

        let mut trials: Vec<(usize, usize)> = Vec::with_capacity(orig_size);
        for target_rank in 0..orig_size {
            // five distinct partner ranks, none the target, via a partial Knuth shuffle of a
            // persistent permutation buffer
            for draw in 0..5 {
                let mut position = draw + rng.gen_range(0..orig_size - draw);
                while permutation[position] == target_rank {
                    position = draw + rng.gen_range(0..orig_size - draw);
                }
                permutation.swap(draw, position);
            }
            let target_slot = self.state.population.slot_of_rank(target_rank);
            let trial_genome = {
                let population = &self.state.population;
                let partner = |index: usize, locus: usize| -> f64 {
                    population.entity(population.slot_of_rank(permutation[index])).genome[0][locus]
                };
                let best =
                    |locus: usize| -> f64 { population.entity(best_slot).genome[0][locus] };
                let factor = self.config.weighting_factor;
                let formula = |locus: usize| -> f64 {
                    match self.config.strategy {
                        DeStrategy::Rand1 => {
                            partner(0, locus)
                                + factor * (partner(1, locus) - partner(2, locus))
                        }
                        DeStrategy::Best1 => {
                            best(locus) + factor * (partner(1, locus) - partner(2, locus))
                        }
                        DeStrategy::RandToBest1 => {
                            partner(0, locus)
                                + factor
                                    * (best(locus) + partner(0, locus)
                                        - partner(1, locus)
                                        - partner(2, locus))
                        }
                        DeStrategy::Best2 => {
                            best(locus)
                                + factor
                                    * (partner(0, locus) + partner(1, locus)
                                        - partner(2, locus)
                                        - partner(3, locus))
                        }
                        DeStrategy::Rand2 => {
                            partner(4, locus)
                                + factor
                                    * (partner(0, locus) + partner(1, locus)
                                        - partner(2, locus)
                                        - partner(3, locus))
                        }
                    }
                };

                let mut genome = population.entity(target_slot).genome.clone();
                let start_locus = rng.gen_range(0..chromosome_length);
                if self.config.perturb_random {
                    // binomial crossover: every locus independently, the start locus always
                    for locus in 0..chromosome_length {
                        if locus == start_locus || crossover_sampler.sample(rng) {
                            genome[0][locus] = formula(locus);
                        }
                    }
                } else {
                    // exponential crossover: a contiguous run from the start locus
                    let mut locus = start_locus;
                    let mut run_length = 0;
                    loop {
                        genome[0][locus] = formula(locus);
                        locus = (locus + 1) % chromosome_length;
                        run_length += 1;
                        if run_length >= chromosome_length {
                            break;
                        }
                        if run_length >= self.config.num_perturbed.max(1)
                            && !crossover_sampler.sample(rng)
                        {
                            break;
                        }
                    }
                }
                genome
            };
            let trial_slot = self.state.population.insert(trial_genome);
            trials.push((target_slot, trial_slot));
        }

        self.evaluate_population(thread_local, pool);

        for (target_slot, trial_slot) in trials {
            if !self.state.population.is_live(trial_slot) {
                continue; // trial was rejected by the fitness function, target stays
            }
            let trial_fitness = self.state.population.entity(trial_slot).fitness;
            let target_fitness = self.state.population.entity(target_slot).fitness;
            if self
                .config
                .fitness_ordering
                .compare(trial_fitness, target_fitness)
                != Ordering::Greater
            {
                self.state.population.release(target_slot);
            } else {
                self.state.population.release(trial_slot);
            }
        }

        self.state.population.sort(self.config.fitness_ordering);
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
}

impl<G: Genotype> DifferentialEvolutionState<G> {
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

impl Default for DifferentialEvolutionConfig {
    fn default() -> Self {
        Self {
            max_generations: 0,
            strategy: DeStrategy::default(),
            weighting_factor: 0.3,
            crossover_factor: 0.5,
            num_perturbed: 1,
            perturb_random: false,
            fitness_ordering: FitnessOrdering::default(),
            par_fitness: false,
        }
    }
}

impl fmt::Display for DifferentialEvolutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "differential_evolution_config:")?;
        writeln!(f, "  max_generations: {}", self.max_generations)?;
        writeln!(f, "  strategy: {:?}", self.strategy)?;
        writeln!(
            f,
            "  factors (weighting/crossover): {} / {}",
            self.weighting_factor, self.crossover_factor
        )?;
        writeln!(
            f,
            "  perturbation (num_perturbed/perturb_random): {} / {}",
            self.num_perturbed, self.perturb_random
        )?;
        writeln!(f, "  fitness_ordering: {:?}", self.fitness_ordering)?;
        writeln!(f, "  par_fitness: {}", self.par_fitness)
    }
}
