use super::{
    DeStrategy, DifferentialEvolution, DifferentialEvolutionConfig, DifferentialEvolutionState,
};
use crate::fitness::{Fitness, FitnessOrdering};
use crate::genotype::{DifferentialGenotype, Genotype};
use crate::population::Population;
use crate::strategy::hook::{GenerationHook, HookNoop};
use rand::Rng;

/// Error returned when a differential evolution builder has invalid or missing configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

/// The builder for a [DifferentialEvolution] engine.
#[derive(Clone)]
pub struct Builder<
    G: DifferentialGenotype,
    F: Fitness<Genotype = G>,
    H: GenerationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: Option<G>,
    pub fitness: Option<F>,
    pub hook: H,
    pub population: Option<Population<G>>,
    pub stable_size: Option<usize>,
    pub max_generations: Option<usize>,
    pub strategy: DeStrategy,
    pub weighting_factor: f64,
    pub crossover_factor: f64,
    pub num_perturbed: usize,
    pub perturb_random: bool,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>> Builder<G, F> {
    pub fn new() -> Self {
        Self {
            genotype: None,
            fitness: None,
            hook: HookNoop::new(),
            population: None,
            stable_size: None,
            max_generations: None,
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

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>> Default for Builder<G, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>, H: GenerationHook<Genotype = G>>
    Builder<G, F, H>
{
    pub fn build(self) -> Result<DifferentialEvolution<G, F, H>, TryFromBuilderError> {
        self.try_into()
    }

    pub fn call<R: Rng>(
        self,
        rng: &mut R,
    ) -> Result<DifferentialEvolution<G, F, H>, TryFromBuilderError> {
        let mut differential_evolution: DifferentialEvolution<G, F, H> = self.try_into()?;
        differential_evolution.call(rng);
        Ok(differential_evolution)
    }

    pub fn with_genotype(mut self, genotype: G) -> Self {
        self.genotype = Some(genotype);
        self
    }
    pub fn with_fitness(mut self, fitness: F) -> Self {
        self.fitness = Some(fitness);
        self
    }
    pub fn with_hook<H2: GenerationHook<Genotype = G>>(self, hook: H2) -> Builder<G, F, H2> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            hook,
            population: self.population,
            stable_size: self.stable_size,
            max_generations: self.max_generations,
            strategy: self.strategy,
            weighting_factor: self.weighting_factor,
            crossover_factor: self.crossover_factor,
            num_perturbed: self.num_perturbed,
            perturb_random: self.perturb_random,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    pub fn with_population(mut self, population: Population<G>) -> Self {
        self.population = Some(population);
        self
    }
    pub fn with_stable_size(mut self, stable_size: usize) -> Self {
        self.stable_size = Some(stable_size);
        self
    }
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = Some(max_generations);
        self
    }
    pub fn with_strategy(mut self, strategy: DeStrategy) -> Self {
        self.strategy = strategy;
        self
    }
    pub fn with_weighting_factor(mut self, weighting_factor: f64) -> Self {
        self.weighting_factor = weighting_factor;
        self
    }
    pub fn with_crossover_factor(mut self, crossover_factor: f64) -> Self {
        self.crossover_factor = crossover_factor;
        self
    }
    pub fn with_num_perturbed(mut self, num_perturbed: usize) -> Self {
        self.num_perturbed = num_perturbed;
        self
    }
    pub fn with_perturb_random(mut self, perturb_random: bool) -> Self {
        self.perturb_random = perturb_random;
        self
    }
    pub fn with_fitness_ordering(mut self, fitness_ordering: FitnessOrdering) -> Self {
        self.fitness_ordering = fitness_ordering;
        self
    }
    pub fn with_par_fitness(mut self, par_fitness: bool) -> Self {
        self.par_fitness = par_fitness;
        self
    }
}

impl<G: DifferentialGenotype, F: Fitness<Genotype = G>, H: GenerationHook<Genotype = G>>
    TryFrom<Builder<G, F, H>> for DifferentialEvolution<G, F, H>
{
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<G, F, H>) -> Result<Self, Self::Error> {
        let Some(genotype) = builder.genotype else {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a Genotype",
            ));
        };
        let Some(fitness) = builder.fitness else {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a Fitness",
            ));
        };
        let max_generations = builder.max_generations.unwrap_or(0);
        if max_generations == 0 {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires max_generations > 0",
            ));
        }
        if genotype.num_chromosomes() != 1 {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a single-chromosome genotype",
            ));
        }
        if genotype.chromosome_length() == 0 {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a chromosome_length > 0",
            ));
        }
        if !(0.0..=1.0).contains(&builder.crossover_factor) {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a crossover_factor within [0, 1]",
            ));
        }
        if !builder.weighting_factor.is_finite() {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a finite weighting_factor",
            ));
        }

        let population = match (builder.population, builder.stable_size) {
            (Some(population), _) => population,
            (None, Some(stable_size)) => Population::new(stable_size * 2, stable_size),
            (None, None) => {
                return Err(TryFromBuilderError(
                    "DifferentialEvolution requires a Population or a stable_size",
                ));
            }
        };
        if population.stable_size < 6 {
            return Err(TryFromBuilderError(
                "DifferentialEvolution requires a stable_size of at least 6",
            ));
        }
        if population.max_size < population.stable_size * 2 {
            return Err(TryFromBuilderError(
                "The provided Population's max_size cannot hold a full trial vector batch",
            ));
        }

        Ok(Self {
            genotype,
            fitness,
            hook: builder.hook,
            config: DifferentialEvolutionConfig {
                max_generations,
                strategy: builder.strategy,
                weighting_factor: builder.weighting_factor,
                crossover_factor: builder.crossover_factor,
                num_perturbed: builder.num_perturbed,
                perturb_random: builder.perturb_random,
                fitness_ordering: builder.fitness_ordering,
                par_fitness: builder.par_fitness,
            },
            state: DifferentialEvolutionState::new(population),
        })
    }
}
