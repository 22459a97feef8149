use super::{offspring_capacity, Evolve, EvolveConfig, EvolvePlugins, EvolveState};
use crate::adapt::{Adapt, AdaptNoop};
use crate::crossover::Crossover;
use crate::fitness::{Fitness, FitnessOrdering};
use crate::genotype::Genotype;
use crate::mutate::Mutate;
use crate::population::Population;
use crate::replace::{Replace, ReplaceByFitness};
use crate::select::Select;
use crate::strategy::hook::{GenerationHook, HookNoop};
use crate::strategy::{Elitism, Scheme, Strategy};
use rand::Rng;

/// Error returned when an evolve builder has invalid or missing configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

/// The builder for an [Evolve] engine. The optional adapt, replace and hook slots keep their
/// placeholder types until set, so only the configured plugins show up in the engine's type.
#[derive(Clone)]
pub struct Builder<
    G: Genotype,
    F: Fitness<Genotype = G>,
    S: Select<Genotype = G>,
    C: Crossover<Genotype = G>,
    M: Mutate<Genotype = G>,
    A: Adapt<Genotype = G> = AdaptNoop<G>,
    RP: Replace<Genotype = G> = ReplaceByFitness<G>,
    H: GenerationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: Option<G>,
    pub fitness: Option<F>,
    pub select: Option<S>,
    pub crossover: Option<C>,
    pub mutate: Option<M>,
    pub adapt: Option<A>,
    pub replace: Option<RP>,
    pub hook: H,
    pub population: Option<Population<G>>,
    pub stable_size: Option<usize>,
    pub max_generations: Option<usize>,
    pub scheme: Scheme,
    pub elitism: Elitism,
    pub crossover_ratio: f64,
    pub mutation_ratio: f64,
    pub migration_ratio: f64,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
    > Builder<G, F, S, C, M>
{
    pub fn new() -> Self {
        Self {
            genotype: None,
            fitness: None,
            select: None,
            crossover: None,
            mutate: None,
            adapt: None,
            replace: None,
            hook: HookNoop::new(),
            population: None,
            stable_size: None,
            max_generations: None,
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
    > Default for Builder<G, F, S, C, M>
{
    fn default() -> Self {
        Self::new()
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
    > Builder<G, F, S, C, M, A, RP, H>
{
    pub fn build(self) -> Result<Evolve<G, F, S, C, M, A, RP, H>, TryFromBuilderError> {
        self.try_into()
    }

    pub fn call<R: Rng>(
        self,
        rng: &mut R,
    ) -> Result<Evolve<G, F, S, C, M, A, RP, H>, TryFromBuilderError> {
        let mut evolve: Evolve<G, F, S, C, M, A, RP, H> = self.try_into()?;
        evolve.call(rng);
        Ok(evolve)
    }

    /// Build and run the engine repeatedly from fresh seeds, keeping the best run. Useful when a
    /// single run has a tendency to get stuck in a local optimum.
    pub fn call_repeatedly<R: Rng>(
        self,
        max_repeats: usize,
        rng: &mut R,
    ) -> Result<Evolve<G, F, S, C, M, A, RP, H>, TryFromBuilderError> {
        if max_repeats == 0 {
            return Err(TryFromBuilderError("call_repeatedly requires max_repeats > 0"));
        }
        let mut best_run: Option<Evolve<G, F, S, C, M, A, RP, H>> = None;
        for _ in 0..max_repeats {
            let mut contending_run: Evolve<G, F, S, C, M, A, RP, H> = self.clone().try_into()?;
            contending_run.call(rng);
            match best_run.as_ref() {
                None => best_run = Some(contending_run),
                Some(current_best) => {
                    let improved = match (
                        current_best.best_fitness_score(),
                        contending_run.best_fitness_score(),
                    ) {
                        (None, Some(_)) => true,
                        (Some(current), Some(contending)) => contending_run
                            .config
                            .fitness_ordering
                            .is_improvement(contending, current),
                        _ => false,
                    };
                    if improved {
                        best_run = Some(contending_run);
                    }
                }
            }
        }
        best_run.ok_or(TryFromBuilderError("call_repeatedly produced no run"))
    }

    pub fn with_genotype(mut self, genotype: G) -> Self {
        self.genotype = Some(genotype);
        self
    }
    pub fn with_fitness(mut self, fitness: F) -> Self {
        self.fitness = Some(fitness);
        self
    }
    pub fn with_select(mut self, select: S) -> Self {
        self.select = Some(select);
        self
    }
    pub fn with_crossover(mut self, crossover: C) -> Self {
        self.crossover = Some(crossover);
        self
    }
    pub fn with_mutate(mut self, mutate: M) -> Self {
        self.mutate = Some(mutate);
        self
    }
    pub fn with_adapt<A2: Adapt<Genotype = G>>(
        self,
        adapt: A2,
    ) -> Builder<G, F, S, C, M, A2, RP, H> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            select: self.select,
            crossover: self.crossover,
            mutate: self.mutate,
            adapt: Some(adapt),
            replace: self.replace,
            hook: self.hook,
            population: self.population,
            stable_size: self.stable_size,
            max_generations: self.max_generations,
            scheme: self.scheme,
            elitism: self.elitism,
            crossover_ratio: self.crossover_ratio,
            mutation_ratio: self.mutation_ratio,
            migration_ratio: self.migration_ratio,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    pub fn with_replace<RP2: Replace<Genotype = G>>(
        self,
        replace: RP2,
    ) -> Builder<G, F, S, C, M, A, RP2, H> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            select: self.select,
            crossover: self.crossover,
            mutate: self.mutate,
            adapt: self.adapt,
            replace: Some(replace),
            hook: self.hook,
            population: self.population,
            stable_size: self.stable_size,
            max_generations: self.max_generations,
            scheme: self.scheme,
            elitism: self.elitism,
            crossover_ratio: self.crossover_ratio,
            mutation_ratio: self.mutation_ratio,
            migration_ratio: self.migration_ratio,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    pub fn with_hook<H2: GenerationHook<Genotype = G>>(
        self,
        hook: H2,
    ) -> Builder<G, F, S, C, M, A, RP, H2> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            select: self.select,
            crossover: self.crossover,
            mutate: self.mutate,
            adapt: self.adapt,
            replace: self.replace,
            hook,
            population: self.population,
            stable_size: self.stable_size,
            max_generations: self.max_generations,
            scheme: self.scheme,
            elitism: self.elitism,
            crossover_ratio: self.crossover_ratio,
            mutation_ratio: self.mutation_ratio,
            migration_ratio: self.migration_ratio,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    /// A pre-seeded population, e.g. built through
    /// [Population::seed](crate::population::Population::seed) or carried over from a previous
    /// run. Mutually exclusive with [with_stable_size](Builder::with_stable_size).
    pub fn with_population(mut self, population: Population<G>) -> Self {
        self.population = Some(population);
        self
    }
    /// Let the engine allocate a population with this stable_size and enough capacity for a full
    /// offspring batch, seeded at the start of the run.
    pub fn with_stable_size(mut self, stable_size: usize) -> Self {
        self.stable_size = Some(stable_size);
        self
    }
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = Some(max_generations);
        self
    }
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }
    pub fn with_crossover_ratio(mut self, crossover_ratio: f64) -> Self {
        self.crossover_ratio = crossover_ratio;
        self
    }
    pub fn with_mutation_ratio(mut self, mutation_ratio: f64) -> Self {
        self.mutation_ratio = mutation_ratio;
        self
    }
    pub fn with_migration_ratio(mut self, migration_ratio: f64) -> Self {
        self.migration_ratio = migration_ratio;
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

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        S: Select<Genotype = G>,
        C: Crossover<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: Adapt<Genotype = G>,
        RP: Replace<Genotype = G>,
        H: GenerationHook<Genotype = G>,
    > TryFrom<Builder<G, F, S, C, M, A, RP, H>> for Evolve<G, F, S, C, M, A, RP, H>
{
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<G, F, S, C, M, A, RP, H>) -> Result<Self, Self::Error> {
        let Some(genotype) = builder.genotype else {
            return Err(TryFromBuilderError("Evolve requires a Genotype"));
        };
        let Some(fitness) = builder.fitness else {
            return Err(TryFromBuilderError("Evolve requires a Fitness"));
        };
        let Some(select) = builder.select else {
            return Err(TryFromBuilderError("Evolve requires a Select operator"));
        };
        let Some(crossover) = builder.crossover else {
            return Err(TryFromBuilderError("Evolve requires a Crossover operator"));
        };
        let Some(mutate) = builder.mutate else {
            return Err(TryFromBuilderError("Evolve requires a Mutate operator"));
        };
        let max_generations = builder.max_generations.unwrap_or(0);
        if max_generations == 0 {
            return Err(TryFromBuilderError("Evolve requires max_generations > 0"));
        }
        if !(0.0..=1.0).contains(&builder.crossover_ratio) {
            return Err(TryFromBuilderError(
                "Evolve requires a crossover_ratio within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&builder.mutation_ratio) {
            return Err(TryFromBuilderError(
                "Evolve requires a mutation_ratio within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&builder.migration_ratio) {
            return Err(TryFromBuilderError(
                "Evolve requires a migration_ratio within [0, 1]",
            ));
        }
        if builder.scheme.adapts() && builder.adapt.is_none() {
            return Err(TryFromBuilderError(
                "The Baldwin and Lamarck schemes require an Adapt operator",
            ));
        }
        if mutate.require_gaussian() && !genotype.supports_gaussian() {
            return Err(TryFromBuilderError(
                "The provided Mutate operator requires gaussian support, which the provided Genotype does not provide",
            ));
        }

        let population = match (builder.population, builder.stable_size) {
            (Some(population), _) => {
                let required = population.stable_size
                    + offspring_capacity(
                        population.stable_size,
                        builder.crossover_ratio,
                        builder.mutation_ratio,
                    );
                if population.max_size < required {
                    return Err(TryFromBuilderError(
                        "The provided Population's max_size cannot hold a full offspring batch",
                    ));
                }
                population
            }
            (None, Some(stable_size)) => {
                if stable_size == 0 {
                    return Err(TryFromBuilderError("Evolve requires a stable_size > 0"));
                }
                let capacity = stable_size
                    + offspring_capacity(
                        stable_size,
                        builder.crossover_ratio,
                        builder.mutation_ratio,
                    );
                Population::new(capacity, stable_size)
            }
            (None, None) => {
                return Err(TryFromBuilderError(
                    "Evolve requires a Population or a stable_size",
                ));
            }
        };
        if let Some(elite_count) = builder.elitism.elite_count(population.stable_size) {
            if elite_count > population.stable_size {
                return Err(TryFromBuilderError(
                    "Evolve requires an elitism count <= stable_size",
                ));
            }
        }

        Ok(Self {
            genotype,
            fitness,
            plugins: EvolvePlugins {
                select,
                crossover,
                mutate,
            },
            adapt: builder.adapt,
            replace: builder.replace,
            hook: builder.hook,
            config: EvolveConfig {
                max_generations,
                scheme: builder.scheme,
                elitism: builder.elitism,
                crossover_ratio: builder.crossover_ratio,
                mutation_ratio: builder.mutation_ratio,
                migration_ratio: builder.migration_ratio,
                fitness_ordering: builder.fitness_ordering,
                par_fitness: builder.par_fitness,
            },
            state: EvolveState::new(population),
        })
    }
}
