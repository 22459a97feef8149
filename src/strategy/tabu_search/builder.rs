use super::{TabuAccept, TabuAcceptExact, TabuSearch, TabuSearchConfig, TabuSearchState};
use crate::chromosome::Chromosome;
use crate::entity::Entity;
use crate::fitness::{Fitness, FitnessOrdering};
use crate::genotype::Genotype;
use crate::mutate::Mutate;
use crate::strategy::hook::{HookNoop, IterationHook};
use rand::Rng;

/// Error returned when a tabu search builder has invalid or missing configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

/// The builder for a [TabuSearch] engine.
#[derive(Clone)]
pub struct Builder<
    G: Genotype,
    F: Fitness<Genotype = G>,
    M: Mutate<Genotype = G>,
    A: TabuAccept = TabuAcceptExact,
    H: IterationHook<Genotype = G> = HookNoop<G>,
> {
    pub genotype: Option<G>,
    pub fitness: Option<F>,
    pub mutate: Option<M>,
    pub accept: A,
    pub hook: H,
    pub seed_genome: Option<Vec<G::Chromosome>>,
    pub max_iterations: Option<usize>,
    pub tabu_list_length: usize,
    pub search_count: usize,
    pub fitness_ordering: FitnessOrdering,
    pub par_fitness: bool,
}

impl<G: Genotype, F: Fitness<Genotype = G>, M: Mutate<Genotype = G>> Builder<G, F, M> {
    pub fn new() -> Self {
        Self {
            genotype: None,
            fitness: None,
            mutate: None,
            accept: TabuAcceptExact::new(),
            hook: HookNoop::new(),
            seed_genome: None,
            max_iterations: None,
            tabu_list_length: 50,
            search_count: 20,
            fitness_ordering: FitnessOrdering::default(),
            par_fitness: false,
        }
    }
}

impl<G: Genotype, F: Fitness<Genotype = G>, M: Mutate<Genotype = G>> Default for Builder<G, F, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<
        G: Genotype,
        F: Fitness<Genotype = G>,
        M: Mutate<Genotype = G>,
        A: TabuAccept,
        H: IterationHook<Genotype = G>,
    > Builder<G, F, M, A, H>
{
    pub fn build(self) -> Result<TabuSearch<G, F, M, A, H>, TryFromBuilderError> {
        self.try_into()
    }

    pub fn call<R: Rng>(
        self,
        rng: &mut R,
    ) -> Result<TabuSearch<G, F, M, A, H>, TryFromBuilderError> {
        let mut tabu_search: TabuSearch<G, F, M, A, H> = self.try_into()?;
        tabu_search.call(rng);
        Ok(tabu_search)
    }

    pub fn with_genotype(mut self, genotype: G) -> Self {
        self.genotype = Some(genotype);
        self
    }
    pub fn with_fitness(mut self, fitness: F) -> Self {
        self.fitness = Some(fitness);
        self
    }
    pub fn with_mutate(mut self, mutate: M) -> Self {
        self.mutate = Some(mutate);
        self
    }
    pub fn with_accept<A2: TabuAccept>(self, accept: A2) -> Builder<G, F, M, A2, H> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            mutate: self.mutate,
            accept,
            hook: self.hook,
            seed_genome: self.seed_genome,
            max_iterations: self.max_iterations,
            tabu_list_length: self.tabu_list_length,
            search_count: self.search_count,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    pub fn with_hook<H2: IterationHook<Genotype = G>>(self, hook: H2) -> Builder<G, F, M, A, H2> {
        Builder {
            genotype: self.genotype,
            fitness: self.fitness,
            mutate: self.mutate,
            accept: self.accept,
            hook,
            seed_genome: self.seed_genome,
            max_iterations: self.max_iterations,
            tabu_list_length: self.tabu_list_length,
            search_count: self.search_count,
            fitness_ordering: self.fitness_ordering,
            par_fitness: self.par_fitness,
        }
    }
    /// The initial working solution. Falls back to the genotype's first seed genome, then to a
    /// random genome.
    pub fn with_seed_genome(mut self, seed_genome: Vec<G::Chromosome>) -> Self {
        self.seed_genome = Some(seed_genome);
        self
    }
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
    pub fn with_tabu_list_length(mut self, tabu_list_length: usize) -> Self {
        self.tabu_list_length = tabu_list_length;
        self
    }
    pub fn with_search_count(mut self, search_count: usize) -> Self {
        self.search_count = search_count;
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
        M: Mutate<Genotype = G>,
        A: TabuAccept,
        H: IterationHook<Genotype = G>,
    > TryFrom<Builder<G, F, M, A, H>> for TabuSearch<G, F, M, A, H>
{
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder<G, F, M, A, H>) -> Result<Self, Self::Error> {
        let Some(genotype) = builder.genotype else {
            return Err(TryFromBuilderError("TabuSearch requires a Genotype"));
        };
        let Some(fitness) = builder.fitness else {
            return Err(TryFromBuilderError("TabuSearch requires a Fitness"));
        };
        let Some(mutate) = builder.mutate else {
            return Err(TryFromBuilderError("TabuSearch requires a Mutate operator"));
        };
        let max_iterations = builder.max_iterations.unwrap_or(0);
        if max_iterations == 0 {
            return Err(TryFromBuilderError("TabuSearch requires max_iterations > 0"));
        }
        if builder.tabu_list_length == 0 {
            return Err(TryFromBuilderError(
                "TabuSearch requires a tabu_list_length > 0",
            ));
        }
        if builder.search_count == 0 {
            return Err(TryFromBuilderError("TabuSearch requires a search_count > 0"));
        }
        if mutate.require_gaussian() && !genotype.supports_gaussian() {
            return Err(TryFromBuilderError(
                "The provided Mutate operator requires gaussian support, which the provided Genotype does not provide",
            ));
        }
        if let Some(seed_genome) = builder.seed_genome.as_ref() {
            let shape_matches = seed_genome.len() == genotype.num_chromosomes()
                && seed_genome
                    .iter()
                    .all(|chromosome| chromosome.len() == genotype.chromosome_length());
            if !shape_matches {
                return Err(TryFromBuilderError(
                    "TabuSearch seed genome does not match the genome shape",
                ));
            }
        }

        let mut state = TabuSearchState::new();
        state.current = builder.seed_genome.map(|genome| Entity::new(0, genome));

        Ok(Self {
            genotype,
            fitness,
            mutate,
            accept: builder.accept,
            hook: builder.hook,
            config: TabuSearchConfig {
                max_iterations,
                tabu_list_length: builder.tabu_list_length,
                search_count: builder.search_count,
                fitness_ordering: builder.fitness_ordering,
                par_fitness: builder.par_fitness,
            },
            state,
        })
    }
}
