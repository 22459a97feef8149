//! The search engines and their shared policies.
//!
//! There are 3 engines:
//! * [Evolve](self::evolve::Evolve): the generation engine, running the Darwin, Baldwin and
//!   Lamarck schemes with configurable elitism
//! * [DifferentialEvolution](self::differential_evolution::DifferentialEvolution): a
//!   population-based real-vector optimizer
//! * [TabuSearch](self::tabu_search::TabuSearch): a single-solution neighborhood search with a
//!   recency memory
//!
//! All three share the population store, the fitness callback model and the hook-based
//! cancellation points: a [GenerationHook](self::hook::GenerationHook) or
//! [IterationHook](self::hook::IterationHook) returning false terminates the run cleanly at the
//! next generation or iteration boundary.
pub mod differential_evolution;
pub mod evolve;
pub mod hook;
pub mod tabu_search;

use crate::fitness::FitnessValue;
use crate::genotype::Genotype;
use rand::Rng;

pub use self::hook::{GenerationHook, HookNoop, HookPeriodic, IterationHook};

/// The evolutionary scheme: what happens to an entity after its adapt step.
///
/// * Darwin: no adaptation
/// * Baldwin: adapted fitness is kept, the genome is untouched
/// * Lamarck: adapted fitness and genome are both kept
///
/// The `..Children` variants adapt only the freshly produced offspring, the `..All` variants
/// the whole population.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Scheme {
    #[default]
    Darwin,
    BaldwinChildren,
    BaldwinAll,
    LamarckChildren,
    LamarckAll,
}

impl Scheme {
    pub fn adapts(&self) -> bool {
        !matches!(self, Scheme::Darwin)
    }
    pub fn adapts_all(&self) -> bool {
        matches!(self, Scheme::BaldwinAll | Scheme::LamarckAll)
    }
    pub fn keeps_adapted_genome(&self) -> bool {
        matches!(self, Scheme::LamarckChildren | Scheme::LamarckAll)
    }
}

/// Survivor share of the rough elitism variants, `ceil(multiplier * stable_size + constant)`.
pub const ELITISM_MULTIPLIER: f64 = 0.05;
pub const ELITISM_CONSTANT: f64 = 2.0;

/// The elitism policy: which parents persist into the next generation.
///
/// The plain [Rough](Elitism::Rough), [Exact](Elitism::Exact) and
/// [OneParentSurvives](Elitism::OneParentSurvives) variants release every non-elite parent
/// before the final ranking; the `..Comp` variants let all parents compete and only guarantee
/// that the elite count survives truncation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Elitism {
    #[default]
    ParentsSurvive,
    ParentsDie,
    Rough,
    RoughComp,
    Exact {
        count: usize,
    },
    ExactComp {
        count: usize,
    },
    OneParentSurvives,
}

impl Elitism {
    /// How many of the best parents the policy singles out, `None` when all parents share the
    /// same fate.
    pub fn elite_count(&self, stable_size: usize) -> Option<usize> {
        match self {
            Elitism::ParentsSurvive | Elitism::ParentsDie => None,
            Elitism::Rough | Elitism::RoughComp => {
                Some((ELITISM_MULTIPLIER * stable_size as f64 + ELITISM_CONSTANT).ceil() as usize)
            }
            Elitism::Exact { count } | Elitism::ExactComp { count } => Some(*count),
            Elitism::OneParentSurvives => Some(1),
        }
    }

    /// Whether the non-elite parents stay in the population and compete in the final ranking.
    pub fn parents_compete(&self) -> bool {
        matches!(
            self,
            Elitism::ParentsSurvive | Elitism::RoughComp | Elitism::ExactComp { .. }
        )
    }
}

/// Common surface of the three engines.
pub trait Strategy<G: Genotype> {
    fn call<R: Rng>(&mut self, rng: &mut R);
    fn best_generation(&self) -> usize;
    fn best_fitness_score(&self) -> Option<FitnessValue>;
    fn best_genome(&self) -> Option<Vec<G::Chromosome>>;
    fn best_genome_and_fitness_score(&self) -> Option<(Vec<G::Chromosome>, FitnessValue)> {
        if let Some(fitness_value) = self.best_fitness_score() {
            self.best_genome().map(|genome| (genome, fitness_value))
        } else {
            None
        }
    }
}
