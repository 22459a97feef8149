//! An embeddable evolutionary optimization library.
//!
//! Applications supply domain-specific callbacks (fitness evaluation, seeding, mutation,
//! crossover, selection) and receive back the fittest solutions discovered. There are four main
//! elements:
//! * The [Genotype](crate::genotype) (the search space: genome shape and atom type)
//! * The [Fitness](crate::fitness) function (the search goal)
//! * The [Population](crate::population) (the entity store shared by the engines)
//! * The [Strategy](crate::strategy) (the search engine:
//!   [Evolve](crate::strategy::evolve::Evolve),
//!   [DifferentialEvolution](crate::strategy::differential_evolution::DifferentialEvolution) or
//!   [TabuSearch](crate::strategy::tabu_search::TabuSearch))
//!
//! ## Quick Usage
//!
//! ```rust
//! use evolutionary_algorithm::crossover::CrossoverSinglePoint;
//! use evolutionary_algorithm::entity::Entity;
//! use evolutionary_algorithm::fitness::{Fitness, FitnessValue};
//! use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype};
//! use evolutionary_algorithm::mutate::MutateSinglePointDrift;
//! use evolutionary_algorithm::select::SelectSus;
//! use evolutionary_algorithm::strategy::evolve::Evolve;
//! use evolutionary_algorithm::strategy::Strategy;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! // the search space
//! let genotype = BooleanGenotype::builder() // boolean alleles
//!     .with_chromosome_length(100)          // 100 of them per chromosome
//!     .build()
//!     .unwrap();
//!
//! // the search goal to optimize towards (maximize or minimize)
//! #[derive(Clone, Debug)]
//! pub struct CountTrue;
//! impl Fitness for CountTrue {
//!     type Genotype = BooleanGenotype;
//!     fn calculate_for_entity(
//!         &mut self,
//!         _genotype: &Self::Genotype,
//!         entity: &Entity<Self::Genotype>,
//!     ) -> Option<FitnessValue> {
//!         Some(
//!             entity
//!                 .genome
//!                 .iter()
//!                 .flat_map(|chromosome| chromosome.iter())
//!                 .filter(|&&value| value)
//!                 .count() as FitnessValue,
//!         )
//!     }
//! }
//!
//! // the search strategy
//! let mut rng = SmallRng::seed_from_u64(0);    // a seeded randomness provider
//! let mut evolve = Evolve::builder()
//!     .with_genotype(genotype)
//!     .with_stable_size(100)                   // evolve with 100 entities
//!     .with_max_generations(100)               // for at most 100 generations
//!     .with_fitness(CountTrue)                 // count the true values in the genomes
//!     .with_select(SelectSus::new())           // sample parents proportional to fitness
//!     .with_crossover(CrossoverSinglePoint::new()) // one cut over the genome per offspring pair
//!     .with_mutate(MutateSinglePointDrift::new())  // flip one allele per mutant
//!     .build()
//!     .unwrap();
//! evolve.call(&mut rng);
//!
//! // it's all about the best genome after all
//! assert!(evolve.best_fitness_score().unwrap() > 80.0);
//! ```
//!
//! All engines run on a single controller thread; only fitness evaluation of independent entity
//! batches fans out over a rayon pool when `with_par_fitness(true)` is set (the advisory
//! `GA_NUM_THREADS` environment variable sizes the pool). Runs are deterministic per seeded PRNG
//! and ordering mode; [random](crate::random) provides a PRNG whose state can be exported and
//! resumed exactly.
pub mod adapt;
pub mod allele;
pub mod chromosome;
pub mod crossover;
pub mod entity;
pub mod fitness;
pub mod genotype;
pub mod mutate;
pub mod population;
pub mod random;
pub mod replace;
pub mod select;
pub mod strategy;
