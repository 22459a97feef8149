mod support;

use evolutionary_algorithm::adapt::Adapt;
use evolutionary_algorithm::crossover::CrossoverSinglePoint;
use evolutionary_algorithm::fitness::placeholders::{CountTrue, SumAlleles};
use evolutionary_algorithm::fitness::{Fitness, FitnessValue};
use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype, IntegerGenotype};
use evolutionary_algorithm::mutate::{MutateGaussian, MutateSinglePointDrift};
use evolutionary_algorithm::population::Population;
use evolutionary_algorithm::replace::ReplaceByFitness;
use evolutionary_algorithm::select::{SelectEvery, SelectRandom, SelectSus};
use evolutionary_algorithm::strategy::evolve::Evolve;
use evolutionary_algorithm::strategy::hook::{GenerationHook, HookPeriodic};
use evolutionary_algorithm::strategy::{Elitism, Scheme, Strategy};
use rand::Rng;
use support::*;

fn integer_genotype(chromosome_length: usize) -> IntegerGenotype {
    IntegerGenotype::builder()
        .with_chromosome_length(chromosome_length)
        .with_allele_range(0..=9)
        .build()
        .unwrap()
}

/// Test adapt operator: overwrite the genome with a constant allele outside the usual range and
/// report a fixed fitness, so Baldwin and Lamarck effects are distinguishable.
#[derive(Clone, Debug)]
struct AdaptToConstant {
    allele: i64,
    fitness: FitnessValue,
}
impl Adapt for AdaptToConstant {
    type Genotype = IntegerGenotype;
    fn call<R: Rng>(
        &mut self,
        _genotype: &IntegerGenotype,
        genome: &mut Vec<Vec<i64>>,
        _rng: &mut R,
    ) -> Option<FitnessValue> {
        for chromosome in genome.iter_mut() {
            for allele in chromosome.iter_mut() {
                *allele = self.allele;
            }
        }
        Some(self.fitness)
    }
}

/// Test hook: allow exactly `limit` generations.
#[derive(Clone)]
struct StopAfter {
    limit: usize,
}
impl GenerationHook for StopAfter {
    type Genotype = IntegerGenotype;
    fn on_generation(
        &mut self,
        generation: usize,
        _genotype: &IntegerGenotype,
        _population: &Population<IntegerGenotype>,
    ) -> bool {
        generation < self.limit
    }
}

/// Test fitness: rejects genomes whose first allele is odd.
#[derive(Clone, Debug)]
struct RejectOddLead;
impl Fitness for RejectOddLead {
    type Genotype = IntegerGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &IntegerGenotype,
        entity: &support::Entity<IntegerGenotype>,
    ) -> Option<FitnessValue> {
        if entity.genome[0][0] % 2 == 1 {
            None
        } else {
            Some(entity.genome[0].iter().sum::<i64>() as FitnessValue)
        }
    }
}

#[test]
fn builder_validations() {
    let genotype = integer_genotype(5);

    let missing_fitness = Evolve::<
        IntegerGenotype,
        SumAlleles,
        SelectSus<IntegerGenotype>,
        CrossoverSinglePoint<IntegerGenotype>,
        MutateSinglePointDrift<IntegerGenotype>,
    >::builder()
        .with_genotype(genotype.clone())
        .with_stable_size(10)
        .with_max_generations(10)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build();
    assert!(missing_fitness.is_err());

    let missing_generations = Evolve::builder()
        .with_genotype(genotype.clone())
        .with_stable_size(10)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build();
    assert!(missing_generations.is_err());

    let scheme_without_adapt = Evolve::builder()
        .with_genotype(genotype.clone())
        .with_stable_size(10)
        .with_max_generations(10)
        .with_scheme(Scheme::LamarckAll)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build();
    assert!(scheme_without_adapt.is_err());

    let bad_ratio = Evolve::builder()
        .with_genotype(genotype.clone())
        .with_stable_size(10)
        .with_max_generations(10)
        .with_crossover_ratio(1.5)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build();
    assert!(bad_ratio.is_err());

    // gaussian mutation on a genotype without gaussian support
    let boolean = BooleanGenotype::builder().with_chromosome_length(5).build().unwrap();
    let gaussian_on_boolean = Evolve::builder()
        .with_genotype(boolean)
        .with_stable_size(10)
        .with_max_generations(10)
        .with_fitness(CountTrue)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateGaussian::default())
        .build();
    assert!(gaussian_on_boolean.is_err());

    // a population too small for the offspring batch
    let tight_population: Population<IntegerGenotype> = Population::new(10, 10);
    let tight = Evolve::builder()
        .with_genotype(genotype)
        .with_population(tight_population)
        .with_max_generations(10)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build();
    assert!(tight.is_err());
}

#[test]
fn darwin_run_reaches_stable_size_and_improves() {
    let genotype = integer_genotype(10);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(40)
        .with_max_generations(60)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .with_hook(HookPeriodic::new(10))
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.current_generation, 60);
    assert_eq!(evolve.state.population.size(), 40);
    // 10 alleles in 0..=9, random seeding averages 45; selection pressure must do better
    assert!(evolve.best_fitness_score().unwrap() > 70.0);
    assert!(evolve.best_genome().is_some());
}

#[test]
fn generation_hook_terminates_the_run_early() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(100)
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .with_hook(StopAfter { limit: 3 })
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.current_generation, 3);
    assert_eq!(evolve.state.population.size(), 10);
}

#[test]
fn zero_ratios_leave_the_population_unchanged() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut population: Population<IntegerGenotype> = Population::new(10, 10);
    population.seed(&genotype, &mut rng);
    let genomes_before = {
        let mut genomes = inspect::population(&population);
        genomes.sort();
        genomes
    };

    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_population(population)
        .with_max_generations(5)
        .with_crossover_ratio(0.0)
        .with_mutation_ratio(0.0)
        .with_elitism(Elitism::ParentsSurvive)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    let genomes_after = {
        let mut genomes = inspect::population(&evolve.state.population);
        genomes.sort();
        genomes
    };
    assert_eq!(genomes_before, genomes_after);
    assert_eq!(evolve.state.current_generation, 5);
}

#[test]
fn stable_size_one_is_a_fixed_point() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(1)
        .with_max_generations(5)
        .with_crossover_ratio(0.0)
        .with_mutation_ratio(0.0)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.population.size(), 1);
    assert_eq!(evolve.state.population.entity_of_rank(0).id, 0);
}

#[test]
fn parents_die_leaves_only_offspring() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(3)
        .with_crossover_ratio(1.0)
        .with_mutation_ratio(0.0)
        .with_elitism(Elitism::ParentsDie)
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.population.size(), 10);
    assert!(evolve.state.population.iter_ranked().all(|entity| !entity.parent));
}

#[test]
fn exact_elitism_keeps_the_best_parents() {
    let genotype = integer_genotype(3);
    let mut population: Population<IntegerGenotype> = Population::new(4, 4);
    population.insert(build::genome(vec![1, 0, 0])); // sum 1
    population.insert(build::genome(vec![3, 3, 3])); // sum 9
    population.insert(build::genome(vec![2, 0, 0])); // sum 2
    population.insert(build::genome(vec![2, 2, 2])); // sum 6

    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_population(population)
        .with_max_generations(1)
        .with_crossover_ratio(0.0)
        .with_mutation_ratio(0.0)
        .with_elitism(Elitism::Exact { count: 2 })
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(
        inspect::population(&evolve.state.population),
        vec![build::genome(vec![3, 3, 3]), build::genome(vec![2, 2, 2])]
    );
}

#[test]
fn one_parent_survives_keeps_exactly_the_best() {
    let genotype = integer_genotype(3);
    let mut population: Population<IntegerGenotype> = Population::new(3, 3);
    population.insert(build::genome(vec![1, 0, 0]));
    population.insert(build::genome(vec![3, 3, 3]));
    population.insert(build::genome(vec![2, 0, 0]));

    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_population(population)
        .with_max_generations(1)
        .with_crossover_ratio(0.0)
        .with_mutation_ratio(0.0)
        .with_elitism(Elitism::OneParentSurvives)
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(
        inspect::population(&evolve.state.population),
        vec![build::genome(vec![3, 3, 3])]
    );
}

#[test]
fn selection_exhaustion_ends_the_reproduction_phase() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(3)
        .with_crossover_ratio(1.0)
        .with_mutation_ratio(1.0)
        .with_fitness(SumAlleles)
        // one sweep over the parents covers the crossover phase only
        .with_select(SelectEvery::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    // the run continues despite the mutation phase starving
    assert_eq!(evolve.state.current_generation, 3);
    assert_eq!(evolve.state.population.size(), 10);
}

#[test]
fn evaluation_rejection_discards_entities_silently() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(20)
        .with_max_generations(5)
        .with_fitness(RejectOddLead)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.current_generation, 5);
    for entity in evolve.state.population.iter_ranked() {
        assert_eq!(entity.genome[0][0] % 2, 0);
        assert!(entity.fitness.is_some());
    }
}

#[test]
fn lamarck_keeps_the_adapted_genome() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(1)
        .with_scheme(Scheme::LamarckAll)
        .with_adapt(AdaptToConstant {
            allele: 20,
            fitness: 42.0,
        })
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.best_fitness_score(), Some(42.0));
    for entity in evolve.state.population.iter_ranked() {
        assert_eq!(entity.genome, vec![vec![20; 5]]);
        assert_eq!(entity.fitness, Some(42.0));
    }
}

#[test]
fn baldwin_keeps_only_the_adapted_fitness() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(1)
        .with_scheme(Scheme::BaldwinAll)
        .with_adapt(AdaptToConstant {
            allele: 20,
            fitness: 42.0,
        })
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.best_fitness_score(), Some(42.0));
    for entity in evolve.state.population.iter_ranked() {
        // the allele 20 lies outside the genotype range, so it can only appear through a
        // written-back adapted genome
        assert!(entity.genome[0].iter().all(|&allele| allele <= 9));
        assert_eq!(entity.fitness, Some(42.0));
    }
}

#[test]
fn lamarck_children_adapts_only_the_offspring() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(1)
        .with_scheme(Scheme::LamarckChildren)
        .with_adapt(AdaptToConstant {
            allele: 20,
            fitness: 1000.0,
        })
        .with_fitness(SumAlleles)
        .with_select(SelectRandom::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    // the adapted offspring dominate the ranking and fill the next generation
    assert_eq!(evolve.best_fitness_score(), Some(1000.0));
    assert_eq!(evolve.state.population.size(), 10);
    for entity in evolve.state.population.iter_ranked() {
        assert_eq!(entity.genome, vec![vec![20; 5]]);
        assert_eq!(entity.fitness, Some(1000.0));
    }
}

#[test]
fn parallel_fitness_matches_sequential() {
    let run = |par_fitness: bool| {
        let genotype = integer_genotype(8);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut evolve = Evolve::builder()
            .with_genotype(genotype)
            .with_stable_size(20)
            .with_max_generations(15)
            .with_par_fitness(par_fitness)
            .with_fitness(SumAlleles)
            .with_select(SelectSus::new())
            .with_crossover(CrossoverSinglePoint::new())
            .with_mutate(MutateSinglePointDrift::new())
            .build()
            .unwrap();
        evolve.call(&mut rng);
        (
            evolve.best_fitness_score(),
            inspect::fitness_scores(&evolve.state.population),
        )
    };

    // worker scheduling must not be observable: the engine PRNG is only touched between
    // batches, so a parallel run reproduces the sequential one exactly
    assert_eq!(run(false), run(true));
}

#[test]
fn replace_plugin_keeps_the_population_steady() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(12)
        .with_max_generations(10)
        .with_replace(ReplaceByFitness::new())
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .build()
        .unwrap();
    evolve.call(&mut rng);

    assert_eq!(evolve.state.population.size(), 12);
    assert!(evolve.best_fitness_score().is_some());
}

#[test]
fn call_repeatedly_keeps_the_best_run() {
    let genotype = integer_genotype(5);
    let mut rng = SmallRng::seed_from_u64(0);
    let evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_stable_size(10)
        .with_max_generations(10)
        .with_fitness(SumAlleles)
        .with_select(SelectSus::new())
        .with_crossover(CrossoverSinglePoint::new())
        .with_mutate(MutateSinglePointDrift::new())
        .call_repeatedly(3, &mut rng)
        .unwrap();

    assert!(evolve.best_fitness_score().is_some());
    assert_eq!(evolve.state.population.size(), 10);
}
