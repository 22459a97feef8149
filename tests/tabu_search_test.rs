mod support;

use evolutionary_algorithm::fitness::placeholders::{CountTrue, SumAlleles};
use evolutionary_algorithm::fitness::FitnessOrdering;
use evolutionary_algorithm::genotype::{BooleanGenotype, Genotype, IntegerGenotype, RealGenotype};
use evolutionary_algorithm::mutate::{MutateSinglePointDrift, MutateSinglePointRandom};
use evolutionary_algorithm::strategy::tabu_search::{
    TabuAccept, TabuAcceptApprox, TabuAcceptExact, TabuSearch,
};
use evolutionary_algorithm::strategy::Strategy;
use std::collections::VecDeque;
use support::*;

#[test]
fn builder_validations() {
    let genotype = BooleanGenotype::builder().with_chromosome_length(8).build().unwrap();

    let missing_mutate =
        TabuSearch::<BooleanGenotype, CountTrue, MutateSinglePointDrift<BooleanGenotype>>::builder()
        .with_genotype(genotype.clone())
        .with_fitness(CountTrue)
        .with_max_iterations(10)
        .build();
    assert!(missing_mutate.is_err());

    let zero_search_count = TabuSearch::builder()
        .with_genotype(genotype.clone())
        .with_fitness(CountTrue)
        .with_mutate(MutateSinglePointDrift::new())
        .with_max_iterations(10)
        .with_search_count(0)
        .build();
    assert!(zero_search_count.is_err());

    let bad_seed_genome = TabuSearch::builder()
        .with_genotype(genotype)
        .with_fitness(CountTrue)
        .with_mutate(MutateSinglePointDrift::new())
        .with_max_iterations(10)
        .with_seed_genome(vec![vec![true; 4]])
        .build();
    assert!(bad_seed_genome.is_err());
}

#[test]
fn reported_best_is_at_least_the_initial_fitness() {
    let genotype = BooleanGenotype::builder().with_chromosome_length(16).build().unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut tabu_search = TabuSearch::builder()
        .with_genotype(genotype)
        .with_fitness(CountTrue)
        .with_mutate(MutateSinglePointDrift::new())
        .with_max_iterations(50)
        .with_seed_genome(vec![vec![false; 16]])
        .build()
        .unwrap();
    tabu_search.call(&mut rng);

    assert_eq!(tabu_search.state.current_iteration, 50);
    // the all-false seed scores 0, the walk can only have found something at least as good
    assert!(tabu_search.best_fitness_score().unwrap() >= 0.0);
    // and with 50 neighborhoods of single flips it surely improved
    assert!(tabu_search.best_fitness_score().unwrap() > 8.0);
}

#[test]
fn reported_best_is_best_ever_not_best_current() {
    let genotype = IntegerGenotype::builder()
        .with_chromosome_length(6)
        .with_allele_range(0..=9)
        .build()
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut tabu_search = TabuSearch::builder()
        .with_genotype(genotype)
        .with_fitness(SumAlleles)
        .with_mutate(MutateSinglePointRandom::new())
        .with_max_iterations(40)
        .with_tabu_list_length(5)
        .with_search_count(4)
        .build()
        .unwrap();
    tabu_search.call(&mut rng);

    let best = tabu_search.best_fitness_score();
    let current = tabu_search.state.current.as_ref().unwrap().fitness;
    assert!(
        FitnessOrdering::Maximize.compare(best, current) != std::cmp::Ordering::Greater,
        "best-ever {:?} must rank at least as good as the final current {:?}",
        best,
        current
    );
}

#[test]
fn tabu_ring_is_bounded() {
    let genotype = BooleanGenotype::builder().with_chromosome_length(8).build().unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut tabu_search = TabuSearch::builder()
        .with_genotype(genotype)
        .with_fitness(CountTrue)
        .with_mutate(MutateSinglePointDrift::new())
        .with_max_iterations(30)
        .with_tabu_list_length(4)
        .with_search_count(6)
        .build()
        .unwrap();
    tabu_search.call(&mut rng);

    assert!(tabu_search.state.tabu_list.len() <= 4);
}

#[test]
fn aspiration_breaks_total_deadlock() {
    // a one-bit genome flip-flops: the only candidate is always tabu after one move, so only
    // the aspiration criterion keeps the walk going
    let genotype = BooleanGenotype::builder().with_chromosome_length(1).build().unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut tabu_search = TabuSearch::builder()
        .with_genotype(genotype)
        .with_fitness(CountTrue)
        .with_mutate(MutateSinglePointDrift::new())
        .with_max_iterations(10)
        .with_tabu_list_length(2)
        .with_search_count(1)
        .with_seed_genome(vec![vec![false]])
        .build()
        .unwrap();
    tabu_search.call(&mut rng);

    assert_eq!(tabu_search.state.current_iteration, 10);
    assert_eq!(tabu_search.best_fitness_score(), Some(1.0));
}

#[test]
fn accept_variants_compare_against_the_ring() {
    let boolean = BooleanGenotype::builder().with_chromosome_length(3).build().unwrap();
    let mut ring: VecDeque<Vec<Vec<bool>>> = VecDeque::new();
    ring.push_back(vec![vec![true, false, true]]);

    let exact = TabuAcceptExact::new();
    assert!(exact.is_tabu(&boolean, &[vec![true, false, true]], &ring));
    assert!(!exact.is_tabu(&boolean, &[vec![true, true, true]], &ring));

    let real = RealGenotype::builder()
        .with_chromosome_length(2)
        .with_allele_range(-1.0..=1.0)
        .build()
        .unwrap();
    let mut real_ring: VecDeque<Vec<Vec<f64>>> = VecDeque::new();
    real_ring.push_back(vec![vec![0.5, -0.5]]);

    let approx = TabuAcceptApprox::new(1e-3);
    assert!(approx.is_tabu(&real, &[vec![0.5004, -0.5]], &real_ring));
    assert!(!approx.is_tabu(&real, &[vec![0.51, -0.5]], &real_ring));
}
