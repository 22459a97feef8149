mod support;

use evolutionary_algorithm::fitness::placeholders::SumAlleles;
use evolutionary_algorithm::fitness::{Fitness, FitnessOrdering};
use evolutionary_algorithm::genotype::{Genotype, IntegerGenotype};
use evolutionary_algorithm::population::Population;
use std::sync::Arc;
use support::*;

fn small_genotype() -> IntegerGenotype {
    IntegerGenotype::builder()
        .with_chromosome_length(3)
        .with_allele_range(0..=9)
        .build()
        .unwrap()
}

#[test]
fn insert_assigns_monotonic_ids_and_ranks() {
    let mut population: Population<IntegerGenotype> = Population::new(4, 2);
    let slot_a = population.insert(build::genome(vec![1, 1, 1]));
    let slot_b = population.insert(build::genome(vec![2, 2, 2]));

    assert_eq!(population.size(), 2);
    assert_eq!(population.entity(slot_a).id, 0);
    assert_eq!(population.entity(slot_b).id, 1);
    assert_eq!(population.rank_of_slot(slot_a), Some(0));
    assert_eq!(population.rank_of_slot(slot_b), Some(1));
    population.assert_invariants();
}

#[test]
fn try_insert_fails_at_capacity() {
    let mut population: Population<IntegerGenotype> = Population::new(2, 2);
    assert!(population.try_insert(build::genome(vec![0, 0, 0])).is_some());
    assert!(population.try_insert(build::genome(vec![0, 0, 0])).is_some());
    assert!(population.try_insert(build::genome(vec![0, 0, 0])).is_none());
}

#[test]
fn released_slots_are_reused_with_fresh_ids() {
    let mut population: Population<IntegerGenotype> = Population::new(2, 2);
    let slot_a = population.insert(build::genome(vec![1, 1, 1]));
    let id_a = population.entity(slot_a).id;
    population.release(slot_a);
    assert_eq!(population.size(), 0);

    let slot_b = population.insert(build::genome(vec![2, 2, 2]));
    assert_eq!(slot_a, slot_b);
    assert!(population.entity(slot_b).id > id_a);
    population.assert_invariants();
}

#[test]
fn clone_entity_shares_the_phenotype_handle() {
    let mut population: Population<IntegerGenotype> = Population::new(4, 2);
    let source = population.insert(build::genome(vec![3, 2, 1]));
    population.entity_mut(source).fitness = Some(6.0);
    let handle: Arc<dyn std::any::Any + Send + Sync> = Arc::new(42usize);
    population.entity_mut(source).phenotype = Some(handle.clone());
    assert_eq!(Arc::strong_count(&handle), 2);

    let clone = population.clone_entity(source);
    assert_eq!(Arc::strong_count(&handle), 3);
    assert!(population.entity(clone).eq_genome(population.entity(source)));
    assert_eq!(population.entity(clone).fitness, Some(6.0));
    assert_ne!(population.entity(clone).id, population.entity(source).id);

    population.release(clone);
    assert_eq!(Arc::strong_count(&handle), 2);
    population.release(source);
    assert_eq!(Arc::strong_count(&handle), 1);
}

#[test]
fn copy_and_blank_entities() {
    let genotype = small_genotype();
    let mut population: Population<IntegerGenotype> = Population::new(4, 2);
    let source = population.insert(build::genome(vec![3, 2, 1]));
    population.entity_mut(source).fitness = Some(6.0);
    let destination = population.insert(build::genome(vec![9, 9, 9]));
    let destination_id = population.entity(destination).id;

    population.copy_entity(destination, source);
    assert_eq!(population.entity(destination).genome, vec![vec![3, 2, 1]]);
    assert_eq!(population.entity(destination).fitness, Some(6.0));
    assert_eq!(population.entity(destination).id, destination_id);

    population.blank_entity(&genotype, destination);
    assert_eq!(population.entity(destination).genome, vec![vec![0, 0, 0]]);
    assert_eq!(population.entity(destination).fitness, None);
}

#[test]
fn sort_orders_descending_with_stable_id_tie_break() {
    let mut population: Population<IntegerGenotype> = build::population_with_fitness(vec![
        (build::genome(vec![0, 0, 1]), Some(1.0)),
        (build::genome(vec![0, 0, 2]), Some(3.0)),
        (build::genome(vec![0, 0, 3]), Some(2.0)),
        (build::genome(vec![0, 0, 4]), Some(3.0)),
        (build::genome(vec![0, 0, 5]), None),
    ]);
    population.sort(FitnessOrdering::Maximize);

    assert_eq!(
        inspect::fitness_scores(&population),
        vec![Some(3.0), Some(3.0), Some(2.0), Some(1.0), None]
    );
    // the two 3.0 scores keep insertion (id) order
    assert_eq!(inspect::ids(&population), vec![1, 3, 2, 0, 4]);

    for rank in 0..population.size() - 1 {
        let (a, b) = (
            population.entity_of_rank(rank).fitness,
            population.entity_of_rank(rank + 1).fitness,
        );
        if let (Some(a), Some(b)) = (a, b) {
            assert!(a >= b);
        }
    }

    population.sort(FitnessOrdering::Minimize);
    assert_eq!(
        inspect::fitness_scores(&population),
        vec![Some(1.0), Some(2.0), Some(3.0), Some(3.0), None]
    );
}

#[test]
fn truncate_releases_the_worst_ranks() {
    let mut population: Population<IntegerGenotype> = build::population_with_fitness(vec![
        (build::genome(vec![0, 0, 1]), Some(1.0)),
        (build::genome(vec![0, 0, 2]), Some(3.0)),
        (build::genome(vec![0, 0, 3]), Some(2.0)),
    ]);
    population.sort(FitnessOrdering::Maximize);
    population.truncate(2);

    assert_eq!(population.size(), 2);
    assert_eq!(inspect::fitness_scores(&population), vec![Some(3.0), Some(2.0)]);
    population.assert_invariants();
}

#[test]
fn lookups_by_rank_and_id() {
    let mut population: Population<IntegerGenotype> = build::population_with_fitness(vec![
        (build::genome(vec![0, 0, 1]), Some(1.0)),
        (build::genome(vec![0, 0, 2]), Some(2.0)),
    ]);
    population.sort(FitnessOrdering::Maximize);

    let best_slot = population.slot_of_rank(0);
    assert_eq!(population.entity(best_slot).fitness, Some(2.0));
    assert_eq!(population.rank_of_slot(best_slot), Some(0));
    let best_id = population.entity(best_slot).id;
    assert_eq!(population.slot_of_id(best_id), Some(best_slot));
    assert_eq!(population.slot_of_id(999), None);
}

#[test]
fn seed_fills_to_stable_size() {
    let genotype = small_genotype();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut population: Population<IntegerGenotype> = Population::new(20, 10);
    population.seed(&genotype, &mut rng);

    assert_eq!(population.size(), 10);
    for entity in population.iter_ranked() {
        assert!(entity.fitness.is_none());
        for chromosome in &entity.genome {
            assert!(chromosome.iter().all(|allele| (0..=9).contains(allele)));
        }
    }
}

#[test]
fn seed_cycles_the_user_seed_genes_list() {
    let genotype = IntegerGenotype::builder()
        .with_chromosome_length(3)
        .with_allele_range(0..=9)
        .with_seed_genes_list(vec![
            build::genome(vec![1, 2, 3]),
            build::genome(vec![4, 5, 6]),
        ])
        .build()
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut population: Population<IntegerGenotype> = Population::new(10, 5);
    population.seed(&genotype, &mut rng);

    assert_eq!(
        inspect::population(&population),
        vec![
            build::genome(vec![1, 2, 3]),
            build::genome(vec![4, 5, 6]),
            build::genome(vec![1, 2, 3]),
            build::genome(vec![4, 5, 6]),
            build::genome(vec![1, 2, 3]),
        ]
    );
}

#[test]
fn seed_zero_honors_allele_bounds() {
    let genotype = IntegerGenotype::builder()
        .with_chromosome_length(3)
        .with_allele_range(5..=9)
        .build()
        .unwrap();
    let mut population: Population<IntegerGenotype> = Population::new(4, 2);
    population.seed_zero(&genotype);

    for entity in population.iter_ranked() {
        assert_eq!(entity.genome, vec![vec![5, 5, 5]]);
    }
}

#[test]
fn convergence_metrics() {
    let identical: Population<IntegerGenotype> = build::population(vec![
        build::genome(vec![1, 2, 3]),
        build::genome(vec![1, 2, 3]),
        build::genome(vec![1, 2, 3]),
    ]);
    assert!(relative_eq!(identical.convergence_genotypes(), 1.0));
    assert!(relative_eq!(identical.convergence_chromosomes(), 1.0));
    assert!(relative_eq!(identical.convergence_alleles(), 1.0));

    let mixed: Population<IntegerGenotype> = build::population(vec![
        build::genome(vec![1, 2, 3]),
        build::genome(vec![1, 2, 3]),
        build::genome(vec![9, 2, 3]),
    ]);
    // one identical pair out of three
    assert!(relative_eq!(mixed.convergence_genotypes(), 1.0 / 3.0));
    // per locus modes: 2/3, 3/3, 3/3
    assert!(relative_eq!(
        mixed.convergence_alleles(),
        (2.0 / 3.0 + 1.0 + 1.0) / 3.0
    ));
}

#[test]
fn fitness_statistics() {
    let population: Population<IntegerGenotype> = build::population_with_fitness(vec![
        (build::genome(vec![0, 0, 0]), Some(1.0)),
        (build::genome(vec![0, 0, 0]), Some(2.0)),
        (build::genome(vec![0, 0, 0]), Some(3.0)),
        (build::genome(vec![0, 0, 0]), None),
    ]);
    assert_eq!(population.fitness_score_count(), 3);
    assert!(relative_eq!(population.fitness_score_mean(), 2.0));
    assert!(relative_eq!(
        population.fitness_score_stddev(),
        (2.0f64 / 3.0).sqrt(),
        epsilon = 1e-9
    ));
    assert_eq!(
        population.best_fitness_score(FitnessOrdering::Maximize),
        Some(3.0)
    );
    assert_eq!(
        population.best_fitness_score(FitnessOrdering::Minimize),
        Some(1.0)
    );
}

#[test]
fn clone_then_evaluate_yields_identical_fitness_for_pure_fitness() {
    let genotype = small_genotype();
    let mut fitness = SumAlleles;
    let mut population: Population<IntegerGenotype> = Population::new(4, 2);
    let source = population.insert(build::genome(vec![3, 2, 1]));
    let clone = population.clone_entity(source);

    // force both through the fitness function from scratch
    population.entity_mut(source).fitness = None;
    population.entity_mut(clone).fitness = None;
    let rejected = fitness.call_for_population(&genotype, &mut population, None);
    assert!(rejected.is_empty());
    assert_eq!(
        population.entity(source).fitness,
        population.entity(clone).fitness
    );
}

#[test]
fn clear_releases_everything() {
    let mut population: Population<IntegerGenotype> = build::population(vec![
        build::genome(vec![1, 2, 3]),
        build::genome(vec![4, 5, 6]),
    ]);
    population.clear();
    assert_eq!(population.size(), 0);
    population.assert_invariants();

    // the store stays usable after extinction
    population.insert(build::genome(vec![7, 8, 9]));
    assert_eq!(population.size(), 1);
}
