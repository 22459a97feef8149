mod support;

use evolutionary_algorithm::crossover::{
    Crossover, CrossoverAlleleMixing, CrossoverChromosomeSinglePoint, CrossoverDoublePoint,
    CrossoverMixing, CrossoverSinglePoint, CrossoverWrapper,
};
use evolutionary_algorithm::genotype::{Genotype, IntegerGenotype};
use support::*;

fn genotype(num_chromosomes: usize, chromosome_length: usize) -> IntegerGenotype {
    IntegerGenotype::builder()
        .with_num_chromosomes(num_chromosomes)
        .with_chromosome_length(chromosome_length)
        .with_allele_range(0..=9)
        .build()
        .unwrap()
}

fn mother_and_father(genotype: &IntegerGenotype) -> (Vec<Vec<i64>>, Vec<Vec<i64>>) {
    let mother = vec![vec![1; genotype.chromosome_length()]; genotype.num_chromosomes()];
    let father = vec![vec![2; genotype.chromosome_length()]; genotype.num_chromosomes()];
    (mother, father)
}

/// Every locus of the offspring pair holds exactly the parents' alleles for that locus.
fn assert_complementary(
    mother: &[Vec<i64>],
    father: &[Vec<i64>],
    daughter: &[Vec<i64>],
    son: &[Vec<i64>],
) {
    for chromosome in 0..mother.len() {
        for locus in 0..mother[chromosome].len() {
            let parents = [mother[chromosome][locus], father[chromosome][locus]];
            let children = [daughter[chromosome][locus], son[chromosome][locus]];
            let mut parents_sorted = parents;
            let mut children_sorted = children;
            parents_sorted.sort_unstable();
            children_sorted.sort_unstable();
            assert_eq!(parents_sorted, children_sorted);
        }
    }
}

fn transitions(chromosomes: &[Vec<i64>]) -> usize {
    let flat: Vec<i64> = chromosomes.iter().flatten().copied().collect();
    flat.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

#[test]
fn single_point_cuts_once_over_the_concatenated_loci() {
    let genotype = genotype(2, 8);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverSinglePoint::new();

    for _ in 0..50 {
        let mut daughter = mother.clone();
        let mut son = father.clone();
        crossover.call(&genotype, &mut daughter, &mut son, &mut rng);

        assert_complementary(&mother, &father, &daughter, &son);
        // the daughter leads with mother material, switches to father material exactly once
        assert_eq!(daughter[0][0], 1);
        assert_eq!(son[0][0], 2);
        assert_eq!(transitions(&daughter), 1);
        assert_eq!(transitions(&son), 1);
    }
}

#[test]
fn double_point_swaps_the_middle_segment() {
    let genotype = genotype(1, 10);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverDoublePoint::new();

    for _ in 0..50 {
        let mut daughter = mother.clone();
        let mut son = father.clone();
        crossover.call(&genotype, &mut daughter, &mut son, &mut rng);

        assert_complementary(&mother, &father, &daughter, &son);
        // either a clone (coinciding cuts) or an inner father segment with mother ends
        assert!(transitions(&daughter) <= 2);
        assert_eq!(daughter[0][0], 1);
        assert_eq!(son[0][0], 2);
    }
}

#[test]
fn mixing_swaps_whole_chromosomes() {
    let genotype = genotype(4, 5);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverMixing::new();

    for _ in 0..50 {
        let mut daughter = mother.clone();
        let mut son = father.clone();
        crossover.call(&genotype, &mut daughter, &mut son, &mut rng);

        assert_complementary(&mother, &father, &daughter, &son);
        for chromosome in 0..4 {
            // chromosomes move as units
            assert!(daughter[chromosome] == vec![1; 5] || daughter[chromosome] == vec![2; 5]);
        }
    }
}

#[test]
fn allele_mixing_swaps_per_locus() {
    let genotype = genotype(1, 64);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverAlleleMixing::new();

    let mut daughter = mother.clone();
    let mut son = father.clone();
    crossover.call(&genotype, &mut daughter, &mut son, &mut rng);

    assert_complementary(&mother, &father, &daughter, &son);
    // with 64 independent coin flips both outcomes occur
    assert!(daughter[0].contains(&1));
    assert!(daughter[0].contains(&2));
}

#[test]
fn chromosome_single_point_cuts_every_chromosome() {
    let genotype = genotype(3, 8);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverChromosomeSinglePoint::new();

    for _ in 0..20 {
        let mut daughter = mother.clone();
        let mut son = father.clone();
        crossover.call(&genotype, &mut daughter, &mut son, &mut rng);

        assert_complementary(&mother, &father, &daughter, &son);
        for chromosome in 0..3 {
            // every chromosome starts with mother material and switches exactly once
            assert_eq!(daughter[chromosome][0], 1);
            assert_eq!(
                daughter[chromosome].windows(2).filter(|pair| pair[0] != pair[1]).count(),
                1
            );
        }
    }
}

#[test]
fn wrapper_dispatches() {
    let genotype = genotype(1, 8);
    let (mother, father) = mother_and_father(&genotype);
    let mut rng = SmallRng::seed_from_u64(0);
    let crossover = CrossoverWrapper::from(CrossoverSinglePoint::new());

    let mut daughter = mother.clone();
    let mut son = father.clone();
    crossover.call(&genotype, &mut daughter, &mut son, &mut rng);
    assert_complementary(&mother, &father, &daughter, &son);
}
