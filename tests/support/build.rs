use evolutionary_algorithm::fitness::FitnessValue;
use evolutionary_algorithm::genotype::Genotype;
use evolutionary_algorithm::population::Population;

/// A single-chromosome genome.
#[allow(dead_code)]
pub fn genome<C>(chromosome: C) -> Vec<C> {
    vec![chromosome]
}

/// A population holding the given genomes, in insertion order, with headroom for offspring.
#[allow(dead_code)]
pub fn population<G: Genotype>(genomes: Vec<Vec<G::Chromosome>>) -> Population<G> {
    let stable_size = genomes.len().max(1);
    let mut population = Population::new(stable_size * 3 + 4, stable_size);
    for genome in genomes {
        population.insert(genome);
    }
    population
}

/// As [population], but with pre-assigned fitness scores.
#[allow(dead_code)]
pub fn population_with_fitness<G: Genotype>(
    data: Vec<(Vec<G::Chromosome>, Option<FitnessValue>)>,
) -> Population<G> {
    let stable_size = data.len().max(1);
    let mut population = Population::new(stable_size * 3 + 4, stable_size);
    for (genome, fitness) in data {
        let slot = population.insert(genome);
        population.entity_mut(slot).fitness = fitness;
    }
    population
}
