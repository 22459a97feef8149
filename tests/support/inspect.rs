use evolutionary_algorithm::fitness::FitnessValue;
use evolutionary_algorithm::genotype::Genotype;
use evolutionary_algorithm::population::Population;

/// The genomes in rank order.
#[allow(dead_code)]
pub fn population<G: Genotype>(population: &Population<G>) -> Vec<Vec<G::Chromosome>> {
    population
        .iter_ranked()
        .map(|entity| entity.genome.clone())
        .collect()
}

/// The (genome, fitness) pairs in rank order.
#[allow(dead_code)]
pub fn population_with_fitness<G: Genotype>(
    population: &Population<G>,
) -> Vec<(Vec<G::Chromosome>, Option<FitnessValue>)> {
    population
        .iter_ranked()
        .map(|entity| (entity.genome.clone(), entity.fitness))
        .collect()
}

/// The fitness scores in rank order.
#[allow(dead_code)]
pub fn fitness_scores<G: Genotype>(population: &Population<G>) -> Vec<Option<FitnessValue>> {
    population.iter_ranked().map(|entity| entity.fitness).collect()
}

/// The entity ids in rank order.
#[allow(dead_code)]
pub fn ids<G: Genotype>(population: &Population<G>) -> Vec<usize> {
    population.iter_ranked().map(|entity| entity.id).collect()
}
