//! Placeholder fitness functions for documentation and tests.
use super::{Fitness, FitnessValue};
use crate::entity::Entity;
use crate::genotype::{BitGenotype, BooleanGenotype, IntegerGenotype, RealGenotype};

/// Counts the true values over all chromosomes of a boolean genome.
#[derive(Clone, Debug)]
pub struct CountTrue;
impl Fitness for CountTrue {
    type Genotype = BooleanGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue> {
        Some(
            entity
                .genome
                .iter()
                .flat_map(|chromosome| chromosome.iter())
                .filter(|&&value| value)
                .count() as FitnessValue,
        )
    }
}

/// Counts the set bits over all chromosomes of a bit genome.
#[derive(Clone, Debug)]
pub struct CountOnes;
impl Fitness for CountOnes {
    type Genotype = BitGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue> {
        Some(
            entity
                .genome
                .iter()
                .map(|chromosome| chromosome.count_ones(..))
                .sum::<usize>() as FitnessValue,
        )
    }
}

/// Sums the alleles of an integer genome.
#[derive(Clone, Debug)]
pub struct SumAlleles;
impl Fitness for SumAlleles {
    type Genotype = IntegerGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue> {
        Some(
            entity
                .genome
                .iter()
                .flat_map(|chromosome| chromosome.iter())
                .sum::<i64>() as FitnessValue,
        )
    }
}

/// `1 / (1 + sqrt(sum((target - a)^2)))` over an integer genome, 1.0 when every allele equals
/// the target.
#[derive(Clone, Debug)]
pub struct InverseDistanceToTarget {
    pub target: i64,
}
impl Fitness for InverseDistanceToTarget {
    type Genotype = IntegerGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue> {
        let squared_distance: f64 = entity
            .genome
            .iter()
            .flat_map(|chromosome| chromosome.iter())
            .map(|&allele| ((self.target - allele) as f64).powi(2))
            .sum();
        Some(1.0 / (1.0 + squared_distance.sqrt()))
    }
}

/// The negated sphere function `-sum(x^2)` over a real genome, 0.0 at the origin. Maximizing it
/// drives the genome to the all-zero vector.
#[derive(Clone, Debug)]
pub struct NegativeSphere;
impl Fitness for NegativeSphere {
    type Genotype = RealGenotype;
    fn calculate_for_entity(
        &mut self,
        _genotype: &Self::Genotype,
        entity: &Entity<Self::Genotype>,
    ) -> Option<FitnessValue> {
        Some(
            -entity
                .genome
                .iter()
                .flat_map(|chromosome| chromosome.iter())
                .map(|&allele| allele * allele)
                .sum::<f64>(),
        )
    }
}
