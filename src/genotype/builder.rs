use super::Genotype;
use std::ops::RangeInclusive;

/// Error returned when a genotype builder has invalid or missing configuration.
/// Contains a descriptive message about what went wrong (e.g. missing chromosome_length,
/// missing allele_range).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

/// Generic builder for all genotypes. Which fields are required is decided by the genotype's
/// `TryFrom<Builder>` implementation.
#[derive(Clone, Debug)]
pub struct Builder<G: Genotype> {
    pub num_chromosomes: usize,
    pub chromosome_length: Option<usize>,
    pub allele_range: Option<RangeInclusive<G::Allele>>,
    pub seed_genes_list: Vec<Vec<G::Chromosome>>,
}

impl<G: Genotype> Builder<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_chromosomes(mut self, num_chromosomes: usize) -> Self {
        self.num_chromosomes = num_chromosomes;
        self
    }

    pub fn with_chromosome_length(mut self, chromosome_length: usize) -> Self {
        self.chromosome_length = Some(chromosome_length);
        self
    }

    pub fn with_allele_range(mut self, allele_range: RangeInclusive<G::Allele>) -> Self {
        self.allele_range = Some(allele_range);
        self
    }

    pub fn with_seed_genes_list(mut self, seed_genes_list: Vec<Vec<G::Chromosome>>) -> Self {
        self.seed_genes_list = seed_genes_list;
        self
    }

    pub fn build(self) -> Result<G, <G as TryFrom<Builder<G>>>::Error> {
        self.try_into()
    }
}

impl<G: Genotype> Default for Builder<G> {
    fn default() -> Self {
        Self {
            num_chromosomes: 1,
            chromosome_length: None,
            allele_range: None,
            seed_genes_list: vec![],
        }
    }
}
