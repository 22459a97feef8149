//! A candidate solution: genotype data plus cached fitness and an optional phenotype handle.
use crate::chromosome::Chromosome;
use crate::fitness::FitnessValue;
use crate::genotype::Genotype;
use rustc_hash::FxHasher;
use std::any::Any;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

/// User-owned phenotype handle, shared between cloned entities. Cloning the handle increments the
/// reference count, dropping the last owner releases the phenotype.
pub type Phenotype = Arc<dyn Any + Send + Sync>;

/// A single candidate solution in a [Population](crate::population::Population).
///
/// * `id` is stable and unique for the lifetime of the entity slot, reused slots receive fresh ids
/// * `fitness` is `None` until the entity has been evaluated, so an unevaluated entity can never
///   be confused with an evaluated-but-poor one
/// * `parent` marks entities that were alive at the start of the current generation, which the
///   elitism policies act on
#[derive(Clone)]
pub struct Entity<G: Genotype> {
    pub id: usize,
    pub genome: Vec<G::Chromosome>,
    pub fitness: Option<FitnessValue>,
    pub phenotype: Option<Phenotype>,
    pub parent: bool,
}

impl<G: Genotype> Entity<G> {
    pub fn new(id: usize, genome: Vec<G::Chromosome>) -> Self {
        Self {
            id,
            genome,
            fitness: None,
            phenotype: None,
            parent: false,
        }
    }

    /// Overwrite this entity's genome, fitness and phenotype with the source's. The phenotype is
    /// shared, not duplicated. The id is kept.
    pub fn copy_from(&mut self, source: &Entity<G>) {
        self.genome.clone_from(&source.genome);
        self.fitness = source.fitness;
        self.phenotype = source.phenotype.clone();
    }

    /// Zero the genome and release the cached fitness and phenotype.
    pub fn blank(&mut self, genotype: &G) {
        self.genome = genotype.zero_genome();
        self.fitness = None;
        self.phenotype = None;
    }

    pub fn eq_genome(&self, other: &Entity<G>) -> bool {
        self.genome == other.genome
    }

    /// Hash of the full genome, used as a cheap pre-check for pairwise genome identity.
    pub fn genome_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for chromosome in &self.genome {
            chromosome.hash_alleles(&mut hasher);
        }
        hasher.finish()
    }
}

impl<G: Genotype> fmt::Debug for Entity<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("fitness", &self.fitness)
            .field("genome", &self.genome)
            .field("phenotype", &self.phenotype.is_some())
            .field("parent", &self.parent)
            .finish()
    }
}
