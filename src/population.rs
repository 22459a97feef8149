//! The population is the owning store for [Entities](Entity): a one-shot allocated slot array
//! plus a rank index ordered best-first.
//!
//! * `max_size` is the capacity ceiling, `stable_size` the steady-state target the engines refill
//!   to each generation; the current size fluctuates between them while offspring exist
//! * every live entity is referenced exactly once by the rank index
//! * slot ids are monotonic and never reused while the original entity is alive; a reclaimed
//!   slot receives a fresh id
use crate::chromosome::Chromosome;
use crate::entity::Entity;
use crate::fitness::{FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use itertools::Itertools;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Population<G: Genotype> {
    slots: Vec<Option<Entity<G>>>,
    rank_index: Vec<usize>,
    free_slots: Vec<usize>,
    next_id: usize,
    pub max_size: usize,
    pub stable_size: usize,
}

impl<G: Genotype> Population<G> {
    pub fn new(max_size: usize, stable_size: usize) -> Self {
        assert!(
            max_size >= stable_size && stable_size > 0,
            "Population requires max_size >= stable_size > 0 (got max_size {}, stable_size {})",
            max_size,
            stable_size
        );
        Self {
            slots: Vec::with_capacity(max_size),
            rank_index: Vec::with_capacity(max_size),
            free_slots: Vec::new(),
            next_id: 0,
            max_size,
            stable_size,
        }
    }

    pub fn size(&self) -> usize {
        self.rank_index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rank_index.is_empty()
    }
    pub fn is_live(&self, slot: usize) -> bool {
        self.slots.get(slot).map_or(false, |slot| slot.is_some())
    }

    /// Take a free slot for a new unevaluated entity with the given genome and a fresh id.
    /// Returns `None` when the population is at max_size capacity.
    pub fn try_insert(&mut self, genome: Vec<G::Chromosome>) -> Option<usize> {
        let slot = if let Some(slot) = self.free_slots.pop() {
            self.slots[slot] = Some(Entity::new(self.next_id, genome));
            slot
        } else if self.slots.len() < self.max_size {
            self.slots.push(Some(Entity::new(self.next_id, genome)));
            self.slots.len() - 1
        } else {
            return None;
        };
        self.next_id += 1;
        self.rank_index.push(slot);
        Some(slot)
    }

    /// As [try_insert](Population::try_insert), but capacity exhaustion is fatal.
    pub fn insert(&mut self, genome: Vec<G::Chromosome>) -> usize {
        match self.try_insert(genome) {
            Some(slot) => slot,
            None => panic!(
                "population is at max_size capacity ({}), cannot allocate a new entity",
                self.max_size
            ),
        }
    }

    /// Take a free slot and zero its genome.
    pub fn spawn(&mut self, genotype: &G) -> usize {
        self.insert(genotype.zero_genome())
    }

    /// Release the entity: the phenotype handle is dropped, the slot is marked free and removed
    /// from the rank index. The relative order of the remaining ranks is preserved.
    pub fn release(&mut self, slot: usize) {
        assert!(self.is_live(slot), "entity slot {} is not allocated", slot);
        self.slots[slot] = None;
        self.free_slots.push(slot);
        if let Some(position) = self.rank_index.iter().position(|&ranked| ranked == slot) {
            self.rank_index.remove(position);
        }
    }

    /// Release the entity at the given rank. The relative order of the remaining ranks is
    /// preserved.
    pub fn release_rank(&mut self, rank: usize) {
        let slot = self.rank_index.remove(rank);
        self.slots[slot] = None;
        self.free_slots.push(slot);
    }

    /// New entity replicating the source's genome and cached fitness. The phenotype handle is
    /// shared (reference count incremented), not duplicated.
    pub fn clone_entity(&mut self, source_slot: usize) -> usize {
        let source = self.entity(source_slot).clone();
        let slot = self.insert(source.genome);
        let entity = self.entity_mut(slot);
        entity.fitness = source.fitness;
        entity.phenotype = source.phenotype;
        slot
    }

    /// Overwrite the destination entity with the source's genome, fitness and (shared) phenotype.
    /// Destination id and parent marker are kept.
    pub fn copy_entity(&mut self, destination_slot: usize, source_slot: usize) {
        let source = self.entity(source_slot).clone();
        self.entity_mut(destination_slot).copy_from(&source);
    }

    /// Zero the entity's genome and release its cached fitness and phenotype.
    pub fn blank_entity(&mut self, genotype: &G, slot: usize) {
        self.entity_mut(slot).blank(genotype);
    }

    pub fn entity(&self, slot: usize) -> &Entity<G> {
        match self.slots.get(slot).and_then(|slot| slot.as_ref()) {
            Some(entity) => entity,
            None => panic!("entity slot {} is not allocated", slot),
        }
    }
    pub fn entity_mut(&mut self, slot: usize) -> &mut Entity<G> {
        match self.slots.get_mut(slot).and_then(|slot| slot.as_mut()) {
            Some(entity) => entity,
            None => panic!("entity slot {} is not allocated", slot),
        }
    }
    pub fn slot_of_rank(&self, rank: usize) -> usize {
        self.rank_index[rank]
    }
    pub fn entity_of_rank(&self, rank: usize) -> &Entity<G> {
        self.entity(self.rank_index[rank])
    }
    pub fn rank_of_slot(&self, slot: usize) -> Option<usize> {
        self.rank_index.iter().position(|&ranked| ranked == slot)
    }
    pub fn slot_of_id(&self, id: usize) -> Option<usize> {
        self.rank_index
            .iter()
            .copied()
            .find(|&slot| self.entity(slot).id == id)
    }

    pub fn ranked_slots(&self) -> &[usize] {
        &self.rank_index
    }
    pub fn iter_ranked(&self) -> impl Iterator<Item = &Entity<G>> {
        self.rank_index.iter().map(|&slot| self.entity(slot))
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<Entity<G>>] {
        &mut self.slots
    }

    /// Fill the population up to stable_size. User-supplied seed genomes on the genotype are
    /// cycled through when present, otherwise entities are seeded randomly.
    pub fn seed<R: Rng>(&mut self, genotype: &G, rng: &mut R) {
        let seed_genes_list = genotype.seed_genes_list();
        let mut cycle = 0;
        while self.size() < self.stable_size {
            let genome = if seed_genes_list.is_empty() {
                genotype.random_genome(rng)
            } else {
                let genome = seed_genes_list[cycle % seed_genes_list.len()].clone();
                cycle += 1;
                genome
            };
            self.insert(genome);
        }
    }

    /// Fill the population up to stable_size with zero genomes.
    pub fn seed_zero(&mut self, genotype: &G) {
        while self.size() < self.stable_size {
            self.spawn(genotype);
        }
    }

    /// Release every entity (the extinction step); ids stay monotonic across reuse.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.rank_index.clear();
        self.free_slots = (0..self.slots.len()).collect();
    }

    /// Mark every live entity as belonging to the parent generation.
    pub fn mark_parents(&mut self) {
        self.slots
            .iter_mut()
            .flatten()
            .for_each(|entity| entity.parent = true);
    }
    pub fn parent_slots(&self) -> Vec<usize> {
        self.rank_index
            .iter()
            .copied()
            .filter(|&slot| self.entity(slot).parent)
            .collect()
    }

    /// Order the rank index best-first under the given ordering. The sort is stable with ties
    /// broken on the lower (older) entity id, which keeps elitism deterministic. Unevaluated
    /// entities rank last.
    pub fn sort(&mut self, fitness_ordering: FitnessOrdering) {
        let slots = &self.slots;
        self.rank_index.sort_by(|&a, &b| {
            let entity_a = slots[a].as_ref();
            let entity_b = slots[b].as_ref();
            fitness_ordering
                .compare(
                    entity_a.and_then(|entity| entity.fitness),
                    entity_b.and_then(|entity| entity.fitness),
                )
                .then_with(|| {
                    entity_a
                        .map(|entity| entity.id)
                        .cmp(&entity_b.map(|entity| entity.id))
                })
        });
    }

    /// Release the worst-ranked entities until the population is down to target_size.
    /// Assumes a ranked population.
    pub fn truncate(&mut self, target_size: usize) {
        while self.size() > target_size {
            self.release_rank(self.size() - 1);
        }
    }

    /// The best live entity under the given ordering, ties broken on the lower id. Does not
    /// require a ranked population.
    pub fn best_entity(&self, fitness_ordering: FitnessOrdering) -> Option<&Entity<G>> {
        self.iter_ranked().min_by(|a, b| {
            fitness_ordering
                .compare(a.fitness, b.fitness)
                .then_with(|| a.id.cmp(&b.id))
        })
    }

    pub fn fitness_score_count(&self) -> usize {
        self.iter_ranked()
            .filter(|entity| entity.fitness.is_some())
            .count()
    }
    pub fn fitness_score_mean(&self) -> f64 {
        stats::mean(self.iter_ranked().filter_map(|entity| entity.fitness))
    }
    pub fn fitness_score_stddev(&self) -> f64 {
        stats::stddev(self.iter_ranked().filter_map(|entity| entity.fitness))
    }
    pub fn best_fitness_score(&self, fitness_ordering: FitnessOrdering) -> Option<FitnessValue> {
        self.best_entity(fitness_ordering)
            .and_then(|entity| entity.fitness)
    }

    /// Fraction of entity pairs with bitwise identical genomes. Advisory, O(n²) on pairs with a
    /// hash pre-pass.
    pub fn convergence_genotypes(&self) -> f64 {
        let entities: Vec<&Entity<G>> = self.iter_ranked().collect();
        if entities.len() < 2 {
            return 1.0;
        }
        let hashes: Vec<u64> = entities.iter().map(|entity| entity.genome_hash()).collect();
        let mut pairs = 0usize;
        let mut identical = 0usize;
        for (a, b) in (0..entities.len()).tuple_combinations() {
            pairs += 1;
            if hashes[a] == hashes[b] && entities[a].eq_genome(entities[b]) {
                identical += 1;
            }
        }
        identical as f64 / pairs as f64
    }

    /// Per-chromosome equality frequency over all entity pairs.
    pub fn convergence_chromosomes(&self) -> f64 {
        let entities: Vec<&Entity<G>> = self.iter_ranked().collect();
        if entities.len() < 2 {
            return 1.0;
        }
        let num_chromosomes = entities[0].genome.len();
        if num_chromosomes == 0 {
            return 1.0;
        }
        let mut comparisons = 0usize;
        let mut equal = 0usize;
        for (a, b) in (0..entities.len()).tuple_combinations() {
            for chromosome in 0..num_chromosomes {
                comparisons += 1;
                if entities[a].genome[chromosome] == entities[b].genome[chromosome] {
                    equal += 1;
                }
            }
        }
        equal as f64 / comparisons as f64
    }

    /// Per-locus mode frequency averaged over all loci. Advisory, O(n·L).
    pub fn convergence_alleles(&self) -> f64 {
        let entities: Vec<&Entity<G>> = self.iter_ranked().collect();
        if entities.is_empty() {
            return 1.0;
        }
        let mut total = 0.0;
        let mut loci = 0usize;
        for chromosome in 0..entities[0].genome.len() {
            for locus in 0..entities[0].genome[chromosome].len() {
                let mut counts: FxHashMap<u64, usize> = FxHashMap::default();
                for entity in &entities {
                    *counts
                        .entry(entity.genome[chromosome].allele_key(locus))
                        .or_insert(0) += 1;
                }
                let mode = counts.values().copied().max().unwrap_or(0);
                total += mode as f64 / entities.len() as f64;
                loci += 1;
            }
        }
        if loci == 0 {
            1.0
        } else {
            total / loci as f64
        }
    }

    /// Audit the store invariants: fatal in debug builds, a logged warning in release builds.
    pub fn assert_invariants(&self) {
        if let Some(violation) = self.invariant_violation() {
            if cfg!(debug_assertions) {
                panic!("population invariant violated: {}", violation);
            } else {
                log::warn!("population invariant violated: {}", violation);
            }
        }
    }

    fn invariant_violation(&self) -> Option<&'static str> {
        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        if live != self.rank_index.len() {
            return Some("rank index does not cover the live entities");
        }
        let mut seen = vec![false; self.slots.len()];
        for &slot in &self.rank_index {
            if !self.is_live(slot) {
                return Some("rank index references a free slot");
            }
            if seen[slot] {
                return Some("rank index references a slot twice");
            }
            seen[slot] = true;
        }
        if self.size() > self.max_size {
            return Some("population exceeds max_size");
        }
        if self.free_slots.len() + live != self.slots.len() {
            return Some("free slot list out of sync");
        }
        None
    }
}

impl<G: Genotype> fmt::Display for Population<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "population:")?;
        writeln!(f, "  size: {} (stable {}, max {})", self.size(), self.stable_size, self.max_size)?;
        writeln!(f, "  fitness score count: {}", self.fitness_score_count())
    }
}
