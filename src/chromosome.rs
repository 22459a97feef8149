//! Chromosome storage, one ordered sequence of alleles.
//!
//! The store and the generic operators treat chromosomes through this trait only, so the actual
//! representation can be one-allele-per-word (`Vec<Allele>`) or packed bits
//! ([FixedBitSet](fixedbitset::FixedBitSet)). The allele semantics live in the
//! [Genotype](crate::genotype::Genotype).
use crate::allele::Allele;
use fixedbitset::FixedBitSet;
use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::ops::Range;

/// Storage contract for a single chromosome.
pub trait Chromosome: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap the allele at `index` between two chromosomes.
    fn swap_allele(&mut self, other: &mut Self, index: usize);

    /// Swap the allele range `[range.start, range.end)` between two chromosomes.
    fn swap_range(&mut self, other: &mut Self, range: Range<usize>);

    /// Swap the tail `[index, len)` between two chromosomes.
    fn swap_tail(&mut self, other: &mut Self, index: usize) {
        self.swap_range(other, index..self.len());
    }

    /// Approximate equality per allele (exact for discrete allele types).
    fn eq_approx(&self, other: &Self, epsilon: f64) -> bool;

    /// A hashed key for the allele at `index`, used for per-locus mode counting in the
    /// convergence metrics.
    fn allele_key(&self, index: usize) -> u64;

    /// Feed the full allele sequence into a hasher, used for genome identity pre-checks.
    fn hash_alleles<H: Hasher>(&self, hasher: &mut H);
}

impl<T: Allele> Chromosome for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn swap_allele(&mut self, other: &mut Self, index: usize) {
        std::mem::swap(&mut self[index], &mut other[index]);
    }

    fn swap_range(&mut self, other: &mut Self, range: Range<usize>) {
        self[range.clone()].swap_with_slice(&mut other[range]);
    }

    fn eq_approx(&self, other: &Self, epsilon: f64) -> bool {
        self.as_slice().len() == other.as_slice().len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(&a, &b)| T::approx_eq(a, b, epsilon))
    }

    fn allele_key(&self, index: usize) -> u64 {
        let mut hasher = FxHasher::default();
        T::hash_slice(&self[index..index + 1], &mut hasher);
        hasher.finish()
    }

    fn hash_alleles<H: Hasher>(&self, hasher: &mut H) {
        T::hash_slice(self, hasher);
    }
}

impl Chromosome for FixedBitSet {
    fn len(&self) -> usize {
        FixedBitSet::len(self)
    }

    fn swap_allele(&mut self, other: &mut Self, index: usize) {
        let (a, b) = (self.contains(index), other.contains(index));
        self.set(index, b);
        other.set(index, a);
    }

    fn swap_range(&mut self, other: &mut Self, range: Range<usize>) {
        for index in range {
            self.swap_allele(other, index);
        }
    }

    fn eq_approx(&self, other: &Self, _epsilon: f64) -> bool {
        self == other
    }

    fn allele_key(&self, index: usize) -> u64 {
        self.contains(index) as u64
    }

    fn hash_alleles<H: Hasher>(&self, hasher: &mut H) {
        hasher.write_usize(FixedBitSet::len(self));
        for index in self.ones() {
            hasher.write_usize(index);
        }
    }
}
