//! The adapt operator: a local optimization applied to entities under the Baldwin and Lamarck
//! schemes.
//!
//! The engine hands the operator a mutable copy of the entity's genome. The operator improves it
//! in place and returns the adapted fitness; the engine then decides what to keep: under the
//! Lamarck schemes the adapted genome is written back, under the Baldwin schemes only the
//! adapted fitness is. Returning `None` discards the entity, mirroring evaluation rejection.
//!
//! There are no built-in implementations; embedding applications supply their own local search.
use crate::fitness::FitnessValue;
use crate::genotype::Genotype;
use rand::Rng;
use std::marker::PhantomData;

pub trait Adapt: Clone + Send + Sync + std::fmt::Debug {
    type Genotype: Genotype;

    fn call<R: Rng>(
        &mut self,
        genotype: &Self::Genotype,
        genome: &mut Vec<<Self::Genotype as Genotype>::Chromosome>,
        rng: &mut R,
    ) -> Option<FitnessValue>;
}

/// Placeholder for the Darwin scheme, where no adapt operator runs. Discards every entity it is
/// called on; the engine builders guarantee it is never called.
#[derive(Clone, Debug)]
pub struct AdaptNoop<G: Genotype>(PhantomData<G>);

impl<G: Genotype> AdaptNoop<G> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<G: Genotype> Default for AdaptNoop<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genotype> Adapt for AdaptNoop<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &mut self,
        _genotype: &Self::Genotype,
        _genome: &mut Vec<G::Chromosome>,
        _rng: &mut R,
    ) -> Option<FitnessValue> {
        None
    }
}
