pub use super::gaussian::Gaussian as MutateGaussian;
pub use super::multi_point::MultiPoint as MutateMultiPoint;
pub use super::single_point_drift::SinglePointDrift as MutateSinglePointDrift;
pub use super::single_point_random::SinglePointRandom as MutateSinglePointRandom;
pub use super::Mutate;

use crate::genotype::Genotype;
use rand::Rng;

#[derive(Clone, Debug)]
pub enum Wrapper<G: Genotype> {
    SinglePointDrift(MutateSinglePointDrift<G>),
    SinglePointRandom(MutateSinglePointRandom<G>),
    MultiPoint(MutateMultiPoint<G>),
    Gaussian(MutateGaussian<G>),
}

impl<G: Genotype> Mutate for Wrapper<G> {
    type Genotype = G;

    fn call<R: Rng>(&self, genotype: &G, genome: &mut [G::Chromosome], rng: &mut R) {
        match self {
            Wrapper::SinglePointDrift(mutate) => mutate.call(genotype, genome, rng),
            Wrapper::SinglePointRandom(mutate) => mutate.call(genotype, genome, rng),
            Wrapper::MultiPoint(mutate) => mutate.call(genotype, genome, rng),
            Wrapper::Gaussian(mutate) => mutate.call(genotype, genome, rng),
        }
    }

    fn require_gaussian(&self) -> bool {
        match self {
            Wrapper::SinglePointDrift(mutate) => mutate.require_gaussian(),
            Wrapper::SinglePointRandom(mutate) => mutate.require_gaussian(),
            Wrapper::MultiPoint(mutate) => mutate.require_gaussian(),
            Wrapper::Gaussian(mutate) => mutate.require_gaussian(),
        }
    }
}

impl<G: Genotype> From<MutateSinglePointDrift<G>> for Wrapper<G> {
    fn from(mutate: MutateSinglePointDrift<G>) -> Self {
        Wrapper::SinglePointDrift(mutate)
    }
}
impl<G: Genotype> From<MutateSinglePointRandom<G>> for Wrapper<G> {
    fn from(mutate: MutateSinglePointRandom<G>) -> Self {
        Wrapper::SinglePointRandom(mutate)
    }
}
impl<G: Genotype> From<MutateMultiPoint<G>> for Wrapper<G> {
    fn from(mutate: MutateMultiPoint<G>) -> Self {
        Wrapper::MultiPoint(mutate)
    }
}
impl<G: Genotype> From<MutateGaussian<G>> for Wrapper<G> {
    fn from(mutate: MutateGaussian<G>) -> Self {
        Wrapper::Gaussian(mutate)
    }
}
