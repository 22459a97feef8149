pub use super::allele_mixing::AlleleMixing as CrossoverAlleleMixing;
pub use super::chromosome_single_point::ChromosomeSinglePoint as CrossoverChromosomeSinglePoint;
pub use super::double_point::DoublePoint as CrossoverDoublePoint;
pub use super::mixing::Mixing as CrossoverMixing;
pub use super::single_point::SinglePoint as CrossoverSinglePoint;
pub use super::Crossover;

use crate::genotype::Genotype;
use rand::Rng;

#[derive(Clone, Debug)]
pub enum Wrapper<G: Genotype> {
    SinglePoint(CrossoverSinglePoint<G>),
    DoublePoint(CrossoverDoublePoint<G>),
    Mixing(CrossoverMixing<G>),
    AlleleMixing(CrossoverAlleleMixing<G>),
    ChromosomeSinglePoint(CrossoverChromosomeSinglePoint<G>),
}

impl<G: Genotype> Crossover for Wrapper<G> {
    type Genotype = G;

    fn call<R: Rng>(
        &self,
        genotype: &G,
        daughter: &mut [G::Chromosome],
        son: &mut [G::Chromosome],
        rng: &mut R,
    ) {
        match self {
            Wrapper::SinglePoint(crossover) => crossover.call(genotype, daughter, son, rng),
            Wrapper::DoublePoint(crossover) => crossover.call(genotype, daughter, son, rng),
            Wrapper::Mixing(crossover) => crossover.call(genotype, daughter, son, rng),
            Wrapper::AlleleMixing(crossover) => crossover.call(genotype, daughter, son, rng),
            Wrapper::ChromosomeSinglePoint(crossover) => {
                crossover.call(genotype, daughter, son, rng)
            }
        }
    }
}

impl<G: Genotype> From<CrossoverSinglePoint<G>> for Wrapper<G> {
    fn from(crossover: CrossoverSinglePoint<G>) -> Self {
        Wrapper::SinglePoint(crossover)
    }
}
impl<G: Genotype> From<CrossoverDoublePoint<G>> for Wrapper<G> {
    fn from(crossover: CrossoverDoublePoint<G>) -> Self {
        Wrapper::DoublePoint(crossover)
    }
}
impl<G: Genotype> From<CrossoverMixing<G>> for Wrapper<G> {
    fn from(crossover: CrossoverMixing<G>) -> Self {
        Wrapper::Mixing(crossover)
    }
}
impl<G: Genotype> From<CrossoverAlleleMixing<G>> for Wrapper<G> {
    fn from(crossover: CrossoverAlleleMixing<G>) -> Self {
        Wrapper::AlleleMixing(crossover)
    }
}
impl<G: Genotype> From<CrossoverChromosomeSinglePoint<G>> for Wrapper<G> {
    fn from(crossover: CrossoverChromosomeSinglePoint<G>) -> Self {
        Wrapper::ChromosomeSinglePoint(crossover)
    }
}
