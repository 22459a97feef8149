pub use super::best_of_two::BestOfTwo as SelectBestOfTwo;
pub use super::every::Every as SelectEvery;
pub use super::random::Random as SelectRandom;
pub use super::random_rank::RandomRank as SelectRandomRank;
pub use super::roulette::Roulette as SelectRoulette;
pub use super::sus::Sus as SelectSus;
pub use super::Select;

use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Population;
use rand::Rng;

#[derive(Clone, Debug)]
pub enum Wrapper<G: Genotype> {
    Random(SelectRandom<G>),
    Every(SelectEvery<G>),
    RandomRank(SelectRandomRank<G>),
    BestOfTwo(SelectBestOfTwo<G>),
    Roulette(SelectRoulette<G>),
    Sus(SelectSus<G>),
}

impl<G: Genotype> Select for Wrapper<G> {
    type Genotype = G;

    fn prepare<R: Rng>(
        &mut self,
        population: &Population<G>,
        fitness_ordering: FitnessOrdering,
        parents: usize,
        draws: usize,
        rng: &mut R,
    ) {
        match self {
            Wrapper::Random(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
            Wrapper::Every(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
            Wrapper::RandomRank(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
            Wrapper::BestOfTwo(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
            Wrapper::Roulette(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
            Wrapper::Sus(select) => {
                select.prepare(population, fitness_ordering, parents, draws, rng)
            }
        }
    }

    fn select_one<R: Rng>(&mut self, population: &Population<G>, rng: &mut R) -> Option<usize> {
        match self {
            Wrapper::Random(select) => select.select_one(population, rng),
            Wrapper::Every(select) => select.select_one(population, rng),
            Wrapper::RandomRank(select) => select.select_one(population, rng),
            Wrapper::BestOfTwo(select) => select.select_one(population, rng),
            Wrapper::Roulette(select) => select.select_one(population, rng),
            Wrapper::Sus(select) => select.select_one(population, rng),
        }
    }
}

impl<G: Genotype> From<SelectRandom<G>> for Wrapper<G> {
    fn from(select: SelectRandom<G>) -> Self {
        Wrapper::Random(select)
    }
}
impl<G: Genotype> From<SelectEvery<G>> for Wrapper<G> {
    fn from(select: SelectEvery<G>) -> Self {
        Wrapper::Every(select)
    }
}
impl<G: Genotype> From<SelectRandomRank<G>> for Wrapper<G> {
    fn from(select: SelectRandomRank<G>) -> Self {
        Wrapper::RandomRank(select)
    }
}
impl<G: Genotype> From<SelectBestOfTwo<G>> for Wrapper<G> {
    fn from(select: SelectBestOfTwo<G>) -> Self {
        Wrapper::BestOfTwo(select)
    }
}
impl<G: Genotype> From<SelectRoulette<G>> for Wrapper<G> {
    fn from(select: SelectRoulette<G>) -> Self {
        Wrapper::Roulette(select)
    }
}
impl<G: Genotype> From<SelectSus<G>> for Wrapper<G> {
    fn from(select: SelectSus<G>) -> Self {
        Wrapper::Sus(select)
    }
}
