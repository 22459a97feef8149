pub mod build;
pub mod inspect;

#[allow(unused_imports)]
pub use approx::relative_eq;
#[allow(unused_imports)]
pub use evolutionary_algorithm::entity::Entity;
#[allow(unused_imports)]
pub use evolutionary_algorithm::genotype::{
    BitGenotype, BooleanGenotype, CharacterGenotype, Genotype, IntegerGenotype, RealGenotype,
};
#[allow(unused_imports)]
pub use evolutionary_algorithm::population::Population;
#[allow(unused_imports)]
pub use rand::rngs::SmallRng;
#[allow(unused_imports)]
pub use rand::SeedableRng;
